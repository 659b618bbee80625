use std::path::PathBuf;

use clap::Parser;
use geoquiz::{Game, JsonQuestionSource, JsonScoreSink};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long)]
    questions: PathBuf,

    /// Play only the first N questions of the set
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Where finished sessions are recorded
    #[arg(long, default_value = "scores.json")]
    scores: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let source = JsonQuestionSource::new(args.questions);
    let scores = JsonScoreSink::new(args.scores);

    let game = match Game::from_source(&source, args.rounds, Box::new(scores)) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = game.run().await {
        eprintln!("Error running game: {}", e);
        std::process::exit(1);
    }
}
