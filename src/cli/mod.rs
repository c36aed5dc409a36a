// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Four commands are supported:
//   1. `train`        : fits vocabulary + classifier, writes artifacts
//   2. `ask`          : answers one question
//   3. `chat`         : answers questions from stdin until quit
//   4. `process-data` : cleans a directory of training CSVs
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, Commands, EngineArgs, ProcessDataArgs, TrainArgs};

use crate::application::chat_engine::{ChatEngine, EngineStatus};

#[derive(Parser, Debug)]
#[command(
    name = "medibot",
    version,
    about = "Healthcare chatbot: train a CNN intent classifier, then ask it questions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. The CLI only routes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)       => run_train(args),
            Commands::Ask(args)         => run_ask(args),
            Commands::Chat(args)        => run_chat(args),
            Commands::ProcessData(args) => run_process_data(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let report = TrainUseCase::new(args.into()).execute()?;

    println!(
        "Trained on {} examples ({} classes, {} words).",
        report.examples, report.num_classes, report.vocabulary
    );
    if let Some(last) = report.history.last() {
        println!(
            "Final epoch: train_acc={:.1}% val_acc={:.1}%",
            last.train_acc * 100.0,
            last.val_acc * 100.0
        );
    }
    if let Some(best) = report.history.best_epoch() {
        println!("Best validation loss {:.4} at epoch {}.", best.val_loss, best.epoch);
    }
    println!("Artifacts saved to '{}'.", report.model_dir.display());
    Ok(())
}

fn run_ask(args: AskArgs) -> Result<()> {
    let engine = ChatEngine::new(args.engine.into());
    println!("{}", engine.get_response(&args.question));
    Ok(())
}

fn run_chat(args: EngineArgs) -> Result<()> {
    let engine = ChatEngine::new(args.into());
    if engine.warm_up() == EngineStatus::Unavailable {
        println!("(No trained model found, answering from keyword rules.)");
    }
    println!("Ask a health question. Type 'quit' to leave.");

    let stdin  = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();
        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }
        if question.is_empty() {
            continue;
        }
        println!("{}", engine.get_response(question));
    }
    Ok(())
}

fn run_process_data(args: ProcessDataArgs) -> Result<()> {
    use crate::application::process_data_use_case::ProcessDataUseCase;

    let report = ProcessDataUseCase::new(args.data_dir, args.output_dir).execute()?;
    for f in &report.processed {
        println!("{} → {} ({} rows)", f.source.display(), f.output.display(), f.rows);
    }
    for path in &report.skipped {
        println!("skipped {}", path.display());
    }
    Ok(())
}
