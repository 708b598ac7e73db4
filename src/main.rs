use clap::Parser;
use discsort::cli::{Args, run_cli};
use discsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    match run_cli(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::new(args.quiet).error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
