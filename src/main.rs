use clap::Parser;
use dirsort::cli::{Cli, run};
use dirsort::output::Reporter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli.directory) {
        Reporter::error(&e.to_string());
        std::process::exit(1);
    }
}
