use clap::Parser;
use shelver::cli::{self, Cli};
use shelver::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
