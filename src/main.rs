use clap::Parser;
use pycensus::cli::CliArgs;
use pycensus::run_census;

fn main() {
    let args = CliArgs::parse();

    if let Err(err) = run_census(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
