use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

use vet_clinic::cli::Args;
use vet_clinic::db::DatabaseConfig;
use vet_clinic::logging;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, Box<dyn Error>> {
    let config = DatabaseConfig::resolve(args.db.as_deref())?;
    args.command.run(&config, args.format)
}
