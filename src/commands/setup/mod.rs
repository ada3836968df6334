mod cli_tests;
mod execute;
mod execute_tests;
mod output;

use clap::Args;

/// Reset, create and seed the clinic schema
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  vet_clinic setup                           # Rebuild ./test.db from scratch
  vet_clinic setup --db clinic.db            # Rebuild a specific SQLite file
  vet_clinic setup --dry-run                 # Print the plan and its SQL
  vet_clinic setup --skip-demo               # Seed only, no demo mutations
  vet_clinic --db postgres://vet@localhost/clinic setup -v")]
pub struct SetupCmd {
    /// Print the planned steps and statements without connecting
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Skip the owner registration and manager assignment after seeding
    #[arg(long, default_value_t = false)]
    pub skip_demo: bool,
}
