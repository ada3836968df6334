mod execute;
mod output;

use clap::Args;

/// Run the demonstration queries
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  vet_clinic report                          # Queries for Catherine Williams
  vet_clinic report --owner \"Milan Diaz\"     # Pet count for another owner
  vet_clinic report -o json                  # Machine-readable sections")]
pub struct ReportCmd {
    /// Owner whose pets are counted ("First Last", substring match)
    #[arg(long, default_value = "Catherine Williams")]
    pub owner: String,
}
