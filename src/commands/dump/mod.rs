mod execute;
mod output;

use clap::Args;

/// Print the rows of one table or of all tables
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  vet_clinic dump                            # All seven tables in creation order
  vet_clinic dump --table Pet                # A single table
  vet_clinic dump -t staff -o json           # Table names are case-insensitive")]
pub struct DumpCmd {
    /// Table to print (Position, Animal, Owner, Clinic, Staff, Pet, Examination)
    #[arg(short, long)]
    pub table: Option<String>,
}
