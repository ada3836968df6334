//! Output formatting for setup command results.

use crate::commands::setup::execute::SetupResult;
use crate::output::{format_dumps, Outputable};
use crate::queries::bootstrap::BootstrapReport;

impl Outputable for SetupResult {
    fn to_table(&self) -> String {
        let mut output = format!("Vet Clinic Setup ({})\n\n", self.database);

        if self.dry_run {
            output.push_str("Plan (dry-run):\n");
            for planned in &self.plan {
                output.push_str(&format!("  → {:>2}. {}\n", planned.step, planned.description));
                for sql in &planned.statements {
                    for line in sql.lines() {
                        output.push_str(&format!("         {}\n", line));
                    }
                }
            }
            output.push_str("\nNo changes made (dry-run mode).");
            return output;
        }

        if let Some(report) = &self.report {
            push_report(&mut output, report);
        }
        output.push_str("\nDatabase ready.");
        output
    }
}

fn push_report(output: &mut String, report: &BootstrapReport) {
    output.push_str(&format!("Steps ({}):\n", report.backend));
    for step in &report.steps {
        if step.rows > 0 {
            output.push_str(&format!(
                "  ✓ {:>2}. {} ({} rows)\n",
                step.step, step.description, step.rows
            ));
        } else {
            output.push_str(&format!("  ✓ {:>2}. {}\n", step.step, step.description));
        }
    }

    for mutation in &report.mutations {
        output.push_str(&format!("\n{}\n\nBefore:\n\n", mutation.description));
        output.push_str(&format_dumps(&mutation.before));
        output.push_str("\n\nAfter:\n\n");
        output.push_str(&format_dumps(&mutation.after));
        output.push('\n');
    }

    output.push_str("\nRow counts:\n");
    let width = report
        .table_counts
        .iter()
        .map(|c| c.table.len())
        .max()
        .unwrap_or(0);
    for count in &report.table_counts {
        output.push_str(&format!("  {:<width$}  {:>3}\n", count.table, count.rows, width = width));
    }
}
