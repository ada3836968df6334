//! Output formatting for verify command results.

use crate::commands::verify::execute::VerifyResult;
use crate::output::Outputable;

impl Outputable for VerifyResult {
    fn to_table(&self) -> String {
        let mut output = format!("Integrity checks ({})\n\n", self.database);

        let width = self
            .report
            .checks
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);
        for check in &self.report.checks {
            let symbol = if check.passed { "✓" } else { "✗" };
            output.push_str(&format!(
                "  {} {:<width$}  {}\n",
                symbol,
                check.name,
                check.description,
                width = width
            ));
            for violation in &check.violations {
                output.push_str(&format!("      {}\n", violation));
            }
        }

        let total = self.report.checks.len();
        if self.clean {
            output.push_str(&format!("\nAll {} checks passed.", total));
        } else {
            output.push_str(&format!(
                "\n{} of {} checks failed.",
                self.report.failed_count(),
                total
            ));
        }
        output
    }
}
