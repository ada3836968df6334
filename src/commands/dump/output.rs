//! Output formatting for dump command results.

use crate::commands::dump::execute::DumpResult;
use crate::output::{format_dumps, Outputable};

impl Outputable for DumpResult {
    fn to_table(&self) -> String {
        format_dumps(&self.tables)
    }
}
