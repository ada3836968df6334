//! Output formatting for report command results.

use crate::commands::report::execute::ReportResult;
use crate::output::{format_dumps, Outputable};

impl Outputable for ReportResult {
    fn to_table(&self) -> String {
        format_dumps(&self.sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Value;
    use crate::types::TableDump;
    use rstest::{fixture, rstest};

    const PET_COUNT_TABLE: &str = "\
Pets owned by Catherine Williams
--------------------------------
   Catherine Williams' No. of Pets
0                                1";

    #[fixture]
    fn pet_count() -> ReportResult {
        ReportResult {
            owner: "Catherine Williams".to_string(),
            sections: vec![TableDump {
                title: "Pets owned by Catherine Williams".to_string(),
                headers: vec!["Catherine Williams' No. of Pets".to_string()],
                rows: vec![vec![Value::Integer(1)]],
            }],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: pet_count,
        fixture_type: ReportResult,
        expected: PET_COUNT_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: pet_count,
        fixture_type: ReportResult,
        assertions: {
            "owner": "Catherine Williams",
            "sections": serde_json::json!([{
                "title": "Pets owned by Catherine Williams",
                "headers": ["Catherine Williams' No. of Pets"],
                "rows": [[1]],
            }]),
        },
    }
}
