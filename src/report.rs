//! Output formatting for coverage summaries.

use std::fmt::Write;

use crate::model::Summary;

/// Trait for rendering a parsed summary.
pub trait SummaryFormatter {
    /// Format the summary to a string.
    fn format(&self, summary: &Summary) -> String;
}

/// Plain text formatter matching the layout of `lcov --summary`.
pub struct TextFormatter;

impl SummaryFormatter for TextFormatter {
    fn format(&self, summary: &Summary) -> String {
        let mut out = String::new();

        out.push_str("Summary coverage rate:\n");
        writeln!(out, "  source files: {}", summary.total_files).unwrap();
        writeln!(
            out,
            "  lines.......: {:.1}% ({} of {} lines)",
            summary.line_coverage_rate, summary.covered_lines, summary.total_lines
        )
        .unwrap();

        if summary.total_functions > 0 {
            writeln!(
                out,
                "  functions...: {:.1}% ({} of {} functions)",
                summary.function_coverage_rate, summary.covered_functions, summary.total_functions
            )
            .unwrap();
        } else {
            out.push_str("  functions...: no data found\n");
        }

        if summary.total_branches > 0 {
            writeln!(
                out,
                "  branches....: {:.1}% ({} of {} branches)",
                summary.branch_coverage_rate, summary.covered_branches, summary.total_branches
            )
            .unwrap();
        } else {
            out.push_str("  branches....: no data found\n");
        }

        out
    }
}

/// JSON formatter for machine consumption.
pub struct JsonFormatter;

impl SummaryFormatter for JsonFormatter {
    fn format(&self, summary: &Summary) -> String {
        let mut out =
            serde_json::to_string_pretty(summary).expect("summary serializes to JSON");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRecord;

    fn sample_summary() -> Summary {
        let mut summary = Summary::default();
        summary.fold(FileRecord {
            source_file: "/a.rs".to_string(),
            lines_found: 3,
            lines_hit: 2,
            ..Default::default()
        });
        summary.finish();
        summary
    }

    #[test]
    fn text_report_layout() {
        let text = TextFormatter.format(&sample_summary());
        assert_eq!(
            text,
            "Summary coverage rate:\n\
             \x20 source files: 1\n\
             \x20 lines.......: 66.7% (2 of 3 lines)\n\
             \x20 functions...: no data found\n\
             \x20 branches....: no data found\n"
        );
    }

    #[test]
    fn text_report_with_functions_and_branches() {
        let mut summary = Summary::default();
        summary.total_files = 1;
        summary.total_lines = 4;
        summary.covered_lines = 4;
        summary.total_functions = 2;
        summary.covered_functions = 1;
        summary.total_branches = 8;
        summary.covered_branches = 2;
        summary.finish();

        let text = TextFormatter.format(&summary);
        assert!(text.contains("lines.......: 100.0% (4 of 4 lines)"));
        assert!(text.contains("functions...: 50.0% (1 of 2 functions)"));
        assert!(text.contains("branches....: 25.0% (2 of 8 branches)"));
    }

    #[test]
    fn json_report_round_trips() {
        let json = JsonFormatter.format(&sample_summary());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_files"], 1);
        assert_eq!(value["covered_lines"], 2);
        assert_eq!(value["files"][0]["source_file"], "/a.rs");
    }
}
