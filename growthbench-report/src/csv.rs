//! CSV Output
//!
//! One row per candidate and measured size. Candidates without any completed
//! size still get a single row with empty size columns.

use crate::report::{CandidateReport, Report};
use std::fmt::Write;

const HEADER: &str = "name,status,size,average_ms,duration_ms,complexity,notation,rating";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for result in &report.results {
        if result.averages.is_empty() {
            write_row(&mut out, result, None);
        }
        for average in &result.averages {
            write_row(&mut out, result, Some((average.size, average.average_ms)));
        }
    }
    out
}

fn write_row(out: &mut String, result: &CandidateReport, average: Option<(usize, f64)>) {
    let (size, average_ms) = match average {
        Some((size, ms)) => (size.to_string(), ms.to_string()),
        None => (String::new(), String::new()),
    };
    let complexity = result
        .complexity
        .map(|c| format!("{:.4}", c))
        .unwrap_or_default();
    let (notation, rating) = result
        .primary_domain()
        .map(|d| (d.notation.clone(), d.rating.to_string()))
        .unwrap_or_default();

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{},{}",
        escape(&result.name),
        result.status,
        size,
        average_ms,
        result.duration_ms,
        complexity,
        escape(&notation),
        rating
    );
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
