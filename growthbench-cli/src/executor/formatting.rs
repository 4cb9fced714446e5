//! Output Formatting
//!
//! Human-readable output formatting for measurement reports.
//!
//! Generates terminal-friendly output with:
//! - One block per candidate with a status icon (✓ complete, ⊘ partial)
//! - Total duration and growth-rate score
//! - Most severe matching domain, followed by every other match
//! - Per-size averages

use growthbench_report::{CandidateReport, CandidateStatus, Report};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("GrowthBench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for result in &report.results {
        format_candidate(&mut output, result);
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Summary: {} candidates, {} complete, {} partial ({:.2}s)\n",
        report.summary.total_candidates,
        report.summary.complete,
        report.summary.partial,
        report.summary.total_duration_ms / 1000.0
    ));
    if report.summary.truncated {
        output.push_str("Time budget exceeded: results are incomplete\n");
    }

    output
}

fn format_candidate(output: &mut String, result: &CandidateReport) {
    let status_icon = match result.status {
        CandidateStatus::Complete => "✓",
        CandidateStatus::Partial => "⊘",
    };
    output.push_str(&format!("  {} {}\n", status_icon, result.name));

    let complexity = result
        .complexity
        .map(|c| format!("{:.4}", c))
        .unwrap_or_else(|| "n/a".to_string());
    output.push_str(&format!(
        "      duration: {}  complexity: {}\n",
        format_ms(result.duration_ms),
        complexity
    ));

    match result.domains.split_first() {
        Some((primary, others)) => {
            output.push_str(&format!(
                "      domain: {} {} ({})\n",
                primary.notation, primary.description, primary.rating
            ));
            if !others.is_empty() {
                let also: Vec<String> = others
                    .iter()
                    .map(|d| format!("{} ({})", d.notation, d.rating))
                    .collect();
                output.push_str(&format!("      also matches: {}\n", also.join(", ")));
            }
        }
        None if result.status == CandidateStatus::Partial => {
            output.push_str("      domain: not estimated (measurement interrupted)\n");
        }
        None => {
            output.push_str("      domain: unknown (fewer than 2 sizes)\n");
        }
    }

    if !result.averages.is_empty() {
        let averages: Vec<String> = result
            .averages
            .iter()
            .map(|a| format!("{}={}", a.size, format_ms(a.average_ms)))
            .collect();
        output.push_str(&format!("      averages: {}\n", averages.join("  ")));
    }

    output.push('\n');
}

/// Format milliseconds with a unit suited to the magnitude
pub fn format_ms(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else if ms >= 1.0 {
        format!("{:.2} ms", ms)
    } else if ms >= 0.001 {
        format!("{:.2} µs", ms * 1000.0)
    } else {
        format!("{:.2} ns", ms * 1_000_000.0)
    }
}
