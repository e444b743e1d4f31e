//! Format run reports as human-readable text.

use crate::pipeline::{ConvertReport, IndexReport, SmokeReport, ValidateReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a conversion report as human-readable text.
pub fn format_convert_report_text(report: &ConvertReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Conversion")));
    out.push_str(&format!(
        "  Converted: {}\n  Passed through: {}\n  Failed: {}\n",
        report.converted.len(),
        report.passed_through.len(),
        report.failed.len()
    ));
    out.push_str(&format!("  Index: {}\n", report.index_path.display()));

    if !report.duplicates.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Duplicate ids (first occurrence kept)")
        ));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Id", "Kept", "Ignored"]);
        for dup in &report.duplicates {
            table.add_row(vec![
                dup.id.clone(),
                dup.kept.display().to_string(),
                dup.ignored.display().to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if !report.failed.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Failures")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Id", "Error"]);
        for failure in &report.failed {
            table.add_row(vec![failure.id.clone(), failure.error.clone()]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out
}

/// Format a validation report as human-readable text.
pub fn format_validate_report_text(report: &ValidateReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Validation")));
    if report.is_clean() {
        out.push_str(&format!(
            "{} documents checked, no diagnostics.\n",
            report.documents_checked
        ));
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Document", "Check", "Message"]);
    for diag in &report.diagnostics {
        table.add_row(vec![
            diag.document.clone(),
            diag.check.clone(),
            diag.message.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "{} documents checked, {} diagnostics.\n",
        report.documents_checked,
        report.diagnostics.len()
    ));
    out
}

/// Format an index rebuild report as human-readable text.
pub fn format_index_report_text(report: &IndexReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Index")));
    out.push_str(&format!(
        "  Entries: {}\n  Written: {}\n",
        report.entries,
        report.index_path.display()
    ));
    if !report.duplicates.is_empty() {
        out.push_str(&format!(
            "  Duplicate ids ignored: {}\n",
            report.duplicates.len()
        ));
    }
    out
}

/// Format the smoke-test report as human-readable text.
pub fn format_smoke_report_text(report: &SmokeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Smoke test")));
    for (name, passed) in &report.checks {
        let mark = if *passed { "ok" } else { "FAIL" };
        out.push_str(&format!("  [{}] {}\n", mark, name));
    }
    out.push_str(&format!(
        "\nResult: {}\n",
        if report.passed() { "pass" } else { "fail" }
    ));
    out
}
