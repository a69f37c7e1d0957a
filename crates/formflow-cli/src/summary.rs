//! Human-readable table rendering for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use formflow_model::{IssueSeverity, ValidationReport};

use crate::commands::{AnalyzeResult, PreviewResult};

pub fn print_validation(report: &ValidationReport) {
    if report.issues.is_empty() {
        println!("Structure OK: no issues found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Question"),
        header_cell("Reference"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for issue in &report.issues {
        let severity = match issue.severity {
            IssueSeverity::Error => Cell::new("error").fg(comfy_table::Color::Red),
            IssueSeverity::Warning => Cell::new("warning").fg(comfy_table::Color::Yellow),
        };
        table.add_row(vec![
            severity,
            Cell::new(&issue.code),
            Cell::new(
                issue
                    .question_id
                    .as_ref()
                    .map(|id| id.as_str())
                    .unwrap_or("-"),
            ),
            Cell::new(issue.reference.as_ref().map(|id| id.as_str()).unwrap_or("-")),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
    println!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
}

pub fn print_analysis(result: &AnalyzeResult) {
    if result.unreachable.is_empty() {
        println!("No unreachable questions.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Unreachable question")]);
        apply_table_style(&mut table);
        for id in &result.unreachable {
            table.add_row(vec![Cell::new(id.as_str())]);
        }
        println!("{table}");
    }
    if let Some(dependents) = &result.dependents {
        if dependents.dependents.is_empty() {
            println!(
                "Question {} has no dependents; safe to delete.",
                dependents.question_id
            );
        } else {
            println!(
                "Deleting {} would orphan {} question(s):",
                dependents.question_id,
                dependents.dependents.len()
            );
            let mut table = Table::new();
            table.set_header(vec![
                header_cell("Question"),
                header_cell("Kind"),
                header_cell("Active"),
            ]);
            apply_table_style(&mut table);
            for question in &dependents.dependents {
                table.add_row(vec![
                    Cell::new(question.id.as_str()),
                    Cell::new(question.kind.as_str()),
                    Cell::new(if question.active { "yes" } else { "no" })
                        .set_alignment(CellAlignment::Center),
                ]);
            }
            println!("{table}");
        }
    }
}

pub fn print_preview(result: &PreviewResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Question"), header_cell("State")]);
    apply_table_style(&mut table);
    for id in &result.resolution.visible {
        let state = if result.resolution.completed.contains(id) {
            "completed"
        } else {
            "visible"
        };
        table.add_row(vec![Cell::new(id.as_str()), Cell::new(state)]);
    }
    println!("{table}");
    println!(
        "{} of {} active question(s) visible, {} completed",
        result.resolution.visible.len(),
        result.active_count,
        result.resolution.completed.len()
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
