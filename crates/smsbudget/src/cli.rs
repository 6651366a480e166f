//! Terminal rendering for analysis, cost breakdowns and budget state
//!
//! Every printer honors `--format json` by emitting the core type as pretty JSON.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use smsbudget_core::analyzer::{detect_issues, SanitizationReport, SmsAnalysis};
use smsbudget_core::budget::{AlertLevel, BudgetStatus, BudgetWarning, CostTrackerState};
use smsbudget_core::composer::{CostBreakdown, SendDecision};
use smsbudget_core::SmsAnalyzer;
use std::io::Read;

/// Output settings shared by all printers
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub no_color: bool,
}

// ============================================================================
// Input
// ============================================================================

/// Message text from the argument, or stdin when absent or "-"
pub fn read_text(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message text from stdin")?;
            Ok(strip_trailing_newline(buf))
        }
    }
}

/// Drop the single line terminator most editors and `echo` append
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

// ============================================================================
// Formatting helpers
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn new_table(headers: &[&str], output: Output) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if output.no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// `$0.0083` style, four decimals below a dollar
pub fn format_usd(amount: f64) -> String {
    if amount.abs() < 1.0 {
        format!("${:.4}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

fn level_label(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Safe => "safe",
        AlertLevel::Warning => "warning",
        AlertLevel::Exceeded => "exceeded",
    }
}

fn level_cell(level: AlertLevel, output: Output) -> Cell {
    let color = match level {
        AlertLevel::Safe => Color::Green,
        AlertLevel::Warning => Color::Yellow,
        AlertLevel::Exceeded => Color::Red,
    };
    if output.no_color {
        Cell::new(level_label(level))
    } else {
        Cell::new(level_label(level)).fg(color)
    }
}

fn analysis_rows(table: &mut Table, analysis: &SmsAnalysis) {
    let encoding = analysis.encoding();
    table.add_row(vec!["Encoding".to_string(), encoding.label().to_string()]);
    table.add_row(vec!["Length".to_string(), analysis.length.to_string()]);
    table.add_row(vec!["Segments".to_string(), analysis.segments.to_string()]);
    table.add_row(vec![
        "Chars/segment".to_string(),
        analysis.char_limit_per_segment.to_string(),
    ]);
    table.add_row(vec![
        "Cost/recipient".to_string(),
        format_usd(analysis.estimated_cost_usd),
    ]);
}

// ============================================================================
// Printers
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput {
    analysis: SmsAnalysis,
    issues: smsbudget_core::UnicodeIssueReport,
}

pub fn print_analysis(analyzer: &SmsAnalyzer, text: &str, output: Output) -> Result<()> {
    let analysis = analyzer.analyze(text);
    let issues = detect_issues(text);

    if output.json {
        return print_json(&AnalyzeOutput { analysis, issues });
    }

    let mut table = new_table(&["Field", "Value"], output);
    analysis_rows(&mut table, &analysis);
    println!("{table}");

    if issues.has_issues {
        println!();
        for issue in &issues.issues {
            println!("  ! {}", issue);
        }
        println!("  Run `smsbudget sanitize` to convert to GSM-7.");
    }
    Ok(())
}

pub fn print_sanitization(report: &SanitizationReport, output: Output) -> Result<()> {
    if output.json {
        return print_json(report);
    }

    println!("{}", report.sanitized);
    println!();

    let mut table = new_table(&["", "Original", "Sanitized"], output);
    table.add_row(vec![
        "Encoding".to_string(),
        report.before.encoding().label().to_string(),
        report.after.encoding().label().to_string(),
    ]);
    table.add_row(vec![
        "Length".to_string(),
        report.before.length.to_string(),
        report.after.length.to_string(),
    ]);
    table.add_row(vec![
        "Segments".to_string(),
        report.before.segments.to_string(),
        report.after.segments.to_string(),
    ]);
    table.add_row(vec![
        "Cost/recipient".to_string(),
        format_usd(report.before.estimated_cost_usd),
        format_usd(report.after.estimated_cost_usd),
    ]);
    println!("{table}");

    if report.savings_usd > 0.0 {
        println!(
            "Savings: {} per recipient ({:.0}% reduction)",
            format_usd(report.savings_usd),
            report.savings_percent
        );
    } else if !report.changed {
        println!("Already optimal (no changes needed)");
    } else {
        println!("Text cleaned, cost unchanged");
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComposeOutput<'a> {
    breakdown: &'a CostBreakdown,
    budget_warning: Option<&'a BudgetWarning>,
}

pub fn print_breakdown(
    breakdown: &CostBreakdown,
    decision: &SendDecision,
    output: Output,
) -> Result<()> {
    let warning = match decision {
        SendDecision::ConfirmRequired(warning) => Some(warning),
        SendDecision::Proceed => None,
    };

    if output.json {
        return print_json(&ComposeOutput {
            breakdown,
            budget_warning: warning,
        });
    }

    let mut table = new_table(&["Field", "Value"], output);
    table.add_row(vec![
        "Message class".to_string(),
        breakdown.message_class.to_string(),
    ]);
    if breakdown.segments > 0 {
        table.add_row(vec!["Segments".to_string(), breakdown.segments.to_string()]);
    }
    table.add_row(vec![
        "Cost/recipient".to_string(),
        format_usd(breakdown.per_recipient_cost),
    ]);
    table.add_row(vec![
        "Recipients".to_string(),
        breakdown.total_recipients.to_string(),
    ]);
    table.add_row(vec!["Total".to_string(), format_usd(breakdown.total_cost)]);
    println!("{table}");

    if let Some(warning) = warning {
        println!();
        print_warning_text(warning);
    }
    Ok(())
}

pub fn print_warning(warning: &BudgetWarning, output: Output) -> Result<()> {
    if output.json {
        return print_json(warning);
    }
    if warning.has_warning {
        print_warning_text(warning);
    } else {
        println!("Within budget.");
    }
    Ok(())
}

fn print_warning_text(warning: &BudgetWarning) {
    println!("WARNING: {}", warning.message);
    println!(
        "  Current: {}  Budget: {}  After send: {}",
        format_usd(warning.current_cost),
        format_usd(warning.budget_limit),
        format_usd(warning.projected_new_total)
    );
}

pub fn print_status(status: &BudgetStatus, output: Output) -> Result<()> {
    if output.json {
        return print_json(status);
    }

    let mut table = new_table(&["Period", "Spent", "Budget", "Used", "Status"], output);
    for period in status.periods() {
        table.add_row(vec![
            Cell::new(period.period.as_str()),
            Cell::new(format_usd(period.current_cost)),
            Cell::new(format_usd(period.budget_limit)),
            Cell::new(format!("{:.1}%", period.percentage)),
            level_cell(period.level, output),
        ]);
    }
    table.add_row(vec![
        Cell::new("lifetime"),
        Cell::new(format_usd(status.lifetime_cost)),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new("-"),
    ]);
    println!("{table}");
    println!("Overall: {}", level_label(status.worst_level()));
    Ok(())
}

pub fn print_state(state: &CostTrackerState, output: Output) -> Result<()> {
    if output.json {
        return print_json(state);
    }

    let mut table = new_table(&["Period", "Spent", "Since"], output);
    table.add_row(vec![
        "weekly".to_string(),
        format_usd(state.weekly_cost),
        state.last_reset_week.to_string(),
    ]);
    table.add_row(vec![
        "monthly".to_string(),
        format_usd(state.monthly_cost),
        state.last_reset_month.clone(),
    ]);
    table.add_row(vec![
        "yearly".to_string(),
        format_usd(state.yearly_cost),
        state.last_reset_year.clone(),
    ]);
    table.add_row(vec![
        "lifetime".to_string(),
        format_usd(state.lifetime_cost),
        "-".to_string(),
    ]);
    println!("{table}");
    Ok(())
}
