use colored::*;
use dockerfile_linter_core::report::{LintReport, ReportRow, Severity};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Dockerfile Analysis Report";
const HEADERS: [&str; 3] = ["Check", "Severity", "Suggestion"];

/// Print the findings table to the terminal.
pub fn print_report(report: &LintReport) {
    println!("{}", render_report(report));
}

/// Render the findings as a titled three-column table.
pub fn render_report(report: &LintReport) -> String {
    let rows = report.rows();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.width());
        }
    }

    let inner: usize = widths.iter().map(|w| w + 2).sum::<usize>() + widths.len() - 1;
    let mut out = Vec::new();

    out.push(format!("{}{}", " ".repeat(inner.saturating_sub(TITLE.len()) / 2 + 1), TITLE.bold().italic()));
    out.push(border('┏', '━', '┳', '┓', &widths));
    out.push(line(
        '┃',
        &HEADERS.map(|h| h.bold().to_string()),
        &HEADERS,
        &widths,
    ));
    out.push(border('┡', '━', '╇', '┩', &widths));

    for row in &rows {
        let plain = cells(row);
        let styled = [
            row.check.bold().to_string(),
            severity_style(&row.severity),
            row.suggestion.green().to_string(),
        ];
        out.push(line('│', &styled, &plain, &widths));
    }

    out.push(border('└', '─', '┴', '┘', &widths));

    if !report.is_clean() {
        out.push(format!(
            " {} issue(s) found: {} FAIL, {} WARN, {} INFO",
            report.issues.len().to_string().bold(),
            report.count(Severity::Fail),
            report.count(Severity::Warn),
            report.count(Severity::Info),
        ));
    }

    out.join("\n")
}

fn cells(row: &ReportRow) -> [&str; 3] {
    [row.check.as_str(), row.severity.as_str(), row.suggestion.as_str()]
}

fn severity_style(severity: &str) -> String {
    match severity {
        "FAIL" => severity.red().bold().to_string(),
        "WARN" => severity.yellow().bold().to_string(),
        "INFO" => severity.blue().to_string(),
        "OK" => severity.green().bold().to_string(),
        _ => severity.to_string(),
    }
}

fn border(left: char, fill: char, join: char, right: char, widths: &[usize; 3]) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| fill.to_string().repeat(w + 2))
        .collect();
    format!("{}{}{}", left, segments.join(&join.to_string()), right)
}

// Pad using the plain text width; ANSI codes in `styled` take no columns.
fn line<S: AsRef<str>>(edge: char, styled: &[S; 3], plain: &[&str; 3], widths: &[usize; 3]) -> String {
    let mut out = String::new();
    out.push(edge);
    for i in 0..3 {
        let pad = widths[i].saturating_sub(plain[i].width());
        out.push(' ');
        out.push_str(styled[i].as_ref());
        out.push_str(&" ".repeat(pad + 1));
        out.push(edge);
    }
    out
}
