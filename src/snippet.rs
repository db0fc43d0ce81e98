//! Source snippets for error reports
use std::fmt::Write;
use weft_shared::byte_stream::Location;

/// Number of lines shown before and after the offending line
const CONTEXT_LINES: usize = 5;
const MAX_COLUMN: usize = 1000;

/// Renders the lines around `location` with a caret pointing at the offending column
pub fn render(source: &str, location: Location) -> String {
    let lines: Vec<&str> = source.split('\n').collect();
    let last_line = lines.len().saturating_sub(1);
    let line_nr = location.line().saturating_sub(1).min(last_line);
    let col_nr = location.column().saturating_sub(1);

    if col_nr > MAX_COLUMN {
        return "Error is too far to the right to display.\n".to_string();
    }

    let mut out = String::new();
    let first = line_nr.saturating_sub(CONTEXT_LINES);
    let last = (line_nr + CONTEXT_LINES).min(last_line);

    for (idx, line) in lines.iter().enumerate().take(last + 1).skip(first) {
        let _ = writeln!(out, "{:<5}|{}", idx + 1, line);
        if idx == line_nr {
            let _ = writeln!(out, "{:<5}|{}^", "", "-".repeat(col_nr));
        }
    }

    out
}
