//! Rendering tables to the text form.

use crate::error::{MailTableError, Result};
use crate::model::mail::{MailEntry, MailTable};
use crate::text::HEADER;

/// Render a single entry as a `{ ... }` block, without a trailing newline.
pub fn render_entry(entry: &MailEntry) -> String {
    let [a, b, c] = entry.flags;
    format!(
        "{{\n\t{} # Message ID\n\t[{a}, {b}, {c}] # Flags\n\t{} # Filename\n}}",
        entry.message_id, entry.file_name
    )
}

/// Render a whole table: header comment, blank line, one block per entry.
pub fn render_table(table: &MailTable) -> String {
    let mut out = format!("{HEADER}\n\n");
    for entry in table {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out
}

/// Check that every value survives a trip through the text form.
///
/// Comments, trimming and line splitting make some strings unrepresentable:
/// anything containing `#` or a line break, with surrounding whitespace, or
/// equal to a lone brace.
pub fn ensure_representable(table: &MailTable) -> Result<()> {
    for (index, entry) in table.iter().enumerate() {
        check_value(&entry.message_id, "message id", index)?;
        check_value(&entry.file_name, "file name", index)?;
    }
    Ok(())
}

fn check_value(value: &str, field: &'static str, index: usize) -> Result<()> {
    let problem = if value.contains('#') {
        "contains '#'"
    } else if value.contains(['\n', '\r']) {
        "contains a line break"
    } else if value.trim() != value {
        "has leading or trailing whitespace"
    } else if value == "{" || value == "}" {
        "is a lone brace"
    } else {
        return Ok(());
    };
    Err(MailTableError::invalid(
        field,
        format!("{value:?} of entry {index} {problem} and cannot be written as text"),
    ))
}
