//! Parsing the text form back into a table.
//!
//! Parsing is a small line state machine. Outside a block everything but
//! an opening `{` is ignored; inside a block the message id, flags, file
//! name and closing `}` must appear in that order (blank lines allowed).

use tracing::debug;

use crate::error::{MailTableError, Result};
use crate::model::mail::{validate_message_id, MailEntry, MailTable, FLAG_COUNT};

#[derive(Debug)]
enum State {
    OutsideBlock,
    ExpectId {
        opened: usize,
    },
    ExpectFlags {
        opened: usize,
        message_id: String,
    },
    ExpectFilename {
        opened: usize,
        message_id: String,
        flags: [u8; FLAG_COUNT],
    },
    ExpectClose {
        opened: usize,
        entry: MailEntry,
    },
}

/// Parse a table from its text form.
pub fn parse_table(text: &str) -> Result<MailTable> {
    let mut entries = Vec::new();
    let mut state = State::OutsideBlock;
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        last_line = line;

        let blank = raw.trim().is_empty();
        let value = strip_comment(raw);
        state = match state {
            State::OutsideBlock if raw.trim() == "{" => State::ExpectId { opened: line },
            State::OutsideBlock => State::OutsideBlock,
            inside if blank => inside,
            State::ExpectId { opened } => {
                reject_brace(value, line, "message id")?;
                validate_message_id(value)
                    .map_err(|e| MailTableError::malformed(line, e.to_string()))?;
                State::ExpectFlags {
                    opened,
                    message_id: value.to_string(),
                }
            }
            State::ExpectFlags { opened, message_id } => {
                reject_brace(value, line, "flags")?;
                let flags = parse_flags(value)
                    .map_err(|reason| MailTableError::malformed(line, reason))?;
                State::ExpectFilename {
                    opened,
                    message_id,
                    flags,
                }
            }
            State::ExpectFilename {
                opened,
                message_id,
                flags,
            } => {
                reject_brace(value, line, "file name")?;
                let entry = MailEntry::new(message_id, flags, value)
                    .map_err(|e| MailTableError::malformed(line, e.to_string()))?;
                State::ExpectClose { opened, entry }
            }
            State::ExpectClose { opened, entry } => {
                if value != "}" {
                    return Err(MailTableError::malformed(
                        line,
                        format!(
                            "expected '}}' closing the block opened at line {opened}, found {value:?}"
                        ),
                    ));
                }
                debug!(line = opened, message_id = %entry.message_id, "Parsed block");
                entries.push(entry);
                State::OutsideBlock
            }
        };
    }

    match state {
        State::OutsideBlock => Ok(MailTable::new(entries)),
        State::ExpectId { opened }
        | State::ExpectFlags { opened, .. }
        | State::ExpectFilename { opened, .. }
        | State::ExpectClose { opened, .. } => Err(MailTableError::malformed(
            last_line,
            format!("input ends inside the block opened at line {opened}"),
        )),
    }
}

/// Drop a trailing `#` comment and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(value, _)| value).trim()
}

fn reject_brace(value: &str, line: usize, expected: &str) -> Result<()> {
    if value == "{" || value == "}" {
        return Err(MailTableError::malformed(
            line,
            format!("expected {expected}, found '{value}'"),
        ));
    }
    Ok(())
}

/// Parse `[a, b, c]`; the brackets are optional.
fn parse_flags(value: &str) -> std::result::Result<[u8; FLAG_COUNT], String> {
    let inner = value.strip_prefix('[').unwrap_or(value);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != FLAG_COUNT {
        return Err(format!(
            "expected {FLAG_COUNT} flags, found {} in {value:?}",
            parts.len()
        ));
    }

    let mut flags = [0u8; FLAG_COUNT];
    for (slot, part) in flags.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|e| format!("flag {part:?} is not an integer in 0..=255: {e}"))?;
    }
    Ok(flags)
}
