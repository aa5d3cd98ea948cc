//! `.env` merging for the project initializer.
//!
//! Only the `DB_NAME` key is touched; every other line, comment and blank
//! line of the source file survives byte-for-byte.

use crate::domain::value_objects::DatabaseName;

pub const DB_NAME_KEY: &str = "DB_NAME";

/// Set `DB_NAME` in an env file body.
///
/// The first line whose key is `DB_NAME` gets its value replaced; anything
/// before the key on that line (e.g. `export `) is kept. When no such line
/// exists, `DB_NAME=<name>` is appended on its own line.
pub fn merge_db_name(source: &str, name: &DatabaseName) -> String {
    let assignment = format!("{DB_NAME_KEY}={name}");
    let mut replaced = false;

    let mut lines: Vec<String> = source
        .split('\n')
        .map(|line| {
            if replaced {
                return line.to_string();
            }
            match db_name_offset(line) {
                Some(offset) => {
                    replaced = true;
                    let trailing_cr = if line.ends_with('\r') { "\r" } else { "" };
                    format!("{}{assignment}{trailing_cr}", &line[..offset])
                }
                None => line.to_string(),
            }
        })
        .collect();

    if !replaced {
        // `split` yields a trailing "" for a newline-terminated file; reuse it.
        match lines.last_mut() {
            Some(last) if last.is_empty() => {
                *last = assignment;
                lines.push(String::new());
            }
            _ => lines.push(assignment),
        }
    }

    lines.join("\n")
}

/// Byte offset of `DB_NAME=` when the line assigns it (not a comment).
fn db_name_offset(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let indent = line.len() - trimmed.len();
    let key_start = if let Some(rest) = trimmed.strip_prefix("export ") {
        indent + (trimmed.len() - rest.trim_start().len())
    } else {
        indent
    };
    line[key_start..]
        .starts_with(&format!("{DB_NAME_KEY}="))
        .then_some(key_start)
}
