use crate::rule::{Diagnostic, Fix};

/// Errors raised when a fix does not fit the document it is applied to
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    #[error("Fix targets line {line} but the document has {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("Fix targets column {column} on line {line}, which is {line_length} characters long")]
    ColumnOutOfRange {
        line: usize,
        column: usize,
        line_length: usize,
    },
}

/// A fix reduced to a single-line edit
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineEdit {
    line: usize,
    column: usize,
    delete_count: usize,
    insert_text: String,
}

impl LineEdit {
    fn from_diagnostic(diagnostic: &Diagnostic) -> Option<Self> {
        match diagnostic.fix.as_ref()? {
            Fix::InsertLine { insert_at_line, text } => Some(LineEdit {
                line: *insert_at_line,
                column: 1,
                delete_count: 0,
                insert_text: format!("{text}\n"),
            }),
            Fix::Replace {
                edit_column,
                delete_count,
                insert_text,
            } => Some(LineEdit {
                line: diagnostic.line,
                column: *edit_column,
                delete_count: *delete_count,
                insert_text: insert_text.clone(),
            }),
        }
    }
}

/// Sorts edits bottom-to-top and right-to-left, drops duplicates, and merges a pure
/// insertion with a pure deletion at the same position.
fn coordinate(mut edits: Vec<LineEdit>) -> Vec<LineEdit> {
    edits.sort_by(|a, b| {
        b.line
            .cmp(&a.line)
            .then(b.column.cmp(&a.column))
            .then(b.insert_text.len().cmp(&a.insert_text.len()))
    });
    edits.dedup();

    let mut merged: Vec<LineEdit> = Vec::with_capacity(edits.len());
    for edit in edits {
        if let Some(last) = merged.last_mut()
            && last.line == edit.line
            && last.column == edit.column
            && edit.insert_text.is_empty()
            && edit.delete_count > 0
            && !last.insert_text.is_empty()
            && last.delete_count == 0
        {
            last.delete_count = edit.delete_count;
            continue;
        }
        merged.push(edit);
    }
    merged
}

fn splice(line: &str, edit: &LineEdit) -> String {
    let start = edit.column - 1;
    let mut result: String = line.chars().take(start).collect();
    result.push_str(&edit.insert_text);
    result.extend(line.chars().skip(start + edit.delete_count));
    result
}

/// One source line split from its own terminator (`"\n"`, `"\r\n"` or none)
#[derive(Debug)]
struct SourceLine<'a> {
    body: String,
    ending: &'a str,
}

/// Split `content` the way `str::lines` numbers it, keeping each terminator.
///
/// A trailing terminator (or empty content) leaves a final empty entry, which insertions
/// may target.
fn split_lines(content: &str) -> Vec<SourceLine<'_>> {
    let mut lines: Vec<SourceLine> = content
        .split_inclusive('\n')
        .map(|piece| {
            let body_len = piece
                .strip_suffix("\r\n")
                .or_else(|| piece.strip_suffix('\n'))
                .map_or(piece.len(), str::len);
            SourceLine {
                body: piece[..body_len].to_string(),
                ending: &piece[body_len..],
            }
        })
        .collect();
    if lines.last().is_none_or(|line| !line.ending.is_empty()) {
        lines.push(SourceLine {
            body: String::new(),
            ending: "",
        });
    }
    lines
}

/// Apply the fixes carried by `diagnostics` to `content`.
///
/// Edits are applied bottom-up so earlier positions stay valid. An edit that would overlap
/// an edit already applied to the same line is skipped. An insertion one line past the end
/// appends a line. Every line keeps its own terminator; inserted lines take the terminator
/// of the line they land on, or the document's first one.
pub fn apply_fixes(content: &str, diagnostics: &[Diagnostic]) -> Result<String, FixError> {
    let mut lines = split_lines(content);
    let line_count = lines.len();
    let default_ending = lines
        .iter()
        .map(|line| line.ending)
        .find(|ending| !ending.is_empty())
        .unwrap_or("\n");

    let edits = coordinate(diagnostics.iter().filter_map(LineEdit::from_diagnostic).collect());

    let mut last_applied: Option<(usize, usize)> = None;
    for mut edit in edits {
        if edit.line == 0 || edit.line > line_count + 1 {
            return Err(FixError::LineOutOfRange {
                line: edit.line,
                line_count,
            });
        }
        if edit.line > lines.len() {
            if let Some(last) = lines.last_mut()
                && last.ending.is_empty()
            {
                last.ending = default_ending;
            }
            lines.push(SourceLine {
                body: String::new(),
                ending: "",
            });
        }

        let idx = edit.line - 1;
        let line_length = lines[idx].body.chars().count();
        if edit.column == 0 || edit.column > line_length + 1 {
            return Err(FixError::ColumnOutOfRange {
                line: edit.line,
                column: edit.column,
                line_length,
            });
        }

        if let Some((last_line, last_column)) = last_applied
            && last_line == edit.line
        {
            let edit_end = edit.column + edit.delete_count;
            let overlaps = if edit.delete_count > 0 {
                edit_end > last_column
            } else {
                edit_end >= last_column
            };
            if overlaps {
                log::debug!("Skipping overlapping fix at line {} column {}", edit.line, edit.column);
                last_applied = Some((edit.line, edit.column));
                continue;
            }
        }

        let line = &mut lines[idx];
        let ending = if line.ending.is_empty() { default_ending } else { line.ending };
        if ending != "\n" {
            edit.insert_text = edit.insert_text.replace('\n', ending);
        }
        line.body = splice(&line.body, &edit);
        last_applied = Some((edit.line, edit.column));
    }

    Ok(lines
        .iter()
        .map(|line| format!("{}{}", line.body, line.ending))
        .collect())
}
