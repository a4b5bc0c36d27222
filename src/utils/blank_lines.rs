//! Blank line detection shared by rules that reason about vertical spacing.

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Strip HTML comments from a single line, including the unmatched tail of a comment
/// opened on an earlier line and an unmatched opening that runs past the end.
fn remove_comments(line: &str) -> String {
    let mut s = line.to_string();
    loop {
        let start = s.find(COMMENT_START);
        let end = s.find(COMMENT_END);
        match (start, end) {
            (Some(start), Some(end)) if start < end => {
                s = format!("{}{}", &s[..start], &s[end + COMMENT_END.len()..]);
            }
            (_, Some(end)) => {
                s = s[end + COMMENT_END.len()..].to_string();
            }
            (Some(start), None) => {
                s.truncate(start);
            }
            (None, None) => return s,
        }
    }
}

/// Whether a line counts as blank for spacing rules.
///
/// Missing lines are blank, as are lines holding only whitespace, block quote markers
/// (`>`), or HTML comments.
pub fn is_blank_line(line: Option<&str>) -> bool {
    let Some(line) = line else {
        return true;
    };
    if line.trim().is_empty() {
        return true;
    }
    remove_comments(line).replace('>', "").trim().is_empty()
}
