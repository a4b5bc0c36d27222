//! Cached regex patterns shared by the rules.
//!
//! All regexes are compiled once on first use through `LazyLock`, so rules never compile
//! patterns per document.

use regex::Regex;
use std::sync::LazyLock;

/// Shortest run of characters before the first `$` or `[` on a line. The captured prefix
/// holds block quote markers and indentation that an inserted blank line must keep.
pub const MATH_BLOCK_PREFIX_STR: &str = r"^(.*?)[$\[]";

pub static MATH_BLOCK_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(MATH_BLOCK_PREFIX_STR).unwrap());
