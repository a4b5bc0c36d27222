pub mod blank_lines;
pub mod regex_cache;
