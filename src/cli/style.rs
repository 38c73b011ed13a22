use colored::*;

pub fn title(s: &str) -> ColoredString {
    s.cyan().bold()
}

pub fn error(s: &str) -> ColoredString {
    s.red()
}

pub fn version(s: &str) -> ColoredString {
    s.green()
}

pub fn user(s: &str) -> ColoredString {
    s.green()
}

pub fn group(s: &str) -> ColoredString {
    s.yellow()
}

pub fn dimmed(s: &str) -> ColoredString {
    s.dimmed()
}

pub fn settings_line(key: &str, value: &str) -> String {
    format!("  {:<15} {}", key, value)
}
