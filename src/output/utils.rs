//! Shared utility functions for output generators

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a size in bytes to a human-readable string with one decimal.
///
/// The unit is the largest one in which the scaled value still rounds to at
/// least 1, so `2000` is `2.0 KB` and `1000` stays `1000.0 B`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while unit < UNITS.len() - 1 && (value / 1024.0).round_ties_even() >= 1.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Size in KB with one decimal, as listed in the consolidated index.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

/// Escape text for HTML content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
