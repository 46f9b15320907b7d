const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PREFIXES: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortened, credential-redacted rendering of user text for debug logs.
///
/// Truncates on character boundaries, so multi-byte Czech letters are safe.
pub fn message_preview(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, total_chars)
    } else {
        trimmed.to_string()
    };

    SENSITIVE_PREFIXES
        .iter()
        .fold(visible, |acc, prefix| redact_after(&acc, prefix))
}

fn redact_after(text: &str, prefix: &str) -> String {
    let mut redacted = String::with_capacity(text.len());
    let mut rest = text;

    // Resume after each replaced value so the marker itself is never rescanned.
    while let Some(start) = rest.find(prefix) {
        let value_start = start + prefix.len();
        let value_end = rest[value_start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
            .map(|i| value_start + i)
            .unwrap_or(rest.len());

        redacted.push_str(&rest[..value_start]);
        redacted.push_str("[REDACTED]");
        rest = &rest[value_end..];
    }

    redacted.push_str(rest);
    redacted
}
