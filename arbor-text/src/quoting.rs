//! Quoting rules shared by the parser and the printer.
//!
//! A fragment is quoted whenever printing it bare would change how the line
//! splits: colons, quotes, line breaks, or edge whitespace. Empty names are
//! always quoted so the line is not mistaken for a blank one.

pub(crate) fn needs_quoting(text: &str, is_name: bool) -> bool {
    if text.is_empty() {
        return is_name;
    }
    text.starts_with('"')
        || text.contains(':')
        || text.contains('\n')
        || text.contains('\r')
        || text.starts_with(' ')
        || text.ends_with(' ')
}

pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode a leading quoted fragment, returning it together with whatever
/// follows the closing quote.
pub(crate) fn unquote(text: &str) -> Result<(String, &str), String> {
    let mut out = String::new();
    let mut chars = text[1..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, other)) => return Err(format!("unknown escape sequence \\{other}")),
                None => return Err("unterminated escape sequence".to_owned()),
            },
            '"' => return Ok((out, &text[1 + i + 1..])),
            c => out.push(c),
        }
    }
    Err("unterminated quoted fragment".to_owned())
}
