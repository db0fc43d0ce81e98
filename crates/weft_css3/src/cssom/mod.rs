//! The CSS object model that the parser produces
//!
//! Rules are handed to a [`crate::builder::CssBuilder`] as soon as they are complete. The default
//! builder collects them into a [`stylesheet::CssStylesheet`] where every rule lives in an arena and
//! refers to its parent by id.

pub mod media;
pub mod rule;
pub mod selector;
pub mod stylesheet;
pub mod value;

/// Serializes an identifier, escaping everything that would not tokenize back into the same ident
pub fn serialize_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let starts_with_dash = ident.starts_with('-');

    for (idx, c) in ident.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{0001}'..='\u{001F}' | '\u{007F}' => out.push_str(&format!("\\{:x} ", c as u32)),
            '0'..='9' if idx == 0 || (idx == 1 && starts_with_dash) => {
                out.push_str(&format!("\\{:x} ", c as u32))
            }
            '-' if idx == 0 && ident.len() == 1 => out.push_str("\\-"),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

/// Serializes a string as a double quoted css string
pub fn serialize_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');

    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0001}'..='\u{001F}' | '\u{007F}' => out.push_str(&format!("\\{:x} ", c as u32)),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

/// Formats a number the way css expects it (no trailing `.0`)
pub fn serialize_number(value: f32) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(serialize_identifier("foo-bar"), "foo-bar");
        assert_eq!(serialize_identifier("a:b"), "a\\:b");
        assert_eq!(serialize_identifier("1a"), "\\31 a");
        assert_eq!(serialize_identifier("-"), "\\-");
    }

    #[test]
    fn strings_are_quoted() {
        assert_eq!(serialize_string("it's"), "\"it's\"");
        assert_eq!(serialize_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(serialize_string("a\nb"), "\"a\\a b\"");
    }

    #[test]
    fn numbers() {
        assert_eq!(serialize_number(1.0), "1");
        assert_eq!(serialize_number(-0.0), "0");
        assert_eq!(serialize_number(0.5), "0.5");
    }
}
