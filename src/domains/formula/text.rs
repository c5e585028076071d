//! Lexical clean-up of formula text before it reaches the symbolic engine.
//!
//! Only names and number literals are recognised here. Grammar errors are left
//! to the engine's parser.

use std::collections::BTreeSet;

use super::catalog::{Function, is_reserved};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Name(&'a str),
    Number(&'a str),
    Other(&'a str),
}

fn tokens(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i];
        if c.is_ascii_alphabetic() || c == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            out.push(Token::Name(&text[start..i]));
        } else if c.is_ascii_digit()
            || (c == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            // exponent: e5, E-3, e+10
            if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                let mut j = i + 1;
                if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                    j += 1;
                }
                if j < bytes.len() && bytes[j].is_ascii_digit() {
                    while j < bytes.len() && bytes[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }
            out.push(Token::Number(&text[start..i]));
        } else {
            i += text[i..].chars().next().map_or(1, char::len_utf8);
            out.push(Token::Other(&text[start..i]));
        }
    }
    out
}

/// Drop a leading `y =` and surrounding whitespace.
pub fn strip_assignment(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix('y').map(str::trim_start) {
        Some(rest) if rest.starts_with('=') => rest[1..].trim(),
        _ => trimmed,
    }
}

/// Names in `text` that are neither functions nor constants.
pub fn free_names(text: &str) -> BTreeSet<String> {
    tokens(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::Name(name) if !is_reserved(name) => Some(name.to_string()),
            _ => None,
        })
        .collect()
}

/// Rewrite `text` into the dialect the engine parses: `**` becomes `^`,
/// function aliases take the engine's name and scientific literals are
/// written out in full.
pub fn normalize(text: &str) -> String {
    let text = text.replace("**", "^");
    let mut out = String::with_capacity(text.len());
    for token in tokens(&text) {
        match token {
            Token::Name(name) => match Function::from_name(name) {
                Some(function) => out.push_str(function.engine_name()),
                None => out.push_str(name),
            },
            Token::Number(literal) if literal.contains(['e', 'E']) => {
                match literal.parse::<f64>() {
                    Ok(value) if value.is_finite() => out.push_str(&value.to_string()),
                    _ => out.push_str(literal),
                }
            }
            Token::Number(literal) | Token::Other(literal) => out.push_str(literal),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_assignment() {
        assert_eq!(strip_assignment("  y = x^2 "), "x^2");
        assert_eq!(strip_assignment("y=sin(x)"), "sin(x)");
        assert_eq!(strip_assignment("x + y"), "x + y");
    }

    #[test]
    fn test_free_names_skip_functions_and_constants() {
        let names: Vec<_> = free_names("a*sin(x) + pi*e - log(b2)").into_iter().collect();
        assert_eq!(names, vec!["a", "b2", "x"]);
        assert!(free_names("2e3*x").iter().all(|n| n == "x"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("x**2 + log(x)"), "x^2 + ln(x)");
        assert_eq!(normalize("1e3*x"), "1000*x");
        assert_eq!(normalize("2.5E-2"), "0.025");
        assert_eq!(normalize("2*e"), "2*e");
    }
}
