use crate::parser::token::{TokenKind, tokenize};

/// Removes `= value` default arguments: `int a = f(1, 2), int b` becomes `int a, int b`.
/// Commas and `=` inside parentheses, braces, brackets or template arguments are left alone.
pub fn strip_default_arguments(parameters: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut depth = 0usize;
    let mut param_start = 0;
    let mut default_start: Option<usize> = None;

    for token in tokenize(parameters) {
        match token.kind {
            TokenKind::OpenParen | TokenKind::OpenBrace | TokenKind::Punct('[' | '<') => {
                depth += 1
            }
            TokenKind::CloseParen | TokenKind::CloseBrace | TokenKind::Punct(']' | '>') => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Punct('=') if depth == 0 && default_start.is_none() => {
                default_start = Some(token.offset)
            }
            TokenKind::Punct(',') if depth == 0 => {
                let end = default_start.take().unwrap_or(token.offset);
                kept.push(parameters[param_start..end].trim());
                param_start = token.end();
            }
            _ => {}
        }
    }

    let end = default_start.unwrap_or(parameters.len());
    let last = parameters[param_start..end].trim();
    if !last.is_empty() || !kept.is_empty() {
        kept.push(last);
    }

    kept.join(", ")
}
