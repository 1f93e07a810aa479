use crate::config::StubConfig;
use crate::parser::token::{Token, TokenKind};
use std::fmt;

/// Name of the type whose members a header declares.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TypeNameMarker {
    pub name: String,
}

impl From<&str> for TypeNameMarker {
    fn from(name: &str) -> Self {
        TypeNameMarker {
            name: name.to_string(),
        }
    }
}

impl fmt::Display for TypeNameMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A type keyword inside `template<...>`, inside a parameter list or after `enum`
/// introduces no enclosing type.
fn introduces_type(previous: Option<&Token>) -> bool {
    match previous.map(|t| t.kind) {
        Some(TokenKind::Punct('<' | ',') | TokenKind::OpenParen) => false,
        Some(TokenKind::Ident("enum")) => false,
        _ => true,
    }
}

/// First type keyword followed by an identifier wins.
pub fn find_type_marker(tokens: &[Token], config: &StubConfig) -> Option<TypeNameMarker> {
    for (index, token) in tokens.iter().enumerate() {
        let TokenKind::Ident(word) = token.kind else {
            continue;
        };
        if !config.is_type_keyword(word) {
            continue;
        }
        if !introduces_type(index.checked_sub(1).and_then(|p| tokens.get(p))) {
            continue;
        }

        let first = match tokens.get(index + 1).map(|t| t.kind) {
            Some(TokenKind::Ident(first)) => first,
            _ => continue,
        };

        // `class EXPORT_API Widget {` names Widget, `struct stat info;` names stat
        let opens_definition = matches!(
            tokens.get(index + 3).map(|t| t.kind),
            Some(TokenKind::OpenBrace | TokenKind::Colon | TokenKind::Ident("final"))
        );
        let name = match tokens.get(index + 2).map(|t| t.kind) {
            Some(TokenKind::Ident(second)) if second != "final" && opens_definition => second,
            _ => first,
        };

        return Some(TypeNameMarker::from(name));
    }

    None
}
