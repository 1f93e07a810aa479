use crate::error::{Result, StubError};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Keyword lists and output switches shared by the scanner and the emitter.
/// Every field may be overridden from a TOML file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StubConfig {
    /// Keywords whose following identifier names the enclosing type.
    pub type_keywords: Vec<String>,
    /// Qualifiers between `)` and `;` that mark a const member function.
    pub const_qualifiers: Vec<String>,
    /// Other qualifiers accepted between `)` and `;`. They are not carried into definitions.
    pub trailing_specifiers: Vec<String>,
    /// Specifiers before the return type that are invalid on out-of-class definitions.
    pub leading_specifiers: Vec<String>,
    /// A statement using one of these before the function name is not a declaration.
    pub rejected_keywords: Vec<String>,
    /// Return type that gets a no-op body instead of `return {};`.
    pub no_value_type: String,
    /// Comment text placed in every generated body.
    pub placeholder: String,
    /// Extension of the generated definition file.
    pub output_extension: String,
    pub keep_const_qualifier: bool,
    pub strip_default_arguments: bool,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            type_keywords: strings(&["class", "struct"]),
            const_qualifiers: strings(&["const"]),
            trailing_specifiers: strings(&["override", "final", "noexcept"]),
            leading_specifiers: strings(&["virtual", "static", "inline", "explicit", "extern"]),
            rejected_keywords: strings(&["friend", "typedef", "using", "return", "operator"]),
            no_value_type: "void".to_string(),
            placeholder: "TODO: Implement".to_string(),
            output_extension: "cpp".to_string(),
            keep_const_qualifier: false,
            strip_default_arguments: false,
        }
    }
}

impl StubConfig {
    pub fn from_toml_str(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| StubError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading stub configuration");
        let content = std::fs::read_to_string(path).map_err(|source| StubError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(path, &content)
    }

    pub fn is_type_keyword(&self, word: &str) -> bool {
        self.type_keywords.iter().any(|k| k == word)
    }

    pub fn is_const_qualifier(&self, word: &str) -> bool {
        self.const_qualifiers.iter().any(|k| k == word)
    }

    pub fn is_trailing_specifier(&self, word: &str) -> bool {
        self.trailing_specifiers.iter().any(|k| k == word)
    }

    pub fn is_leading_specifier(&self, word: &str) -> bool {
        self.leading_specifiers.iter().any(|k| k == word)
    }

    pub fn is_rejected_keyword(&self, word: &str) -> bool {
        self.rejected_keywords.iter().any(|k| k == word)
    }
}
