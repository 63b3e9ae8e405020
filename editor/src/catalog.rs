//! The module catalog: the read-only listing of externally provided
//! functions and variables available for composition.
//!
//! Loaded at most once per session from a TOML file:
//!
//! ```toml
//! [[module]]
//! name = "math"
//! functions = [{ name = "sqrt", parameters = ["value"] }]
//! variables = [{ name = "pi" }]
//! ```
//!
//! A missing or malformed catalog is never fatal to an editing session;
//! the palette simply lacks that module's entries.

use std::fmt;
use std::ops::Range;
use std::path::Path;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleDecl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDecl {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableDecl {
    pub name: String,
}

/// Catalog read or parse failure, with the offending byte span when the
/// TOML parser provides one.
#[derive(Debug)]
pub struct CatalogError {
    pub message: String,
    pub span: Option<Range<usize>>,
}

impl CatalogError {
    /// Convert to a codespan-reporting Diagnostic for display against the
    /// catalog source registered under `file_id`.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(&self.message);
        match &self.span {
            Some(span) => diagnostic.with_labels(vec![Label::primary(file_id, span.clone())]),
            None => diagnostic,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CatalogError {}

/// Parse catalog TOML.
pub fn parse(source: &str) -> Result<Catalog, CatalogError> {
    toml::from_str(source).map_err(|e| CatalogError {
        message: e.message().to_string(),
        span: e.span(),
    })
}

/// Read and parse a catalog file.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let source = std::fs::read_to_string(path).map_err(|e| CatalogError {
        message: format!("cannot read '{}': {}", path.display(), e),
        span: None,
    })?;
    parse(&source)
}
