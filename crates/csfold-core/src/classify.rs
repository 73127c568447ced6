//! Line classification for C# source files
//!
//! Every source line is exactly one of: a `using` directive, a file-scoped
//! `namespace` declaration, or a body line. Matching is whole-line and anchored:
//!
//! - using:     `^\s*(global\s+)?using\s+[\w.]+\s*;\s*$`
//! - namespace: `^\s*namespace\s+[\w.]+\s*;\s*$`
//!
//! Block-scoped namespaces (`namespace Foo { ... }`), aliases (`using X = Y;`)
//! and `using static` fall through to body lines.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// A normalized `using` directive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsingDirective {
    /// Whether the directive carried the `global` modifier
    pub global: bool,
    /// Dotted namespace being imported (e.g., "System.Collections.Generic")
    pub namespace: String,
}

impl UsingDirective {
    /// Create a new directive
    pub fn new(namespace: impl Into<String>, global: bool) -> Self {
        Self {
            global,
            namespace: namespace.into(),
        }
    }

    /// Normalized statement text, with whitespace collapsed
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UsingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "global using {};", self.namespace)
        } else {
            write!(f, "using {};", self.namespace)
        }
    }
}

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `using` directive
    Using(UsingDirective),
    /// File-scoped namespace declaration, carrying the namespace name
    Namespace(String),
    /// Anything else, kept verbatim
    Body,
}

static USING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?<global>global\s+)?using\s+(?<namespace>[\w.]+)\s*;\s*$")
        .expect("using pattern is valid")
});

static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*namespace\s+(?<namespace>[\w.]+)\s*;\s*$")
        .expect("namespace pattern is valid")
});

/// Classify one raw line
pub fn classify_line(line: &str) -> LineKind {
    if let Some(caps) = USING_RE.captures(line) {
        return LineKind::Using(UsingDirective::new(
            &caps["namespace"],
            caps.name("global").is_some(),
        ));
    }
    if let Some(caps) = NAMESPACE_RE.captures(line) {
        return LineKind::Namespace(caps["namespace"].to_string());
    }
    LineKind::Body
}
