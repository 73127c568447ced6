//! Source file loading and body extraction

use crate::classify::{classify_line, LineKind};
use crate::context::MergeContext;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Raw content of a single source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as supplied by the caller
    pub path: PathBuf,
    /// Lines without terminators
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Read a source file from disk
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_content(path, &content))
    }

    /// Build a source file from in-memory content (useful for testing)
    pub fn from_content<P: Into<PathBuf>>(path: P, content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }
}

impl AsRef<Path> for SourceFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// A source file reduced to its body lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    /// Path of the original file
    pub path: PathBuf,
    /// Body lines with surrounding blank lines removed
    pub body: Vec<String>,
}

/// Outcome of loading one listed source file
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// File was read and parsed
    Loaded(ParsedFile),
    /// File did not exist and was skipped
    SkippedMissing(PathBuf),
}

/// Split a source file into usings, namespaces and body lines.
///
/// Usings and namespaces are recorded in `context`; everything else becomes
/// the trimmed body of the returned file.
pub fn parse_source(source: &SourceFile, context: &mut MergeContext) -> ParsedFile {
    let mut body = Vec::new();
    let mut usings = 0usize;
    let mut namespaces = 0usize;

    for line in &source.lines {
        match classify_line(line) {
            LineKind::Using(directive) => {
                context.add_using(directive);
                usings += 1;
            }
            LineKind::Namespace(namespace) => {
                context.add_namespace(&namespace);
                namespaces += 1;
            }
            LineKind::Body => body.push(line.clone()),
        }
    }

    debug!(
        path = %source.path.display(),
        usings,
        namespaces,
        body_lines = body.len(),
        "classified source file"
    );

    ParsedFile {
        path: source.path.clone(),
        body: trim_blank_lines(&body).to_vec(),
    }
}

/// Load and parse a listed source file, skipping it if it does not exist.
///
/// A missing file is not an error; any other read failure is.
pub fn load_source<P: AsRef<Path>>(path: P, context: &mut MergeContext) -> Result<FileOutcome> {
    let path = path.as_ref();
    if !path.is_file() {
        warn!(path = %path.display(), "source file not found, skipping");
        return Ok(FileOutcome::SkippedMissing(path.to_path_buf()));
    }

    let source = SourceFile::read(path)?;
    Ok(FileOutcome::Loaded(parse_source(&source, context)))
}

/// Remove leading and trailing blank (empty or whitespace-only) lines.
/// Interior blank lines are preserved.
pub fn trim_blank_lines(lines: &[String]) -> &[String] {
    let is_content = |line: &String| !line.trim().is_empty();
    match lines.iter().position(is_content) {
        Some(first) => {
            // A content line exists, so rposition finds one too
            let last = lines.iter().rposition(is_content).unwrap_or(first);
            &lines[first..=last]
        }
        None => &[],
    }
}
