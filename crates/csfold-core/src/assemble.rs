//! Assembly of the merged single-file document

use crate::context::MergeContext;
use crate::request::{ProjectMetadata, DEFAULT_SDK};
use crate::source::ParsedFile;

/// Property directive written into every merged file
pub const TRIM_DISABLED_DIRECTIVE: &str = "#:property PublishTrimmed=false";

/// The merged output, one entry per physical line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeDocument {
    lines: Vec<String>,
}

impl MergeDocument {
    /// Output lines, without terminators
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full text, every line terminated by `\n`
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}

/// Build the merged document.
///
/// Layout: optional `#:sdk` block, trim-disable property, `#:package` block,
/// generated header, sorted external usings, then one block per file in the
/// given order.
pub fn assemble(
    metadata: &ProjectMetadata,
    context: &MergeContext,
    files: &[ParsedFile],
) -> MergeDocument {
    let mut doc = MergeDocument::default();

    let sdk = metadata.sdk.trim();
    if !sdk.is_empty() && sdk != DEFAULT_SDK {
        doc.push(format!("#:sdk {}", sdk));
        doc.blank();
    }

    doc.push(TRIM_DISABLED_DIRECTIVE);
    doc.blank();

    let mut added_packages = false;
    for package in metadata.packages.iter().filter(|p| !p.is_tool_package()) {
        match &package.version {
            Some(version) if !version.is_empty() => {
                doc.push(format!("#:package {}@{}", package.name, version))
            }
            _ => doc.push(format!("#:package {}", package.name)),
        }
        added_packages = true;
    }
    if added_packages {
        doc.blank();
    }

    doc.push(format!(
        "// Auto-generated single-file application for project {}.",
        metadata.project_name
    ));
    doc.blank();

    for using in context.external_usings() {
        doc.push(using);
    }
    doc.blank();

    for file in files {
        doc.push(format!("// {}", file.path.display()));
        doc.blank();
        doc.lines.extend(file.body.iter().cloned());
        doc.blank();
    }

    doc
}
