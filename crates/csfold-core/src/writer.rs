//! Persisting the merged document

use crate::assemble::MergeDocument;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Write `doc` to `path`, creating missing parent directories and replacing
/// any existing file.
pub fn write_document<P: AsRef<Path>>(path: P, doc: &MergeDocument) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent).map_err(|e| Error::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, doc.to_text()).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::context::MergeContext;
    use crate::request::ProjectMetadata;

    fn sample_document() -> MergeDocument {
        assemble(&ProjectMetadata::new("Demo"), &MergeContext::new(), &[])
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/Demo.cs");
        let doc = sample_document();

        write_document(&path, &doc).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), doc.to_text());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Demo.cs");
        fs::write(&path, "old content that is longer than the new document ".repeat(10)).unwrap();
        let doc = sample_document();

        write_document(&path, &doc).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), doc.to_text());
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write_document(blocker.join("Demo.cs"), &sample_document()).unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }));
    }
}
