//! Ordering of source files so the entry point is merged last

use std::path::Path;

/// Conventional file name of the program entry point
pub const ENTRY_POINT_FILE_NAME: &str = "Program.cs";

/// Check whether a path names the entry-point file (ASCII case-insensitive)
pub fn is_entry_point(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(ENTRY_POINT_FILE_NAME))
}

/// Move the first entry-point file to the end, keeping every other file in
/// its original relative order. Later entry-point files stay where they are.
pub fn order_sources<T: AsRef<Path>>(mut files: Vec<T>) -> Vec<T> {
    if let Some(index) = files.iter().position(|f| is_entry_point(f.as_ref())) {
        let entry = files.remove(index);
        files.push(entry);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_entry_point_moves_last() {
        let ordered = order_sources(paths(&["src/Program.cs", "src/A.cs", "src/B.cs"]));
        assert_eq!(ordered, paths(&["src/A.cs", "src/B.cs", "src/Program.cs"]));
    }

    #[test]
    fn test_entry_point_match_ignores_case() {
        let ordered = order_sources(paths(&["PROGRAM.CS", "A.cs"]));
        assert_eq!(ordered, paths(&["A.cs", "PROGRAM.CS"]));
    }

    #[test]
    fn test_no_entry_point_keeps_order() {
        let input = paths(&["C.cs", "A.cs", "B.cs"]);
        assert_eq!(order_sources(input.clone()), input);
    }

    #[test]
    fn test_only_first_entry_point_moves() {
        let ordered = order_sources(paths(&["a/Program.cs", "B.cs", "b/program.cs", "C.cs"]));
        assert_eq!(ordered, paths(&["B.cs", "b/program.cs", "C.cs", "a/Program.cs"]));
    }

    #[test]
    fn test_entry_point_needs_exact_name() {
        assert!(is_entry_point(Path::new("dir/Program.cs")));
        assert!(!is_entry_point(Path::new("dir/MyProgram.cs")));
        assert!(!is_entry_point(Path::new("dir/Program.cs.bak")));
        assert!(!is_entry_point(Path::new("Program/Other.cs")));
    }
}
