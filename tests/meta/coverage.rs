//! Structural checks keeping `src/` and `tests/unit/` in lockstep

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    // Relative paths of every `.rs` file and directory under `root`
    fn relative_entries(root: &Path) -> io::Result<BTreeSet<String>> {
        let mut entries = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(root)
                    .map_err(io::Error::other)?
                    .to_string_lossy()
                    .replace('\\', "/");

                if path.is_dir() {
                    entries.insert(relative);
                    pending.push(path);
                } else if is_rust_file(&path) {
                    entries.insert(relative);
                }
            }
        }

        Ok(entries)
    }

    fn rust_files(root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if is_rust_file(&path) {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_rust_file(path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some("rs")
    }

    // Crate roots and module declarations carry no logic of their own
    fn is_organizational(relative: &str) -> bool {
        relative == "lib.rs" || relative == "mod.rs" || relative.ends_with("/mod.rs")
    }

    fn report(header: &str, lines: &[String]) -> String {
        format!("{header}:\n{}", lines.join("\n"))
    }

    // Tests every source module has a unit test file at the mirrored path
    // Verified by adding a source file without a test
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_entries(Path::new("src")).expect("readable src directory");
        let unit = relative_entries(Path::new("tests/unit")).unwrap_or_default();

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_organizational(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without unit tests", &missing)
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by renaming a source file
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_entries(Path::new("src")).expect("readable src directory");
        let unit = relative_entries(Path::new("tests/unit")).unwrap_or_default();

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !is_organizational(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit tests without source files", &orphaned)
        );
    }

    // Tests each test file declares at least one test
    // Verified by emptying a test module
    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new("tests")).expect("readable tests directory");

        let empty: Vec<String> = files
            .iter()
            .filter(|path| path.file_name().and_then(|name| name.to_str()) != Some("mod.rs"))
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without #[test] functions", &empty)
        );
    }

    // Tests every source file opens with a module doc comment
    // Verified by stripping the header from one module
    #[test]
    fn test_all_src_files_have_module_docs() {
        let files = rust_files(Path::new("src")).expect("readable src directory");

        let undocumented: Vec<String> = files
            .iter()
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.starts_with("//!"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            undocumented.is_empty(),
            "{}",
            report("Source files without a module doc comment", &undocumented)
        );
    }
}
