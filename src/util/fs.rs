//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

/// Recursively copy a directory, returning the number of files copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("path escapes {}", src.display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy the files in `src` matching a glob `pattern` into `dst` (non-recursive).
pub fn copy_matching(src: &Path, pattern: &str, dst: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for path in glob_files(src, &[pattern.to_string()])? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dst.join(name);
        copy_file(&path, &target)?;
        copied.push(target);
    }

    Ok(copied)
}

/// Copy one file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("stage/lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("libboost_system.a"), "").unwrap();
        fs::write(lib.join("libboost_thread.a"), "").unwrap();
        fs::write(lib.join("readme.txt"), "readme").unwrap();

        let files = glob_files(tmp.path(), &["stage/lib/*.a".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_copy_dir_all() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir_all(src.join("detail")).unwrap();
        fs::write(src.join("config.hpp"), "content").unwrap();
        fs::write(src.join("detail/impl.hpp"), "impl").unwrap();

        let copied = copy_dir_all(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("config.hpp")).unwrap(), "content");
        assert_eq!(fs::read_to_string(dst.join("detail/impl.hpp")).unwrap(), "impl");
    }

    #[test]
    fn test_copy_matching() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("OriginalFindBoost.cmake"), "a").unwrap();
        fs::write(src.join("OriginalFindBoostHelpers.cmake"), "b").unwrap();
        fs::write(src.join("FindBoost.cmake"), "c").unwrap();

        let copied = copy_matching(&src, "OriginalFindBoost*", &dst).unwrap();
        assert_eq!(copied.len(), 2);
        assert!(dst.join("OriginalFindBoostHelpers.cmake").exists());
        assert!(!dst.join("FindBoost.cmake").exists());
    }

    #[test]
    fn test_copy_matching_nothing() {
        let tmp = TempDir::new().unwrap();
        let copied = copy_matching(tmp.path(), "*.lib", &tmp.path().join("out")).unwrap();
        assert!(copied.is_empty());
    }
}
