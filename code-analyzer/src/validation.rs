//! Request checks performed before any remote call.

use std::collections::HashSet;

use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::models::SourceFile;

/// File extensions the analyzer accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".py"];

const MAX_FILENAME_LEN: usize = 255;

/// Rejects empty, overlong, or unsupported filenames.
pub fn validate_filename(filename: &str) -> AnalyzerResult<()> {
    let len = filename.chars().count();
    if len == 0 || len > MAX_FILENAME_LEN {
        return Err(AnalyzerError::Validation(format!(
            "filename must be 1..={MAX_FILENAME_LEN} characters"
        )));
    }
    if !SUPPORTED_EXTENSIONS.iter().any(|ext| filename.ends_with(ext)) {
        return Err(AnalyzerError::Validation(format!(
            "unsupported file type: {filename} (supported: {})",
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// Returns the trimmed code, rejecting blank input.
pub fn validate_code(code: &str) -> AnalyzerResult<&str> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(AnalyzerError::Validation("file is empty".into()));
    }
    Ok(trimmed)
}

/// Checks a whole-project request: non-empty, valid names, unique paths.
pub fn validate_package(files: &[SourceFile]) -> AnalyzerResult<()> {
    if files.is_empty() {
        return Err(AnalyzerError::Validation(
            "at least one file is required".into(),
        ));
    }
    let mut seen = HashSet::with_capacity(files.len());
    for f in files {
        validate_filename(&f.filename)?;
        if !seen.insert(f.display_path()) {
            return Err(AnalyzerError::Validation(format!(
                "file paths must be unique: {}",
                f.display_path()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_files_are_accepted() {
        assert!(validate_filename("a.py").is_ok());
        assert!(validate_filename("pkg/mod.py").is_ok());
    }

    #[test]
    fn other_extensions_and_bad_lengths_are_rejected() {
        assert!(matches!(
            validate_filename("main.rs"),
            Err(AnalyzerError::Validation(_))
        ));
        assert!(validate_filename("").is_err());
        let long = format!("{}.py", "a".repeat(300));
        assert!(validate_filename(&long).is_err());
    }

    #[test]
    fn blank_code_is_rejected_and_code_is_trimmed() {
        assert!(validate_code(" \n\t ").is_err());
        assert_eq!(validate_code("\n x = 1 \n").unwrap(), "x = 1");
    }

    #[test]
    fn package_paths_must_be_unique() {
        let mut a = SourceFile::new("a.py", "x");
        let mut b = SourceFile::new("a.py", "y");
        assert!(validate_package(&[a.clone(), b.clone()]).is_err());

        a.relative_path = Some("one/a.py".into());
        b.relative_path = Some("two/a.py".into());
        assert!(validate_package(&[a, b]).is_ok());

        assert!(validate_package(&[]).is_err());
    }
}
