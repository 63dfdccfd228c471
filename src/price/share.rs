use super::{PriceError, PriceShare};
use std::fs;
use std::path::PathBuf;

/// A share reachable as a directory: a UNC path or a mounted CIFS volume
pub struct DirectoryShare {
    root: PathBuf,
}

impl DirectoryShare {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PriceShare for DirectoryShare {
    fn list(&self) -> Result<Vec<String>, PriceError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, PriceError> {
        Ok(fs::read(self.root.join(name))?)
    }
}

/// Entries that end with `.{extension}` and contain any of the patterns,
/// in listing order
pub fn select_price_files<'a>(
    entries: &'a [String],
    patterns: &[String],
    extension: &str,
) -> Vec<&'a str> {
    let suffix = format!(".{}", extension);
    entries
        .iter()
        .filter(|name| name.ends_with(&suffix))
        .filter(|name| patterns.iter().any(|p| name.contains(p.as_str())))
        .map(String::as_str)
        .collect()
}
