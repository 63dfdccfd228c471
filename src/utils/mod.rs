use std::path::{Path, PathBuf};

/// Work artifact holding the matched report of the file being processed
pub const MATCHED_ARTIFACT: &str = "temp.xlsx";

/// Work artifact holding the weekly unmatched report
pub const UNMATCHED_ARTIFACT: &str = "temp1.xlsx";

/// Source name the unmatched report is mailed under (before extension swap)
pub const UNMATCHED_SOURCE_NAME: &str = "error.csv";

/// Extension of every generated report
pub const REPORT_EXTENSION: &str = "xlsx";

/// Column names shared by stock files and price workbooks
pub const ARTICLE_COLUMN: &str = "articul";
pub const BRAND_COLUMN: &str = "brand";
pub const PRICE_COLUMN: &str = "price";
pub const CURRENCY_COLUMN: &str = "currency";

/// Name a report is mailed under: the source name with its extension swapped
/// for `xlsx`. Names without an extension get one appended.
pub fn report_file_name(source_name: &str) -> String {
    Path::new(source_name)
        .with_extension(REPORT_EXTENSION)
        .to_string_lossy()
        .to_string()
}

/// Get the path of a work artifact inside the work directory
pub fn artifact_path(work_dir: &Path, artifact: &str) -> PathBuf {
    work_dir.join(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_name_swaps_extension() {
        assert_eq!(report_file_name("Moscow.csv"), "Moscow.xlsx");
        assert_eq!(report_file_name("stock.spb.csv"), "stock.spb.xlsx");
        assert_eq!(report_file_name(UNMATCHED_SOURCE_NAME), "error.xlsx");
    }

    #[test]
    fn test_report_file_name_without_extension() {
        assert_eq!(report_file_name("stock"), "stock.xlsx");
    }

    #[test]
    fn test_artifact_path() {
        let path = artifact_path(Path::new("/var/lib/prices"), MATCHED_ARTIFACT);
        assert_eq!(path, Path::new("/var/lib/prices/temp.xlsx"));
    }
}
