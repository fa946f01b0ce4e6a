//! Run options for the sync core.

use crate::hierarchy::DEFAULT_DELIMITER;

/// Default cap on the number of nodes fetched per snapshot.
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Behavior switches for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Always create nodes instead of updating path matches.
    pub keep_duplicates: bool,
    /// Path placed above every site; empty for none.
    pub root_prefix: String,
    /// Separator between path segments.
    pub delimiter: String,
    /// Maximum number of nodes fetched per snapshot.
    pub max_records: usize,
    /// Fetch and decide without creating or updating anything.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            keep_duplicates: false,
            root_prefix: String::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            max_records: DEFAULT_MAX_RECORDS,
            dry_run: false,
        }
    }
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_duplicates(mut self, keep: bool) -> Self {
        self.keep_duplicates = keep;
        self
    }

    pub fn with_root_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.root_prefix = prefix.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SyncOptions::default();
        assert!(!options.keep_duplicates);
        assert!(options.root_prefix.is_empty());
        assert_eq!(options.delimiter, "/");
        assert_eq!(options.max_records, 10_000);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_builder_pattern() {
        let options = SyncOptions::new()
            .with_keep_duplicates(true)
            .with_root_prefix("Corp")
            .with_delimiter(" > ")
            .with_max_records(50)
            .with_dry_run(true);

        assert!(options.keep_duplicates);
        assert_eq!(options.root_prefix, "Corp");
        assert_eq!(options.delimiter, " > ");
        assert_eq!(options.max_records, 50);
        assert!(options.dry_run);
    }
}
