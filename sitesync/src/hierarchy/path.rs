//! Hierarchical path names.
//!
//! Every record is named by the delimiter-joined names of its ancestors and
//! itself, root first:
//!
//! ```text
//! site:  [root prefix] / site
//! level: [root prefix] / site / level
//! unit:  [root prefix] / site / level / unit
//! ```
//!
//! Unknown or empty ancestors are dropped from the path rather than leaving a
//! doubled delimiter, so a level whose site cannot be resolved is named as if
//! it sat directly under the root prefix.

use crate::source::{RecordKind, SpatialRecord};

use super::LookupIndex;

/// Default delimiter between path segments.
pub const DEFAULT_DELIMITER: &str = "/";

/// Joins the non-empty segments with `delimiter`.
pub fn join_segments<'a, I>(segments: I, delimiter: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Path names computed for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPath {
    /// Full path of the record itself.
    pub full_path: String,
    /// Full path of the nearest known ancestor, empty at the root.
    pub parent_path: String,
    /// Bare name of the nearest known ancestor, empty at the root.
    pub parent_name: String,
    /// Resolved name of the containing site; the site's own name for sites.
    pub site_name: String,
}

/// Builds [`RecordPath`]s for records of any tier.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    /// Non-empty segments of the root prefix.
    prefix: Vec<String>,
    delimiter: String,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new("", DEFAULT_DELIMITER)
    }
}

impl PathBuilder {
    /// Creates a builder placing every path under `root_prefix`.
    ///
    /// An empty prefix places sites at the top of the hierarchy. The prefix
    /// is split on `delimiter`, so leading, trailing or repeated delimiters
    /// in it never reach the joined paths.
    pub fn new(root_prefix: &str, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        let prefix = if delimiter.is_empty() {
            vec![root_prefix.to_string()]
        } else {
            root_prefix
                .split(delimiter.as_str())
                .map(str::to_string)
                .collect()
        };
        Self {
            prefix: prefix.into_iter().filter(|s| !s.is_empty()).collect(),
            delimiter,
        }
    }

    /// Computes the full and parent paths of `record`.
    pub fn build(&self, record: &SpatialRecord, index: &LookupIndex) -> RecordPath {
        let (site_name, level_name) = match &record.kind {
            RecordKind::Site { .. } => ("", ""),
            RecordKind::Level { site_id, .. } => (index.site_name(site_id).unwrap_or_default(), ""),
            RecordKind::Unit { level_id, .. } => (
                index.level_site_name(level_id).unwrap_or_default(),
                index.level_name(level_id).unwrap_or_default(),
            ),
        };

        let ancestors: Vec<&str> = self
            .prefix
            .iter()
            .map(String::as_str)
            .chain([site_name, level_name])
            .collect();
        let parent_path = join_segments(ancestors.iter().copied(), &self.delimiter);
        let full_path = join_segments(
            ancestors.iter().copied().chain([record.name.as_str()]),
            &self.delimiter,
        );

        let parent_name = ancestors
            .iter()
            .rev()
            .find(|name| !name.is_empty())
            .map(|name| name.to_string())
            .unwrap_or_default();

        let site_name = match record.kind {
            RecordKind::Site { .. } => record.name.clone(),
            _ => site_name.to_string(),
        };

        RecordPath {
            full_path,
            parent_path,
            parent_name,
            site_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Address, Coordinates, SortKey};

    fn index() -> LookupIndex {
        let at = Coordinates::default();
        LookupIndex::build(
            &[SpatialRecord::site("F1", "RED O", at, Address::default())],
            &[
                SpatialRecord::level("L1", "F1", "O1", at, SortKey::Number(1.0)),
                SpatialRecord::level("L2", "F404", "Orphan", at, SortKey::Number(2.0)),
            ],
        )
    }

    fn site(name: &str) -> SpatialRecord {
        SpatialRecord::site("F1", name, Coordinates::default(), Address::default())
    }

    fn level(site_id: &str, name: &str) -> SpatialRecord {
        SpatialRecord::level("L1", site_id, name, Coordinates::default(), SortKey::default())
    }

    fn unit(level_id: &str, name: &str) -> SpatialRecord {
        SpatialRecord::unit("U1", level_id, name, Coordinates::default(), SortKey::default())
    }

    #[test]
    fn test_site_without_prefix() {
        let path = PathBuilder::default().build(&site("RED O"), &index());
        assert_eq!(path.full_path, "RED O");
        assert_eq!(path.parent_path, "");
        assert_eq!(path.parent_name, "");
        assert_eq!(path.site_name, "RED O");
    }

    #[test]
    fn test_site_with_nested_prefix() {
        let builder = PathBuilder::new("Corp/East", "/");
        let path = builder.build(&site("RED O"), &index());
        assert_eq!(path.full_path, "Corp/East/RED O");
        assert_eq!(path.parent_path, "Corp/East");
        assert_eq!(path.parent_name, "East");
    }

    #[test]
    fn test_prefix_with_stray_delimiters() {
        for prefix in ["Corp/", "/Corp", "/Corp//East/"] {
            let builder = PathBuilder::new(prefix, "/");
            let path = builder.build(&site("RED O"), &index());
            assert!(!path.full_path.contains("//"), "{}", path.full_path);
            assert!(!path.full_path.starts_with('/'));
            assert!(path.full_path.ends_with("/RED O"));
            assert!(!path.parent_name.is_empty());
        }

        let path = PathBuilder::new("Corp/", "/").build(&site("RED O"), &index());
        assert_eq!(path.full_path, "Corp/RED O");
        assert_eq!(path.parent_path, "Corp");
        assert_eq!(path.parent_name, "Corp");
    }

    #[test]
    fn test_delimiter_only_prefix_is_empty() {
        let path = PathBuilder::new("/", "/").build(&site("RED O"), &index());
        assert_eq!(path.full_path, "RED O");
        assert_eq!(path.parent_path, "");
    }

    #[test]
    fn test_level_path() {
        let path = PathBuilder::default().build(&level("F1", "O1"), &index());
        assert_eq!(path.full_path, "RED O/O1");
        assert_eq!(path.parent_path, "RED O");
        assert_eq!(path.parent_name, "RED O");
        assert_eq!(path.site_name, "RED O");
    }

    #[test]
    fn test_level_with_unknown_site_degrades() {
        let builder = PathBuilder::new("Corp", "/");
        let path = builder.build(&level("F404", "O1"), &index());
        assert_eq!(path.full_path, "Corp/O1");
        assert_eq!(path.parent_path, "Corp");
        assert_eq!(path.parent_name, "Corp");
        assert_eq!(path.site_name, "");
    }

    #[test]
    fn test_unit_path() {
        let builder = PathBuilder::new("Corp", " > ");
        let path = builder.build(&unit("L1", "101"), &index());
        assert_eq!(path.full_path, "Corp > RED O > O1 > 101");
        assert_eq!(path.parent_path, "Corp > RED O > O1");
        assert_eq!(path.parent_name, "O1");
    }

    #[test]
    fn test_unit_on_orphan_level_skips_site() {
        let path = PathBuilder::default().build(&unit("L2", "101"), &index());
        assert_eq!(path.full_path, "Orphan/101");
        assert_eq!(path.parent_path, "Orphan");
        assert_eq!(path.parent_name, "Orphan");
    }

    #[test]
    fn test_unit_on_unknown_level() {
        let path = PathBuilder::default().build(&unit("L404", "101"), &index());
        assert_eq!(path.full_path, "101");
        assert_eq!(path.parent_path, "");
        assert_eq!(path.parent_name, "");
    }

    #[test]
    fn test_join_segments_skips_empty() {
        assert_eq!(join_segments(["", "a", "", "b", ""], "/"), "a/b");
        assert_eq!(join_segments(["", ""], "/"), "");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_join_never_doubles_delimiter(
                segments in proptest::collection::vec("[a-z ]{0,4}", 0..6)
            ) {
                let joined = join_segments(segments.iter().map(String::as_str), "/");
                prop_assert!(!joined.contains("//"));
                prop_assert!(!joined.starts_with('/'));
                prop_assert!(!joined.ends_with('/'));

                let expected: Vec<&str> = segments
                    .iter()
                    .map(String::as_str)
                    .filter(|s| !s.is_empty())
                    .collect();
                let split: Vec<&str> = if joined.is_empty() {
                    Vec::new()
                } else {
                    joined.split('/').collect()
                };
                prop_assert_eq!(split, expected);
            }

            #[test]
            fn test_full_path_extends_parent_path(
                prefix in "/?[A-Z]{0,3}/?",
                name in "[a-z]{1,5}"
            ) {
                let builder = PathBuilder::new(&prefix, "/");
                let path = builder.build(&level("F1", &name), &index());
                let expected = join_segments([path.parent_path.as_str(), name.as_str()], "/");
                prop_assert_eq!(path.full_path, expected);
            }
        }
    }
}
