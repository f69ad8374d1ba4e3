use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult, MergeWarning};
use crate::sort::SortOptions;

/// Configuration for a merge run.
///
/// Every field defaults to off, so an empty TOML document is a valid
/// configuration: plain concatenation with a history chunk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Replace the output file if it already exists.
    pub force_overwrite: bool,
    /// Don't add the run-level history chunk.
    pub skip_history: bool,
    /// Chunk ordering.
    pub sort: SortConfig,
    /// Omit top-level chunks equal to one already in the output.
    pub dedupe: bool,
    /// Write a compressed container.
    pub compress: bool,
}

/// Sorting switches. The sub-options only take effect when `enabled` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub enabled: bool,
    pub alphabetical: bool,
    pub include_section_headers: bool,
}

impl SortConfig {
    /// The options to sort with, or `None` when sorting is off.
    pub fn options(&self) -> Option<SortOptions> {
        self.enabled.then_some(SortOptions {
            alphabetical: self.alphabetical,
            include_section_headers: self.include_section_headers,
        })
    }

    /// Returns `true` if sub-options are set that will be ignored.
    pub fn has_ignored_flags(&self) -> bool {
        !self.enabled && (self.alphabetical || self.include_section_headers)
    }
}

impl MergeConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> MergeResult<Self> {
        toml::from_str(source).map_err(|e| MergeError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> MergeResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| MergeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Non-fatal problems with this configuration.
    pub fn warnings(&self) -> Vec<MergeWarning> {
        let mut warnings = Vec::new();
        if self.sort.has_ignored_flags() {
            warnings.push(MergeWarning::SortFlagsWithoutSort {
                alphabetical: self.sort.alphabetical,
                include_section_headers: self.sort.include_section_headers,
            });
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = MergeConfig::default();
        assert!(!c.force_overwrite);
        assert!(!c.skip_history);
        assert!(!c.dedupe);
        assert!(!c.compress);
        assert!(c.sort.options().is_none());
        assert!(c.warnings().is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MergeConfig::from_toml_str("").unwrap(), MergeConfig::default());
    }

    #[test]
    fn toml_fields() {
        let c = MergeConfig::from_toml_str(
            r#"
            dedupe = true
            compress = true

            [sort]
            enabled = true
            alphabetical = true
            "#,
        )
        .unwrap();
        assert!(c.dedupe);
        assert!(c.compress);
        assert_eq!(
            c.sort.options(),
            Some(SortOptions {
                alphabetical: true,
                include_section_headers: false,
            })
        );
    }

    #[test]
    fn bad_toml() {
        let err = MergeConfig::from_toml_str("dedupe = \"yes\"").unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
    }

    #[test]
    fn missing_file() {
        let err = MergeConfig::load(Path::new("/nonexistent/p3dtool.toml")).unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
    }

    #[test]
    fn sub_flags_without_sort_warn() {
        let c = MergeConfig {
            sort: SortConfig {
                enabled: false,
                alphabetical: true,
                include_section_headers: false,
            },
            ..Default::default()
        };
        assert!(c.sort.options().is_none());
        assert_eq!(
            c.warnings(),
            vec![MergeWarning::SortFlagsWithoutSort {
                alphabetical: true,
                include_section_headers: false,
            }]
        );
    }

    #[test]
    fn sub_flags_with_sort_do_not_warn() {
        let c = MergeConfig {
            sort: SortConfig {
                enabled: true,
                alphabetical: true,
                include_section_headers: true,
            },
            ..Default::default()
        };
        assert!(c.warnings().is_empty());
    }
}
