//! Configuration types and loading for nomen-rs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{NomenError, Result};
use crate::naming::deny_list::DenyList;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomenConfig {
    /// Naming analysis settings
    #[serde(default)]
    pub naming: NamingConfig,
}

impl NomenConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            NomenError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Load configuration from a YAML or JSON file, chosen by extension
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            NomenError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;
        Self::parse_for_path(&content, &path)
    }

    /// Parse configuration text read from `path`: JSON for a `.json`
    /// extension, YAML otherwise
    pub fn parse_for_path(content: &str, path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(content).map_err(Into::into),
            _ => serde_yaml::from_str(content).map_err(Into::into),
        }
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            NomenError::io(format!("Failed to write config file: {}", path.display()), e)
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.naming.validate()
    }
}

/// Naming analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Fully-qualified type names that never constrain naming
    pub deny_type_names: Vec<String>,

    /// Candidate base names that are never suggested, whatever the type
    pub deny_candidate_names: Vec<String>,

    /// Report interface-typed names that repeat the interface's own base name
    pub enable_interface_bare_name_check: bool,

    /// Individual rule switches
    pub rules: RuleToggles,
}

impl NamingConfig {
    /// Validate deny-list entries
    pub fn validate(&self) -> Result<()> {
        validate_entries(&self.deny_type_names, "naming.deny_type_names")?;
        validate_entries(&self.deny_candidate_names, "naming.deny_candidate_names")?;
        Ok(())
    }

    /// Build the deny list described by this configuration
    pub fn deny_list(&self) -> DenyList {
        DenyList::new(&self.deny_type_names, &self.deny_candidate_names)
    }
}

fn validate_entries(entries: &[String], field: &str) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(NomenError::validation_field(
                "Deny-list entries cannot be empty",
                format!("{field}[{index}]"),
            ));
        }
        if entry.contains(char::is_whitespace) {
            return Err(NomenError::validation_field(
                format!("Deny-list entry `{entry}` contains whitespace"),
                format!("{field}[{index}]"),
            ));
        }
    }
    Ok(())
}

/// Per-rule enable switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleToggles {
    /// Object-typed variables and properties must end in a type base name
    pub type_suffix_mismatch: bool,
    /// Iterables of objects must use plural or collection-style names
    pub iterable_plural: bool,
    /// Foreach value variables must match the iterable or its element type
    pub foreach_value: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            type_suffix_mismatch: true,
            iterable_plural: true,
            foreach_value: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = NomenConfig::default();
        assert!(!config.naming.enable_interface_bare_name_check);
        assert!(config.naming.rules.type_suffix_mismatch);
        assert!(config.naming.rules.iterable_plural);
        assert!(config.naming.rules.foreach_value);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: NomenConfig = serde_yaml::from_str(
            "naming:\n  deny_candidate_names: [data]\n  rules:\n    foreach_value: false\n",
        )
        .unwrap();
        assert_eq!(config.naming.deny_candidate_names, vec!["data"]);
        assert!(!config.naming.rules.foreach_value);
        assert!(config.naming.rules.iterable_plural);
        assert!(config.naming.deny_list().is_candidate_name_denied("Data"));
    }

    #[test]
    fn test_validation_names_offending_entry() {
        let mut config = NomenConfig::default();
        config.naming.deny_type_names = vec!["App\\Ok".to_string(), "  ".to_string()];
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("naming.deny_type_names[1]"));

        config.naming.deny_type_names.clear();
        config.naming.deny_candidate_names = vec!["two words".to_string()];
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("naming.deny_candidate_names[0]"));
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nomen.yml");

        let mut config = NomenConfig::default();
        config.naming.deny_type_names.push("App\\Legacy\\Item".to_string());
        config.naming.enable_interface_bare_name_check = true;
        config.to_yaml_file(&path).unwrap();

        assert_eq!(NomenConfig::from_yaml_file(&path).unwrap(), config);
        assert_eq!(NomenConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_json_file_is_loaded_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nomen.json");
        std::fs::write(&path, r#"{"naming": {"enable_interface_bare_name_check": true}}"#).unwrap();
        let loaded = NomenConfig::from_file(&path).unwrap();
        assert!(loaded.naming.enable_interface_bare_name_check);
    }

    #[test]
    fn test_parse_for_path_picks_format_by_extension() {
        let json = r#"{"naming": {"deny_candidate_names": ["data"]}}"#;
        let config = NomenConfig::parse_for_path(json, Path::new("nomen.json")).unwrap();
        assert_eq!(config.naming.deny_candidate_names, vec!["data"]);

        let yaml = "naming:\n  deny_candidate_names: [data]\n";
        assert_eq!(NomenConfig::parse_for_path(yaml, Path::new("nomen.yml")).unwrap(), config);
        assert!(matches!(
            NomenConfig::parse_for_path(yaml, Path::new("nomen.json")),
            Err(NomenError::Serialization { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NomenConfig::from_file("/nonexistent/nomen.yml").unwrap_err();
        assert!(matches!(err, NomenError::Io { .. }));
    }
}
