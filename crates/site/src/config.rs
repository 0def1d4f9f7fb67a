//! Site configuration, read from `mdxblog.yaml`.

use crate::SiteError;
use mdxblog_render::{LinkStyle, RenderOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "mdxblog.yaml";

/// How the router tracks the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// In-memory entry stack, independent of the address bar.
    #[default]
    Memory,
    /// Location kept in the URL fragment (`#/path`).
    Hash,
}

impl HistoryMode {
    /// How links are written for this mode.
    pub fn link_style(self) -> LinkStyle {
        match self {
            HistoryMode::Memory => LinkStyle::Path,
            HistoryMode::Hash => LinkStyle::Hash,
        }
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistoryMode::Memory => "memory",
            HistoryMode::Hash => "hash",
        })
    }
}

impl FromStr for HistoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(HistoryMode::Memory),
            "hash" => Ok(HistoryMode::Hash),
            other => Err(format!("unknown history mode `{other}` (expected memory or hash)")),
        }
    }
}

/// Site-wide settings.
///
/// Every field is optional in the YAML file; missing fields take the
/// [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, appended to every page title.
    pub title: String,
    /// `lang` attribute of the document.
    pub lang: String,
    /// History strategy.
    pub history: HistoryMode,
    /// Initial memory-history entries; the last one is the starting location.
    pub initial_entries: Vec<String>,
    /// Output directory of the static export.
    pub out_dir: PathBuf,
    /// Load the utility CSS runtime from its CDN.
    pub tailwind_cdn: bool,
    /// Highlight fenced code.
    pub highlight: bool,
    /// Wrap headings in self-links.
    pub heading_autolinks: bool,
    /// Add `loading="lazy"` to images.
    pub lazy_images: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "mdxblog".to_string(),
            lang: "en".to_string(),
            history: HistoryMode::Memory,
            initial_entries: vec!["/".to_string()],
            out_dir: PathBuf::from("dist"),
            tailwind_cdn: true,
            highlight: true,
            heading_autolinks: false,
            lazy_images: false,
        }
    }
}

impl SiteConfig {
    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SiteError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SiteError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Reads a config file, falling back to the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SiteError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Renderer options derived from this config.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            enable_heading_autolinks: self.heading_autolinks,
            enable_lazy_images: self.lazy_images,
            enable_highlighting: self.highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(SiteConfig::from_yaml_str("\n").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SiteConfig::from_yaml_str(
            "title: My Blog\nhistory: hash\ninitialEntries: [/, /blog/jeremy/]\nhighlight: false\n",
        )
        .unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.history, HistoryMode::Hash);
        assert_eq!(config.initial_entries, ["/", "/blog/jeremy/"]);
        assert!(!config.highlight);
        assert_eq!(config.lang, "en");
        assert!(config.tailwind_cdn);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SiteConfig::from_yaml_str("titel: typo\n").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_or_default(&dir.path().join("mdxblog.yaml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn history_mode_parses_case_insensitively() {
        assert_eq!("Hash".parse::<HistoryMode>(), Ok(HistoryMode::Hash));
        assert!("browser".parse::<HistoryMode>().is_err());
        assert_eq!(HistoryMode::Memory.to_string(), "memory");
    }
}
