//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{CoreError, Result},
    pages::PageId,
};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content store settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, appended to page titles by the renderer.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,
}

/// Content store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding one sub-directory per content kind.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// What to do with records that fail validation.
    #[serde(default)]
    pub on_invalid: InvalidPolicy,
}

/// Handling of content records that fail schema validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPolicy {
    /// Abort collection and report every invalid record.
    #[default]
    Fail,
    /// Drop invalid records with a warning.
    Skip,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content")
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            on_invalid: InvalidPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        Url::parse(&self.site.base_url).map_err(|e| {
            CoreError::config_with_source(
                format!("site.base_url is not a valid URL: {}", self.site.base_url),
                e,
            )
        })?;

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Canonical URL of a static page, for `<link rel="canonical">` and Open Graph tags.
    pub fn canonical_url(&self, page: PageId) -> String {
        self.url_for(page.path())
    }

    /// Content directory resolved against a project root.
    pub fn content_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.content.dir)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("folio.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(content.as_bytes()).expect("write");
        config_path
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Ada Lovelace"
base_url = "https://ada.dev"

[content]
dir = "content"
on_invalid = "skip"
"#,
        );

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Ada Lovelace");
        assert_eq!(config.site.base_url, "https://ada.dev");
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.on_invalid, InvalidPolicy::Skip);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Minimal"
base_url = "https://example.com"
"#,
        );

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.content.dir, PathBuf::from("src/content"));
        assert_eq!(config.content.on_invalid, InvalidPolicy::Fail);
    }

    #[test]
    fn test_site_config_keys() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Minimal"
base_url = "https://example.com"
"#,
        );

        let config = Config::load(&config_path).expect("load config");
        let site = toml::Value::try_from(&config.site).expect("serialize site");
        let mut keys: Vec<&str> = site
            .as_table()
            .expect("site table")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["base_url", "title"]);
    }

    #[test]
    fn test_url_for() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Test"
base_url = "https://example.com/"
"#,
        );

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.url_for("/projects"), "https://example.com/projects");
        assert_eq!(config.url_for("projects"), "https://example.com/projects");
        assert_eq!(config.canonical_url(PageId::Home), "https://example.com/");
        assert_eq!(
            config.canonical_url(PageId::Uses),
            "https://example.com/uses"
        );
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = ""
base_url = "https://example.com"
"#,
        );

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Test"
base_url = "example.com"
"#,
        );

        let err = Config::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));
    }

    #[test]
    fn test_config_unknown_policy_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Test"
base_url = "https://example.com"

[content]
on_invalid = "ignore"
"#,
        );

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_load_with_env() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "From File"
base_url = "https://example.com"
"#,
        );

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "From File");
        assert_eq!(config.content.on_invalid, InvalidPolicy::Fail);
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/folio.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
