//! Configuration file structure (docpage.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use docpage_render::{ComponentMap, ComponentOverride};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub build: BuildSettings,
    /// Element overrides keyed by MDX element name
    #[serde(default)]
    pub components: BTreeMap<String, ComponentOverride>,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Stylesheet URLs to link from the layout
    #[serde(default)]
    pub styles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: String,
    /// Custom layout template
    pub template: Option<String>,
    #[serde(default)]
    pub fragment: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            lang: default_lang(),
            styles: Vec::new(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            template: None,
            fragment: false,
        }
    }
}

fn default_title() -> String {
    "Documentation".to_string()
}
fn default_lang() -> String {
    "en".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}

impl ConfigFile {
    /// Validated component overrides.
    pub fn component_map(&self) -> Result<ComponentMap> {
        ComponentMap::from_table(self.components.clone())
            .context("Invalid [components] entry in config")
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpage_render::ElementName;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("docpage.toml")).unwrap();

        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.build.output, "dist");
        assert!(!config.build.fragment);
        assert!(config.component_map().unwrap().is_empty());
    }

    #[test]
    fn parses_full_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docpage.toml");
        fs::write(
            &path,
            r#"
[site]
title = "IBM FHIR Server"
styles = ["/assets/docs.css"]

[build]
output = "public"
template = "layout.html"
fragment = true

[components]
wrapper = { tag = "article", class = "mdx" }
pre = { tag = "pre", class = "code-block", attrs = { "data-copy" = "true" } }
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.site.title, "IBM FHIR Server");
        assert_eq!(config.site.styles, vec!["/assets/docs.css"]);
        assert_eq!(config.build.output, "public");
        assert_eq!(config.build.template.as_deref(), Some("layout.html"));
        assert!(config.build.fragment);

        let components = config.component_map().unwrap();
        assert_eq!(components.len(), 2);
        let pre = components.element(ElementName::Pre);
        assert_eq!(pre.get_attr("data-copy"), Some("true"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docpage.toml");
        fs::write(&path, "[site\ntitle = 1").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unknown_component_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docpage.toml");
        fs::write(&path, "[components]\ntable = { tag = \"div\" }\n").unwrap();

        let config = load_config(&path).unwrap();

        assert!(config.component_map().is_err());
    }
}
