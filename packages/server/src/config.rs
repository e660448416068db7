use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storefront_compiler_html::{ElementStateReplay, RenderOptions};
use storefront_content::BaseUrlResolver;
use storefront_editor::EditorConfig;
use storefront_templates::TemplateCatalog;

pub const DEFAULT_CONFIG_NAME: &str = "storefront.config.json";

/// Storefront configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Directory of template markup overriding the built-in templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Record store directory (store records live under `stores/`)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL that relative image paths are joined onto
    #[serde(default)]
    pub asset_base_url: String,

    /// Address the public page server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Replay hidden/deleted/moved element states on the public page
    #[serde(default)]
    pub replay_element_states: bool,

    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl StorefrontConfig {
    /// Load config from a directory, defaults when there is no config file
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Resolve relative directories against `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        self.template_dir = self
            .template_dir
            .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });
        self
    }

    pub fn catalog(&self) -> TemplateCatalog {
        match &self.template_dir {
            Some(dir) => TemplateCatalog::from_dir(dir),
            None => TemplateCatalog::embedded(),
        }
    }

    pub fn resolver(&self) -> BaseUrlResolver {
        BaseUrlResolver::new(self.asset_base_url.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            element_state_replay: ElementStateReplay::from_flag(self.replay_element_states),
            copyright_year: None,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            data_dir: default_data_dir(),
            asset_base_url: String::new(),
            bind: default_bind(),
            replay_element_states: false,
            editor: EditorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "templateDir": "markup",
            "dataDir": "/var/lib/storefront",
            "assetBaseUrl": "https://cdn.example.com",
            "bind": "0.0.0.0:3000",
            "replayElementStates": true,
            "editor": { "snapThreshold": 12, "historyLimit": 20 }
        }"#;

        let config: StorefrontConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.template_dir, Some(PathBuf::from("markup")));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/storefront"));
        assert_eq!(config.bind, "0.0.0.0:3000");
        assert_eq!(config.editor.snap_threshold, 12.0);
        assert_eq!(config.editor.history_limit, 20);
        assert_eq!(config.editor.nudge_step, 1.0);
        assert_eq!(
            config.render_options().element_state_replay,
            ElementStateReplay::Apply
        );
    }

    #[test]
    fn test_default_config() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.render_options().element_state_replay, ElementStateReplay::Skip);
    }

    #[test]
    fn test_resolve_paths() {
        let config = StorefrontConfig {
            template_dir: Some(PathBuf::from("markup")),
            ..Default::default()
        }
        .resolve_paths(Path::new("/srv/shop"));
        assert_eq!(config.data_dir, PathBuf::from("/srv/shop/data"));
        assert_eq!(config.template_dir, Some(PathBuf::from("/srv/shop/markup")));
    }
}
