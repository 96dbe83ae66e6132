//! Layered settings for model card generation.
//!
//! Uses `figment` for layered configuration: defaults -> user file -> workspace file ->
//! environment -> explicit overrides. Files live at `~/.config/hubcard/config.toml`
//! and `.hubcard/config.toml` in the workspace directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CardError;

/// Defaults applied to every generated card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Hub user or organization that bare model names are published under.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Token used when the training config does not carry one.
    #[serde(default)]
    pub hub_token: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_license")]
    pub license: String,
    /// Tags merged into every card generated from a training run.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: None,
            hub_token: None,
            language: default_language(),
            license: default_license(),
            tags: Vec::new(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_license() -> String {
    "apache-2.0".to_string()
}

/// Path of the user-level settings file, if a config directory can be resolved.
pub fn user_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "hubcard", "hubcard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Path of the workspace-level settings file.
pub fn workspace_settings_path(workspace: &Path) -> PathBuf {
    workspace.join(".hubcard").join("config.toml")
}

/// Values set explicitly for a single invocation (e.g. command-line flags).
///
/// Only fields that are `Some` are layered; everything else keeps the value
/// from the lower layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Load settings from all layers.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `HUBCARD_`)
/// 3. Workspace-local file (`.hubcard/config.toml`)
/// 4. User file (`~/.config/hubcard/config.toml`)
/// 5. Built-in defaults
pub fn load_settings(
    workspace: Option<&Path>,
    overrides: Option<&SettingsOverrides>,
) -> Result<Settings, CardError> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    if let Some(user_file) = user_settings_path() {
        if user_file.exists() {
            figment = figment.merge(Toml::file(&user_file));
        }
    }

    if let Some(ws) = workspace {
        let ws_file = workspace_settings_path(ws);
        if ws_file.exists() {
            figment = figment.merge(Toml::file(&ws_file));
        }
    }

    // HUBCARD_NAMESPACE, HUBCARD_HUB_TOKEN, ...
    figment = figment.merge(Env::prefixed("HUBCARD_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let settings = figment.extract().map_err(Box::new)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    // load_settings reads process env; Jail serializes these tests and restores env vars.
    fn write_workspace_file(workspace: &Path, contents: &str) {
        let file = workspace_settings_path(workspace);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, contents).unwrap();
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.language, "en");
        assert_eq!(settings.license, "apache-2.0");
        assert!(settings.namespace.is_none());
        assert!(settings.tags.is_empty());
    }

    #[test]
    fn test_workspace_file_is_layered() {
        Jail::expect_with(|jail| {
            write_workspace_file(
                jail.directory(),
                "namespace = \"fusing\"\ntags = [\"unconditional-image-generation\"]\n",
            );

            let settings = load_settings(Some(jail.directory()), None).unwrap();
            assert_eq!(settings.namespace.as_deref(), Some("fusing"));
            assert_eq!(settings.tags, vec!["unconditional-image-generation"]);
            assert_eq!(settings.license, "apache-2.0");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_workspace_file() {
        Jail::expect_with(|jail| {
            write_workspace_file(jail.directory(), "namespace = \"fusing\"\nlicense = \"mit\"\n");
            jail.set_env("HUBCARD_NAMESPACE", "google");
            jail.set_env("HUBCARD_HUB_TOKEN", "hf_env_token");

            let settings = load_settings(Some(jail.directory()), None).unwrap();
            assert_eq!(settings.namespace.as_deref(), Some("google"));
            assert_eq!(settings.hub_token.as_deref(), Some("hf_env_token"));
            assert_eq!(settings.license, "mit");
            Ok(())
        });
    }

    #[test]
    fn test_overrides_win() {
        Jail::expect_with(|jail| {
            write_workspace_file(jail.directory(), "license = \"mit\"\n");
            jail.set_env("HUBCARD_LICENSE", "cc-by-4.0");

            let overrides = SettingsOverrides {
                license: Some("openrail".into()),
                ..SettingsOverrides::default()
            };
            let settings = load_settings(Some(jail.directory()), Some(&overrides)).unwrap();
            assert_eq!(settings.license, "openrail");
            Ok(())
        });
    }

    #[test]
    fn test_partial_overrides_keep_lower_layers() {
        Jail::expect_with(|jail| {
            write_workspace_file(
                jail.directory(),
                "language = \"fr\"\nlicense = \"mit\"\ntags = [\"butterflies\"]\n",
            );

            let overrides = SettingsOverrides {
                namespace: Some("fusing".into()),
                hub_token: Some("hf_cli_token".into()),
                ..SettingsOverrides::default()
            };
            let settings = load_settings(Some(jail.directory()), Some(&overrides)).unwrap();
            assert_eq!(settings.namespace.as_deref(), Some("fusing"));
            assert_eq!(settings.hub_token.as_deref(), Some("hf_cli_token"));
            assert_eq!(settings.language, "fr");
            assert_eq!(settings.license, "mit");
            assert_eq!(settings.tags, vec!["butterflies"]);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_workspace_file_is_settings_error() {
        Jail::expect_with(|jail| {
            write_workspace_file(jail.directory(), "tags = 42\n");

            let result = load_settings(Some(jail.directory()), None);
            assert!(matches!(result, Err(CardError::Settings(_))));
            Ok(())
        });
    }
}
