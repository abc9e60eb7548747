use config::{Config, ConfigError, File};
use hearth_types::{Author, ColorScheme};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::composer::media::{DEFAULT_ACCEPTED_TYPES, DEFAULT_MAX_ATTACHMENTS};
use crate::composer::MediaPolicy;

const SETTINGS_FILE_NAME: &str = "hearth.toml";
const DEFAULT_LINK_PREVIEW_DELAY_MS: u64 = 1000;

/// Environment variables that override file settings, highest priority
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("HEARTH_MAX_ATTACHMENTS", "composer.max_attachments"),
    ("HEARTH_LINK_PREVIEW_DELAY_MS", "composer.link_preview_delay_ms"),
    ("HEARTH_COLOR_SCHEME", "ui.color_scheme"),
    ("HEARTH_FIXTURES", "fixtures.path"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct ComposerSettings {
    pub accepted_media_types: Vec<String>,
    pub max_attachments: usize,
    pub link_preview_delay_ms: u64,
    /// Ask before Esc discards an edited draft
    pub confirm_discard: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiSettings {
    pub color_scheme: ColorScheme,
}

/// Local identity shown on previews and on published posts
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub composer: ComposerSettings,
    pub ui: UiSettings,
    pub identity: IdentitySettings,
    #[serde(default)]
    pub fixtures: FixtureSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            composer: ComposerSettings {
                accepted_media_types: DEFAULT_ACCEPTED_TYPES.iter().map(|t| t.to_string()).collect(),
                max_attachments: DEFAULT_MAX_ATTACHMENTS,
                link_preview_delay_ms: DEFAULT_LINK_PREVIEW_DELAY_MS,
                confirm_discard: true,
            },
            ui: UiSettings {
                color_scheme: ColorScheme::Default,
            },
            identity: IdentitySettings {
                name: "You".to_string(),
                username: "you".to_string(),
            },
            fixtures: FixtureSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, settings files and the environment.
    ///
    /// Later sources win: `~/.hearth/hearth.toml`, then `./hearth.toml`, then
    /// the explicit `--config` file (which must exist), then `HEARTH_*` vars.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut files: Vec<(PathBuf, bool)> = Vec::new();

        if let Some(home) = dirs::home_dir() {
            files.push((home.join(".hearth").join(SETTINGS_FILE_NAME), false));
        }
        files.push((PathBuf::from(SETTINGS_FILE_NAME), false));
        if let Some(path) = explicit {
            files.push((path.to_path_buf(), true));
        }

        let overrides: Vec<(&str, String)> = ENV_OVERRIDES
            .iter()
            .filter_map(|(var, key)| std::env::var(var).ok().map(|value| (*key, value)))
            .collect();

        Self::build(&files, &overrides)
    }

    /// Assemble settings from `(path, required)` files and key overrides
    pub fn build(files: &[(PathBuf, bool)], overrides: &[(&str, String)]) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("composer.accepted_media_types", defaults.composer.accepted_media_types.clone())?
            .set_default("composer.max_attachments", defaults.composer.max_attachments as u64)?
            .set_default("composer.link_preview_delay_ms", defaults.composer.link_preview_delay_ms)?
            .set_default("composer.confirm_discard", defaults.composer.confirm_discard)?
            .set_default("ui.color_scheme", defaults.ui.color_scheme.as_str())?
            .set_default("identity.name", defaults.identity.name.clone())?
            .set_default("identity.username", defaults.identity.username.clone())?;

        for (path, required) in files {
            if *required || path.exists() {
                builder = builder.add_source(File::from(path.as_path()).required(*required));
            }
        }

        for (key, value) in overrides {
            builder = builder.set_override(*key, value.clone())?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn media_policy(&self) -> MediaPolicy {
        MediaPolicy {
            accepted_types: self.composer.accepted_media_types.clone(),
            max_attachments: self.composer.max_attachments,
        }
    }

    pub fn link_preview_delay(&self) -> Duration {
        Duration::from_millis(self.composer.link_preview_delay_ms)
    }

    pub fn identity(&self) -> Author {
        Author {
            name: self.identity.name.clone(),
            username: self.identity.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::build(&[], &[]).unwrap();
        assert_eq!(settings.composer.max_attachments, 5);
        assert_eq!(settings.link_preview_delay(), Duration::from_millis(1000));
        assert!(settings.composer.confirm_discard);
        assert_eq!(settings.ui.color_scheme, ColorScheme::Default);
        assert_eq!(settings.media_policy(), MediaPolicy::default());
        assert!(settings.fixtures.path.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
[composer]
accepted_media_types = ["image/png"]
max_attachments = 2

[ui]
color_scheme = "Solarized"

[identity]
name = "Olivia Martin"
username = "OliviaM"

[fixtures]
path = "fixtures/feed.json"
"#,
        );
        let settings = Settings::build(&[(file.path().to_path_buf(), true)], &[]).unwrap();

        assert_eq!(settings.composer.accepted_media_types, vec!["image/png"]);
        assert_eq!(settings.composer.max_attachments, 2);
        assert_eq!(settings.composer.link_preview_delay_ms, 1000);
        assert_eq!(settings.ui.color_scheme, ColorScheme::Solarized);
        assert_eq!(settings.identity().handle(), "@OliviaM");
        assert_eq!(settings.fixtures.path, Some(PathBuf::from("fixtures/feed.json")));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = toml_file("[composer]\nmax_attachments = 2\n");
        let overrides = vec![
            ("composer.max_attachments", "7".to_string()),
            ("ui.color_scheme", "Dark".to_string()),
        ];
        let settings = Settings::build(&[(file.path().to_path_buf(), true)], &overrides).unwrap();
        assert_eq!(settings.composer.max_attachments, 7);
        assert_eq!(settings.ui.color_scheme, ColorScheme::Dark);
    }

    #[test]
    fn test_missing_required_file_is_error() {
        let missing = PathBuf::from("/definitely/not/here/hearth.toml");
        assert!(Settings::build(&[(missing.clone(), true)], &[]).is_err());
        assert!(Settings::build(&[(missing, false)], &[]).is_ok());
    }
}
