use hearth_types::{FeedPost, Profile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixtures from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixtures from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeBanner {
    pub title: String,
    pub description: String,
}

/// Display data injected into the feed at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub welcome: Option<WelcomeBanner>,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub posts: Vec<FeedPost>,
}

impl Fixtures {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let json = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given, otherwise start with an empty feed
    pub fn load_optional(path: Option<&Path>) -> Result<Self, FixtureError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_FIXTURES: &str = include_str!("../fixtures/feed.json");

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_fixtures_parse() {
        let fixtures = Fixtures::from_json(SAMPLE_FIXTURES).unwrap();
        assert!(fixtures.posts.len() >= 3);
        assert!(fixtures.welcome.is_some());
        let profile = fixtures.profile.unwrap();
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_load_optional_none_is_empty() {
        let fixtures = Fixtures::load_optional(None).unwrap();
        assert!(fixtures.posts.is_empty());
        assert!(fixtures.welcome.is_none());
    }

    #[test]
    fn test_load_reports_path_on_errors() {
        let missing = Path::new("/definitely/not/here.json");
        let err = Fixtures::load(missing).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Fixtures::load(file.path()).unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
    }
}
