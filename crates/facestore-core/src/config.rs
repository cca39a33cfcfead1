//! Face selector configuration.

use crate::state::{get_item, set_item, StateStore};
use crate::types::{Gender, Race};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// State store key holding the current [`SelectorConfig`].
pub const SELECTOR_STATE_KEY: &str = "face_selector";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid selector config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How target faces are chosen downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaceSelectorMode {
    Many,
    One,
    #[default]
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaceSelectorOrder {
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
    SmallLarge,
    #[default]
    LargeSmall,
    BestWorst,
    WorstBest,
}

impl FaceSelectorOrder {
    pub const ALL: &[FaceSelectorOrder] = &[
        FaceSelectorOrder::LeftRight,
        FaceSelectorOrder::RightLeft,
        FaceSelectorOrder::TopBottom,
        FaceSelectorOrder::BottomTop,
        FaceSelectorOrder::SmallLarge,
        FaceSelectorOrder::LargeSmall,
        FaceSelectorOrder::BestWorst,
        FaceSelectorOrder::WorstBest,
    ];
}

impl fmt::Display for FaceSelectorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaceSelectorOrder::LeftRight => "left-right",
            FaceSelectorOrder::RightLeft => "right-left",
            FaceSelectorOrder::TopBottom => "top-bottom",
            FaceSelectorOrder::BottomTop => "bottom-top",
            FaceSelectorOrder::SmallLarge => "small-large",
            FaceSelectorOrder::LargeSmall => "large-small",
            FaceSelectorOrder::BestWorst => "best-worst",
            FaceSelectorOrder::WorstBest => "worst-best",
        };
        f.write_str(name)
    }
}

impl FromStr for FaceSelectorOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaceSelectorOrder::ALL
            .iter()
            .copied()
            .find(|order| order.to_string() == s)
            .ok_or_else(|| format!("unknown face selector order: {s}"))
    }
}

/// Face selector settings shared by the candidate gallery and matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub mode: FaceSelectorMode,
    pub order: FaceSelectorOrder,
    pub gender: Option<Gender>,
    pub race: Option<Race>,
    pub age_start: Option<u8>,
    pub age_end: Option<u8>,
    /// Maximum cosine distance for a face to match a reference.
    pub reference_face_distance: f32,
    pub reference_face_position: usize,
    /// Video frame the candidate gallery is extracted from.
    pub reference_frame_number: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            mode: FaceSelectorMode::default(),
            order: FaceSelectorOrder::default(),
            gender: None,
            race: None,
            age_start: None,
            age_end: None,
            reference_face_distance: 0.6,
            reference_face_position: 0,
            reference_frame_number: 0,
        }
    }
}

impl SelectorConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// Load from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    /// Apply `FACESTORE_*` environment overrides on top of `self`.
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(order) = env_parse::<FaceSelectorOrder>("FACESTORE_FACE_SELECTOR_ORDER") {
            self.order = order;
        }
        if let Some(distance) = env_parse("FACESTORE_REFERENCE_FACE_DISTANCE") {
            self.reference_face_distance = distance;
        }
        if let Some(frame) = env_parse("FACESTORE_REFERENCE_FRAME_NUMBER") {
            self.reference_frame_number = frame;
        }
        if let Some(age) = env_parse("FACESTORE_FACE_SELECTOR_AGE_START") {
            self.age_start = Some(age);
        }
        if let Some(age) = env_parse("FACESTORE_FACE_SELECTOR_AGE_END") {
            self.age_end = Some(age);
        }
        self
    }

    /// Defaults, then the file named by `FACESTORE_CONFIG` (if set and
    /// readable), then environment overrides.
    pub fn from_env() -> Self {
        let base = match std::env::var("FACESTORE_CONFIG") {
            Ok(path) => Self::load(Path::new(&path)).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path,
                    error = %err,
                    "falling back to default selector config"
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Config persisted in the session state, if any.
    pub fn from_state(state: &dyn StateStore) -> Option<Self> {
        get_item(state, SELECTOR_STATE_KEY)
    }

    pub fn save_state(&self, state: &mut dyn StateStore) {
        set_item(state, SELECTOR_STATE_KEY, self);
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStateStore;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.mode, FaceSelectorMode::Reference);
        assert_eq!(config.order, FaceSelectorOrder::LargeSmall);
        assert!((config.reference_face_distance - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SelectorConfig::from_toml_str(
            r#"
            order = "best-worst"
            gender = "female"
            age_start = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.order, FaceSelectorOrder::BestWorst);
        assert_eq!(config.gender, Some(Gender::Female));
        assert_eq!(config.age_start, Some(20));
        assert_eq!(config.mode, FaceSelectorMode::Reference);
        assert_eq!(config.reference_frame_number, 0);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = SelectorConfig::from_toml_str("order = \"sideways\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"many\"\nreference_face_distance = 0.3").unwrap();

        let config = SelectorConfig::load(file.path()).unwrap();

        assert_eq!(config.mode, FaceSelectorMode::Many);
        assert!((config.reference_face_distance - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SelectorConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_order_round_trips_through_str() {
        for order in FaceSelectorOrder::ALL {
            assert_eq!(order.to_string().parse::<FaceSelectorOrder>(), Ok(*order));
        }
        assert!("diagonal".parse::<FaceSelectorOrder>().is_err());
    }

    #[test]
    fn test_state_persistence() {
        let mut state = MemoryStateStore::new();
        assert!(SelectorConfig::from_state(&state).is_none());

        let config = SelectorConfig {
            reference_frame_number: 42,
            race: Some(Race::Asian),
            ..SelectorConfig::default()
        };
        config.save_state(&mut state);

        assert_eq!(SelectorConfig::from_state(&state), Some(config));
    }
}
