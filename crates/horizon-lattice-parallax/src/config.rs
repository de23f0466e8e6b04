//! Banner configuration.
//!
//! [`ParallaxConfig`] is a plain value describing the banner: its resting
//! ("indicative") size, the size it collapses to, and whether it stays docked
//! at the top of the viewport once collapsed. The layout engine takes a
//! snapshot of it on every pass.
//!
//! [`SharedParallaxConfig`] is the mutable handle a host keeps around. Every
//! change that alters a value raises a dirty flag which the layout facade
//! consumes before the next pass; there is no implicit reactivity.
//!
//! # Loading from a file
//!
//! ```ignore
//! use horizon_lattice_parallax::ParallaxConfig;
//!
//! let config = ParallaxConfig::from_toml_str(r#"
//!     always_on_top = true
//!     indicative_size = { width = 375.0, height = 240.0 }
//!     min_size = { width = 375.0, height = 64.0 }
//! "#)?;
//! config.validate()?;
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::logging::targets;
use crate::types::Size;

/// Banner configuration for one list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Keep the collapsed banner docked at the top of the viewport.
    pub always_on_top: bool,
    /// Banner size when the list rests at its top. `None` disables the banner
    /// and leaves the base layout untouched.
    pub indicative_size: Option<Size>,
    /// Size the banner collapses to while the list scrolls up.
    pub min_size: Size,
}

impl ParallaxConfig {
    /// Create a configuration with a banner of the given resting size.
    pub fn new(indicative_size: Size) -> Self {
        Self {
            indicative_size: Some(indicative_size),
            ..Self::default()
        }
    }

    /// Set the collapsed size, builder style.
    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the always-on-top flag, builder style.
    pub fn with_always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = always_on_top;
        self
    }

    /// Vertical space reserved above the first section.
    ///
    /// Zero when the banner is disabled.
    #[inline]
    pub fn reserved_height(&self) -> f32 {
        self.indicative_size.map_or(0.0, |size| size.height)
    }

    /// Check the configuration for values the engine cannot make sense of.
    ///
    /// The engine itself never calls this; a malformed configuration simply
    /// produces out-of-range progressiveness values.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut fields = vec![
            ("min_size.width", self.min_size.width),
            ("min_size.height", self.min_size.height),
        ];
        if let Some(size) = self.indicative_size {
            fields.push(("indicative_size.width", size.width));
            fields.push(("indicative_size.height", size.height));
        }
        if let Some((field, value)) = fields.into_iter().find(|(_, value)| *value < 0.0) {
            return Err(ConfigError::NegativeDimension { field, value });
        }

        if let Some(size) = self.indicative_size
            && self.min_size.height > size.height
        {
            return Err(ConfigError::MinExceedsIndicative {
                min: self.min_size.height,
                indicative: size.height,
            });
        }

        Ok(())
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded TOML configuration");
        Ok(config)
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded JSON configuration");
        Ok(config)
    }

    /// Load and validate a configuration file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source)?,
            Some("json") => Self::from_json_str(&source)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;

        tracing::info!(target: targets::CONFIG, path = %path.display(), "loaded parallax configuration");
        Ok(config)
    }

    /// Serialize the configuration as a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

/// A shared, mutable handle to a [`ParallaxConfig`].
///
/// Clones share the same configuration and dirty flag. Layout passes read a
/// [`snapshot`](Self::snapshot), so a mutation never lands halfway through a
/// pass.
#[derive(Clone)]
pub struct SharedParallaxConfig {
    inner: Arc<RwLock<ParallaxConfig>>,
    dirty: Arc<AtomicBool>,
}

impl SharedParallaxConfig {
    /// Create a handle holding `config`.
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Copy out the current configuration.
    pub fn snapshot(&self) -> ParallaxConfig {
        *self.inner.read()
    }

    /// Mutate the configuration through a closure.
    ///
    /// Returns `true` and raises the dirty flag if the configuration changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut ParallaxConfig),
    {
        let mut config = self.inner.write();
        let before = *config;
        f(&mut config);
        let after = *config;
        let changed = after != before;
        if changed {
            self.dirty.store(true, Ordering::Release);
            tracing::debug!(target: targets::CONFIG, old = ?before, new = ?after, "configuration changed");
        }
        changed
    }

    /// Replace the whole configuration.
    pub fn replace(&self, config: ParallaxConfig) -> bool {
        self.update(|current| *current = config)
    }

    /// Set the banner's resting size. `None` disables the banner.
    pub fn set_indicative_size(&self, size: Option<Size>) -> bool {
        self.update(|config| config.indicative_size = size)
    }

    /// Set the collapsed banner size.
    pub fn set_min_size(&self, size: Size) -> bool {
        self.update(|config| config.min_size = size)
    }

    /// Set whether the collapsed banner stays docked.
    pub fn set_always_on_top(&self, always_on_top: bool) -> bool {
        self.update(|config| config.always_on_top = always_on_top)
    }

    /// Check whether the configuration changed since the last
    /// [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clear the dirty flag, returning its previous value.
    #[inline]
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}

impl Default for SharedParallaxConfig {
    fn default() -> Self {
        Self::new(ParallaxConfig::default())
    }
}

impl From<ParallaxConfig> for SharedParallaxConfig {
    fn from(config: ParallaxConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for SharedParallaxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedParallaxConfig")
            .field("config", &self.snapshot())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disables_banner() {
        let config = ParallaxConfig::default();
        assert_eq!(config.indicative_size, None);
        assert_eq!(config.reserved_height(), 0.0);
        assert!(!config.always_on_top);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_min_above_indicative() {
        let config = ParallaxConfig::new(Size::new(100.0, 40.0)).with_min_size(Size::new(100.0, 50.0));
        match config.validate() {
            Err(ConfigError::MinExceedsIndicative { min, indicative }) => {
                assert_eq!(min, 50.0);
                assert_eq!(indicative, 40.0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_dimensions() {
        let config = ParallaxConfig::new(Size::new(-1.0, 150.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeDimension { field: "indicative_size.width", .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let source = r#"
            always_on_top = true

            [indicative_size]
            width = 100.0
            height = 150.0

            [min_size]
            width = 100.0
            height = 50.0
        "#;
        let config = ParallaxConfig::from_toml_str(source).unwrap();
        assert_eq!(config.indicative_size, Some(Size::new(100.0, 150.0)));
        assert_eq!(config.min_size, Size::new(100.0, 50.0));
        assert!(config.always_on_top);

        let written = config.to_toml_string().unwrap();
        assert_eq!(ParallaxConfig::from_toml_str(&written).unwrap(), config);
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let config = ParallaxConfig::from_json_str(r#"{ "always_on_top": true }"#).unwrap();
        assert_eq!(config.indicative_size, None);
        assert_eq!(config.min_size, Size::ZERO);
        assert!(config.always_on_top);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            ParallaxConfig::from_toml_str("always_on_top = \"yes\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("banner.toml");
        std::fs::write(&toml_path, "[indicative_size]\nwidth = 320.0\nheight = 200.0\n").unwrap();
        let config = ParallaxConfig::load(&toml_path).unwrap();
        assert_eq!(config.indicative_size, Some(Size::new(320.0, 200.0)));

        let json_path = dir.path().join("banner.json");
        std::fs::write(&json_path, r#"{ "min_size": { "width": 320.0, "height": 64.0 } }"#).unwrap();
        let config = ParallaxConfig::load(&json_path).unwrap();
        assert_eq!(config.min_size, Size::new(320.0, 64.0));

        let yaml_path = dir.path().join("banner.yaml");
        std::fs::write(&yaml_path, "always_on_top: true").unwrap();
        assert!(matches!(
            ParallaxConfig::load(&yaml_path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.toml");
        std::fs::write(
            &path,
            "[indicative_size]\nwidth = 320.0\nheight = 40.0\n\n[min_size]\nwidth = 320.0\nheight = 64.0\n",
        )
        .unwrap();
        assert!(matches!(
            ParallaxConfig::load(&path),
            Err(ConfigError::MinExceedsIndicative { .. })
        ));

        assert!(matches!(
            ParallaxConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_shared_config_dirty_tracking() {
        let shared = SharedParallaxConfig::new(ParallaxConfig::default());
        assert!(shared.take_dirty());
        assert!(!shared.is_dirty());

        // Setting the same value is not a change
        assert!(!shared.set_always_on_top(false));
        assert!(!shared.is_dirty());

        assert!(shared.set_indicative_size(Some(Size::new(320.0, 200.0))));
        assert!(shared.is_dirty());
        assert!(shared.take_dirty());
        assert!(!shared.is_dirty());
    }

    #[test]
    fn test_shared_config_replace() {
        let shared = SharedParallaxConfig::default();
        shared.take_dirty();

        let config = ParallaxConfig::new(Size::new(320.0, 200.0)).with_always_on_top(true);
        assert!(shared.replace(config));
        assert!(shared.take_dirty());
        assert_eq!(shared.snapshot(), config);

        assert!(!shared.replace(config));
        assert!(!shared.is_dirty());
    }

    #[test]
    fn test_shared_config_clones_share_state() {
        let shared = SharedParallaxConfig::default();
        let other = shared.clone();
        shared.take_dirty();

        other.set_min_size(Size::new(0.0, 44.0));
        assert!(shared.is_dirty());
        assert_eq!(shared.snapshot().min_size, Size::new(0.0, 44.0));
    }
}
