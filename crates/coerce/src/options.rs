//! Dispatch configuration.
//!
//! [`CoercionOptions`] is plain data: an ordered converter list, a culture and
//! the numeric parsing mode. [`CoercionOptions::shared`] hands out a lazily
//! built process-wide default that cannot be mutated; callers needing a
//! different pipeline own their instance.
//!
//! [`CoercionSettings`] is the serde face of the same knobs, for embedding in
//! an application config file:
//!
//! ```toml
//! [coercion]
//! culture = "de-DE"
//! fast_numeric_parsing = false
//! ```

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::converters;
use crate::culture::Culture;

// ============================================================================
// OPTIONS
// ============================================================================

/// Converters, culture and numeric mode used by one dispatch.
#[derive(Debug, Clone)]
pub struct CoercionOptions {
    /// Ordered converter pipeline; the first success wins.
    pub converters: Vec<Arc<dyn Converter>>,
    /// Culture used for number and date text.
    pub culture: Culture,
    /// Parse numeric text straight into the target width. Faster, but every
    /// failure, overflow included, is reported as `InvalidFormat`.
    pub fast_numeric_parsing: bool,
}

impl CoercionOptions {
    /// The built-in pipeline with the invariant culture and fast numeric parsing.
    pub fn new() -> Self {
        Self {
            converters: converters::builtin(),
            culture: Culture::invariant(),
            fast_numeric_parsing: true,
        }
    }

    /// No converters at all. Only null handling and identity succeed until
    /// converters are pushed.
    pub fn empty() -> Self {
        Self {
            converters: Vec::new(),
            ..Self::new()
        }
    }

    /// The process-wide default, built on first use.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<CoercionOptions> = OnceLock::new();
        SHARED.get_or_init(Self::new)
    }

    /// Builds options from a config section.
    pub fn from_settings(settings: &CoercionSettings) -> Result<Self, SettingsError> {
        let culture = Culture::from_name(&settings.culture)
            .ok_or_else(|| SettingsError::UnknownCulture(settings.culture.clone()))?;
        Ok(Self::new()
            .with_culture(culture)
            .with_fast_numeric_parsing(settings.fast_numeric_parsing))
    }

    #[must_use]
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    #[must_use]
    pub fn with_fast_numeric_parsing(mut self, enabled: bool) -> Self {
        self.fast_numeric_parsing = enabled;
        self
    }

    /// Appends a converter after the existing ones.
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Inserts a converter ahead of all existing ones.
    #[must_use]
    pub fn with_converter_first(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converters.insert(0, converter);
        self
    }
}

impl Default for CoercionOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Serializable configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoercionSettings {
    /// Culture tag such as `"de-DE"`; empty selects the invariant culture.
    pub culture: String,
    pub fast_numeric_parsing: bool,
}

impl Default for CoercionSettings {
    fn default() -> Self {
        Self {
            culture: String::new(),
            fast_numeric_parsing: true,
        }
    }
}

/// Invalid [`CoercionSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown culture '{0}'")]
    UnknownCulture(String),
}
