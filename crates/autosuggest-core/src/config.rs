//! Configuration for the suggestion engine.
//!
//! [`Settings`] is the serialisable part, resolved hierarchically:
//! 1. Built-in defaults
//! 2. Global settings (`$XDG_CONFIG_HOME/autosuggest/settings.json`)
//! 3. An explicit settings file
//! 4. Environment variables
//!
//! [`Options`] is what a controller is built from: the settings plus the
//! mapping and matching callbacks, with defaults filled in at construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::error::{Error, Result};
use crate::host::ListItem;
use crate::matcher::{FragmentPattern, prefix_match};

/// Vertical gap between the caret and the suggestion list.
pub const DEFAULT_LIST_OFFSET: i32 = 20;

/// Serialisable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field holding the display string when candidates are records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_key: Option<String>,
    /// Added to the caret's vertical position when placing the list.
    pub list_offset: i32,
    /// Whether the default mapping marks the first item highlighted.
    pub highlight_first: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_key: None,
            list_offset: DEFAULT_LIST_OFFSET,
            highlight_first: true,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }

    /// Overlay `layer` on top of `self`. Fields the layer leaves unset keep
    /// the current value.
    pub fn merge(&mut self, layer: SettingsLayer) {
        if let Some(key) = layer.display_key {
            self.display_key = Some(key);
        }
        if let Some(offset) = layer.list_offset {
            self.list_offset = offset;
        }
        if let Some(highlight) = layer.highlight_first {
            self.highlight_first = highlight;
        }
    }

    /// Apply `AUTOSUGGEST_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("AUTOSUGGEST_DISPLAY_KEY") {
            self.display_key = if key.is_empty() { None } else { Some(key) };
        }
        if let Some(val) = lookup("AUTOSUGGEST_LIST_OFFSET") {
            match val.parse() {
                Ok(n) => self.list_offset = n,
                Err(e) => {
                    tracing::warn!(value = %val, error = %e, "Ignoring AUTOSUGGEST_LIST_OFFSET");
                }
            }
        }
    }
}

/// One settings file as written, before layering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsLayer {
    pub display_key: Option<String>,
    pub list_offset: Option<i32>,
    pub highlight_first: Option<bool>,
}

impl SettingsLayer {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read settings file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse settings file {}: {}", path.display(), e))
    })
}

/// Location of the global settings file.
pub fn global_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("autosuggest").join("settings.json"))
}

/// Load settings with hierarchical resolution.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(global) = global_settings_path() {
        if global.exists() {
            settings.merge(SettingsLayer::load(&global)?);
            tracing::debug!(path = %global.display(), "Loaded global settings");
        }
    }

    if let Some(path) = explicit {
        settings.merge(SettingsLayer::load(path)?);
        tracing::debug!(path = %path.display(), "Loaded settings");
    }

    settings.apply_env_overrides(|name| std::env::var(name).ok());
    Ok(settings)
}

/// Produces the renderable form of a candidate at a match list position.
pub type MappingFn = Arc<dyn Fn(&Candidate, usize) -> ListItem + Send + Sync>;

/// Decides whether a candidate matches the compiled active fragment.
pub type MatchingFn = Arc<dyn Fn(&Candidate, &FragmentPattern) -> bool + Send + Sync>;

/// Runtime options a controller is built from. Immutable once built.
#[derive(Clone)]
pub struct Options {
    display_key: Option<String>,
    list_offset: i32,
    mapping: MappingFn,
    matching: MatchingFn,
}

impl Options {
    /// Fill in the default mapping and matching callbacks for `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            display_key: settings.display_key.clone(),
            list_offset: settings.list_offset,
            mapping: default_mapping(settings.display_key.clone(), settings.highlight_first),
            matching: default_matching(settings.display_key.clone()),
        }
    }

    #[must_use]
    pub fn with_mapping<F>(mut self, mapping: F) -> Self
    where
        F: Fn(&Candidate, usize) -> ListItem + Send + Sync + 'static,
    {
        self.mapping = Arc::new(mapping);
        self
    }

    #[must_use]
    pub fn with_matching<F>(mut self, matching: F) -> Self
    where
        F: Fn(&Candidate, &FragmentPattern) -> bool + Send + Sync + 'static,
    {
        self.matching = Arc::new(matching);
        self
    }

    pub fn display_key(&self) -> Option<&str> {
        self.display_key.as_deref()
    }

    pub const fn list_offset(&self) -> i32 {
        self.list_offset
    }

    pub const fn mapping(&self) -> &MappingFn {
        &self.mapping
    }

    pub const fn matching(&self) -> &MatchingFn {
        &self.matching
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("display_key", &self.display_key)
            .field("list_offset", &self.list_offset)
            .finish_non_exhaustive()
    }
}

/// Label each candidate with its display string; item 0 is highlighted.
pub fn default_mapping(display_key: Option<String>, highlight_first: bool) -> MappingFn {
    Arc::new(move |candidate: &Candidate, index: usize| ListItem {
        label: candidate.display(display_key.as_deref()).into_owned(),
        highlighted: highlight_first && index == 0,
    })
}

/// Case-insensitive prefix match on the display string.
pub fn default_matching(display_key: Option<String>) -> MatchingFn {
    Arc::new(move |candidate: &Candidate, pattern: &FragmentPattern| {
        prefix_match(candidate, pattern, display_key.as_deref())
    })
}
