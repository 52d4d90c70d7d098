use crate::error::Result;
use crate::host::Settings;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub const MAIN_SECTION: &str = "SteamHMD";
pub const DISPLAY_SECTION: &str = "Android-Display";

/// Settings store backed by a TOML document of `[section]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TomlSettings {
    sections: HashMap<String, toml::Table>,
}

impl TomlSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), sections = settings.sections.len(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_value(mut self, section: &str, key: &str, value: impl Into<toml::Value>) -> Self {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
        self
    }

    fn value(&self, section: &str, key: &str) -> Option<&toml::Value> {
        self.sections.get(section)?.get(key)
    }
}

impl Settings for TomlSettings {
    fn get_string(&self, section: &str, key: &str) -> String {
        match self.value(section, key) {
            Some(toml::Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    fn get_i32(&self, section: &str, key: &str) -> i32 {
        match self.value(section, key) {
            Some(toml::Value::Integer(i)) => i32::try_from(*i).unwrap_or(0),
            _ => 0,
        }
    }

    fn get_f32(&self, section: &str, key: &str) -> f32 {
        match self.value(section, key) {
            Some(toml::Value::Float(f)) => *f as f32,
            Some(toml::Value::Integer(i)) => *i as f32,
            _ => 0.0,
        }
    }

    fn get_bool(&self, section: &str, key: &str) -> bool {
        matches!(self.value(section, key), Some(toml::Value::Boolean(true)))
    }
}

/// Geometry of the virtual display window and its render target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayConfiguration {
    pub window_x: i32,
    pub window_y: i32,
    pub window_width: u32,
    pub window_height: u32,
    pub render_width: u32,
    pub render_height: u32,
}

impl DisplayConfiguration {
    /// Negative sizes read as 0; nothing else is checked.
    pub fn from_settings(settings: &dyn Settings) -> Self {
        let size = |key: &str| u32::try_from(settings.get_i32(DISPLAY_SECTION, key)).unwrap_or(0);

        Self {
            window_x: settings.get_i32(DISPLAY_SECTION, "window_x"),
            window_y: settings.get_i32(DISPLAY_SECTION, "window_y"),
            window_width: size("window_width"),
            window_height: size("window_height"),
            render_width: size("render_width"),
            render_height: size("render_height"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceConfig {
    pub model_number: String,
    pub serial_number: String,
    pub display: DisplayConfiguration,
}

impl DeviceConfig {
    pub fn from_settings(settings: &dyn Settings) -> Self {
        Self {
            model_number: settings.get_string(MAIN_SECTION, "model_number"),
            serial_number: settings.get_string(MAIN_SECTION, "serial_number"),
            display: DisplayConfiguration::from_settings(settings),
        }
    }
}
