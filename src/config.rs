//! Gallery configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` placed next to the catalog.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Recuerdos Familiares"
//! welcome = "Bienvenida. Seleccione un álbum para ver las fotos y videos de la familia."
//! footer = "Hecho con mucho cariño para la Familia ❤️"
//!
//! [auth]
//! password = "familia"          # Compared trimmed and case-insensitively
//! error_message = "Contraseña incorrecta. Inténtalo de nuevo."
//! storage_key = "isFamilyAuthenticated"
//! hint = 'Pista: es la palabra "familia"'
//!
//! [colors]
//! background = "#fdf8f0"
//! surface = "#ffffff"
//! text = "#43302b"
//! text_muted = "#a18072"
//! border = "#eaddcf"
//! accent = "#8a6a5c"
//! overlay = "rgba(67, 48, 43, 0.95)"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [auth]
//! password = "abuela"
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! The password ships inside every generated page. It keeps casual visitors
//! out and nothing more.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Display text.
    pub site: SiteConfig,
    /// Shared password and flag persistence.
    pub auth: AuthConfig,
    /// Sepia palette.
    pub colors: ColorConfig,
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let password = &self.auth.password;
        if password.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth.password must not be empty".into(),
            ));
        }
        // Attempts are trimmed and lowercased before comparison, so anything
        // else could never match.
        if password.trim() != password.as_str() || password.to_lowercase() != *password {
            return Err(ConfigError::Validation(
                "auth.password must be lowercase with no surrounding whitespace".into(),
            ));
        }
        if self.auth.error_message.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth.error_message must not be empty".into(),
            ));
        }
        if self.auth.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth.storage_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Display text for headers and footers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Header title on the album list.
    pub title: String,
    /// Line shown above the album list.
    pub welcome: String,
    /// Footer line.
    pub footer: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Recuerdos Familiares".to_string(),
            welcome: "Bienvenida. Seleccione un álbum para ver las fotos y videos de la familia."
                .to_string(),
            footer: "Hecho con mucho cariño para la Familia ❤️".to_string(),
        }
    }
}

/// Shared-password settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// The shared secret, lowercase.
    pub password: String,
    /// Shown after a failed attempt.
    pub error_message: String,
    /// Key under which the `"true"` flag is persisted.
    pub storage_key: String,
    /// Hint under the login form. Empty hides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl AuthConfig {
    /// The hint to display, if any.
    pub fn visible_hint(&self) -> Option<&str> {
        self.hint.as_deref().filter(|h| !h.trim().is_empty())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: "familia".to_string(),
            error_message: "Contraseña incorrecta. Inténtalo de nuevo.".to_string(),
            storage_key: "isFamilyAuthenticated".to_string(),
            hint: Some("Pista: es la palabra \"familia\"".to_string()),
        }
    }
}

/// Color palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background.
    pub background: String,
    /// Cards and panels.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Dates, counts, hints.
    pub text_muted: String,
    /// Card borders.
    pub border: String,
    /// Buttons and focus rings.
    pub accent: String,
    /// Lightbox backdrop.
    pub overlay: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#fdf8f0".to_string(),
            surface: "#ffffff".to_string(),
            text: "#43302b".to_string(),
            text_muted: "#a18072".to_string(),
            border: "#eaddcf".to_string(),
            accent: "#8a6a5c".to_string(),
            overlay: "rgba(67, 48, 43, 0.95)".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Family Gallery Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to catalog.toml. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Display text
# ---------------------------------------------------------------------------
[site]
# Header title on the album list.
title = "Recuerdos Familiares"

# Line shown above the album list.
welcome = "Bienvenida. Seleccione un álbum para ver las fotos y videos de la familia."

# Footer line.
footer = "Hecho con mucho cariño para la Familia ❤️"

# ---------------------------------------------------------------------------
# Shared password
# ---------------------------------------------------------------------------
# The password is embedded in the generated pages. It keeps casual visitors
# out; it is not access control.
[auth]
# Attempts are trimmed and lowercased before comparison, so this value must
# be lowercase with no surrounding whitespace.
password = "familia"

# Shown after a failed attempt.
error_message = "Contraseña incorrecta. Inténtalo de nuevo."

# Key under which the literal "true" is stored once logged in.
storage_key = "isFamilyAuthenticated"

# Hint under the login form. Set to "" to hide.
hint = 'Pista: es la palabra "familia"'

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#fdf8f0"
surface = "#ffffff"
text = "#43302b"
text_muted = "#a18072"    # Dates, counts, hints
border = "#eaddcf"
accent = "#8a6a5c"        # Buttons, focus rings
overlay = "rgba(67, 48, 43, 0.95)"  # Lightbox backdrop
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
    --color-accent: {accent};
    --color-overlay: {overlay};
}}"#,
        background = colors.background,
        surface = colors.surface,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
        accent = colors.accent,
        overlay = colors.overlay,
    )
}
