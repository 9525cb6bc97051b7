//! Configuration handling for the TUI

use crate::state::{Form, OverlayTiming};
use crate::validation::{Messages, ValidatorSettings};
use anyhow::Result;
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Vermillion, the page's alert color
const DEFAULT_ALERT_COLOR: Color = Color::Rgb(0xD3, 0x2F, 0x2F);
/// Bamboo green, the page's success color
const DEFAULT_SUCCESS_COLOR: Color = Color::Rgb(0x4A, 0x67, 0x41);
/// Gold leaf, used around the success overlay
const DEFAULT_BORDER_ACCENT_COLOR: Color = Color::Rgb(0xC9, 0xA2, 0x27);
const DEFAULT_ACCENT_COLOR: Color = Color::Cyan;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormguardConfig {
    /// Border color of flagged fields (name or `#rrggbb`)
    pub alert_color: Option<String>,
    /// Background of the success overlay
    pub success_color: Option<String>,
    /// Focus color
    pub accent_color: Option<String>,
    /// Border of the success overlay
    pub border_accent_color: Option<String>,
    /// Milliseconds before a missing-field highlight clears itself
    pub highlight_clear_ms: Option<u64>,
    /// Milliseconds the success overlay stays before fading
    pub overlay_display_ms: Option<u64>,
    /// Milliseconds the fade lasts before removal
    pub overlay_fade_ms: Option<u64>,
    pub missing_required_message: Option<String>,
    pub invalid_email_message: Option<String>,
    pub invalid_phone_message: Option<String>,
    pub success_title: Option<String>,
    pub success_body: Option<String>,
    /// Forms shown on the page, replacing the built-in ones
    pub forms: Option<Vec<Form>>,
    /// Where logs are written
    pub log_file: Option<PathBuf>,
}

/// Resolved colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub alert: Color,
    pub success: Color,
    pub accent: Color,
    pub border_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            alert: DEFAULT_ALERT_COLOR,
            success: DEFAULT_SUCCESS_COLOR,
            accent: DEFAULT_ACCENT_COLOR,
            border_accent: DEFAULT_BORDER_ACCENT_COLOR,
        }
    }
}

impl FormguardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "formguard", "formguard")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormguardConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Log file location: configured path, else `formguard.log` in the data dir
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_local_dir().join("formguard.log"))
        })
    }

    pub fn theme(&self) -> Theme {
        let defaults = Theme::default();
        Theme {
            alert: parse_color(self.alert_color.as_deref(), defaults.alert),
            success: parse_color(self.success_color.as_deref(), defaults.success),
            accent: parse_color(self.accent_color.as_deref(), defaults.accent),
            border_accent: parse_color(
                self.border_accent_color.as_deref(),
                defaults.border_accent,
            ),
        }
    }

    pub fn validator_settings(&self) -> ValidatorSettings {
        let defaults = ValidatorSettings::default();
        let pick = |value: &Option<String>, fallback: String| value.clone().unwrap_or(fallback);

        ValidatorSettings {
            messages: Messages {
                missing_required: pick(
                    &self.missing_required_message,
                    defaults.messages.missing_required,
                ),
                invalid_email: pick(&self.invalid_email_message, defaults.messages.invalid_email),
                invalid_phone: pick(&self.invalid_phone_message, defaults.messages.invalid_phone),
                success_title: pick(&self.success_title, defaults.messages.success_title),
                success_body: pick(&self.success_body, defaults.messages.success_body),
            },
            highlight_clear: self
                .highlight_clear_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.highlight_clear),
            overlay: OverlayTiming {
                display: self
                    .overlay_display_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.overlay.display),
                fade: self
                    .overlay_fade_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.overlay.fade),
            },
        }
    }

    /// Configured forms, or the built-in contact and demo lesson forms
    pub fn forms(&self) -> Vec<Form> {
        let mut forms = match &self.forms {
            Some(forms) if !forms.is_empty() => forms.clone(),
            _ => vec![Form::contact(), Form::demo_lesson()],
        };
        ensure_unique_ids(&mut forms);
        forms
    }
}

/// Highlight timers are keyed by form id, so a repeated id gets a numeric suffix
fn ensure_unique_ids(forms: &mut [Form]) {
    let mut seen = HashSet::new();
    for form in forms.iter_mut() {
        if seen.insert(form.id.clone()) {
            continue;
        }
        let mut suffix = 2;
        let mut candidate = format!("{}-{suffix}", form.id);
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}-{suffix}", form.id);
        }
        tracing::warn!("Duplicate form id {:?} renamed to {candidate:?}", form.id);
        form.id = candidate.clone();
        seen.insert(candidate);
    }
}

fn parse_color(value: Option<&str>, fallback: Color) -> Color {
    match value {
        None => fallback,
        Some(raw) => Color::from_str(raw).unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparseable color {raw:?}");
            fallback
        }),
    }
}
