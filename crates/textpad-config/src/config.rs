/// Editor configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use textpad_core::document::FontSizePolicy;
use textpad_core::history::HistoryConfig;
use textpad_core::layout::LayoutConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "TEXTPAD_CONFIG";

const CONFIG_FILE_NAME: &str = "textpad.json";

/// Top-level editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub font_name: String,
    pub font_size: f32,
    /// Zooming out below this size is rejected.
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Amount added or removed by one zoom step.
    pub font_size_step: f32,
    /// TrueType/OpenType file used for glyph metrics. Empty = built-in fixed-width metrics.
    pub font_path: String,
    pub margin_width: f32,
    pub margin_height: f32,
    pub window_width: f32,
    pub window_height: f32,
    /// Max undo records kept per document.
    pub max_history_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_name: "Verdana".to_string(),
            font_size: 12.0,
            min_font_size: 1.0,
            max_font_size: 200.0,
            font_size_step: 4.0,
            font_path: String::new(),
            margin_width: 5.0,
            margin_height: 0.0,
            window_width: 500.0,
            window_height: 500.0,
            max_history_depth: 10_000,
        }
    }
}

impl EditorConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `TEXTPAD_CONFIG` environment variable
    /// 2. `<user config dir>/textpad/textpad.json`
    /// 3. `textpad.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("textpad").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<EditorConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.min_font_size = self.min_font_size.max(1.0);
        self.max_font_size = self.max_font_size.max(self.min_font_size);
        self.font_size = self.font_size.clamp(self.min_font_size, self.max_font_size);
        if self.font_size_step.is_nan() || self.font_size_step <= 0.0 {
            self.font_size_step = 4.0;
        }
        if self.font_name.trim().is_empty() {
            self.font_name = "Verdana".to_string();
        }
        self.margin_width = self.margin_width.max(0.0);
        self.margin_height = self.margin_height.max(0.0);
        self.window_width = self.window_width.max(1.0);
        self.window_height = self.window_height.max(1.0);
        self.max_history_depth = self.max_history_depth.max(1);
    }

    /// Configured font file, if any.
    pub fn font_file(&self) -> Option<PathBuf> {
        let trimmed = self.font_path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    /// Initial layout for a document window.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            margin_width: self.margin_width,
            margin_height: self.margin_height,
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            viewport_width: self.window_width,
            viewport_height: self.window_height,
        }
    }

    /// Font size limits applied when zooming.
    pub fn font_size_policy(&self) -> FontSizePolicy {
        FontSizePolicy {
            min: self.min_font_size,
            max: self.max_font_size,
            step: self.font_size_step,
        }
    }

    /// History settings for new documents.
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig::with_depth(self.max_history_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.font_name, "Verdana");
        assert!((config.font_size - 12.0).abs() < f32::EPSILON);
        assert!((config.margin_width - 5.0).abs() < f32::EPSILON);
        assert!((config.margin_height - 0.0).abs() < f32::EPSILON);
        assert!((config.window_width - 500.0).abs() < f32::EPSILON);
        assert!(config.font_file().is_none());
    }

    #[test]
    fn test_sanitize_clamps_font_size() {
        let mut config = EditorConfig::default();
        config.font_size = 0.2;
        config.sanitize();
        assert!((config.font_size - 1.0).abs() < f32::EPSILON);

        config.font_size = 500.0;
        config.sanitize();
        assert!((config.font_size - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_repairs_step_and_limits() {
        let mut config = EditorConfig::default();
        config.font_size_step = -2.0;
        config.min_font_size = 30.0;
        config.max_font_size = 10.0;
        config.sanitize();
        assert!((config.font_size_step - 4.0).abs() < f32::EPSILON);
        assert!((config.max_font_size - 30.0).abs() < f32::EPSILON);
        assert!((config.font_size - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_nan_step_reset() {
        let mut config = EditorConfig::default();
        config.font_size_step = f32::NAN;
        config.sanitize();
        assert!((config.font_size_step - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_blank_font_name() {
        let mut config = EditorConfig::default();
        config.font_name = "   ".to_string();
        config.sanitize();
        assert_eq!(config.font_name, "Verdana");
    }

    #[test]
    fn test_sanitize_window_and_history() {
        let mut config = EditorConfig::default();
        config.window_width = -10.0;
        config.max_history_depth = 0;
        config.margin_width = -3.0;
        config.sanitize();
        assert!((config.window_width - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.max_history_depth, 1);
        assert!((config.margin_width - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_layout_config_mirrors_fields() {
        let mut config = EditorConfig::default();
        config.window_width = 640.0;
        config.font_size = 16.0;
        let layout = config.layout_config();
        assert!((layout.viewport_width - 640.0).abs() < f32::EPSILON);
        assert!((layout.font_size - 16.0).abs() < f32::EPSILON);
        assert_eq!(layout.font_name, "Verdana");
    }

    #[test]
    fn test_font_size_policy() {
        let policy = EditorConfig::default().font_size_policy();
        assert!((policy.min - 1.0).abs() < f32::EPSILON);
        assert!((policy.step - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_font_file_trims() {
        let mut config = EditorConfig::default();
        config.font_path = "  /fonts/Mono.ttf ".to_string();
        assert_eq!(config.font_file(), Some(PathBuf::from("/fonts/Mono.ttf")));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = EditorConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: EditorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.font_name, config.font_name);
        assert_eq!(parsed.max_history_depth, config.max_history_depth);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"font_size": 20.0}"#;
        let parsed: EditorConfig = serde_json::from_str(json).unwrap();
        assert!((parsed.font_size - 20.0).abs() < f32::EPSILON);
        assert!((parsed.font_size_step - 4.0).abs() < f32::EPSILON);
        assert_eq!(parsed.font_name, "Verdana");
    }
}
