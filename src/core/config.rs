use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::model::Locale;
use crate::render::layout::LAYOUT_SCALE;

/// Viewer configuration loaded from `~/.archscoperc`.
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct ViewerConfig {
    /// Scene background / fog color in hex format (e.g., "#06070b").
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default)]
    pub locale: Locale,
    /// Diagram shown on startup. Unknown ids fall back to the first catalog entry.
    #[serde(default = "default_diagram")]
    pub default_diagram: String,
    /// Multiplier applied to authored node positions.
    #[serde(default = "default_layout_scale")]
    pub layout_scale: f32,
    /// Vertical field of view of the perspective camera, in degrees.
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    /// Extra room around the bounding box when auto-fitting.
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f32,
    #[serde(default = "default_orbit_speed")]
    pub orbit_speed: f32,
    /// Scroll-wheel zoom. Off by default so scrolling passes through.
    #[serde(default)]
    pub zoom_enabled: bool,
    /// Diagram catalog JSON to load instead of the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_background_color() -> String { "#06070b".to_string() }
fn default_diagram() -> String { "roomie".to_string() }
fn default_layout_scale() -> f32 { LAYOUT_SCALE }
fn default_fov_degrees() -> f32 { 42.0 }
fn default_min_distance() -> f32 { 6.2 }
fn default_max_distance() -> f32 { 16.0 }
fn default_fit_padding() -> f32 { 1.25 }
fn default_orbit_speed() -> f32 { 0.7 }

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            locale: Locale::default(),
            default_diagram: default_diagram(),
            layout_scale: default_layout_scale(),
            fov_degrees: default_fov_degrees(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            fit_padding: default_fit_padding(),
            orbit_speed: default_orbit_speed(),
            zoom_enabled: false,
            catalog_path: None,
        }
    }
}

impl ViewerConfig {
    /// Parse the background hex string into a Bevy Color.
    pub fn bg_color(&self) -> Color {
        bevy::color::Srgba::hex(&self.background_color)
            .unwrap_or(bevy::color::Srgba::rgb_u8(6, 7, 11))
            .into()
    }

    /// Applies `--catalog`, `--diagram` and `--lang` overrides. Unknown flags are ignored.
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    if let Some(path) = args.next() {
                        self.catalog_path = Some(PathBuf::from(path));
                    }
                }
                "--diagram" => {
                    if let Some(id) = args.next() {
                        self.default_diagram = id;
                    }
                }
                "--lang" => match args.next().as_deref().and_then(Locale::from_code) {
                    Some(locale) => self.locale = locale,
                    None => eprintln!("--lang expects one of: en, nl"),
                },
                _ => {}
            }
        }
    }
}

/// Reads a config file. Missing fields take their defaults.
pub fn load_config_from(path: &Path) -> Result<ViewerConfig, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    toml::from_str(&contents).map_err(|e| e.to_string())
}

/// Attempts to load the configuration from `~/.archscoperc`.
/// Falls back to default if the file is missing or invalid.
pub fn load_config() -> ViewerConfig {
    if let Ok(home) = env::var("HOME") {
        let path = PathBuf::from(home).join(".archscoperc");
        if path.exists() {
            match load_config_from(&path) {
                Ok(config) => return config,
                Err(err) => {
                    eprintln!("Failed to parse ~/.archscoperc: {}", err);
                }
            }
        }
    }
    ViewerConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_match_reference_view() {
        let config = ViewerConfig::default();
        assert_eq!(config.layout_scale, 1.25);
        assert_eq!(config.fov_degrees, 42.0);
        assert_eq!(config.min_distance, 6.2);
        assert_eq!(config.max_distance, 16.0);
        assert_eq!(config.fit_padding, 1.25);
        assert_eq!(config.locale, Locale::En);
        assert!(!config.zoom_enabled);
    }

    #[test]
    fn bg_color_parses_hex() {
        let config = ViewerConfig {
            background_color: "#ff0000".to_string(),
            ..Default::default()
        };
        let srgba = config.bg_color().to_srgba();
        assert!((srgba.red - 1.0).abs() < 0.01);
        assert!(srgba.green.abs() < 0.01);
    }

    #[test]
    fn invalid_hex_falls_back() {
        let config = ViewerConfig {
            background_color: "not_a_color".to_string(),
            ..Default::default()
        };
        let srgba = config.bg_color().to_srgba();
        assert!(srgba.red < 0.05);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let parsed: ViewerConfig = toml::from_str(
            r##"
locale = "nl"
fov_degrees = 50.0
"##,
        )
        .unwrap();
        assert_eq!(parsed.locale, Locale::Nl);
        assert_eq!(parsed.fov_degrees, 50.0);
        assert_eq!(parsed.max_distance, 16.0);
        assert_eq!(parsed.default_diagram, "roomie");
        assert!(parsed.catalog_path.is_none());
    }

    #[test]
    fn toml_roundtrip() {
        let config = ViewerConfig {
            default_diagram: "nexted".to_string(),
            zoom_enabled: true,
            catalog_path: Some(PathBuf::from("diagrams.json")),
            ..Default::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ViewerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_diagram, "nexted");
        assert!(parsed.zoom_enabled);
        assert_eq!(parsed.catalog_path, Some(PathBuf::from("diagrams.json")));
    }

    #[test]
    fn args_override_file_values() {
        let mut config = ViewerConfig::default();
        config.apply_args(args(&[
            "--diagram", "sweetcontrol", "--lang", "nl", "--catalog", "/tmp/c.json", "--verbose",
        ]));
        assert_eq!(config.default_diagram, "sweetcontrol");
        assert_eq!(config.locale, Locale::Nl);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn bad_lang_keeps_previous() {
        let mut config = ViewerConfig::default();
        config.apply_args(args(&["--lang", "fr"]));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn load_config_from_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rc");
        fs::write(&path, "fov_degrees = \"wide\"").unwrap();
        assert!(load_config_from(&path).is_err());
        assert!(load_config_from(&dir.path().join("missing")).is_err());
    }
}
