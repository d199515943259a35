//! Editor configuration.
//!
//! Every tunable constant of the interaction core (hit tolerances, drag
//! threshold, zoom bounds) and the palette lives in [`EditorConfig`]. The
//! defaults reproduce the classic dark topology canvas; a JSON file can
//! override any subset of fields.

use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// An opaque RGB color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(val: &str) -> Option<Self> {
        let hex = val.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::parse_hex(&value).ok_or_else(|| format!("invalid color '{}', expected #rrggbb", value))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }
}

/// Colors used for the canvas and its primitives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub router: Color,
    pub switch: Color,
    pub edge: Color,
    pub highlight: Color,
    pub preview: Color,
    pub selection_box: Color,
    pub legend_panel: Color,
    pub legend_outline: Color,
    pub legend_text: Color,
    pub legend_warning: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0f, 0x11, 0x15),
            router: Color::rgb(0x4f, 0xc3, 0xf7),
            switch: Color::rgb(0x81, 0xc7, 0x84),
            edge: Color::rgb(0xcc, 0xcc, 0xcc),
            highlight: Color::rgb(0xff, 0xd5, 0x4f),
            preview: Color::rgb(0x90, 0xa4, 0xae),
            selection_box: Color::rgb(0x00, 0x78, 0xff),
            legend_panel: Color::rgb(0x1a, 0x1d, 0x23),
            legend_outline: Color::rgb(0x44, 0x44, 0x44),
            legend_text: Color::rgb(0xff, 0xff, 0xff),
            legend_warning: Color::rgb(0xff, 0x8a, 0x80),
        }
    }
}

/// Tunables of the editor core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Half-extent of a node's bounds at zoom 1.0, in pixels.
    pub node_radius: f32,
    /// Movement (per axis) beyond which a press is no longer a click.
    pub drag_threshold: f32,
    /// Pick distance for edges, in pixels.
    pub edge_hit_tolerance: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Zoom multiplier of one wheel tick; zoom-out uses the reciprocal.
    pub zoom_step: f32,
    pub edge_width: f32,
    pub selected_edge_width: f32,
    pub outline_width: f32,
    pub palette: Palette,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_radius: 18.0,
            drag_threshold: 4.0,
            edge_hit_tolerance: 6.0,
            zoom_min: 0.25,
            zoom_max: 4.0,
            zoom_step: 1.1,
            edge_width: 2.0,
            selected_edge_width: 4.0,
            outline_width: 3.0,
            palette: Palette::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: EditorConfig = serde_json::from_str(text).context("Invalid editor config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file. Missing fields fall back to the defaults.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
        Self::from_json(&text).with_context(|| format!("Failed to load config {}", path))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("node_radius", self.node_radius),
            ("drag_threshold", self.drag_threshold),
            ("edge_hit_tolerance", self.edge_hit_tolerance),
            ("zoom_min", self.zoom_min),
            ("edge_width", self.edge_width),
            ("selected_edge_width", self.selected_edge_width),
        ] {
            if !(v.is_finite() && v > 0.0) {
                bail!("{} must be a positive number, got {}", name, v);
            }
        }
        if !(self.zoom_max.is_finite() && self.zoom_max >= self.zoom_min) {
            bail!(
                "zoom_max ({}) must not be below zoom_min ({})",
                self.zoom_max,
                self.zoom_min
            );
        }
        if !(self.zoom_min..=self.zoom_max).contains(&1.0) {
            bail!("zoom range [{}, {}] must include 1.0", self.zoom_min, self.zoom_max);
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            bail!("zoom_step must be greater than 1.0, got {}", self.zoom_step);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        EditorConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = EditorConfig::from_json(r##"{"drag_threshold": 8, "palette": {"router": "#ff0000"}}"##).unwrap();
        assert_eq!(cfg.drag_threshold, 8.0);
        assert_eq!(cfg.node_radius, 18.0);
        assert_eq!(cfg.palette.router, Color::rgb(255, 0, 0));
        assert_eq!(cfg.palette.switch, Palette::default().switch);
    }

    #[test]
    fn test_rejects_bad_zoom_step() {
        let err = EditorConfig::from_json(r#"{"zoom_step": 0.9}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("zoom_step"));
    }

    #[test]
    fn test_rejects_bad_color() {
        assert!(EditorConfig::from_json(r#"{"palette": {"edge": "grey"}}"#).is_err());
    }

    #[test]
    fn test_color_hex_roundtrip() {
        let c = Color::parse_hex("#4fc3f7").unwrap();
        assert_eq!(String::from(c), "#4fc3f7");
        assert!(Color::parse_hex("#4fc3").is_none());
    }
}
