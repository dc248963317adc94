//! Configuration types for diagram synchronization and decoration.
//!
//! This module provides configuration structures that control default
//! element placement and decoration styling. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Default placement and sizing for elements without geometry annotations.
//! - [`StyleConfig`] - Decoration colors and the fill-brighten factor.

use serde::Deserialize;

use flowlane_core::color::Color;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_node_width() -> f32 {
    120.0
}

fn default_node_height() -> f32 {
    60.0
}

fn default_node_spacing() -> f32 {
    60.0
}

fn default_socket_extent() -> f32 {
    16.0
}

fn default_param_height() -> f32 {
    12.0
}

/// Default placement and sizing for elements that carry no geometry
/// annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Default node width.
    #[serde(default = "default_node_width")]
    node_width: f32,

    /// Default node height.
    #[serde(default = "default_node_height")]
    node_height: f32,

    /// Horizontal gap between nodes placed by default.
    #[serde(default = "default_node_spacing")]
    node_spacing: f32,

    /// Side length of a socket square on the node edge.
    #[serde(default = "default_socket_extent")]
    socket_extent: f32,

    /// Height of one parameter row inside a node.
    #[serde(default = "default_param_height")]
    param_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            node_spacing: default_node_spacing(),
            socket_extent: default_socket_extent(),
            param_height: default_param_height(),
        }
    }
}

impl LayoutConfig {
    /// Returns the default node width.
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Returns the default node height.
    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the horizontal gap between default-placed nodes.
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }

    /// Returns the side length of a socket square.
    pub fn socket_extent(&self) -> f32 {
        self.socket_extent
    }

    /// Returns the height of one parameter row.
    pub fn param_height(&self) -> f32 {
        self.param_height
    }
}

fn default_fill_brighten() -> f32 {
    0.3
}

/// Decoration styling for selected and hovered elements.
///
/// Color fields are CSS color strings; fields that are not set fall back
/// to renderer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Frame color for selected elements, as a color string.
    #[serde(default)]
    selected_color: Option<String>,

    /// Frame color for hovered elements, as a color string.
    #[serde(default)]
    hovered_color: Option<String>,

    /// How far the fill of a (group-)selected element is brightened
    /// towards white, in `0.0..=1.0`.
    #[serde(default = "default_fill_brighten")]
    fill_brighten: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            selected_color: None,
            hovered_color: None,
            fill_brighten: default_fill_brighten(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed selected-frame [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn selected_color(&self) -> Result<Option<Color>, String> {
        self.selected_color.as_deref().map(Color::new).transpose()
    }

    /// Returns the parsed hovered-frame [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn hovered_color(&self) -> Result<Option<Color>, String> {
        self.hovered_color.as_deref().map(Color::new).transpose()
    }

    /// Returns the fill-brighten factor.
    pub fn fill_brighten(&self) -> f32 {
        self.fill_brighten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.layout().node_width(), 120.0);
        assert_eq!(config.layout().node_spacing(), 60.0);
        assert!(config.style().selected_color().unwrap().is_none());
        assert_eq!(config.style().fill_brighten(), 0.3);
    }

    #[test]
    fn test_style_color_parsing() {
        let style = StyleConfig {
            selected_color: Some("#3366ff".to_string()),
            hovered_color: Some("not a color".to_string()),
            fill_brighten: 0.5,
        };

        assert!(style.selected_color().unwrap().is_some());
        assert!(style.hovered_color().is_err());
    }
}
