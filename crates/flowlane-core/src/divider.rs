//! Swim-lane divider lines.
//!
//! A [`DividerLine`] visually partitions the diagram canvas into lanes. It
//! has no counterpart in the process graph; it exists only in the diagram
//! and in the persisted lane-geometry string. The divider owns the codec
//! for its payload portion of that string (`"position,extent"`); the
//! surrounding token format is handled by the engine's geometry codec.

use crate::geometry::Rect;

/// The orientation of a divider line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// A horizontal divider at a fixed y-coordinate.
    Horizontal,
    /// A vertical divider at a fixed x-coordinate.
    Vertical,
}

/// A swim-lane divider: one fixed coordinate plus an extent along the
/// other axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerLine {
    orientation: Orientation,
    position: f32,
    extent: f32,
}

impl DividerLine {
    /// Creates a horizontal divider at the given y-coordinate.
    pub fn horizontal(y: f32, extent: f32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            position: y,
            extent,
        }
    }

    /// Creates a vertical divider at the given x-coordinate.
    pub fn vertical(x: f32, extent: f32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            position: x,
            extent,
        }
    }

    /// Returns the orientation of this divider.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the fixed coordinate: y for horizontal dividers, x for
    /// vertical ones.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Returns the extent of the divider along its axis.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Moves the divider to a new fixed coordinate.
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    /// Returns the zero-thickness bounding rectangle of this divider.
    pub fn bounds(&self) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(0.0, self.position, self.extent, 0.0),
            Orientation::Vertical => Rect::new(self.position, 0.0, 0.0, self.extent),
        }
    }

    /// Encodes this divider's payload: `"position,extent"` decimal text.
    pub fn encode_geometry(&self) -> String {
        format!("{},{}", self.position, self.extent)
    }

    /// Reconstructs a divider from an orientation and an encoded payload.
    pub fn from_geometry(orientation: Orientation, payload: &str) -> Result<Self, String> {
        let (position, extent) = payload
            .split_once(',')
            .ok_or_else(|| format!("invalid divider payload `{payload}`"))?;
        let position = position
            .trim()
            .parse()
            .map_err(|_| format!("invalid divider position `{position}`"))?;
        let extent = extent
            .trim()
            .parse()
            .map_err(|_| format!("invalid divider extent `{extent}`"))?;
        Ok(Self {
            orientation,
            position,
            extent,
        })
    }
}
