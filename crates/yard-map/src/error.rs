//! Error types for the map layer.

use crate::StationId;

/// Errors raised while loading map data or validating configuration.
///
/// Rendering and input handling never fail; problems found while drawing
/// are reported through [`RenderReport`](crate::RenderReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Station or connection JSON could not be parsed.
    #[error("invalid map data: {0}")]
    Data(#[from] serde_json::Error),

    /// Two stations share an id.
    #[error("duplicate station {0}")]
    DuplicateStation(StationId),

    /// A station lists no transit modes.
    #[error("station {0} has no transit modes")]
    NoTransitModes(StationId),

    /// The zoom range is empty or not strictly positive.
    #[error("invalid zoom range [{min}, {max}]")]
    InvalidZoomLimits { min: f64, max: f64 },

    /// The station hit radius must be positive.
    #[error("invalid station radius {0}")]
    InvalidStationRadius(f64),
}
