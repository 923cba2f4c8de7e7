//! Map view configuration.

use serde::{Deserialize, Serialize};

use crate::{Color, MapError, ModeStyles};

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ZoomLimits {
    /// Clamps `zoom` into `[min, max]`. NaN collapses to `min`.
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min;
        }
        zoom.clamp(self.min, self.max)
    }

    pub fn contains(&self, zoom: f64) -> bool {
        (self.min..=self.max).contains(&zoom)
    }
}

/// Pointer button, numbered the way DOM `MouseEvent.button` numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    #[default]
    Middle,
    Secondary,
    Other(u16),
}

impl From<u16> for PointerButton {
    fn from(button: u16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

/// Tunables for [`MapView`](crate::MapView) and [`render`](crate::render).
///
/// Every field has a default, so a partial JSON/TOML document is enough:
///
/// ```
/// let config: yard_map::MapConfig =
///     serde_json::from_str(r#"{"station_radius": 12.0}"#).unwrap();
/// assert_eq!(config.station_radius, 12.0);
/// assert_eq!(config.zoom.max, 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: ZoomLimits,
    /// Multiplier applied to wheel `delta_y` to get a zoom step.
    pub wheel_sensitivity: f64,
    /// Button that starts a drag-to-pan.
    pub pan_button: PointerButton,
    /// Station circle radius in world units. Also the hit-test radius.
    pub station_radius: f64,
    pub background: Color,
    pub station_fill: Color,
    pub label_color: Color,
    /// CSS font shorthand for station labels.
    pub label_font: String,
    pub styles: ModeStyles,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLimits::default(),
            wheel_sensitivity: 0.001,
            pan_button: PointerButton::Middle,
            station_radius: 20.0,
            background: Color::LIGHT_BLUE,
            station_fill: Color::BLACK,
            label_color: Color::WHITE,
            label_font: "20px Arial".to_string(),
            styles: ModeStyles::default(),
        }
    }
}

impl MapConfig {
    /// Checks the numeric fields.
    ///
    /// # Errors
    /// - [`MapError::InvalidZoomLimits`] unless `0 < min <= max`.
    /// - [`MapError::InvalidStationRadius`] unless the radius is positive.
    pub fn validate(&self) -> Result<(), MapError> {
        let ZoomLimits { min, max } = self.zoom;
        if !(min > 0.0 && min <= max && max.is_finite()) {
            return Err(MapError::InvalidZoomLimits { min, max });
        }
        if !(self.station_radius > 0.0 && self.station_radius.is_finite()) {
            return Err(MapError::InvalidStationRadius(self.station_radius));
        }
        Ok(())
    }
}
