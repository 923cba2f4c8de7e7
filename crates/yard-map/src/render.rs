//! Layered map renderer.
//!
//! [`render`] draws one full frame onto any [`Canvas`]:
//!
//! ```text
//! save
//!   fill_rect(background, whole surface)     screen space
//!   translate(offset) · scale(zoom)
//!   connections, sorted by style index       world space
//!   stations, then their id labels           world space
//! restore
//! ```
//!
//! There is no incremental redraw. Each call repaints everything.

use serde::Serialize;

use crate::{CanvasSize, Color, Connection, MapConfig, MapData, StationId, ViewportState};

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

/// Everything needed to place a run of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: String,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// A 2D drawing surface with a transform stack.
///
/// Mirrors the subset of the HTML canvas API the map needs. Coordinates
/// passed to drawing calls are in the current transform's space.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn scale(&mut self, factor: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color);
    fn fill_text(&mut self, text: &str, at: (f64, f64), style: &TextStyle);
}

/// One recorded [`Canvas`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Scale { factor: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Color },
    StrokeLine { from: (f64, f64), to: (f64, f64), width: f64, color: Color },
    FillCircle { center: (f64, f64), radius: f64, color: Color },
    FillText { text: String, at: (f64, f64), style: TextStyle },
}

/// A [`Canvas`] that records calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for CommandRecorder {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn scale(&mut self, factor: f64) {
        self.commands.push(DrawCommand::Scale { factor });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: (f64, f64), style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}

/// A connection that was skipped because an endpoint is not in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingReference {
    pub connection: Connection,
    /// The endpoint that could not be found. `from` wins if both are missing.
    pub station: StationId,
}

/// What a [`render`] call drew.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub connections_drawn: usize,
    pub stations_drawn: usize,
    pub missing: Vec<MissingReference>,
}

impl RenderReport {
    /// `true` if every connection could be drawn.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Draws `map` as seen through `viewport` onto `canvas`.
///
/// Connections whose endpoints are unknown are skipped, logged, and
/// listed in the returned report; the rest of the frame is still drawn.
pub fn render<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: &ViewportState,
    map: &MapData,
    size: CanvasSize,
    config: &MapConfig,
) -> RenderReport {
    let mut report = RenderReport::default();

    canvas.save();

    canvas.fill_rect(0.0, 0.0, size.width, size.height, config.background);

    canvas.translate(viewport.offset_x, viewport.offset_y);
    canvas.scale(viewport.zoom);

    // Stable: equal indices keep their input order.
    let mut connections: Vec<&Connection> = map.connections().iter().collect();
    connections.sort_by_key(|c| config.styles.get(c.mode).index);

    for connection in connections {
        let from = map.station(connection.from);
        let to = map.station(connection.to);
        let (Some(from), Some(to)) = (from, to) else {
            let station = if from.is_none() {
                connection.from
            } else {
                connection.to
            };
            tracing::warn!(
                from = %connection.from,
                to = %connection.to,
                mode = %connection.mode,
                missing = %station,
                "connection references unknown station, skipped"
            );
            report.missing.push(MissingReference {
                connection: *connection,
                station,
            });
            continue;
        };

        let style = config.styles.get(connection.mode);
        canvas.stroke_line(from.position(), to.position(), style.width, style.color);
        report.connections_drawn += 1;
    }

    let label = TextStyle {
        font: config.label_font.clone(),
        color: config.label_color,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    for station in map.stations() {
        canvas.fill_circle(station.position(), config.station_radius, config.station_fill);
        canvas.fill_text(&station.id.to_string(), station.position(), &label);
        report.stations_drawn += 1;
    }

    canvas.restore();

    tracing::trace!(
        connections = report.connections_drawn,
        stations = report.stations_drawn,
        skipped = report.missing.len(),
        "frame rendered"
    );

    report
}
