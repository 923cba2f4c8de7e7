//! Pointer/wheel input: drag-to-pan, wheel zoom, click hit-testing.
//!
//! [`InputController`] is a two-state machine (idle / dragging) that
//! mutates a [`ViewportState`] and tells the caller what to do next
//! through an [`EventOutcome`]. It never draws.

use crate::{CanvasSize, MapConfig, MapData, PointerButton, StationId, ViewportState};

/// Host input, already in screen pixels relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, button: PointerButton },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64, button: PointerButton },
    Wheel { x: f64, y: f64, delta_y: f64 },
    Click { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
}

/// What the host should do after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOutcome {
    /// The view changed and should be redrawn.
    pub redraw: bool,
    /// The host should suppress its default handling (page scroll on wheel).
    pub prevent_default: bool,
    /// Stations under a click, in map order.
    pub selected: Vec<StationId>,
}

impl EventOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }
}

/// Anchor for an in-progress drag: pointer position minus offset at
/// press time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Translates [`InputEvent`]s into viewport changes.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    drag: Option<DragState>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    /// Applies `event` to `viewport`/`size`.
    ///
    /// `map` is only consulted for clicks; without it a click selects
    /// nothing.
    pub fn handle(
        &mut self,
        event: InputEvent,
        viewport: &mut ViewportState,
        size: &mut CanvasSize,
        map: Option<&MapData>,
        config: &MapConfig,
    ) -> EventOutcome {
        match event {
            InputEvent::PointerDown { x, y, button } => {
                if button == config.pan_button {
                    self.drag = Some(DragState {
                        anchor_x: x - viewport.offset_x,
                        anchor_y: y - viewport.offset_y,
                    });
                    tracing::trace!(x, y, "drag started");
                }
                EventOutcome::default()
            }
            InputEvent::PointerMove { x, y } => match self.drag {
                Some(drag) => {
                    viewport.set_offset(x - drag.anchor_x, y - drag.anchor_y);
                    EventOutcome::redraw()
                }
                None => EventOutcome::default(),
            },
            InputEvent::PointerUp { button, .. } => {
                if button == config.pan_button && self.drag.take().is_some() {
                    tracing::trace!("drag ended");
                }
                EventOutcome::default()
            }
            InputEvent::Wheel { x, y, delta_y } => {
                viewport.zoom_at(x, y, -delta_y * config.wheel_sensitivity, &config.zoom);
                EventOutcome {
                    redraw: true,
                    prevent_default: true,
                    selected: Vec::new(),
                }
            }
            InputEvent::Click { x, y } => {
                let selected = map
                    .map(|map| hit_test(map, viewport, x, y, config.station_radius))
                    .unwrap_or_default();
                EventOutcome {
                    selected,
                    ..EventOutcome::default()
                }
            }
            InputEvent::Resize { width, height } => {
                *size = CanvasSize::new(width, height);
                EventOutcome::redraw()
            }
        }
    }
}

/// Every station whose centre lies within `radius` (inclusive) of the
/// screen point `(sx, sy)`, measured in world units.
pub fn hit_test(
    map: &MapData,
    viewport: &ViewportState,
    sx: f64,
    sy: f64,
    radius: f64,
) -> Vec<StationId> {
    let (wx, wy) = viewport.screen_to_world(sx, sy);
    let radius_sq = radius * radius;
    map.stations()
        .iter()
        .filter(|s| {
            let dx = s.pos_x - wx;
            let dy = s.pos_y - wy;
            dx * dx + dy * dy <= radius_sq
        })
        .map(|s| s.id)
        .collect()
}
