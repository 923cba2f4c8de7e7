//! [`MapView`]: map data, viewport and input wired together.

use crate::{
    render, CanvasSize, Canvas, EventOutcome, InputController, InputEvent, MapConfig, MapData,
    MapError, RenderReport, StationId, ViewportState,
};

type SelectCallback = Box<dyn FnMut(StationId) + Send>;

/// An interactive map.
///
/// Owns everything a frame depends on. Redraws happen when map data
/// arrives and after any event that changes the view; nothing is drawn
/// until map data has been set.
pub struct MapView {
    config: MapConfig,
    viewport: ViewportState,
    size: CanvasSize,
    map: Option<MapData>,
    controller: InputController,
    on_select: Option<SelectCallback>,
    last_report: Option<RenderReport>,
}

impl MapView {
    /// Creates a view with an identity viewport.
    ///
    /// # Errors
    /// Whatever [`MapConfig::validate`] rejects.
    pub fn new(config: MapConfig, size: CanvasSize) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self {
            config,
            viewport: ViewportState::default(),
            size,
            map: None,
            controller: InputController::new(),
            on_select: None,
            last_report: None,
        })
    }

    /// Replaces the viewport, e.g. with [`ViewportState::centered_on`].
    ///
    /// Zoom is clamped to the configured range.
    pub fn with_viewport(mut self, mut viewport: ViewportState) -> Self {
        viewport.zoom = self.config.zoom.clamp(viewport.zoom);
        self.viewport = viewport;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn map_data(&self) -> Option<&MapData> {
        self.map.as_ref()
    }

    /// Report from the most recent frame, if any was drawn.
    pub fn last_report(&self) -> Option<&RenderReport> {
        self.last_report.as_ref()
    }

    /// Registers the callback invoked once per station hit by a click.
    /// Replaces any previous callback.
    pub fn on_station_selected<F>(&mut self, callback: F)
    where
        F: FnMut(StationId) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    /// Stores `map` and draws it.
    pub fn set_map_data<C: Canvas + ?Sized>(&mut self, map: MapData, canvas: &mut C) {
        self.map = Some(map);
        self.redraw(canvas);
    }

    /// Feeds one input event, redrawing and notifying as needed.
    pub fn handle_event<C: Canvas + ?Sized>(
        &mut self,
        event: InputEvent,
        canvas: &mut C,
    ) -> EventOutcome {
        let outcome = self.controller.handle(
            event,
            &mut self.viewport,
            &mut self.size,
            self.map.as_ref(),
            &self.config,
        );

        if outcome.redraw {
            self.redraw(canvas);
        }

        if let Some(callback) = self.on_select.as_mut() {
            for &station in &outcome.selected {
                tracing::debug!(%station, "station selected");
                callback(station);
            }
        }

        outcome
    }

    /// Draws a full frame. Returns `None` (and draws nothing) without
    /// map data.
    pub fn redraw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Option<&RenderReport> {
        let map = self.map.as_ref()?;
        let report = render(canvas, &self.viewport, map, self.size, &self.config);
        self.last_report = Some(report);
        self.last_report.as_ref()
    }
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("viewport", &self.viewport)
            .field("size", &self.size)
            .field("has_map", &self.map.is_some())
            .field("dragging", &self.controller.is_dragging())
            .finish_non_exhaustive()
    }
}
