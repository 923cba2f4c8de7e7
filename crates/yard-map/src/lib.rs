//! Interactive board map for the Yard client.
//!
//! - [`MapData`]: stations and connections, loaded once.
//! - [`ViewportState`]: pan/zoom transform between screen and world space.
//! - [`render`]: draws a frame onto any [`Canvas`], connections layered by
//!   transit mode and stations on top.
//! - [`InputController`]: drag-to-pan, wheel zoom around the cursor, and
//!   click hit-testing.
//! - [`MapView`]: owns all of the above and redraws when needed.
//!
//! ```
//! use yard_map::{CanvasSize, CommandRecorder, InputEvent, MapConfig, MapData, MapView, StationId};
//!
//! let map = MapData::from_json(
//!     r#"[{"id":1,"pos_x":0,"pos_y":0,"types":["taxi"]}]"#,
//!     "[]",
//! )
//! .unwrap();
//!
//! let mut view = MapView::new(MapConfig::default(), CanvasSize::new(800.0, 600.0)).unwrap();
//! let mut canvas = CommandRecorder::new();
//! view.set_map_data(map, &mut canvas);
//!
//! let outcome = view.handle_event(InputEvent::Click { x: 5.0, y: 5.0 }, &mut canvas);
//! assert_eq!(outcome.selected, vec![StationId(1)]);
//! ```

mod config;
mod data;
mod error;
mod input;
mod render;
mod style;
mod view;
mod viewport;

pub use config::{MapConfig, PointerButton, ZoomLimits};
pub use data::{Connection, MapData, Station, StationId, TransitMode};
pub use error::MapError;
pub use input::{hit_test, DragState, EventOutcome, InputController, InputEvent};
pub use render::{
    render, Canvas, CommandRecorder, DrawCommand, MissingReference, RenderReport, TextAlign,
    TextBaseline, TextStyle,
};
pub use style::{Color, ModeStyle, ModeStyles};
pub use view::MapView;
pub use viewport::{CanvasSize, ViewportState};
