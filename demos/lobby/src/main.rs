use yard::map::{DrawCommand, RenderReport};
use yard::prelude::*;

// ---------------------------------------------------------------------------
// Sample board
// ---------------------------------------------------------------------------

const STATIONS: &str = r#"[
    {"id": 1,   "pos_x": 0,   "pos_y": 0,   "types": ["taxi", "bus", "underground"]},
    {"id": 8,   "pos_x": 120, "pos_y": 10,  "types": ["taxi"]},
    {"id": 9,   "pos_x": 60,  "pos_y": 110, "types": ["taxi", "bus"]},
    {"id": 46,  "pos_x": 240, "pos_y": 90,  "types": ["taxi", "bus", "underground"]},
    {"id": 108, "pos_x": 300, "pos_y": 220, "types": ["taxi"]}
]"#;

const CONNECTIONS: &str = r#"[
    {"from": 1,  "to": 8,   "mode": "taxi"},
    {"from": 1,  "to": 9,   "mode": "taxi"},
    {"from": 1,  "to": 46,  "mode": "bus"},
    {"from": 1,  "to": 46,  "mode": "underground"},
    {"from": 9,  "to": 46,  "mode": "bus"},
    {"from": 46, "to": 108, "mode": "water"}
]"#;

/// Renders the sample board headlessly and returns the recorded frame.
fn render_sample(config: &MapConfig) -> Result<(Vec<DrawCommand>, RenderReport), YardError> {
    let map = MapData::from_json(STATIONS, CONNECTIONS)?;
    let size = CanvasSize::new(800.0, 600.0);

    let mut view = MapView::new(config.clone(), size)?
        .with_viewport(ViewportState::centered_on(150.0, 110.0, 1.5, size));
    view.on_station_selected(|station| tracing::info!(%station, "station clicked"));

    let mut canvas = CommandRecorder::new();
    view.set_map_data(map, &mut canvas);

    // Click where station 46 ended up on screen.
    let (x, y) = view.viewport().world_to_screen(240.0, 90.0);
    view.handle_event(InputEvent::Click { x, y }, &mut canvas);

    let report = view.last_report().cloned().unwrap_or_default();
    Ok((canvas.take(), report))
}

/// Creates a game, joins it and asks the server to start it.
async fn run_lobby(config: &ClientConfig, detectives: usize) -> Result<Role, YardError> {
    let mut client = GameClient::connect(config).await?;
    let game = client.create_game(detectives).await?;
    client.join_game(game)?;
    let role = client.start_game().await?;
    client.close()?;
    Ok(role)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    yard::init_tracing();

    let mut config = ClientConfig::default();
    if let Some(url) = std::env::args().nth(1) {
        config = config.server_url(url);
    }

    let (commands, report) = render_sample(&config.map)?;
    tracing::info!(
        commands = commands.len(),
        connections = report.connections_drawn,
        stations = report.stations_drawn,
        "sample board rendered"
    );
    if let Ok(path) = std::env::var("YARD_FRAME_DUMP") {
        std::fs::write(&path, serde_json::to_string_pretty(&commands)?)?;
        tracing::info!(%path, "frame written");
    }

    eprintln!("joining lobby at {}", config.ws_url());
    match run_lobby(&config, 1).await {
        Ok(role) => tracing::info!(?role, "playing"),
        Err(e) => tracing::error!(error = %e, "lobby failed"),
    }

    Ok(())
}
