//! Integration tests for `GameClient` against a scripted lobby server.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use yard::prelude::*;

const GAME_ID: &str = "c2a4f0f7-5a7e-4d7b-9c43-0b9b8e7c1a11";

// =========================================================================
// Scripted server
// =========================================================================

/// A one-connection lobby: `createGame` gets a game id, `joinGame` is
/// silent unless the id is unknown, and `startGame` is answered the way
/// the game server does it: `gameStarted`, `startMove` and `gameState`
/// flushed together.
async fn start_lobby() -> ClientConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        while let Some(Ok(msg)) = ws.next().await {
            let Message::Text(text) = msg else { continue };
            let text = text.as_str();
            let replies: Vec<String> = if text.starts_with("[createGame] ") {
                vec![format!(r#"[game] {{"id":"{GAME_ID}"}}"#)]
            } else if text.starts_with("[joinGame] ") && !text.contains(GAME_ID) {
                vec![r#"[error] {"message":"unknown lobby"}"#.to_string()]
            } else if text == "[startGame]" {
                vec![
                    r#"[gameStarted] {"role":"mister_x"}"#.to_string(),
                    r#"[startMove] {"role":"mister_x"}"#.to_string(),
                    r#"[gameState] {"round":0,"players":[]}"#.to_string(),
                ]
            } else {
                Vec::new()
            };
            for reply in replies {
                if ws.feed(Message::Text(reply.into())).await.is_err() {
                    return;
                }
            }
            if ws.flush().await.is_err() {
                return;
            }
        }
    });

    ClientConfig::default()
        .server_url(format!("http://{addr}"))
        .request_timeout_secs(5)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_full_lobby_flow() {
    let config = start_lobby().await;
    let mut client = GameClient::connect(&config).await.unwrap();

    let game = client.create_game(2).await.unwrap();
    assert_eq!(game.to_string(), GAME_ID);

    client.join_game(game).unwrap();
    assert_eq!(client.start_game().await.unwrap(), Role::MisterX);

    client.close().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_start_game_survives_reply_burst() {
    // Repeat over fresh connections; a latest-value read would lose the
    // role whenever the three frames land together.
    for _ in 0..20 {
        let config = start_lobby().await;
        let mut client = GameClient::connect(&config).await.unwrap();

        assert_eq!(client.start_game().await.unwrap(), Role::MisterX);
        assert_eq!(
            client.next_response().await.unwrap(),
            SessionResponse::StartMove {
                role: Role::MisterX
            }
        );
        assert_eq!(client.next_response().await.unwrap().name(), "gameState");

        client.close().unwrap();
    }
}

#[tokio::test]
async fn test_join_unknown_game_is_reported_next() {
    let config = start_lobby().await;
    let mut client = GameClient::connect(&config).await.unwrap();

    let unknown: GameId =
        serde_json::from_str(r#""fffdc005-f76c-49d1-b39a-cbbb801eaece""#).unwrap();
    client.join_game(unknown).unwrap();

    assert_eq!(
        client.next_response().await.unwrap(),
        SessionResponse::Error {
            message: "unknown lobby".into()
        }
    );
}

#[tokio::test]
async fn test_connect_to_closed_port_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default().server_url(format!("http://{addr}"));
    let result = GameClient::connect(&config).await;
    assert!(matches!(result, Err(YardError::Transport(_))));
}
