use std::sync::Arc;

use futures::{SinkExt, Stream, StreamExt};
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::accept_async;
use tungstenite::Message;

use crate::car_model::VehicleOptions;
use crate::error::NetError;
use crate::input::AxisInput;
use crate::state::{ServerMessage, SharedGameState};
use crate::world::SimWorld;

/// Client -> server messages, tagged by `"type"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Full input sample (numbers 0..1 or booleans).
    Input(AxisInput),
    /// Raw key-down / key-up.
    Key { code: String, pressed: bool },
    /// Tuning panel edit, partial vehicle config.
    Tune { config: VehicleOptions },
    #[serde(rename_all = "camelCase")]
    Assists {
        smooth_steer: Option<bool>,
        safe_steer: Option<bool>,
    },
    Ping,
}

impl ClientMessage {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

pub async fn start_websocket_server(
    addr: &str,
    state: Arc<Mutex<SharedGameState>>,
    world: Arc<Mutex<SimWorld>>,
) -> Result<(), NetError> {
    let listener = TcpListener::bind(addr).await.map_err(|source| NetError::Bind {
        addr: addr.to_string(),
        source,
    })?;

    info!("WebSocket listening on ws://{}", addr);

    loop {
        let (raw, peer) = listener.accept().await?;
        let state = Arc::clone(&state);
        let world = Arc::clone(&world);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(raw, state, world).await {
                warn!("Connection {} closed with error: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(
    raw: TcpStream,
    state: Arc<Mutex<SharedGameState>>,
    world: Arc<Mutex<SimWorld>>,
) -> Result<(), NetError> {
    let ws = accept_async(raw).await?;
    let (mut write, mut read) = ws.split();

    // -------------------------------
    // 1) Outgoing message channel + send loop
    // -------------------------------
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // -------------------------------
    // 2) Player + car
    // -------------------------------
    let player_id = {
        let mut game = state.lock().await;
        let id = game.add_player(tx.clone());
        world.lock().await.spawn_car(&id);
        id
    };

    info!("Player connected: {}", player_id);

    let _ = tx.send(
        ServerMessage::Welcome {
            player_id: player_id.clone(),
        }
        .to_json()?,
    );

    // -------------------------------
    // 3) Receive loop
    // -------------------------------
    let result = receive_loop(&mut read, &player_id, &tx, &state, &world).await;

    // -------------------------------
    // 4) Cleanup, even after an error
    // -------------------------------
    info!("Player disconnected: {}", player_id);
    state.lock().await.remove_player(&player_id);
    world.lock().await.remove_car(&player_id);
    send_task.abort();

    result
}

async fn receive_loop<S>(
    read: &mut S,
    player_id: &str,
    tx: &mpsc::UnboundedSender<String>,
    state: &Arc<Mutex<SharedGameState>>,
    world: &Arc<Mutex<SimWorld>>,
) -> Result<(), NetError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(msg) = read.next().await {
        let text = match msg? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let parsed = match ClientMessage::from_json(&text) {
            Ok(m) => m,
            Err(e) => {
                debug!("Bad message from {}: {}", player_id, e);
                let _ = tx.send(ServerMessage::Error { message: e.to_string() }.to_json()?);
                continue;
            }
        };

        match parsed {
            ClientMessage::Ping => {
                let _ = tx.send(ServerMessage::Pong.to_json()?);
            }
            ClientMessage::Input(axes) => {
                state.lock().await.set_input(player_id, axes.to_input());
            }
            ClientMessage::Key { code, pressed } => {
                state.lock().await.handle_key(player_id, &code, pressed);
            }
            ClientMessage::Tune { config } => {
                let outcome = world.lock().await.tune_car(player_id, &config);
                if let Err(e) = outcome {
                    let _ = tx.send(ServerMessage::Error { message: e.to_string() }.to_json()?);
                }
            }
            ClientMessage::Assists {
                smooth_steer,
                safe_steer,
            } => {
                world.lock().await.set_assists(player_id, smooth_steer, safe_steer);
            }
        }
    }

    Ok(())
}
