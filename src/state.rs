use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::car_model::InputState;
use crate::input::KeyboardState;
use crate::world::{CarSnapshot, SimWorld};

/// Server -> client messages.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Welcome { player_id: String },
    Pong,
    Error { message: String },
    Snapshot { tick: u64, cars: Vec<CarSnapshot> },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub struct Player {
    pub id: String,
    pub keys: KeyboardState,
    pub input: InputState, // sampled into the car every tick
    pub tx: UnboundedSender<String>,
}

pub struct SharedGameState {
    pub tick: u64,
    pub players: HashMap<String, Player>,
}

impl SharedGameState {
    pub fn new() -> Self {
        Self {
            tick: 0,
            players: HashMap::new(),
        }
    }

    /// Register a connection and hand out its player id.
    pub fn add_player(&mut self, tx: UnboundedSender<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.players.insert(
            id.clone(),
            Player {
                id: id.clone(),
                keys: KeyboardState::default(),
                input: InputState::default(),
                tx,
            },
        );
        id
    }

    pub fn remove_player(&mut self, id: &str) -> Option<Player> {
        self.players.remove(id)
    }

    /// Key-down / key-up event. Keyboard state replaces any analog input.
    pub fn handle_key(&mut self, id: &str, code: &str, pressed: bool) {
        if let Some(p) = self.players.get_mut(id) {
            if p.keys.handle_key(code, pressed) {
                p.input = p.keys.to_input();
            } else {
                debug!("Ignoring unmapped key {} from {}", code, id);
            }
        }
    }

    /// Full analog sample (already clamped to 0..1).
    pub fn set_input(&mut self, id: &str, input: InputState) {
        if let Some(p) = self.players.get_mut(id) {
            p.input = input;
        }
    }

    /// Copy every player's latest input into its car.
    pub fn sample_inputs(&self, world: &mut SimWorld) {
        for p in self.players.values() {
            if let Some(car) = world.cars.get_mut(&p.id) {
                car.set_inputs(p.input);
            }
        }
    }

    /// Build and send a snapshot of all cars to all clients.
    pub fn broadcast_snapshot(&self, world: &SimWorld) -> Result<(), serde_json::Error> {
        let json = ServerMessage::Snapshot {
            tick: self.tick,
            cars: world.snapshot(),
        }
        .to_json()?;

        for p in self.players.values() {
            // closed receivers are cleaned up by the connection task
            let _ = p.tx.send(json.clone());
        }
        Ok(())
    }
}

impl Default for SharedGameState {
    fn default() -> Self {
        Self::new()
    }
}
