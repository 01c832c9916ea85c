use std::path::PathBuf;
use std::sync::Arc;

use car_sim::clock::FrameClock;
use car_sim::config::HostConfig;
use car_sim::net::start_websocket_server;
use car_sim::state::SharedGameState;
use car_sim::world::SimWorld;
use clap::Parser;
use log::{error, info, warn};
use tokio::sync::Mutex;
use tokio::time::{interval, Instant, MissedTickBehavior};

#[derive(Parser, Debug)]
#[command(name = "car-sim-server", version, about = "Planar car physics over WebSocket")]
struct Opts {
    /// JSON host config (defaults are used for anything missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address, e.g. 127.0.0.1:9001
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();

    let mut config = match &opts.config {
        Some(path) => match HostConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => HostConfig::default(),
    };
    if let Some(bind) = opts.bind {
        config.bind_addr = bind;
    }

    let world = match SimWorld::new(&config) {
        Ok(world) => world,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting car physics server: {} Hz, viewport {:.1} x {:.1} m",
        config.tick_hz, world.viewport.width, world.viewport.height
    );

    let state = Arc::new(Mutex::new(SharedGameState::new()));
    let world = Arc::new(Mutex::new(world));

    // Start WebSocket server
    {
        let addr = config.bind_addr.clone();
        let state = Arc::clone(&state);
        let world = Arc::clone(&world);
        tokio::spawn(async move {
            if let Err(e) = start_websocket_server(&addr, state, world).await {
                error!("WebSocket server stopped: {}", e);
                std::process::exit(1);
            }
        });
    }

    let mut ticker = interval(config.tick_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut clock = FrameClock::new(config.max_frame_dt);

    loop {
        ticker.tick().await;

        // measured frame time, stalls dropped to 0
        let Some(dt) = clock.tick(Instant::now().into_std()) else {
            continue;
        };

        // lock order: game state, then world (same as the connection tasks)
        let mut game = state.lock().await;
        let mut world = world.lock().await;

        game.sample_inputs(&mut world);
        world.step(dt);

        game.tick += 1;
        if let Err(e) = game.broadcast_snapshot(&world) {
            warn!("Failed to encode snapshot: {}", e);
        }
    }
}
