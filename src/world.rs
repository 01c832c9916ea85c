// src/world.rs
//
// All cars of a session. Cars never interact, so stepping is a plain loop over
// independently owned states.

use std::collections::HashMap;

use log::{info, warn};
use serde::Serialize;

use crate::car_model::{Diagnostics, SteeringFilter, VehicleOptions, VehicleParams, Viewport};
use crate::config::HostConfig;
use crate::error::ConfigError;
use crate::spawn::SpawnManager;
use crate::vehicle::{Car, Livery};

/// What a renderer needs for one car. Read-only copy of the physics state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSnapshot {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub steer_angle: f64,

    // chassis, metres
    pub half_width: f64,
    pub cg_to_front: f64,
    pub cg_to_rear: f64,
    pub cg_to_front_axle: f64,
    pub cg_to_rear_axle: f64,
    pub wheel_radius: f64,
    pub wheel_width: f64,

    pub livery: Livery,
    pub stats: Diagnostics,
}

impl CarSnapshot {
    pub fn capture(id: &str, car: &Car) -> Self {
        let cfg = car.config();
        Self {
            id: id.to_string(),
            x: car.state.position.x,
            y: car.state.position.y,
            heading: car.state.heading,
            steer_angle: car.state.steer_angle,
            half_width: cfg.half_width,
            cg_to_front: cfg.cg_to_front,
            cg_to_rear: cfg.cg_to_rear,
            cg_to_front_axle: cfg.cg_to_front_axle,
            cg_to_rear_axle: cfg.cg_to_rear_axle,
            wheel_radius: cfg.wheel_radius,
            wheel_width: cfg.wheel_width,
            livery: car.livery.clone(),
            stats: car.diagnostics,
        }
    }
}

pub struct SimWorld {
    pub viewport: Viewport,
    pub cars: HashMap<String, Car>, // player id -> car
    spawns: SpawnManager,
    template: VehicleParams,        // params for newly spawned cars
    steering: SteeringFilter,       // assists for newly spawned cars
    livery: Livery,
}

impl SimWorld {
    pub fn new(config: &HostConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            viewport: config.viewport(),
            cars: HashMap::new(),
            spawns: SpawnManager::new(config.spawn_seed),
            template: config.vehicle_params()?,
            steering: config.steering(),
            livery: config.livery.clone(),
        })
    }

    /// Spawn a car for `id`, replacing any previous one.
    pub fn spawn_car(&mut self, id: &str) -> &Car {
        let spawn = self.spawns.allocate_spawn(&self.viewport);
        let car = Car::new(self.template, spawn.position, spawn.heading)
            .with_steering(self.steering)
            .with_livery(self.livery.clone());

        info!(
            "Spawned car for {} at ({:.1}, {:.1})",
            id, spawn.position.x, spawn.position.y
        );

        self.cars.insert(id.to_string(), car);
        &self.cars[id]
    }

    pub fn remove_car(&mut self, id: &str) -> Option<Car> {
        self.cars.remove(id)
    }

    /// Live edit from a tuning panel. A rejected edit keeps the old params.
    pub fn tune_car(&mut self, id: &str, options: &VehicleOptions) -> Result<(), ConfigError> {
        if options.is_empty() {
            return Ok(());
        }
        let Some(car) = self.cars.get_mut(id) else {
            return Ok(());
        };
        car.tune(options).inspect_err(|e| warn!("Rejected tuning for {}: {}", id, e))
    }

    pub fn set_assists(&mut self, id: &str, smooth: Option<bool>, safe: Option<bool>) {
        if let Some(car) = self.cars.get_mut(id) {
            if let Some(smooth) = smooth {
                car.steering.smooth = smooth;
            }
            if let Some(safe) = safe {
                car.steering.safe = safe;
            }
        }
    }

    /// Advance every car by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        let viewport = self.viewport;
        for car in self.cars.values_mut() {
            car.update(dt, viewport);
        }
    }

    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        let mut cars: Vec<CarSnapshot> = self
            .cars
            .iter()
            .map(|(id, car)| CarSnapshot::capture(id, car))
            .collect();
        cars.sort_by(|a, b| a.id.cmp(&b.id));
        cars
    }
}
