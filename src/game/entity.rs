use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::config::*;
use crate::game::physics;

/// Position and collision radius shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Circle { x, y, radius }
    }

    /// True when the centres are closer than the sum of the radii.
    pub fn collides_with(&self, other: &Circle) -> bool {
        physics::circles_overlap(
            (self.x, self.y, self.radius),
            (other.x, other.y, other.radius),
        )
    }
}

/// The bouncing entity that knocks players back to a fresh spawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hazard {
    pub id: u64,
    #[serde(flatten)]
    pub body: Circle,
    #[serde(skip)]
    pub vx: f64,
    #[serde(skip)]
    pub vy: f64,
}

impl Hazard {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Hazard {
            id,
            body: Circle::new(x, y, HAZARD_RADIUS),
            vx: HAZARD_SPEED,
            vy: HAZARD_SPEED,
        }
    }

    /// Reflect off any wall being crossed, then advance one tick.
    pub fn step(&mut self, bounds: &Bounds) {
        let Circle { x, y, radius } = self.body;
        self.vx = physics::bounce(x, radius, self.vx, bounds.min_x, bounds.max_x);
        self.vy = physics::bounce(y, radius, self.vy, bounds.min_y, bounds.max_y);
        self.body.x += self.vx;
        self.body.y += self.vy;
    }
}

/// Pickup worth `value`; replaced with a new id each time it is collected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collectible {
    pub id: u64,
    #[serde(flatten)]
    pub body: Circle,
    pub value: u32,
}

impl Collectible {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Collectible {
            id,
            body: Circle::new(x, y, COLLECTIBLE_RADIUS),
            value: COLLECTIBLE_VALUE,
        }
    }
}

/// Timestamp-derived ids for the hazard and collectibles.
///
/// Ids are unix milliseconds, bumped past the previous id when the clock has
/// not moved, so two collectibles never share an id.
#[derive(Debug, Default)]
pub struct EntityIds {
    last: u64,
}

impl EntityIds {
    pub fn next(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let id = now.max(self.last + 1);
        self.last = id;
        id
    }
}
