use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use thiserror::Error;

// World constants
pub const WORLD_BOUNDS: Bounds = Bounds {
    min_x: 0.0,
    max_x: 800.0,
    min_y: 0.0,
    max_y: 600.0,
};
pub const TICK_RATE: u64 = 50; // ticks per second
pub const TICK_DURATION_MS: u64 = 1000 / TICK_RATE;

// Spawn constants
pub const SPAWN_MARGIN: f64 = 50.0; // spawns are inset by half of this
pub const GRID_SIZE: f64 = 10.0;

// Player constants
pub const PLAYER_BASE_RADIUS: f64 = 30.0;
pub const RADIUS_GROWTH: f64 = 10.0; // per collectible picked up

// Hazard constants
pub const HAZARD_RADIUS: f64 = 30.0;
pub const HAZARD_SPEED: f64 = 2.0; // units per tick, each axis

// Collectible constants
pub const COLLECTIBLE_RADIUS: f64 = 15.0;
pub const COLLECTIBLE_VALUE: u32 = 1;

// Server
pub const SERVER_PORT: u16 = 3000;
pub const BROADCAST_CAPACITY: usize = 64;

/// Axis-aligned world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("port cannot be 0")]
    ZeroPort,

    #[error("{0} cannot be empty")]
    EmptyPath(&'static str),
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_address: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/public`
    pub public_dir: PathBuf,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
    /// HTML page served at `/`
    pub index_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: SERVER_PORT,
            public_dir: PathBuf::from("public"),
            assets_dir: PathBuf::from("assets"),
            index_file: PathBuf::from("views/index.html"),
        }
    }
}

impl ServerConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDRESS") {
            match addr.parse() {
                Ok(parsed) => config.bind_address = parsed,
                Err(_) => tracing::warn!("Invalid BIND_ADDRESS '{}', using default", addr),
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(parsed) if parsed > 0 => config.port = parsed,
                Ok(_) => tracing::warn!("PORT must be > 0, using default"),
                Err(_) => tracing::warn!("Invalid PORT '{}', using default", port),
            }
        }

        if let Some(dir) = lookup("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("INDEX_FILE") {
            config.index_file = PathBuf::from(file);
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.public_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("PUBLIC_DIR"));
        }
        if self.assets_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("ASSETS_DIR"));
        }
        if self.index_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("INDEX_FILE"));
        }
        Ok(())
    }
}
