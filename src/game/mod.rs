pub mod engine;
pub mod entity;
pub mod physics;
pub mod player;
pub mod registry;
pub mod spawn;
pub mod world;
