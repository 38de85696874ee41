use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;
use crate::config::*;
use crate::game::world::World;
use crate::server::hub::Hub;

pub type SharedWorld = Arc<RwLock<World>>;

pub fn create_world() -> SharedWorld {
    Arc::new(RwLock::new(World::new()))
}

/// Runs for the life of the process. Late ticks are skipped, not replayed.
pub async fn game_loop(world: SharedWorld, hub: Hub) {
    let mut tick_interval = interval(Duration::from_millis(TICK_DURATION_MS));
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    debug!("game loop started, {} ms per tick", TICK_DURATION_MS);

    loop {
        tick_interval.tick().await;
        run_tick(&world, &hub).await;
    }
}

/// One tick: advance the world under the lock, publish after releasing it.
pub async fn run_tick(world: &SharedWorld, hub: &Hub) {
    let snapshot = {
        let mut w = world.write().await;
        let changed = w.tick();
        w.snapshot(changed)
    };
    hub.send_all(&snapshot);
}
