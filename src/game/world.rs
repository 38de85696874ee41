use tracing::debug;
use uuid::Uuid;

use crate::config::*;
use crate::game::entity::{Collectible, EntityIds, Hazard};
use crate::game::player::Player;
use crate::game::registry::Registry;
use crate::game::spawn::Spawner;
use crate::protocol::messages::{PlayerUpdate, ServerMessage};

pub struct World {
    pub bounds: Bounds,
    pub registry: Registry,
    pub hazard: Hazard,
    pub collectible: Collectible,
    spawner: Spawner,
    ids: EntityIds,
}

impl World {
    pub fn new() -> Self {
        Self::with_spawner(WORLD_BOUNDS, Spawner::from_entropy())
    }

    pub fn with_spawner(bounds: Bounds, mut spawner: Spawner) -> Self {
        let mut ids = EntityIds::default();
        let (cx, cy) = spawner.position(&bounds);
        let collectible = Collectible::new(ids.next(), cx, cy);
        let (hx, hy) = spawner.position(&bounds);
        let hazard = Hazard::new(ids.next(), hx, hy);
        World {
            bounds,
            registry: Registry::new(),
            hazard,
            collectible,
            spawner,
            ids,
        }
    }

    /// Register a new connection with a player at a random spawn.
    pub fn join(&mut self, connection_id: Uuid) -> Player {
        let spawn = self.spawner.position(&self.bounds);
        self.registry.add_player(connection_id, spawn).clone()
    }

    pub fn leave(&mut self, connection_id: Uuid) -> Option<Player> {
        self.registry.remove_player(connection_id)
    }

    /// Returns false when the connection has no player.
    pub fn apply_update(&mut self, connection_id: Uuid, update: &PlayerUpdate) -> bool {
        match self.registry.player_mut(connection_id) {
            Some(player) => {
                player.apply(update);
                true
            }
            None => false,
        }
    }

    /// Advance one tick. Returns the last player whose state the tick changed.
    pub fn tick(&mut self) -> Option<Player> {
        self.hazard.step(&self.bounds);

        let mut changed = None;
        for player in self.registry.players_mut() {
            if self.hazard.body.collides_with(&player.body) {
                player.respawn(self.spawner.position(&self.bounds));
                debug!("player {} hit the hazard", player.id);
                changed = Some(player.id);
            }
            if player.body.collides_with(&self.collectible.body) {
                player.collect();
                let (x, y) = self.spawner.position(&self.bounds);
                self.collectible = Collectible::new(self.ids.next(), x, y);
                debug!("player {} collected, score {}", player.id, player.score);
                changed = Some(player.id);
            }
        }

        changed.and_then(|id| self.registry.player(id).cloned())
    }

    pub fn snapshot(&self, changed: Option<Player>) -> ServerMessage {
        ServerMessage::Update {
            players: self.registry.all_players(),
            hazard: self.hazard.clone(),
            collectible: self.collectible.clone(),
            player: changed,
        }
    }

    pub fn init_for(&self, connection_id: Uuid) -> ServerMessage {
        ServerMessage::Init {
            id: connection_id,
            players: self.registry.all_players(),
            collectible: self.collectible.clone(),
            hazard: self.hazard.clone(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
