use uuid::Uuid;

use crate::game::player::Player;

/// Live connections and their players, kept in lockstep.
///
/// Players are stored in join order. Every id in `connections` has exactly
/// one player and vice versa.
#[derive(Debug, Default)]
pub struct Registry {
    connections: Vec<Uuid>,
    players: Vec<Player>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and its new player at `(x, y)`.
    /// A connection that is already registered keeps its existing player.
    pub fn add_player(&mut self, connection_id: Uuid, (x, y): (f64, f64)) -> &Player {
        let index = match self.index_of(connection_id) {
            Some(i) => i,
            None => {
                self.connections.push(connection_id);
                self.players.push(Player::new(connection_id, x, y));
                self.players.len() - 1
            }
        };
        &self.players[index]
    }

    pub fn remove_player(&mut self, connection_id: Uuid) -> Option<Player> {
        self.connections.retain(|id| *id != connection_id);
        match self.index_of(connection_id) {
            Some(i) => Some(self.players.remove(i)),
            None => {
                tracing::debug!("remove_player: {} is not registered", connection_id);
                None
            }
        }
    }

    pub fn player(&self, connection_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == connection_id)
    }

    pub fn player_mut(&mut self, connection_id: Uuid) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == connection_id)
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Owned copy of every player, for snapshots.
    pub fn all_players(&self) -> Vec<Player> {
        self.players.clone()
    }

    pub fn connections(&self) -> &[Uuid] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn index_of(&self, connection_id: Uuid) -> Option<usize> {
        self.players.iter().position(|p| p.id == connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_player_registers_connection() {
        let mut registry = Registry::new();
        let id = Uuid::new_v4();
        let player = registry.add_player(id, (100.0, 200.0)).clone();
        assert_eq!(player.id, id);
        assert_eq!(player.score, 0);
        assert_eq!(registry.connections(), &[id]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_players_keep_join_order() {
        let mut registry = Registry::new();
        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            registry.add_player(*id, (50.0, 50.0));
        }
        let order: Vec<Uuid> = registry.all_players().iter().map(|p| p.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_duplicate_add_keeps_existing_player() {
        let mut registry = Registry::new();
        let id = Uuid::new_v4();
        registry.add_player(id, (100.0, 100.0));
        let again = registry.add_player(id, (500.0, 500.0)).clone();
        assert_eq!(again.body.x, 100.0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.connection_count(), 1);
    }

    #[test]
    fn test_remove_player_cleans_both_sets() {
        let mut registry = Registry::new();
        let keep = Uuid::new_v4();
        let gone = Uuid::new_v4();
        registry.add_player(keep, (100.0, 100.0));
        registry.add_player(gone, (200.0, 200.0));

        let removed = registry.remove_player(gone).map(|p| p.id);
        assert_eq!(removed, Some(gone));
        assert!(registry.player(gone).is_none());
        assert!(!registry.connections().contains(&gone));
        assert_eq!(registry.connections(), &[keep]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = Registry::new();
        registry.add_player(Uuid::new_v4(), (100.0, 100.0));
        assert!(registry.remove_player(Uuid::new_v4()).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.connection_count(), 1);
    }
}
