use serde::Serialize;
use uuid::Uuid;

use crate::config::*;
use crate::game::entity::Circle;
use crate::protocol::messages::PlayerUpdate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: Uuid, // same as the owning connection id
    #[serde(flatten)]
    pub body: Circle,
    pub score: u32,
}

impl Player {
    pub fn new(id: Uuid, x: f64, y: f64) -> Self {
        Player {
            id,
            body: Circle::new(x, y, PLAYER_BASE_RADIUS),
            score: 0,
        }
    }

    /// Hit by the hazard: back to a fresh spawn with nothing to show for it.
    pub fn respawn(&mut self, (x, y): (f64, f64)) {
        self.body = Circle::new(x, y, PLAYER_BASE_RADIUS);
        self.score = 0;
    }

    pub fn collect(&mut self) {
        self.score = self.score.saturating_add(1);
        self.body.radius += RADIUS_GROWTH;
    }

    /// Client-reported state wins outright.
    pub fn apply(&mut self, update: &PlayerUpdate) {
        self.body.x = update.x;
        self.body.y = update.y;
        self.body.radius = update.radius;
        self.score = update.score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let id = Uuid::new_v4();
        let player = Player::new(id, 100.0, 200.0);
        assert_eq!(player.id, id);
        assert_eq!(player.score, 0);
        assert_eq!(player.body.radius, PLAYER_BASE_RADIUS);
    }

    #[test]
    fn test_collect_then_respawn() {
        let mut player = Player::new(Uuid::new_v4(), 100.0, 200.0);
        player.collect();
        player.collect();
        assert_eq!(player.score, 2);
        assert_eq!(player.body.radius, 50.0);

        player.respawn((300.0, 400.0));
        assert_eq!(player.score, 0);
        assert_eq!(player.body, Circle::new(300.0, 400.0, 30.0));
    }

    #[test]
    fn test_apply_update_overwrites_everything() {
        let mut player = Player::new(Uuid::new_v4(), 100.0, 200.0);
        player.apply(&PlayerUpdate {
            x: 10.0,
            y: 20.0,
            score: 7,
            radius: 45.0,
        });
        assert_eq!(player.body, Circle::new(10.0, 20.0, 45.0));
        assert_eq!(player.score, 7);
    }

    #[test]
    fn test_json_shape() {
        let id = Uuid::nil();
        let json = serde_json::to_value(Player::new(id, 1.0, 2.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "x": 1.0,
                "y": 2.0,
                "radius": 30.0,
                "score": 0
            })
        );
    }
}
