use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Bounds;
use crate::game::entity::{Collectible, Hazard};
use crate::game::player::Player;

// ── Client → Server ──

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Update(PlayerUpdate),
}

/// A client's report of its own player. The id is implied by the connection.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct PlayerUpdate {
    pub x: f64,
    pub y: f64,
    pub score: u32,
    pub radius: f64,
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),

    #[error("{field} = {value} is outside the world")]
    OutOfBounds { field: &'static str, value: f64 },

    #[error("radius {0} must be positive")]
    InvalidRadius(f64),
}

impl ClientMessage {
    pub fn parse(text: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl PlayerUpdate {
    /// Reject values that would corrupt shared state. Score sign and
    /// integrality are already enforced by decoding into `u32`. Radius has no
    /// upper cap since pickups grow it without limit.
    pub fn validate(&self, bounds: &Bounds) -> Result<(), MessageError> {
        for (field, value) in [("x", self.x), ("y", self.y), ("radius", self.radius)] {
            if !value.is_finite() {
                return Err(MessageError::NonFinite(field));
            }
        }
        if self.x < bounds.min_x || self.x > bounds.max_x {
            return Err(MessageError::OutOfBounds {
                field: "x",
                value: self.x,
            });
        }
        if self.y < bounds.min_y || self.y > bounds.max_y {
            return Err(MessageError::OutOfBounds {
                field: "y",
                value: self.y,
            });
        }
        if self.radius <= 0.0 {
            return Err(MessageError::InvalidRadius(self.radius));
        }
        Ok(())
    }
}

// ── Server → Client ──

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    Init {
        id: Uuid,
        players: Vec<Player>,
        #[serde(rename = "oxygen")]
        collectible: Collectible,
        #[serde(rename = "spike")]
        hazard: Hazard,
    },
    Update {
        players: Vec<Player>,
        #[serde(rename = "spike")]
        hazard: Hazard,
        #[serde(rename = "oxygen")]
        collectible: Collectible,
        /// Last player changed by a tick; `null` for client-driven updates.
        player: Option<Player>,
    },
    RemovePlayer {
        id: Uuid,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WORLD_BOUNDS;
    use serde_json::json;

    #[test]
    fn test_parse_update() {
        let msg = ClientMessage::parse(r#"{"type":"update","x":120,"y":80.5,"score":3,"radius":60}"#)
            .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Update(PlayerUpdate {
                x: 120.0,
                y: 80.5,
                score: 3,
                radius: 60.0,
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        for text in [
            r#"{"type":"update","x":1,"y":1,"score":"lots","radius":30}"#,
            r#"{"type":"update","x":1,"y":1,"score":-1,"radius":30}"#,
            r#"{"type":"update","x":1,"y":1,"score":1.5,"radius":30}"#,
            r#"{"type":"update","x":1,"y":1,"radius":30}"#,
            r#"{"type":"teleport","x":1,"y":1}"#,
            "not json",
        ] {
            assert!(
                matches!(ClientMessage::parse(text), Err(MessageError::Malformed(_))),
                "accepted {}",
                text
            );
        }
    }

    #[test]
    fn test_validate_ranges() {
        let ok = PlayerUpdate {
            x: 400.0,
            y: 300.0,
            score: 2,
            radius: 50.0,
        };
        assert!(ok.validate(&WORLD_BOUNDS).is_ok());

        let outside = PlayerUpdate { x: 801.0, ..ok };
        assert!(matches!(
            outside.validate(&WORLD_BOUNDS),
            Err(MessageError::OutOfBounds { field: "x", .. })
        ));

        let above = PlayerUpdate { y: -1.0, ..ok };
        assert!(matches!(
            above.validate(&WORLD_BOUNDS),
            Err(MessageError::OutOfBounds { field: "y", .. })
        ));

        let nan = PlayerUpdate { y: f64::NAN, ..ok };
        assert!(matches!(
            nan.validate(&WORLD_BOUNDS),
            Err(MessageError::NonFinite("y"))
        ));

        let zero = PlayerUpdate { radius: 0.0, ..ok };
        assert!(matches!(
            zero.validate(&WORLD_BOUNDS),
            Err(MessageError::InvalidRadius(_))
        ));

        let huge = PlayerUpdate {
            radius: 5_000.0,
            ..ok
        };
        assert!(huge.validate(&WORLD_BOUNDS).is_ok());
    }

    #[test]
    fn test_remove_player_json() {
        let msg = ServerMessage::RemovePlayer { id: Uuid::nil() };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "type": "remove-player", "id": "00000000-0000-0000-0000-000000000000" })
        );
    }

    #[test]
    fn test_update_json_uses_wire_names() {
        let msg = ServerMessage::Update {
            players: vec![],
            hazard: Hazard::new(1, 100.0, 100.0),
            collectible: Collectible::new(2, 200.0, 200.0),
            player: None,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "update");
        assert_eq!(value["spike"]["id"], 1);
        assert_eq!(value["oxygen"]["value"], 1);
        assert!(value["player"].is_null());
        assert_eq!(value["players"], json!([]));
    }
}
