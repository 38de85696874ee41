use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::BROADCAST_CAPACITY;
use crate::protocol::messages::ServerMessage;

/// One encoded frame for every connection, optionally skipping one of them.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub except: Option<Uuid>,
    pub payload: String,
}

impl Outbound {
    pub fn is_for(&self, connection_id: Uuid) -> bool {
        self.except != Some(connection_id)
    }
}

/// Fan-out to every connected socket.
///
/// Sending never waits on receivers: a subscriber that falls more than
/// `BROADCAST_CAPACITY` frames behind skips ahead to the newest ones.
#[derive(Clone)]
pub struct Hub {
    tx: broadcast::Sender<Outbound>,
}

impl Hub {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(BROADCAST_CAPACITY);
        Hub { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Outbound> {
        self.tx.subscribe()
    }

    pub fn send_all(&self, msg: &ServerMessage) {
        self.publish(None, msg);
    }

    pub fn send_all_except(&self, connection_id: Uuid, msg: &ServerMessage) {
        self.publish(Some(connection_id), msg);
    }

    fn publish(&self, except: Option<Uuid>, msg: &ServerMessage) {
        let payload = match serde_json::to_string(msg) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("failed to encode broadcast: {}", e);
                return;
            }
        };
        // Err only means nobody is listening right now.
        let _ = self.tx.send(Outbound { except, payload });
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}
