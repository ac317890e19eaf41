pub mod actor;

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::room::actor_client::{RoomClient, RoomWideEventReceiver};

/// Process-unique id of a websocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        ConnectionId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The room a connection is currently subscribed to. A connection is in at most one room.
pub struct Membership {
    pub room: RoomClient,
    pub events: RoomWideEventReceiver,
}
