use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::room::actor::RoomWideEvent;

/// A stroke in the sender's canvas coordinates. Relayed untouched, canvases of different sizes
/// will not line up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Forwards drawing events straight to a room's broadcast group, without going through the
/// room actor and without storing anything.
#[derive(Clone, Debug)]
pub struct DrawingRelay {
    broadcast_tx: broadcast::Sender<RoomWideEvent>,
}

impl DrawingRelay {
    pub(crate) fn new(broadcast_tx: broadcast::Sender<RoomWideEvent>) -> Self {
        Self { broadcast_tx }
    }

    /// Returns how many connections received the segment.
    pub fn draw_line(&self, segment: LineSegment) -> usize {
        self.relay(RoomWideEvent::DrawLine(segment))
    }

    pub fn clear_canvas(&self) -> usize {
        self.relay(RoomWideEvent::ClearCanvas)
    }

    fn relay(&self, event: RoomWideEvent) -> usize {
        // An empty broadcast group is not an error, there is just nobody to draw for
        self.broadcast_tx.send(event).unwrap_or(0)
    }
}
