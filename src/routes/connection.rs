use std::sync::Arc;

use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;

use crate::connection::actor::ConnectionActor;
use crate::room_store::actor_client::RoomStoreClient;

pub async fn connect_to_websocket(
    State(room_store): State<Arc<RoomStoreClient>>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade
        .on_upgrade(move |websocket| ConnectionActor::create(room_store, websocket))
}
