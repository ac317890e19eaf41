use crate::config::Config;
use crate::room_store::actor::RoomStoreActor;
use crate::routes;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn create_web_server(config: Config, listener: TcpListener) -> std::io::Result<()> {
    let room_store = Arc::new(RoomStoreActor::spawn(config.room.clone()));

    let router = routes::create_router(&config).with_state(room_store);

    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}
