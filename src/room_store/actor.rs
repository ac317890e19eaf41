use std::fmt::{Display, Formatter};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::oneshot::Sender as OneshotSender;

use crate::config::RoomSettings;
use crate::error::Error;
use crate::room::actor_client::RoomClient;
use crate::room::room_code::RoomCode;
use crate::room_store::actor_client::RoomStoreClient;
use crate::room_store::RoomStore;
use crate::round::Round;

pub struct RoomStoreActor {
    room_store: RoomStore,
    room_store_rx: Receiver<RoomStoreCommand>,
    room_store_tx: Sender<RoomStoreCommand>,
}

impl RoomStoreActor {
    /// Runs the RoomStore Actor in background and returns a Client to communicate with it
    pub fn spawn(settings: RoomSettings) -> RoomStoreClient {
        let room_store = RoomStore::new(settings);
        let (room_store_tx, room_store_rx): (
            Sender<RoomStoreCommand>,
            Receiver<RoomStoreCommand>,
        ) = mpsc::channel(512);

        tokio::spawn(
            RoomStoreActor {
                room_store,
                room_store_rx,
                room_store_tx: room_store_tx.clone(),
            }
            .start(),
        );

        RoomStoreClient { room_store_tx }
    }

    async fn start(mut self) {
        while let Some(message) = self.room_store_rx.recv().await {
            let response = match message {
                RoomStoreCommand::CreateRoom {
                    code,
                    round,
                    response_channel,
                } => {
                    let room = self.room_store.create_room(
                        code,
                        round,
                        RoomStoreClient {
                            room_store_tx: self.room_store_tx.clone(),
                        },
                    );
                    Some((Ok(RoomStoreResponse::RoomCreated { room }), response_channel))
                }
                RoomStoreCommand::RemoveRoom { code, generation } => {
                    if self.room_store.remove_room(&code, generation).is_some() {
                        log::info!(
                            "Room removed. RoomCode: '{code}', ActiveRooms: '{}'.",
                            self.room_store.len()
                        );
                    }
                    None
                }
                RoomStoreCommand::RestoreRoom { room } => {
                    let code = room.code().clone();
                    if self.room_store.restore_room(room) {
                        log::info!(
                            "Room restored. RoomCode: '{code}', ActiveRooms: '{}'.",
                            self.room_store.len()
                        );
                    } else {
                        log::warn!("Room {code} could not be restored, the code belongs to a newer room.");
                    }
                    None
                }
                RoomStoreCommand::GetRoom {
                    code,
                    response_channel,
                } => {
                    let result = self
                        .room_store
                        .get_room(&code)
                        .map(|room| RoomStoreResponse::Room { room: room.clone() });
                    Some((result, response_channel))
                }
            };
            if let Some((result, response_tx)) = response {
                let event = match result {
                    Ok(event) => event,
                    Err(error) => RoomStoreResponse::Error { error },
                };
                if let Err(error) = response_tx.send(event) {
                    log::error!("Sent RoomStoreResponse but the response channel is closed. Response: '{error}'.");
                }
            }
        }
    }
}

pub(crate) enum RoomStoreCommand {
    CreateRoom {
        code: RoomCode,
        round: Round,
        response_channel: OneshotSender<RoomStoreResponse>,
    },
    RemoveRoom {
        code: RoomCode,
        generation: u64,
    },
    RestoreRoom {
        room: RoomClient,
    },
    GetRoom {
        code: RoomCode,
        response_channel: OneshotSender<RoomStoreResponse>,
    },
}

#[derive(Debug)]
pub(crate) enum RoomStoreResponse {
    RoomCreated { room: RoomClient },
    Room { room: RoomClient },
    Error { error: Error },
}

impl Display for RoomStoreResponse {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                RoomStoreResponse::RoomCreated { room } =>
                    format!("RoomCreated(code: {})", room.code()),
                RoomStoreResponse::Room { room } => format!("Room(code: {})", room.code()),
                RoomStoreResponse::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}
