use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::error::RecvError;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::room::actor_client::RoomClient;
use crate::room::room_code::RoomCode;
use crate::room_store::actor::{RoomStoreCommand, RoomStoreResponse};
use crate::round::Round;

#[derive(Clone, Debug)]
pub struct RoomStoreClient {
    pub(crate) room_store_tx: Sender<RoomStoreCommand>,
}

impl RoomStoreClient {
    pub async fn create_room(&self, code: RoomCode, round: Round) -> Result<RoomClient, Error> {
        let (tx, rx): (
            OneshotSender<RoomStoreResponse>,
            OneshotReceiver<RoomStoreResponse>,
        ) = oneshot::channel();

        self.send_command(
            RoomStoreCommand::CreateRoom {
                code,
                round,
                response_channel: tx,
            },
            "The RoomStore is not alive. Can't create Room",
        )
        .await?;

        match rx.await {
            Ok(RoomStoreResponse::RoomCreated { room }) => Ok(room),
            error => Err(RoomStoreClient::handle_event_error(error)),
        }
    }

    pub async fn remove_room(&self, code: &RoomCode, generation: u64) -> Result<(), Error> {
        self.send_command(
            RoomStoreCommand::RemoveRoom {
                code: code.clone(),
                generation,
            },
            "The RoomStore channel is closed",
        )
        .await
    }

    pub async fn restore_room(&self, room: RoomClient) -> Result<(), Error> {
        self.send_command(
            RoomStoreCommand::RestoreRoom { room },
            "The RoomStore channel is closed",
        )
        .await
    }

    pub async fn get_room(&self, code: &RoomCode) -> Result<RoomClient, Error> {
        let (tx, rx): (
            OneshotSender<RoomStoreResponse>,
            OneshotReceiver<RoomStoreResponse>,
        ) = oneshot::channel();

        self.send_command(
            RoomStoreCommand::GetRoom {
                code: code.clone(),
                response_channel: tx,
            },
            "The RoomStore channel is closed",
        )
        .await?;

        match rx.await {
            Ok(RoomStoreResponse::Room { room }) => Ok(room),
            error => Err(RoomStoreClient::handle_event_error(error)),
        }
    }

    async fn send_command(
        &self,
        command: RoomStoreCommand,
        error_message: &str,
    ) -> Result<(), Error> {
        self.room_store_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!("{error_message}. Error: '{error}'"))
        })
    }

    fn handle_event_error(error: Result<RoomStoreResponse, RecvError>) -> Error {
        match error {
            Ok(RoomStoreResponse::Error { error }) => error,
            Ok(unexpected_response) => Error::log_and_create_internal(&format!(
                "Received an unexpected RoomStoreResponse. RoomStoreResponse: '{unexpected_response}'."
            )),
            _ => Error::log_and_create_internal(
                "Sent a command to the RoomStore actor, but the actor channel died.",
            ),
        }
    }
}
