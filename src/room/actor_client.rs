use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::{error::TrySendError, Sender};
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::connection::ConnectionId;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::relay::DrawingRelay;
use crate::room::actor::{RoomCommand, RoomWideEvent};
use crate::room::room_code::RoomCode;
use crate::room::RoomSnapshot;
use crate::round::Round;

#[derive(Clone, Debug)]
pub struct RoomClient {
    pub(super) code: RoomCode,
    pub(super) generation: u64,
    pub(super) room_tx: Sender<RoomCommand>,
    pub(super) relay: DrawingRelay,
}

impl RoomClient {
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn relay(&self) -> &DrawingRelay {
        &self.relay
    }

    /// Subscribes the connection to the room's broadcast group. When `announce` is set the
    /// members already in the room receive a `PlayerJoined` event.
    pub async fn join(
        &self,
        connection_id: ConnectionId,
        announce: bool,
    ) -> Result<JoinedRoom, Error> {
        let (tx, rx): (OneshotSender<JoinedRoom>, OneshotReceiver<JoinedRoom>) =
            oneshot::channel();

        self.send_command(RoomCommand::Join {
            connection_id,
            announce,
            response_tx: tx,
        })
        .await?;

        rx.await.map_err(|_| {
            Error::log_and_create_internal(&format!(
                "Connection {connection_id} sent a RoomCommand::Join to room {}, but the Room channel died.",
                self.code
            ))
        })
    }

    pub async fn leave(&self, connection_id: ConnectionId) -> Result<(), Error> {
        self.send_command(RoomCommand::Leave { connection_id }).await
    }

    pub async fn guess_letter(&self, letter: char) -> Result<(), Error> {
        self.send_command(RoomCommand::GuessLetter { letter }).await
    }

    pub async fn start_new_round(&self, round: Round) -> Result<(), Error> {
        self.send_command(RoomCommand::StartNewRound { round }).await
    }

    /// Resets the round without telling the members, used when a host creates a room over an
    /// existing code. Never waits on the room: the RoomStore calls it from its own loop.
    pub fn replace_round(&self, round: Round) -> Result<(), Error> {
        match self.room_tx.try_send(RoomCommand::ReplaceRound { round }) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(command)) => {
                log::warn!("Room {} is busy. Replacing its round in background.", self.code);
                let code = self.code.clone();
                let room_tx = self.room_tx.clone();
                tokio::spawn(async move {
                    if room_tx.send(command).await.is_err() {
                        log::debug!("Room {code} stopped before its round could be replaced.");
                    }
                });
                Ok(())
            }
            Err(TrySendError::Closed(_)) => {
                log::debug!("Room {} is not alive anymore.", self.code);
                Err(Error::Domain(DomainError::RoomDoesNotExist(
                    self.code.to_string(),
                )))
            }
        }
    }

    async fn send_command(&self, command: RoomCommand) -> Result<(), Error> {
        // The actor only stops once every client is gone, from the outside that room no longer exists
        self.room_tx.send(command).await.map_err(|_| {
            log::debug!("Room {} is not alive anymore.", self.code);
            Error::Domain(DomainError::RoomDoesNotExist(self.code.to_string()))
        })
    }
}

pub struct JoinedRoom {
    pub snapshot: RoomSnapshot,
    pub events: RoomWideEventReceiver,
}

pub struct RoomWideEventReceiver {
    pub(super) broadcast_rx: broadcast::Receiver<RoomWideEvent>,
}

impl RoomWideEventReceiver {
    /// Next event of the room, `None` once the room is gone. Events missed because the
    /// receiver fell behind are skipped.
    pub async fn next(&mut self) -> Option<RoomWideEvent> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Room broadcast receiver lagged behind. SkippedEvents: '{skipped}'.");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
