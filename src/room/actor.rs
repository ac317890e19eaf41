use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender, WeakSender},
};
use tokio::time::{self, error::Elapsed};

use crate::config::RoomSettings;
use crate::connection::ConnectionId;
use crate::metrics::{ACTIVE_ROOMS, DECIDED_ROUNDS};
use crate::relay::{DrawingRelay, LineSegment};
use crate::room::actor_client::{JoinedRoom, RoomClient, RoomWideEventReceiver};
use crate::room::Room;
use crate::room_store::actor_client::RoomStoreClient;
use crate::round::{GuessOutcome, Round, RoundResult};

pub struct RoomActor {
    room: Room,
    generation: u64,
    members: HashSet<ConnectionId>,
    room_rx: Receiver<RoomCommand>,
    room_tx: WeakSender<RoomCommand>,
    broadcast_tx: broadcast::Sender<RoomWideEvent>,
    room_store: RoomStoreClient,
    idle_timeout: Option<Duration>,
    expiring: bool,
}

impl RoomActor {
    /// Runs the Room Actor in background and returns a Client to communicate with it
    pub fn spawn(
        room: Room,
        generation: u64,
        settings: &RoomSettings,
        room_store: RoomStoreClient,
    ) -> RoomClient {
        let code = room.code().clone();
        let (room_tx, room_rx): (Sender<RoomCommand>, Receiver<RoomCommand>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<RoomWideEvent>,
            broadcast::Receiver<RoomWideEvent>,
        ) = broadcast::channel(settings.broadcast_capacity.max(1));

        let relay = DrawingRelay::new(broadcast_tx.clone());

        tokio::spawn(
            RoomActor {
                room,
                generation,
                members: HashSet::default(),
                room_rx,
                room_tx: room_tx.downgrade(),
                broadcast_tx,
                room_store,
                idle_timeout: settings.idle_timeout(),
                expiring: false,
            }
            .start(),
        );

        RoomClient {
            code,
            generation,
            room_tx,
            relay,
        }
    }

    /// The actor only stops once every `RoomClient` is dropped, so no queued command is ever
    /// lost. Expiring just takes the room out of the store.
    async fn start(mut self) {
        ACTIVE_ROOMS.inc();
        log::info!("Room started. RoomCode: '{}'.", self.room.code());

        loop {
            match self.next_command().await {
                Err(_) => {
                    if self.members.is_empty() {
                        log::info!(
                            "No activity detected in room {} after {} seconds. Removing it from the RoomStore.",
                            self.room.code(),
                            self.idle_timeout.map(|timeout| timeout.as_secs()).unwrap_or_default()
                        );
                        self.expire().await;
                    }
                }
                Ok(None) => {
                    log::info!(
                        "Every client of room {} has been dropped. Stopping room actor.",
                        self.room.code()
                    );
                    break;
                }
                Ok(Some(command)) => self.handle_command(command).await,
            }
        }

        ACTIVE_ROOMS.dec();
    }

    async fn next_command(&mut self) -> Result<Option<RoomCommand>, Elapsed> {
        match self.idle_timeout {
            Some(idle_timeout) if !self.expiring => {
                time::timeout(idle_timeout, self.room_rx.recv()).await
            }
            _ => Ok(self.room_rx.recv().await),
        }
    }

    async fn handle_command(&mut self, command: RoomCommand) {
        match command {
            RoomCommand::Join {
                connection_id,
                announce,
                response_tx,
            } => {
                if announce {
                    // Sent before subscribing, so the joining player does not get its own event
                    self.broadcast(RoomWideEvent::PlayerJoined);
                }
                let joined = JoinedRoom {
                    snapshot: self.room.snapshot(),
                    events: RoomWideEventReceiver {
                        broadcast_rx: self.broadcast_tx.subscribe(),
                    },
                };
                if response_tx.send(joined).is_err() {
                    log::error!("Sent JoinedRoom to connection {connection_id} but the response channel is closed.");
                } else {
                    self.members.insert(connection_id);
                    log::info!(
                        "Connection {connection_id} joined room {}. Members: '{}'.",
                        self.room.code(),
                        self.members.len()
                    );
                    if self.expiring {
                        self.restore().await;
                    }
                }
            }
            RoomCommand::Leave { connection_id } => {
                if self.members.remove(&connection_id) {
                    log::info!(
                        "Connection {connection_id} left room {}. Members: '{}'.",
                        self.room.code(),
                        self.members.len()
                    );
                }
            }
            RoomCommand::GuessLetter { letter } => self.guess_letter(letter),
            RoomCommand::StartNewRound { round } => {
                let word_length = round.word_length();
                self.room.start_new_round(round);
                log::info!("New round started in room {}.", self.room.code());
                self.broadcast(RoomWideEvent::NewRoundStarted { word_length });
            }
            RoomCommand::ReplaceRound { round } => {
                self.room.start_new_round(round);
                log::info!("Room {} has been overwritten by its host.", self.room.code());
            }
        }
    }

    fn guess_letter(&mut self, letter: char) {
        match self.room.guess_letter(letter) {
            GuessOutcome::Unchanged => {
                log::debug!(
                    "Ignored guess '{letter}' in room {}. State: '{}'.",
                    self.room.code(),
                    self.room.state()
                );
            }
            GuessOutcome::Changed {
                guessed_letters,
                wrong_count,
                result,
            } => {
                self.broadcast(RoomWideEvent::GameUpdate {
                    guessed_letters,
                    wrong_count,
                });
                if result.is_decided() {
                    DECIDED_ROUNDS.inc();
                    log::info!("Round decided in room {}. Result: '{result:?}'.", self.room.code());
                    self.broadcast(RoomWideEvent::GameEnded {
                        secret_word: self.room.round().secret_word().to_string(),
                        is_win: result == RoundResult::Won,
                        is_lose: result == RoundResult::Lost,
                    });
                }
            }
        }
    }

    fn broadcast(&self, event: RoomWideEvent) {
        // Fails only when nobody is subscribed, which is a normal situation for a room
        let _ = self.broadcast_tx.send(event);
    }

    async fn expire(&mut self) {
        self.expiring = true;
        let code = self.room.code().clone();
        if let Err(error) = self.room_store.remove_room(&code, self.generation).await {
            log::error!("The RoomStore channel is closed, can't remove the Room. RoomCode: '{code}', Error: '{error}'.");
        }
    }

    /// A player joined with a client obtained before the room expired, put the room back in
    /// the store so the others can find it again.
    async fn restore(&mut self) {
        let Some(room_tx) = self.room_tx.upgrade() else {
            return;
        };
        self.expiring = false;
        log::info!("Room {} is active again. Restoring it.", self.room.code());

        let room = RoomClient {
            code: self.room.code().clone(),
            generation: self.generation,
            room_tx,
            relay: DrawingRelay::new(self.broadcast_tx.clone()),
        };
        if let Err(error) = self.room_store.restore_room(room).await {
            log::error!(
                "The RoomStore channel is closed, can't restore the Room. RoomCode: '{}', Error: '{error}'.",
                self.room.code()
            );
        }
    }
}

pub(crate) enum RoomCommand {
    Join {
        connection_id: ConnectionId,
        announce: bool,
        response_tx: OneshotSender<JoinedRoom>,
    },
    Leave {
        connection_id: ConnectionId,
    },
    GuessLetter {
        letter: char,
    },
    StartNewRound {
        round: Round,
    },
    ReplaceRound {
        round: Round,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoomWideEvent {
    PlayerJoined,
    GameUpdate {
        guessed_letters: Vec<char>,
        wrong_count: usize,
    },
    GameEnded {
        secret_word: String,
        is_win: bool,
        is_lose: bool,
    },
    NewRoundStarted {
        word_length: usize,
    },
    DrawLine(LineSegment),
    ClearCanvas,
}
