use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use tokio::select;

use crate::connection::{ConnectionId, Membership};
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::metrics::CONNECTED_PLAYERS;
use crate::relay::LineSegment;
use crate::room::actor::RoomWideEvent;
use crate::room::actor_client::RoomClient;
use crate::room::room_code::RoomCode;
use crate::room::RoomSnapshot;
use crate::room_store::actor_client::RoomStoreClient;
use crate::round::{parse_letter, Level, Round};
use crate::websocket::close;
use crate::websocket::message::{WsMessageIn, WsMessageOut};
use crate::websocket::parse_message;
use crate::websocket::send_message;
use crate::websocket::send_message_string;

/// Handles the protocol of one websocket connection: turns inbound events into Room Store
/// lookups and room commands, and forwards the events of its room to the socket.
pub struct ConnectionActor {
    id: ConnectionId,
    room_store: Arc<RoomStoreClient>,
    membership: Option<Membership>,
    websocket: WebSocket,
}

impl ConnectionActor {
    pub async fn create(room_store: Arc<RoomStoreClient>, websocket: WebSocket) {
        ConnectionActor {
            id: ConnectionId::next(),
            room_store,
            membership: None,
            websocket,
        }
        .start()
        .await
    }

    async fn start(mut self) {
        CONNECTED_PLAYERS.inc();
        log::info!("Connection {} opened.", self.id);

        loop {
            select! {
                room_event = next_room_event(&mut self.membership) => {
                    if let Err(error) = self.receive_room_event(room_event).await {
                        if ConnectionActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
                websocket_message = self.websocket.recv() => {
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        if ConnectionActor::should_close_websocket(&error) {
                            break;
                        }
                        self.log_ignored_message(&error);
                    }
                },
            }
        }

        self.leave_room().await;
        close(self.websocket).await;
        CONNECTED_PLAYERS.dec();
    }

    fn should_close_websocket(error: &Error) -> bool {
        match error {
            Error::Internal(_) => true,
            Error::WebsocketClosed(_) => true,
            Error::UnprocessableMessage(_, _) => false,
            Error::Domain(_) => false,
        }
    }

    fn log_ignored_message(&self, error: &Error) {
        match error {
            Error::UnprocessableMessage(_, _) => {
                log::warn!("Ignored message from connection {}. {error}", self.id)
            }
            _ => log::debug!("Ignored message from connection {}. {error}", self.id),
        }
    }

    async fn receive_room_event(&mut self, room_event: Option<RoomWideEvent>) -> Result<(), Error> {
        match room_event {
            Some(event) => send_message(&mut self.websocket, &WsMessageOut::from(event)).await,
            None => {
                if let Some(membership) = self.membership.take() {
                    log::info!(
                        "Room {} is gone. Connection {} is no longer in a room.",
                        membership.room.code(),
                        self.id
                    );
                }
                Ok(())
            }
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Option<Result<Message, axum::Error>>,
    ) -> Result<(), Error> {
        match websocket_message {
            Some(Ok(Message::Text(txt))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => {
                    let message = parse_message(message)?;
                    self.handle_message(message).await
                }
            },
            // browser said "close"
            Some(Ok(Message::Close(_))) => {
                self.log_connection_lost("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            None => {
                self.log_connection_lost("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            // axum answers pings on its own
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => Ok(()),
            Some(Err(error)) => {
                self.log_connection_lost("the websocket could not be read");
                Err(Error::WebsocketClosed(error.to_string()))
            }
            Some(Ok(Message::Binary(_))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Binary message".to_string(),
            )),
        }
    }

    async fn handle_message(&mut self, message: WsMessageIn) -> Result<(), Error> {
        match message {
            WsMessageIn::CreateRoom {
                room_id,
                word,
                level,
            } => self.create_room(room_id.as_deref(), &word, level).await,
            WsMessageIn::JoinRoom { room_id } => self.join_room(&room_id).await,
            WsMessageIn::GuessLetter { room_id, letter } => {
                let letter = parse_letter(&letter)?;
                self.find_room(&room_id).await?.guess_letter(letter).await
            }
            WsMessageIn::NewRound {
                room_id,
                word,
                level,
            } => {
                let room = self.find_room(&room_id).await?;
                room.start_new_round(Round::new(&word, level)?).await
            }
            WsMessageIn::DrawLine {
                room_id,
                x0,
                y0,
                x1,
                y1,
            } => {
                let room = self.find_room(&room_id).await?;
                room.relay().draw_line(LineSegment { x0, y0, x1, y1 });
                Ok(())
            }
            WsMessageIn::ClearCanvas { room_id } => {
                let room = self.find_room(&room_id).await?;
                room.relay().clear_canvas();
                Ok(())
            }
        }
    }

    async fn create_room(
        &mut self,
        room_id: Option<&str>,
        word: &str,
        level: Option<Level>,
    ) -> Result<(), Error> {
        let round = Round::new(word, level)?;
        let code = RoomCode::for_new_room(room_id, round.secret_word())
            .ok_or(DomainError::EmptySecretWord)?;

        let room = self.room_store.create_room(code, round).await?;
        let room_id = room.code().to_string();
        self.enter_room(room, false).await?;
        log::info!("Connection {} hosts room {room_id}.", self.id);

        send_message(&mut self.websocket, &WsMessageOut::RoomCreated { room_id }).await
    }

    /// The only event that reports a missing room back to the player.
    async fn join_room(&mut self, room_id: &str) -> Result<(), Error> {
        let reply = match self.enter_existing_room(room_id).await {
            Ok(snapshot) => WsMessageOut::from(snapshot),
            Err(Error::Domain(DomainError::RoomDoesNotExist(code))) => {
                log::info!(
                    "Connection {} tried to join a room that does not exist. RoomCode: '{code}'.",
                    self.id
                );
                WsMessageOut::room_not_found()
            }
            Err(error) => return Err(error),
        };

        send_message(&mut self.websocket, &reply).await
    }

    async fn enter_existing_room(&mut self, room_id: &str) -> Result<RoomSnapshot, Error> {
        let room = self.find_room(room_id).await?;
        self.enter_room(room, true).await
    }

    /// Leaves the current room, if any, and subscribes to `room`.
    async fn enter_room(&mut self, room: RoomClient, announce: bool) -> Result<RoomSnapshot, Error> {
        self.leave_room().await;
        let joined = room.join(self.id, announce).await?;
        self.membership = Some(Membership {
            room,
            events: joined.events,
        });
        Ok(joined.snapshot)
    }

    async fn leave_room(&mut self) {
        if let Some(membership) = self.membership.take() {
            // The room may already be gone, nothing left to leave then
            let _ = membership.room.leave(self.id).await;
        }
    }

    async fn find_room(&mut self, room_id: &str) -> Result<RoomClient, Error> {
        let code = RoomCode::parse(room_id)
            .ok_or_else(|| DomainError::RoomDoesNotExist(room_id.to_string()))?;

        match &self.membership {
            Some(membership) if *membership.room.code() == code => Ok(membership.room.clone()),
            _ => self.room_store.get_room(&code).await,
        }
    }

    fn log_connection_lost(&self, reason: &str) {
        log::info!(
            "Connection {} lost due to: {}. Stopping connection actor.",
            self.id,
            reason,
        );
    }
}

async fn next_room_event(membership: &mut Option<Membership>) -> Option<RoomWideEvent> {
    match membership {
        Some(membership) => membership.events.next().await,
        None => std::future::pending().await,
    }
}
