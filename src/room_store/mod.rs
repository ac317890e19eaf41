pub mod actor;
pub mod actor_client;

use std::collections::HashMap;

use crate::config::RoomSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::room::actor::RoomActor;
use crate::room::actor_client::RoomClient;
use crate::room::room_code::RoomCode;
use crate::room::Room;
use crate::room_store::actor_client::RoomStoreClient;
use crate::round::Round;

/// Every active room of the process, by code.
pub struct RoomStore {
    rooms: HashMap<RoomCode, RoomClient>,
    settings: RoomSettings,
    last_generation: u64,
}

impl RoomStore {
    pub fn new(settings: RoomSettings) -> Self {
        RoomStore {
            rooms: HashMap::default(),
            settings,
            last_generation: 0,
        }
    }

    /// Creates the room, or overwrites the round of the room already using `code`. The last
    /// writer wins and the members of an overwritten room stay in it.
    pub fn create_room(
        &mut self,
        code: RoomCode,
        round: Round,
        room_store: RoomStoreClient,
    ) -> RoomClient {
        if let Some(room) = self.rooms.get(&code) {
            match room.replace_round(round.clone()) {
                Ok(()) => return room.clone(),
                Err(_) => log::warn!(
                    "Room {code} stopped before it could be overwritten. Starting a new one."
                ),
            }
        }

        self.last_generation += 1;
        let room = RoomActor::spawn(
            Room::new(code.clone(), round),
            self.last_generation,
            &self.settings,
            room_store,
        );
        self.rooms.insert(code, room.clone());
        room
    }

    pub fn get_room(&self, code: &RoomCode) -> Result<&RoomClient, Error> {
        match self.rooms.get(code) {
            Some(room) => Ok(room),
            None => Err(Error::Domain(DomainError::RoomDoesNotExist(
                code.to_string(),
            ))),
        }
    }

    /// Only removes the room when `code` still belongs to the room actor of `generation`.
    pub fn remove_room(&mut self, code: &RoomCode, generation: u64) -> Option<RoomClient> {
        match self.rooms.get(code) {
            Some(room) if room.generation() == generation => self.rooms.remove(code),
            _ => None,
        }
    }

    /// Puts back a room that expired while a player was joining it. Returns false when the
    /// code has been taken by another room in the meantime.
    pub fn restore_room(&mut self, room: RoomClient) -> bool {
        match self.rooms.get(room.code()) {
            Some(current) => current.generation() == room.generation(),
            None => {
                self.rooms.insert(room.code().clone(), room);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
