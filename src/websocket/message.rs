use serde::{Deserialize, Serialize};

use crate::relay::LineSegment;
use crate::room::actor::RoomWideEvent;
use crate::room::RoomSnapshot;
use crate::round::Level;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WsMessageIn {
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        room_id: Option<String>,
        word: String,
        level: Option<Level>,
    },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    GuessLetter { room_id: String, letter: String },
    #[serde(rename_all = "camelCase")]
    NewRound {
        room_id: String,
        word: String,
        level: Option<Level>,
    },
    #[serde(rename_all = "camelCase")]
    DrawLine {
        room_id: String,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    #[serde(rename_all = "camelCase")]
    ClearCanvas { room_id: String },
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WsMessageOut {
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String },
    #[serde(rename_all = "camelCase")]
    RoomJoined {
        guessed: Vec<char>,
        wrong: usize,
        word_length: usize,
        word: String,
        level: Option<Level>,
    },
    RoomError { message: String },
    PlayerJoined,
    GameUpdate { guessed: Vec<char>, wrong: usize },
    #[serde(rename_all = "camelCase")]
    GameEnded {
        word: String,
        is_win: bool,
        is_lose: bool,
    },
    #[serde(rename_all = "camelCase")]
    NewRoundStarted {
        guessed: Vec<char>,
        wrong: usize,
        word_length: usize,
    },
    DrawLine { x0: f64, y0: f64, x1: f64, y1: f64 },
    ClearCanvas,
}

impl WsMessageOut {
    pub fn room_not_found() -> Self {
        WsMessageOut::RoomError {
            message: "Room not found".to_string(),
        }
    }
}

impl From<RoomSnapshot> for WsMessageOut {
    fn from(snapshot: RoomSnapshot) -> Self {
        WsMessageOut::RoomJoined {
            guessed: snapshot.guessed_letters,
            wrong: snapshot.wrong_count,
            word_length: snapshot.word_length,
            word: snapshot.secret_word,
            level: snapshot.level,
        }
    }
}

impl From<RoomWideEvent> for WsMessageOut {
    fn from(event: RoomWideEvent) -> Self {
        match event {
            RoomWideEvent::PlayerJoined => WsMessageOut::PlayerJoined,
            RoomWideEvent::GameUpdate {
                guessed_letters,
                wrong_count,
            } => WsMessageOut::GameUpdate {
                guessed: guessed_letters,
                wrong: wrong_count,
            },
            RoomWideEvent::GameEnded {
                secret_word,
                is_win,
                is_lose,
            } => WsMessageOut::GameEnded {
                word: secret_word,
                is_win,
                is_lose,
            },
            RoomWideEvent::NewRoundStarted { word_length } => WsMessageOut::NewRoundStarted {
                guessed: Vec::default(),
                wrong: 0,
                word_length,
            },
            RoomWideEvent::DrawLine(LineSegment { x0, y0, x1, y1 }) => {
                WsMessageOut::DrawLine { x0, y0, x1, y1 }
            }
            RoomWideEvent::ClearCanvas => WsMessageOut::ClearCanvas,
        }
    }
}
