use std::time::Duration;

use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);
const SILENCE_TIMEOUT: Duration = Duration::from_millis(300);

pub struct TestPlayer {
    pub tx: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
    pub rx: SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl TestPlayer {
    pub async fn connect(url: &str) -> TestPlayer {
        let (websocket, _) = tokio_tungstenite::connect_async(url)
            .await
            .expect("WebSocket could not be created.");
        let (tx, rx) = websocket.split();
        TestPlayer { tx, rx }
    }

    pub async fn create_room(
        &mut self,
        room_id: Option<&str>,
        word: &str,
        level: Option<&str>,
    ) -> String {
        self.send(WsMessageOut::CreateRoom {
            room_id: room_id.map(str::to_string),
            word: word.to_string(),
            level: level.map(str::to_string),
        })
        .await;
        match self.receive().await {
            WsMessageIn::RoomCreated { room_id } => room_id,
            other => panic!("Expected RoomCreated, received {other:?}"),
        }
    }

    pub async fn join_room(&mut self, room_id: &str) -> WsMessageIn {
        self.send(WsMessageOut::JoinRoom {
            room_id: room_id.to_string(),
        })
        .await;
        self.receive().await
    }

    pub async fn guess(&mut self, room_id: &str, letter: &str) {
        self.send(WsMessageOut::GuessLetter {
            room_id: room_id.to_string(),
            letter: letter.to_string(),
        })
        .await;
    }

    pub async fn new_round(&mut self, room_id: &str, word: &str) {
        self.send(WsMessageOut::NewRound {
            room_id: room_id.to_string(),
            word: word.to_string(),
            level: None,
        })
        .await;
    }

    pub async fn draw_line(&mut self, room_id: &str, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.send(WsMessageOut::DrawLine {
            room_id: room_id.to_string(),
            x0,
            y0,
            x1,
            y1,
        })
        .await;
    }

    pub async fn clear_canvas(&mut self, room_id: &str) {
        self.send(WsMessageOut::ClearCanvas {
            room_id: room_id.to_string(),
        })
        .await;
    }

    pub async fn receive_player_joined(&mut self) {
        assert_eq!(self.receive().await, WsMessageIn::PlayerJoined);
    }

    pub async fn receive(&mut self) -> WsMessageIn {
        let text = self.receive_text().await;
        serde_json::from_str(&text)
            .unwrap_or_else(|error| panic!("Could not parse '{text}'. Error: '{error}'."))
    }

    /// Sends a `ping` and checks the `pong` is the very next message, proving that nothing was
    /// sent to this player in between.
    pub async fn assert_nothing_received(&mut self) {
        self.send_message(Message::Text("ping".to_string())).await;
        assert_eq!(self.receive_text().await, "pong");
    }

    /// For players that did not send anything, so they cannot use a `ping`.
    pub async fn assert_silence(&mut self) {
        if let Ok(message) = timeout(SILENCE_TIMEOUT, self.rx.next()).await {
            panic!("Expected no message, received {message:?}");
        }
    }

    pub async fn send_message(&mut self, message: Message) {
        self.tx.send(message).await.expect("Could not send message");
    }

    async fn send(&mut self, message: WsMessageOut) {
        self.send_message(Message::Text(
            serde_json::to_string(&message).expect("Could not serialize message"),
        ))
        .await;
    }

    async fn receive_text(&mut self) -> String {
        loop {
            match timeout(RECEIVE_TIMEOUT, self.rx.next()).await {
                Ok(Some(Ok(Message::Text(text)))) => return text,
                Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => continue,
                Ok(Some(Ok(message))) => panic!("Unexpected websocket message {message:?}"),
                Ok(Some(Err(error))) => panic!("Websocket returned an error {error}"),
                Ok(None) => panic!("Websocket closed before expected."),
                Err(_) => panic!("No message received in {RECEIVE_TIMEOUT:?}."),
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WsMessageOut {
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        #[serde(skip_serializing_if = "Option::is_none")]
        room_id: Option<String>,
        word: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        level: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    GuessLetter { room_id: String, letter: String },
    #[serde(rename_all = "camelCase")]
    NewRound {
        room_id: String,
        word: String,
        level: Option<String>,
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

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum WsMessageIn {
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String },
    #[serde(rename_all = "camelCase")]
    RoomJoined {
        guessed: Vec<String>,
        wrong: usize,
        word_length: usize,
        word: String,
        level: Option<String>,
    },
    RoomError { message: String },
    PlayerJoined,
    GameUpdate { guessed: Vec<String>, wrong: usize },
    #[serde(rename_all = "camelCase")]
    GameEnded {
        word: String,
        is_win: bool,
        is_lose: bool,
    },
    #[serde(rename_all = "camelCase")]
    NewRoundStarted {
        guessed: Vec<String>,
        wrong: usize,
        word_length: usize,
    },
    DrawLine { x0: f64, y0: f64, x1: f64, y1: f64 },
    ClearCanvas,
}

pub fn letters(letters: &[&str]) -> Vec<String> {
    letters.iter().map(|letter| letter.to_string()).collect()
}
