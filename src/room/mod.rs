pub mod actor;
pub mod actor_client;
pub mod room_code;
pub mod room_fsm;

use rust_fsm::StateMachine;

use crate::round::{GuessOutcome, Level, Round};

use self::room_code::RoomCode;
use self::room_fsm::{RoomFsm, RoomFsmInput, RoomFsmState};

pub struct Room {
    code: RoomCode,
    round: Round,
    fsm: StateMachine<RoomFsm>,
}

/// What a player receives when joining a room that already has a round going.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub guessed_letters: Vec<char>,
    pub wrong_count: usize,
    pub word_length: usize,
    pub secret_word: String,
    pub level: Option<Level>,
}

impl Room {
    pub fn new(code: RoomCode, round: Round) -> Self {
        Self {
            code,
            round,
            fsm: StateMachine::new(),
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn state(&self) -> &RoomFsmState {
        self.fsm.state()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            guessed_letters: self.round.guessed_letters().to_vec(),
            wrong_count: self.round.wrong_count(),
            word_length: self.round.word_length(),
            secret_word: self.round.secret_word().to_string(),
            level: self.round.level(),
        }
    }

    /// Guesses are ignored once the round is decided, until a new round starts.
    pub fn guess_letter(&mut self, letter: char) -> GuessOutcome {
        if *self.state() == RoomFsmState::Decided {
            return GuessOutcome::Unchanged;
        }

        let outcome = self.round.apply_guess(letter);
        if let GuessOutcome::Changed { result, .. } = &outcome {
            if result.is_decided() {
                self.process_event(&RoomFsmInput::Decide);
            } else {
                self.process_event(&RoomFsmInput::Guess);
            }
        }
        outcome
    }

    /// Replaces the round, keeping the code.
    pub fn start_new_round(&mut self, round: Round) {
        self.round = round;
        self.process_event(&RoomFsmInput::NewRound);
    }

    fn process_event(&mut self, event: &RoomFsmInput) {
        let from = self.state().clone();
        if self.fsm.consume(event).is_err() {
            log::error!(
                "Invalid room transition. RoomCode: '{}', State: '{from}', Event: '{event:?}'.",
                self.code
            );
        }
    }
}
