use std::fmt;

use rust_fsm::state_machine;

/*
 * Hosted: the round has been set up, nobody guessed yet
 * Ongoing: at least one guess, not decided
 * Decided: won or lost, only a new round leaves it
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub RoomFsm(Hosted)

    Hosted => {
        Guess => Ongoing,
        Decide => Decided,
        NewRound => Hosted,
    },
    Ongoing => {
        Guess => Ongoing,
        Decide => Decided,
        NewRound => Hosted,
    },
    Decided => {
        NewRound => Hosted,
    }
}

impl fmt::Display for RoomFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
