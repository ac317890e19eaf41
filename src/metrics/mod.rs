use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_ROOMS: IntGauge =
        IntGauge::new("hangroom_active_rooms", "Active rooms").expect("metric cannot be created");
    pub static ref CONNECTED_PLAYERS: IntGauge =
        IntGauge::new("hangroom_connected_players", "Amount of players connected")
            .expect("metric cannot be created");
    pub static ref DECIDED_ROUNDS: IntCounter =
        IntCounter::new("hangroom_decided_rounds", "Rounds that ended in a win or a loss")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_ROOMS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CONNECTED_PLAYERS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(DECIDED_ROUNDS.clone()))
        .expect("collector cannot be registered");
}
