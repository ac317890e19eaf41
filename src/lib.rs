pub mod config;
pub mod connection;
pub mod error;
pub mod metrics;
pub mod relay;
pub mod room;
pub mod room_store;
pub mod round;
mod routes;
pub mod startup;
mod websocket;
