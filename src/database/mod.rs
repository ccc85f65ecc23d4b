pub mod connection;
pub mod games;
pub mod matches;
pub mod models;
pub mod participations;
pub mod players;
pub mod setup;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
