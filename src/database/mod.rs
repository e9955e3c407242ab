pub mod connection;
pub mod history;
pub mod models;
pub mod setup;
pub mod swimmers;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
