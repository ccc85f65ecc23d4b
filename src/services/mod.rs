pub mod import;
pub mod server;
