pub mod error_handler;
pub mod gateway;

pub use gateway::Gateway;
