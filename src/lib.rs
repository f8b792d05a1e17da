pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod registry;
pub mod router;
pub mod server;

pub use error::AtriumError;
