// chamberlain-api: Async Rust client for the MyQ device-attribute API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{ClientConfig, MyQClient};
pub use error::Error;
pub use transport::TransportConfig;
