// vegadns-api: Async Rust client for the VegaDNS REST API

pub mod acme;
pub mod auth;
pub mod client;
pub mod config;
pub mod domains;
pub mod error;
pub mod models;
pub mod records;
pub mod token;
pub mod transport;
pub mod zone;

pub use auth::{AuthStrategy, Credentials};
pub use client::{API_VERSION, VegaClient};
pub use config::ClientConfig;
pub use error::Error;
pub use models::{Domain, NewRecord, Record};
pub use token::Token;
pub use transport::{TlsMode, TransportConfig};
pub use zone::{AuthZone, zone_candidates};
