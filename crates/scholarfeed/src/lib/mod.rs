pub mod author;
pub mod batch;
pub mod config;
pub mod feed;
pub mod fetch;
pub mod job;
pub mod pacing;
pub mod record;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
