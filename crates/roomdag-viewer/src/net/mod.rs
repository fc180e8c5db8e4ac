pub mod http;
pub mod protocol;

pub use http::spawn_client;
pub use protocol::{Command, Incoming};
