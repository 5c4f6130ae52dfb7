//! Outbound integrations of the Glossa service: the identity node client and
//! the word catalog loader.

mod catalog;
mod client;

pub mod error;

pub use catalog::fetch_catalog;
pub use client::NodeClient;
pub use error::{Error, Result};
