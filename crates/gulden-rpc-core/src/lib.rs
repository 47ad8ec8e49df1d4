pub mod address;
pub mod client;
pub mod error;
pub mod rpc;
pub mod subclient;
pub mod types;

#[cfg(test)]
mod test_util;

pub use client::GuldenClient;
pub use error::CoreError;
pub use rpc::{NodeConfig, NodeResponse};
