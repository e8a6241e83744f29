//! Jenkins REST proxying: client, weather mapping, formatting.

mod client;
pub mod weather;

pub use client::JenkinsClient;
