//! Inbound adapters translate external stimuli (CLI/HTTP) into dashboard queries.

pub mod cli;
pub mod server;
