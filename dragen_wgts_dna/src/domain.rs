//! Everything that does not touch the network

pub mod models;
pub mod ports;
pub mod services;
