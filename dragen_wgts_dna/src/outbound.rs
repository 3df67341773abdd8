//! Concrete implementations of the domain ports against the deployed services

#[cfg(feature = "icav2")]
pub mod icav2;
#[cfg(feature = "orcabus")]
pub mod orcabus;
pub mod time;
