#![deny(missing_docs)]
//! The event transformation logic behind the dragen wgts dna workflow lambdas.
//!
//! Laid out as ports and adapters: [domain::models] holds the schemas,
//! [domain::ports] the traits for everything outside the process, and
//! [domain::services] the transformations. [outbound] implements the ports
//! against the real apis.

pub mod domain;
pub mod outbound;
