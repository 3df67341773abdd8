//! The schemas the dragen wgts dna handlers read and write

mod error;
mod fastq;
mod metrics;
mod rgid;
mod s3;
mod workflow;

pub use error::*;
pub use fastq::*;
pub use metrics::*;
pub use rgid::*;
pub use s3::*;
pub use workflow::*;
