//! Core data model and error type shared by the parser, the control-report
//! aggregation and the Pohoda exporter.

mod error;
mod types;

pub use error::*;
pub use types::*;
