//! KROS invoice-export parsing.
//!
//! The export is a print-layout spreadsheet dump: labelled sections strewn
//! across fixed columns, page-break boilerplate in between, one item table.
//! [`KrosParser`] reconstructs the [`crate::core::Invoice`] from it in a
//! single forward pass.

mod cursor;
mod decode;
mod layout;
mod parser;

pub use parser::KrosParser;
