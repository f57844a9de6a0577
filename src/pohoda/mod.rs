//! Stormware Pohoda XML data-pack export.
//!
//! Renders a parsed [`crate::core::Invoice`] as the `dat:dataPack` document
//! Pohoda imports: one data-pack item wrapping one issued-invoice element,
//! with reverse-charge (PDP) classification per item.

mod export;
mod xml_utils;

pub use export::{PohodaConfig, to_pohoda_xml, to_pohoda_xml_with};

/// Pohoda schema namespace URIs (version 2).
pub mod pohoda_ns {
    pub const DATA: &str = "http://www.stormware.cz/schema/version_2/data.xsd";
    pub const TYPE: &str = "http://www.stormware.cz/schema/version_2/type.xsd";
    pub const INVOICE: &str = "http://www.stormware.cz/schema/version_2/invoice.xsd";
}
