//! One-call pipeline: decode → parse → aggregate → export.

use serde::Serialize;

use crate::core::{ConvertError, Invoice};
use crate::kros::KrosParser;
use crate::pohoda;
use crate::report::ControlReport;

/// Everything one uploaded export produces.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub invoice: Invoice,
    pub report: ControlReport,
    /// The Pohoda data-pack document, ready to be imported.
    pub xml: String,
}

/// Convert one raw KROS export end to end.
///
/// All-or-nothing: any decode, parse or export failure surfaces here and
/// nothing partial is returned.
pub fn convert(raw: &[u8]) -> Result<Conversion, ConvertError> {
    let invoice = KrosParser::from_bytes(raw)?.parse()?;
    let report = ControlReport::new(&invoice);
    let xml = pohoda::to_pohoda_xml(&invoice)?;
    Ok(Conversion {
        invoice,
        report,
        xml,
    })
}
