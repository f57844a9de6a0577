use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort a conversion.
///
/// Every variant is fatal to the current conversion; nothing is retried and
/// no partial invoice survives a failure. Display strings double as the
/// user-facing failure messages and are therefore in Slovak — the web layer
/// in front of this crate shows them verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// None of the candidate encodings decoded the input.
    #[error("Nesprávne kódovanie, musí byť UTF-8 alebo Windows 1250")]
    Encoding,

    /// The field delimiter could not be inferred from the sampled prefix,
    /// or a row later failed to parse under the inferred dialect.
    #[error("Súbor nie je v korektnom formáte CSV")]
    Dialect,

    /// A row carries fewer fields than the fixed layout requires.
    #[error("Nesprávny počet stĺpcov, očakáva sa {expected} alebo viac")]
    ColumnCount { expected: usize },

    /// A required labelled section was missing or an unrelated row blocked
    /// the search for it.
    #[error("V CSV súbore nebola nájdená sekcia \"{section}\" na očakávanom mieste")]
    SectionNotFound { section: String },

    /// The row stream ended while a section was still being sought.
    #[error("CSV súbor skončil pred očakávanou sekciou \"{section}\"")]
    UnexpectedEof { section: String },

    /// A combined zip/city cell did not match the `DDD DD Mesto` shape.
    #[error("Nepodarilo sa rozpoznať PSČ a mesto \"{value}\"")]
    ZipCity { value: String },

    /// A numeric cell could not be parsed as a locale decimal.
    #[error("Nepodarilo sa prečítať číslo \"{value}\"")]
    Numeric { value: String },

    /// A line item carries a VAT rate outside the recognised set 0/10/20.
    #[error("Neznáma sadzba DPH {rate} v položke {item}")]
    UnknownVatRate { rate: Decimal, item: String },

    /// The XML writer failed; carries the underlying reason.
    #[error("Chyba pri zápise XML: {0}")]
    Xml(String),
}
