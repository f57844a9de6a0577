use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice dates as printed in the export (`DD.MM.YYYY`).
///
/// Kept textual until export time; a value that does not parse as a date
/// passes through to the XML unchanged instead of failing the conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDates {
    /// Dátum vyhotovenia.
    pub issue: String,
    /// Dátum dodania — also the tax and accounting date in the export.
    pub supply: String,
    /// Dátum splatnosti.
    pub due: String,
}

/// Postal address of a supplier or client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyAddress {
    pub street_and_number: String,
    pub city: String,
    /// Normalised to `DDD DD`.
    pub zip: String,
    pub country: String,
}

/// One party of the invoice (supplier or client).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub address: CompanyAddress,
    /// Secondary premises ("Prevádzka") free text, if printed.
    pub shop_address: Option<String>,
    /// IČO — company registration number.
    pub company_id: String,
    /// DIČ — tax identification number.
    pub tax_id: Option<String>,
    /// IČ DPH — VAT identification number.
    pub vat_id: Option<String>,
    /// Free-text commercial-register note.
    pub register: String,
}

/// Payment block of the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInformation {
    /// Free-text payment type ("Prevodným príkazom", "V hotovosti", ...);
    /// classified by keyword only at export time.
    pub method: Option<String>,
    pub account: String,
    pub bank: String,
    pub iban: String,
    pub swift: String,
    /// Variabilný symbol — the payment reference number.
    pub variable_symbol: String,
}

/// One row of the invoice item table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Combined-nomenclature commodity code; its first four characters form
    /// the control-report grouping key.
    pub code: String,
    pub name: String,
    pub quantity: Decimal,
    /// Unit as printed (`ks`, `bm`, `kg`, ...).
    pub unit: String,
    pub unit_price: Decimal,
    /// VAT rate in percent; 0, 10 and 20 are the recognised values.
    pub vat: Decimal,
    pub total_no_vat: Decimal,
    pub total: Decimal,
}

/// A single issued invoice reconstructed from a KROS export.
///
/// Built top-to-bottom by one parser pass and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    /// Objednávka — order reference.
    pub order: Option<String>,
    /// Dodací list — delivery note reference.
    pub delivery_note: Option<String>,
    /// Spôsob dopravy free text.
    pub transfer_type: Option<String>,
    pub supplier: Company,
    pub client: Company,
    pub dates: InvoiceDates,
    /// Line items in document order.
    pub items: Vec<InvoiceItem>,
    pub payment: PaymentInformation,
    /// Who received the goods ("Tovar prevzal").
    pub delivery_to: String,
    /// Reverse-charge note printed under the item table.
    pub carrying_tax: String,
    /// Who issued the document ("Vyhotovil").
    pub issued_by: String,
}
