//! Renders a parsed invoice as a Pohoda `dat:dataPack` document.
//!
//! The element-by-element mapping is fixed by the importing installation;
//! decimals are written in their exact textual form with whatever scale the
//! source document carried.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::pohoda_ns;
use super::xml_utils::XmlWriter;
use crate::core::{Company, ConvertError, Invoice, InvoiceItem, PaymentInformation};

/// Accounting pre-set for issued invoices (účet/protiúčet).
const ACCOUNTING_IDS: &str = "311/604";
/// Document-level VAT classification: issued reverse-charge supply.
const VAT_CLASSIFICATION: &str = "UDpdp";
/// Control-report section for reverse-charge goods.
const KVDPH_REVERSE_CHARGE: &str = "A2CN";
/// Item-level classification for ordinary taxed lines.
const VAT_STANDARD: &str = "UD";
const KVDPH_STANDARD: &str = "A1";
/// Constant symbol stamped on invoice payments.
const CONSTANT_SYMBOL: &str = "0308";
/// Account suffix KROS prints for accounts held at Fio banka.
const FIO_SUFFIX: &str = " / 8330";

/// Envelope metadata of the generated data-pack.
///
/// The defaults reproduce the identifiers the target installation was set up
/// with; override them only when importing under a different user profile.
#[derive(Debug, Clone)]
pub struct PohodaConfig {
    pub application: String,
    pub note: String,
    pub user_id: String,
    pub export_key: String,
    pub program_version: String,
}

impl Default for PohodaConfig {
    fn default() -> Self {
        Self {
            application: "Transformace".into(),
            note: "Užívateľský export".into(),
            user_id: "Usr01".into(),
            export_key: "66d62ac0-293d-42ee-b61a-d9347c5f7567".into(),
            program_version: "12108.3 (3.5.2019)".into(),
        }
    }
}

/// Export with the default envelope metadata.
pub fn to_pohoda_xml(invoice: &Invoice) -> Result<String, ConvertError> {
    to_pohoda_xml_with(invoice, &PohodaConfig::default())
}

pub fn to_pohoda_xml_with(
    invoice: &Invoice,
    config: &PohodaConfig,
) -> Result<String, ConvertError> {
    let mut w = XmlWriter::new()?;
    w.start_with_attrs(
        "dat:dataPack",
        &[
            ("xmlns:dat", pohoda_ns::DATA),
            ("version", "2.0"),
            ("id", &config.user_id),
            ("ico", &invoice.supplier.company_id),
            ("key", &config.export_key),
            ("programVersion", &config.program_version),
            ("application", &config.application),
            ("note", &config.note),
        ],
    )?;
    let item_id = format!("{} (001)", config.user_id);
    w.start_with_attrs("dat:dataPackItem", &[("version", "2.0"), ("id", &item_id)])?;
    write_invoice(&mut w, invoice)?;
    w.end("dat:dataPackItem")?;
    w.end("dat:dataPack")?;
    w.into_string()
}

fn write_invoice(w: &mut XmlWriter, invoice: &Invoice) -> Result<(), ConvertError> {
    w.start_with_attrs(
        "inv:invoice",
        &[
            ("xmlns:inv", pohoda_ns::INVOICE),
            ("xmlns:typ", pohoda_ns::TYPE),
            ("version", "2.0"),
        ],
    )?;
    write_header(w, invoice)?;
    w.start("inv:invoiceDetail")?;
    for item in &invoice.items {
        write_item(w, item)?;
    }
    w.end("inv:invoiceDetail")?;
    write_summary(w, &invoice.items)?;
    w.end("inv:invoice")?;
    Ok(())
}

fn write_header(w: &mut XmlWriter, invoice: &Invoice) -> Result<(), ConvertError> {
    w.start("inv:invoiceHeader")?;
    w.leaf("inv:invoiceType", "issuedInvoice")?;
    w.start("inv:number")?;
    w.leaf("typ:numberRequested", &invoice.number)?;
    w.end("inv:number")?;
    w.leaf("inv:symVar", &invoice.payment.variable_symbol)?;
    w.leaf("inv:date", &iso_date(&invoice.dates.issue))?;
    w.leaf("inv:dateTax", &iso_date(&invoice.dates.supply))?;
    w.leaf("inv:dateAccounting", &iso_date(&invoice.dates.supply))?;
    w.leaf("inv:dateDue", &iso_date(&invoice.dates.due))?;
    w.start("inv:accounting")?;
    w.leaf("typ:ids", ACCOUNTING_IDS)?;
    w.end("inv:accounting")?;
    w.start("inv:classificationVAT")?;
    w.leaf("typ:ids", VAT_CLASSIFICATION)?;
    w.end("inv:classificationVAT")?;
    w.start("inv:classificationKVDPH")?;
    w.leaf("typ:ids", KVDPH_REVERSE_CHARGE)?;
    w.end("inv:classificationKVDPH")?;
    w.leaf("inv:text", "Faktúrujeme Vám:")?;

    w.start("inv:partnerIdentity")?;
    write_address(w, &invoice.client)?;
    w.start("typ:shipToAddress")?;
    w.empty("typ:company")?;
    w.empty("typ:city")?;
    w.empty("typ:street")?;
    w.end("typ:shipToAddress")?;
    w.end("inv:partnerIdentity")?;

    w.start("inv:myIdentity")?;
    write_address(w, &invoice.supplier)?;
    w.end("inv:myIdentity")?;

    write_payment_method(w, &invoice.payment)?;
    write_bank_account(w, &invoice.payment)?;
    w.leaf("inv:symConst", CONSTANT_SYMBOL)?;

    let liquidation: Decimal = invoice.items.iter().map(|item| item.total).sum();
    w.start("inv:liquidation")?;
    w.leaf("typ:amountHome", &liquidation.to_string())?;
    w.end("inv:liquidation")?;
    w.leaf("inv:markRecord", "true")?;
    w.end("inv:invoiceHeader")?;
    Ok(())
}

/// `DD.MM.YYYY` → ISO-8601; anything else passes through untouched.
fn iso_date(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%d.%m.%Y") {
        Ok(date) => date.to_string(),
        Err(_) => value.to_owned(),
    }
}

fn write_address(w: &mut XmlWriter, company: &Company) -> Result<(), ConvertError> {
    w.start("typ:address")?;
    w.leaf("typ:company", &company.name)?;
    w.leaf("typ:city", &company.address.city)?;
    w.leaf("typ:street", &company.address.street_and_number)?;
    w.leaf("typ:zip", &company.address.zip)?;
    w.leaf("typ:ico", &company.company_id)?;
    w.leaf("typ:dic", company.tax_id.as_deref().unwrap_or(""))?;
    w.leaf("typ:icDph", company.vat_id.as_deref().unwrap_or(""))?;
    w.end("typ:address")?;
    Ok(())
}

/// Classify the free-text payment type by keyword; unrecognised text passes
/// through as both the label and the code.
fn write_payment_method(
    w: &mut XmlWriter,
    payment: &PaymentInformation,
) -> Result<(), ConvertError> {
    let method = payment.method.as_deref().unwrap_or("");
    let lowered = method.to_lowercase();
    let (ids, kind) = if lowered.contains("príkaz") {
        ("Príkazom", "draft")
    } else if lowered.contains("hotovos") {
        ("V hotovosti", "cash")
    } else if lowered.contains("plat.kartou") {
        ("V hotovosti", "creditcard")
    } else {
        (method, method)
    };
    w.start("inv:paymentType")?;
    w.leaf("typ:ids", ids)?;
    w.leaf("typ:paymentType", kind)?;
    w.end("inv:paymentType")?;
    Ok(())
}

/// Fio accounts come out of KROS with a ` / 8330` routing suffix; Pohoda
/// wants the bare number and the bank label instead.
fn write_bank_account(
    w: &mut XmlWriter,
    payment: &PaymentInformation,
) -> Result<(), ConvertError> {
    let (bank, account) = match payment.account.strip_suffix(FIO_SUFFIX) {
        Some(account) => ("FIO", account),
        None => (payment.bank.as_str(), payment.account.as_str()),
    };
    w.start("inv:account")?;
    w.leaf("typ:ids", bank)?;
    w.leaf("typ:accountNo", account)?;
    w.end("inv:account")?;
    Ok(())
}

fn write_item(w: &mut XmlWriter, item: &InvoiceItem) -> Result<(), ConvertError> {
    let rate = if item.vat.is_zero() {
        "none"
    } else if item.vat == dec!(10) {
        "low"
    } else if item.vat == dec!(20) {
        "high"
    } else {
        return Err(ConvertError::UnknownVatRate {
            rate: item.vat,
            item: item.name.clone(),
        });
    };
    // "bm" is KROS shorthand for linear metres; Pohoda only knows "m".
    let unit = if item.unit == "bm" { "m" } else { item.unit.as_str() };

    w.start("inv:invoiceItem")?;
    w.leaf("inv:text", &item.name)?;
    w.leaf("inv:quantity", &item.quantity.to_string())?;
    w.leaf("inv:unit", unit)?;
    w.leaf("inv:coefficient", "1.0")?;
    w.leaf("inv:payVAT", "false")?;
    w.leaf("inv:rateVAT", rate)?;
    w.leaf("inv:discountPercentage", "0.0")?;
    w.start("inv:homeCurrency")?;
    w.leaf("typ:unitPrice", &item.unit_price.to_string())?;
    w.leaf("typ:price", &item.total_no_vat.to_string())?;
    w.leaf("typ:priceVAT", &(item.total - item.total_no_vat).to_string())?;
    w.leaf("typ:priceSum", &item.total.to_string())?;
    w.end("inv:homeCurrency")?;
    w.start("inv:foreignCurrency")?;
    w.leaf("typ:unitPrice", "0")?;
    w.leaf("typ:price", "0")?;
    w.leaf("typ:priceVAT", "0")?;
    w.leaf("typ:priceSum", "0")?;
    w.end("inv:foreignCurrency")?;
    w.leaf("inv:code", &item.code)?;
    if rate == "none" {
        w.start("inv:classificationKVDPH")?;
        w.leaf("typ:ids", KVDPH_REVERSE_CHARGE)?;
        w.end("inv:classificationKVDPH")?;
        w.leaf("inv:PDP", "true")?;
        let prefix: String = item.code.chars().take(4).collect();
        w.leaf("inv:CodePDP", &prefix)?;
    } else {
        w.start("inv:classificationVAT")?;
        w.leaf("typ:ids", VAT_STANDARD)?;
        w.end("inv:classificationVAT")?;
        w.start("inv:classificationKVDPH")?;
        w.leaf("typ:ids", KVDPH_STANDARD)?;
        w.end("inv:classificationKVDPH")?;
        w.leaf("inv:PDP", "false")?;
    }
    w.end("inv:invoiceItem")?;
    Ok(())
}

/// Pre-VAT and gross sums of the items taxed at `rate`.
fn vat_bucket(items: &[InvoiceItem], rate: Decimal) -> (Decimal, Decimal) {
    items.iter().filter(|item| item.vat == rate).fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(net, gross), item| (net + item.total_no_vat, gross + item.total),
    )
}

fn write_summary(w: &mut XmlWriter, items: &[InvoiceItem]) -> Result<(), ConvertError> {
    let none_total: Decimal = items
        .iter()
        .filter(|item| item.vat.is_zero())
        .map(|item| item.total)
        .sum();
    let (low_net, low_gross) = vat_bucket(items, dec!(10));
    let (high_net, high_gross) = vat_bucket(items, dec!(20));

    w.start("inv:invoiceSummary")?;
    w.leaf("inv:roundingDocument", "none")?;
    w.leaf("inv:roundingVAT", "noneEveryRate")?;
    w.start("inv:homeCurrency")?;
    w.leaf("typ:priceNone", &none_total.to_string())?;
    w.leaf("typ:priceLow", &low_net.to_string())?;
    w.leaf("typ:priceLowVAT", &(low_gross - low_net).to_string())?;
    w.leaf("typ:priceLowSum", &low_gross.to_string())?;
    w.leaf("typ:priceHigh", &high_net.to_string())?;
    w.leaf("typ:priceHighVAT", &(high_gross - high_net).to_string())?;
    w.leaf("typ:priceHighSum", &high_gross.to_string())?;
    // The schema wants three buckets; only two rates are in active use.
    w.leaf("typ:price3", "0")?;
    w.leaf("typ:price3VAT", "0")?;
    w.leaf("typ:price3Sum", "0")?;
    w.start("typ:round")?;
    w.leaf("typ:priceRound", "0")?;
    w.end("typ:round")?;
    w.end("inv:homeCurrency")?;
    w.end("inv:invoiceSummary")?;
    Ok(())
}
