//! Column offsets and section markers of the KROS invoice export.
//!
//! Every constant here is empirically fixed by the source print layout;
//! moving one silently corrupts the converted document, so they all live in
//! this one table.

/// Minimum number of fields any row of a well-formed export carries.
pub(crate) const MIN_COLUMNS: usize = 32;

/// Page-break boilerplate repeated at the top of every printed page.
pub(crate) const PAGE_BREAK: &str = "Strana:";

/// A labelled row the parser must find: marker text plus the column it
/// appears in.
pub(crate) struct Anchor {
    pub label: &'static str,
    pub column: usize,
}

pub(crate) const SUPPLIER: Anchor = Anchor {
    label: "DODÁVATEĽ:",
    column: 0,
};
/// Invoice number cell on the supplier marker row.
pub(crate) const INVOICE_NUMBER_COLUMN: usize = 24;

/// Left-hand column of the supplier block (name, street, zip/city, country,
/// register note).
pub(crate) const SUPPLIER_COLUMN: usize = 0;
/// Right-hand metadata column of the supplier block (order, delivery note,
/// transfer type, payment type).
pub(crate) const SUPPLIER_META_COLUMN: usize = 22;

pub(crate) const SUPPLIER_IDS: Anchor = Anchor {
    label: "IČO",
    column: 0,
};
/// IČO / DIČ / IČ DPH value cells in the supplier identifier rows.
pub(crate) const SUPPLIER_IDS_COLUMN: usize = 4;

pub(crate) const ISSUE_DATE: Anchor = Anchor {
    label: "Dátum vyhotovenia",
    column: 0,
};
/// Date value cell in the date rows.
pub(crate) const DATE_COLUMN: usize = 9;

/// Client block column (name, street, zip/city, country).
pub(crate) const CLIENT_COLUMN: usize = 14;
pub(crate) const CLIENT_IDS_LABEL: &str = "IČO";
pub(crate) const CLIENT_IDS_LABEL_COLUMN: usize = 26;
pub(crate) const CLIENT_IDS_COLUMN: usize = 29;

pub(crate) const ACCOUNT: Anchor = Anchor {
    label: "Číslo účtu:",
    column: 0,
};
/// Account / bank / IBAN / SWIFT value cells.
pub(crate) const ACCOUNT_COLUMN: usize = 5;
pub(crate) const VARIABLE_SYMBOL_LABEL: &str = "VS:";
pub(crate) const VARIABLE_SYMBOL_LABEL_COLUMN: usize = 10;
pub(crate) const VARIABLE_SYMBOL_COLUMN: usize = 11;

pub(crate) const SHOP_ADDRESS: Anchor = Anchor {
    label: "Prevádzka",
    column: 14,
};
pub(crate) const SHOP_ADDRESS_COLUMN: usize = 19;

pub(crate) const ITEMS: Anchor = Anchor {
    label: "Faktúrujeme Vám:",
    column: 0,
};
/// Marker of the combined-nomenclature code column inside the item table.
pub(crate) const ITEM_CODE_MARKER: &str = "kombinovanej";
/// The code column varies between export versions; both observed positions
/// are tried and the first containing the marker wins.
pub(crate) const ITEM_CODE_COLUMNS: [usize; 2] = [2, 3];
pub(crate) const ITEM_NAME_COLUMN: usize = 7;
pub(crate) const ITEM_QUANTITY_COLUMN: usize = 17;
pub(crate) const ITEM_UNIT_COLUMN: usize = 20;
pub(crate) const ITEM_UNIT_PRICE_COLUMN: usize = 23;
pub(crate) const ITEM_VAT_COLUMN: usize = 24;
pub(crate) const ITEM_TOTAL_NO_VAT_COLUMN: usize = 28;
pub(crate) const ITEM_TOTAL_COLUMN: usize = 31;

pub(crate) const CARRYING_TAX: Anchor = Anchor {
    label: "Prenesenie",
    column: 2,
};
pub(crate) const DELIVERY_TO: Anchor = Anchor {
    label: "Tovar prevzal :",
    column: 0,
};
pub(crate) const ISSUED_BY: Anchor = Anchor {
    label: "Vyhotovil:",
    column: 0,
};
