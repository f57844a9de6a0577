//! Sequential parser reconstructing an [`Invoice`] from the row stream.
//!
//! The export is a print layout, not a table: labelled sections appear in a
//! fixed order with page-break boilerplate in between. The parser walks them
//! with the cursor, section by section, and never looks back.

use std::str::FromStr;

use csv::StringRecord;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use super::cursor::{BLANK, RowCursor, cell};
use super::decode;
use super::layout;
use crate::core::{ConvertError, Invoice, InvoiceItem};

type Records = csv::StringRecordsIntoIter<std::io::Cursor<Vec<u8>>>;

/// One-pass parser over a raw KROS export.
///
/// ```no_run
/// use prevodnik::kros::KrosParser;
///
/// let raw = std::fs::read("faktura.csv").unwrap();
/// let invoice = KrosParser::from_bytes(&raw).unwrap().parse().unwrap();
/// ```
pub struct KrosParser {
    cursor: RowCursor<Records>,
}

impl KrosParser {
    /// Decode the raw export, sniff its delimiter and position a cursor at
    /// the first row.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ConvertError> {
        let text = decode::decode(raw)?;
        let delimiter = decode::sniff_delimiter(&text)?;
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(std::io::Cursor::new(text.into_bytes()));
        Ok(Self {
            cursor: RowCursor::new(reader.into_records()),
        })
    }

    /// Run the full parse. Consumes the parser; the cursor only moves
    /// forward and cannot be rewound for a second pass.
    pub fn parse(mut self) -> Result<Invoice, ConvertError> {
        let mut invoice = Invoice {
            number: self.read_invoice_number()?,
            ..Invoice::default()
        };
        self.read_supplier(&mut invoice)?;
        self.read_client_and_payment(&mut invoice)?;
        invoice.items = self.read_items()?;
        self.read_trailer(&mut invoice)?;
        Ok(invoice)
    }

    fn read_invoice_number(&mut self) -> Result<String, ConvertError> {
        let row = self
            .cursor
            .seek_expecting(&layout::SUPPLIER, &["", layout::PAGE_BREAK])?;
        Ok(cell(&row, layout::INVOICE_NUMBER_COLUMN).to_owned())
    }

    fn read_supplier(&mut self, invoice: &mut Invoice) -> Result<(), ConvertError> {
        let row = self.cursor.seek(
            "názov dodávateľa",
            layout::SUPPLIER_COLUMN,
            &["", layout::PAGE_BREAK],
        )?;
        invoice.supplier.name = cell(&row, layout::SUPPLIER_COLUMN).to_owned();

        let row = self.cursor.next_row("objednávka")?;
        invoice.order = blank_to_none(cell(&row, layout::SUPPLIER_META_COLUMN));

        let row = self.cursor.next_row("ulica dodávateľa")?;
        invoice.supplier.address.street_and_number = cell(&row, layout::SUPPLIER_COLUMN).to_owned();

        let row = self.cursor.next_row("dodací list")?;
        invoice.delivery_note = blank_to_none(cell(&row, layout::SUPPLIER_META_COLUMN));

        let row = self.cursor.next_row("PSČ a mesto dodávateľa")?;
        let (zip, city) = split_zip_city(cell(&row, layout::SUPPLIER_COLUMN))?;
        invoice.supplier.address.zip = zip;
        invoice.supplier.address.city = city;

        let row = self.cursor.next_row("spôsob dopravy")?;
        invoice.transfer_type = blank_to_none(cell(&row, layout::SUPPLIER_META_COLUMN).trim());

        let row = self.cursor.next_row("krajina dodávateľa")?;
        invoice.supplier.address.country = cell(&row, layout::SUPPLIER_COLUMN).to_owned();

        let row = self.cursor.next_row("forma úhrady")?;
        invoice.payment.method = blank_to_none(cell(&row, layout::SUPPLIER_META_COLUMN).trim());

        let row = self.cursor.seek_expecting(&layout::SUPPLIER_IDS, BLANK)?;
        invoice.supplier.company_id = cell(&row, layout::SUPPLIER_IDS_COLUMN).to_owned();

        let row = self.cursor.next_row("DIČ dodávateľa")?;
        invoice.supplier.tax_id = blank_to_none(cell(&row, layout::SUPPLIER_IDS_COLUMN));

        let row = self.cursor.next_row("IČ DPH dodávateľa")?;
        invoice.supplier.vat_id = blank_to_none(cell(&row, layout::SUPPLIER_IDS_COLUMN));

        let row = self
            .cursor
            .seek("poznámka o zápise", layout::SUPPLIER_COLUMN, BLANK)?;
        invoice.supplier.register = cell(&row, layout::SUPPLIER_COLUMN).to_owned();
        Ok(())
    }

    fn read_client_and_payment(&mut self, invoice: &mut Invoice) -> Result<(), ConvertError> {
        let row = self.cursor.seek_expecting(&layout::ISSUE_DATE, BLANK)?;
        invoice.dates.issue = cell(&row, layout::DATE_COLUMN).to_owned();
        if invoice.dates.issue.is_empty() {
            return Err(ConvertError::SectionNotFound {
                section: layout::ISSUE_DATE.label.into(),
            });
        }

        let row = self
            .cursor
            .seek("dátum dodania", layout::ISSUE_DATE.column, BLANK)?;
        invoice.dates.supply = cell(&row, layout::DATE_COLUMN).to_owned();

        let row = self.cursor.seek("názov klienta", layout::CLIENT_COLUMN, BLANK)?;
        invoice.client.name = cell(&row, layout::CLIENT_COLUMN).to_owned();

        let row = self
            .cursor
            .seek("dátum splatnosti", layout::ISSUE_DATE.column, BLANK)?;
        invoice.dates.due = cell(&row, layout::DATE_COLUMN).to_owned();

        // The client street row doubles as the row carrying the client IČO.
        let row = self.cursor.seek("adresa klienta", layout::CLIENT_COLUMN, BLANK)?;
        invoice.client.address.street_and_number = cell(&row, layout::CLIENT_COLUMN).to_owned();
        if !cell(&row, layout::CLIENT_IDS_LABEL_COLUMN).contains(layout::CLIENT_IDS_LABEL) {
            return Err(ConvertError::SectionNotFound {
                section: layout::CLIENT_IDS_LABEL.into(),
            });
        }
        invoice.client.company_id = cell(&row, layout::CLIENT_IDS_COLUMN).to_owned();

        let row = self.cursor.seek("adresa klienta", layout::CLIENT_COLUMN, BLANK)?;
        let (zip, city) = split_zip_city(cell(&row, layout::CLIENT_COLUMN))?;
        invoice.client.address.zip = zip;
        invoice.client.address.city = city;
        invoice.client.tax_id = blank_to_none(cell(&row, layout::CLIENT_IDS_COLUMN));

        let row = self.cursor.seek_expecting(&layout::ACCOUNT, BLANK)?;
        invoice.payment.account = cell(&row, layout::ACCOUNT_COLUMN).to_owned();
        if !cell(&row, layout::VARIABLE_SYMBOL_LABEL_COLUMN).contains(layout::VARIABLE_SYMBOL_LABEL)
        {
            return Err(ConvertError::SectionNotFound {
                section: layout::VARIABLE_SYMBOL_LABEL.into(),
            });
        }
        invoice.payment.variable_symbol = cell(&row, layout::VARIABLE_SYMBOL_COLUMN).to_owned();

        let row = self.cursor.seek("adresa klienta", layout::CLIENT_COLUMN, BLANK)?;
        invoice.client.address.country = cell(&row, layout::CLIENT_COLUMN).to_owned();
        invoice.client.vat_id = blank_to_none(cell(&row, layout::CLIENT_IDS_COLUMN));

        let row = self.cursor.seek("banka", layout::ACCOUNT.column, BLANK)?;
        invoice.payment.bank = cell(&row, layout::ACCOUNT_COLUMN).to_owned();

        let row = self.cursor.seek(
            layout::SHOP_ADDRESS.label,
            layout::SHOP_ADDRESS.column,
            BLANK,
        )?;
        invoice.client.shop_address = blank_to_none(cell(&row, layout::SHOP_ADDRESS_COLUMN));

        let row = self.cursor.seek("IBAN", layout::ACCOUNT.column, BLANK)?;
        invoice.payment.iban = cell(&row, layout::ACCOUNT_COLUMN).to_owned();

        let row = self.cursor.seek("SWIFT", layout::ACCOUNT.column, BLANK)?;
        invoice.payment.swift = cell(&row, layout::ACCOUNT_COLUMN).to_owned();
        Ok(())
    }

    fn read_items(&mut self) -> Result<Vec<InvoiceItem>, ConvertError> {
        self.cursor.seek_expecting(&layout::ITEMS, BLANK)?;
        let code_column = self.locate_code_column()?;
        ItemRows {
            cursor: &mut self.cursor,
            code_column,
            done: false,
        }
        .collect()
    }

    /// Find which of the candidate columns carries the commodity code by
    /// scanning for the column-header marker.
    fn locate_code_column(&mut self) -> Result<usize, ConvertError> {
        while let Some(row) = self.cursor.next_raw() {
            let row = row?;
            for column in layout::ITEM_CODE_COLUMNS {
                if cell(&row, column).contains(layout::ITEM_CODE_MARKER) {
                    return Ok(column);
                }
            }
        }
        Err(ConvertError::SectionNotFound {
            section: "tabuľka položiek".into(),
        })
    }

    fn read_trailer(&mut self, invoice: &mut Invoice) -> Result<(), ConvertError> {
        let row = self.cursor.seek_expecting(&layout::CARRYING_TAX, BLANK)?;
        invoice.carrying_tax = cell(&row, layout::CARRYING_TAX.column).to_owned();

        let row = self.cursor.seek_expecting(&layout::DELIVERY_TO, BLANK)?;
        invoice.delivery_to = strip_label(
            cell(&row, layout::DELIVERY_TO.column),
            layout::DELIVERY_TO.label,
        );

        let row = self.cursor.seek_expecting(&layout::ISSUED_BY, BLANK)?;
        invoice.issued_by = strip_label(
            cell(&row, layout::ISSUED_BY.column),
            layout::ISSUED_BY.label,
        );
        Ok(())
    }
}

/// Lazy item-row stream, drained exactly once by the parser.
///
/// Ends at the first row with a blank unit cell; that row is consumed and
/// not yielded. End of input also ends the stream — the trailer seek then
/// reports the missing section.
struct ItemRows<'a> {
    cursor: &'a mut RowCursor<Records>,
    code_column: usize,
    done: bool,
}

impl Iterator for ItemRows<'_> {
    type Item = Result<InvoiceItem, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let row = match self.cursor.next_raw()? {
            Ok(row) => row,
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };
        if cell(&row, layout::ITEM_UNIT_COLUMN).is_empty() {
            self.done = true;
            return None;
        }
        Some(self.item_from(&row))
    }
}

impl ItemRows<'_> {
    fn item_from(&self, row: &StringRecord) -> Result<InvoiceItem, ConvertError> {
        Ok(InvoiceItem {
            code: cell(row, self.code_column).to_owned(),
            name: cell(row, layout::ITEM_NAME_COLUMN).to_owned(),
            quantity: parse_locale_decimal(cell(row, layout::ITEM_QUANTITY_COLUMN))?,
            unit: cell(row, layout::ITEM_UNIT_COLUMN).to_owned(),
            unit_price: parse_locale_decimal(cell(row, layout::ITEM_UNIT_PRICE_COLUMN))?,
            vat: parse_locale_decimal(cell(row, layout::ITEM_VAT_COLUMN))?,
            total_no_vat: parse_locale_decimal(cell(row, layout::ITEM_TOTAL_NO_VAT_COLUMN))?,
            total: parse_locale_decimal(cell(row, layout::ITEM_TOTAL_COLUMN))?,
        })
    }
}

lazy_static! {
    /// `DDD DD Mesto` or `DDDDD Mesto`.
    static ref ZIP_CITY: Regex = Regex::new(r"^(\d\d\d ?\d\d) +(.+)$").unwrap();
}

/// Split a combined zip/city cell; the zip comes back normalised to
/// `DDD DD`.
pub(crate) fn split_zip_city(value: &str) -> Result<(String, String), ConvertError> {
    let captures = ZIP_CITY
        .captures(value)
        .ok_or_else(|| ConvertError::ZipCity {
            value: value.to_owned(),
        })?;
    let mut zip = captures[1].to_owned();
    if zip.len() == 5 {
        zip.insert(3, ' ');
    }
    Ok((zip, captures[2].to_owned()))
}

/// Parse a locale-formatted decimal: all whitespace (including the
/// non-breaking thousands separators KROS emits) is stripped and the comma
/// is the decimal mark.
pub(crate) fn parse_locale_decimal(value: &str) -> Result<Decimal, ConvertError> {
    let normalised: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&normalised).map_err(|_| ConvertError::Numeric {
        value: value.to_owned(),
    })
}

fn blank_to_none(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

fn strip_label(value: &str, label: &str) -> String {
    value.strip_prefix(label).unwrap_or(value).trim().to_owned()
}
