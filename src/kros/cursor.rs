//! Forward-only cursor over the parsed row stream.
//!
//! Position only ever moves forward; callers drive it through the required
//! sections in the order the print layout fixes.

use csv::StringRecord;

use super::layout::{Anchor, MIN_COLUMNS};
use crate::core::ConvertError;

/// Cell values treated as "nothing here" while seeking a section.
pub(crate) const BLANK: &[&str] = &[""];

pub(crate) struct RowCursor<I> {
    rows: I,
}

impl<I> RowCursor<I>
where
    I: Iterator<Item = Result<StringRecord, csv::Error>>,
{
    pub(crate) fn new(rows: I) -> Self {
        Self { rows }
    }

    /// Next row with the column-count check applied; `None` at end of input.
    pub(crate) fn next_raw(&mut self) -> Option<Result<StringRecord, ConvertError>> {
        let record = match self.rows.next()? {
            Ok(record) => record,
            Err(_) => return Some(Err(ConvertError::Dialect)),
        };
        if record.len() < MIN_COLUMNS {
            return Some(Err(ConvertError::ColumnCount {
                expected: MIN_COLUMNS,
            }));
        }
        Some(Ok(record))
    }

    /// Next row, with end of input reported as an error naming the section
    /// being sought.
    pub(crate) fn next_row(&mut self, section: &str) -> Result<StringRecord, ConvertError> {
        self.next_raw().unwrap_or_else(|| {
            Err(ConvertError::UnexpectedEof {
                section: section.into(),
            })
        })
    }

    /// Advance past rows whose cell at `column` is among `skip` and return
    /// the first remaining row, whatever it contains. `label` only names the
    /// section in the end-of-input error.
    pub(crate) fn seek(
        &mut self,
        label: &str,
        column: usize,
        skip: &[&str],
    ) -> Result<StringRecord, ConvertError> {
        loop {
            let record = self.next_row(label)?;
            if skip.contains(&cell(&record, column)) {
                continue;
            }
            return Ok(record);
        }
    }

    /// Like [`Self::seek`], but the first non-skipped row must carry the
    /// anchor label at the anchor column.
    pub(crate) fn seek_expecting(
        &mut self,
        anchor: &Anchor,
        skip: &[&str],
    ) -> Result<StringRecord, ConvertError> {
        let record = self.seek(anchor.label, anchor.column, skip)?;
        if !cell(&record, anchor.column).starts_with(anchor.label) {
            return Err(ConvertError::SectionNotFound {
                section: anchor.label.into(),
            });
        }
        Ok(record)
    }
}

/// Cell accessor; the column-count check guarantees every index the layout
/// uses is present.
pub(crate) fn cell<'r>(record: &'r StringRecord, column: usize) -> &'r str {
    record.get(column).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str) -> RowCursor<csv::StringRecordsIntoIter<std::io::Cursor<Vec<u8>>>> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(std::io::Cursor::new(text.as_bytes().to_vec()));
        RowCursor::new(reader.into_records())
    }

    fn wide_row(first: &str) -> String {
        format!("{first}{}", ";".repeat(MIN_COLUMNS - 1))
    }

    #[test]
    fn short_row_is_rejected() {
        let mut cursor = cursor("a;b;c\n");
        assert_eq!(
            cursor.next_row("test").unwrap_err(),
            ConvertError::ColumnCount {
                expected: MIN_COLUMNS
            }
        );
    }

    #[test]
    fn end_of_input_names_the_section() {
        let mut cursor = cursor("");
        assert_eq!(
            cursor.next_row("Vyhotovil:").unwrap_err(),
            ConvertError::UnexpectedEof {
                section: "Vyhotovil:".into()
            }
        );
    }

    #[test]
    fn seek_skips_blank_and_boilerplate_rows() {
        let text = format!(
            "{}\n{}\n{}\n",
            wide_row(""),
            wide_row("Strana:"),
            wide_row("DODÁVATEĽ:")
        );
        let mut cursor = cursor(&text);
        let row = cursor
            .seek_expecting(&super::super::layout::SUPPLIER, &["", "Strana:"])
            .unwrap();
        assert_eq!(cell(&row, 0), "DODÁVATEĽ:");
    }

    #[test]
    fn seek_expecting_rejects_unrelated_row() {
        let text = format!("{}\n", wide_row("niečo iné"));
        let mut cursor = cursor(&text);
        let err = cursor
            .seek_expecting(&super::super::layout::SUPPLIER, BLANK)
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::SectionNotFound {
                section: "DODÁVATEĽ:".into()
            }
        );
    }
}
