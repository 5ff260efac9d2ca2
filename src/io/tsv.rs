//! Reading headered variant tables, which wraps the [`csv`] crate's
//! deserialization of a record into an [`indexmap::IndexMap`].

use csv::{ErrorKind, Reader, ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::PathBuf;

use crate::{
    error::LollipopError,
    io::file::InputFile,
    variants::{RawRow, RawTable},
};

/// Build a TSV reader over a plaintext or gzip-compressed file. The first
/// line is the header. Rows may be ragged; [`VariantTableReader`] counts
/// those as malformed rather than failing.
pub fn build_tsv_reader(
    filepath: impl Into<PathBuf>,
) -> Result<Reader<Box<dyn Read>>, LollipopError> {
    let stream: Box<dyn Read> = Box::new(InputFile::new(filepath).reader()?);
    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(stream);
    Ok(reader)
}

/// An iterator over the rows of a variant table. Each item is `Ok(Some(row))`
/// for a row with as many cells as the header, `Ok(None)` for a ragged row or
/// one with non-UTF-8 cells, and `Err` for an I/O failure.
pub struct VariantTableReader {
    header: StringRecord,
    inner: Reader<Box<dyn Read>>,
    record: StringRecord,
}

impl std::fmt::Debug for VariantTableReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantTableReader")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl VariantTableReader {
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, LollipopError> {
        let mut inner = build_tsv_reader(filepath)?;
        let header = inner.headers()?.clone();
        Ok(Self {
            header,
            inner,
            record: StringRecord::new(),
        })
    }

    /// The column names, in file order.
    pub fn header(&self) -> Vec<String> {
        self.header.iter().map(|column| column.to_string()).collect()
    }

    /// Read every row into a [`RawTable`].
    pub fn into_raw_table(self) -> Result<RawTable, LollipopError> {
        let mut raw = RawTable::new(self.header());
        for row in self {
            match row? {
                Some(row) => raw.rows.push(row),
                None => raw.malformed += 1,
            }
        }
        log::debug!(
            "read {} rows ({} malformed) with {} columns",
            raw.len(),
            raw.malformed,
            raw.header.len()
        );
        Ok(raw)
    }
}

impl Iterator for VariantTableReader {
    type Item = Result<Option<RawRow>, LollipopError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.read_record(&mut self.record) {
            Ok(false) => None,
            Err(e) if matches!(e.kind(), ErrorKind::Utf8 { .. }) => {
                log::debug!("skipping row with invalid UTF-8: {}", e);
                Some(Ok(None))
            }
            Err(e) => Some(Err(e.into())),
            Ok(true) => {
                if self.record.len() != self.header.len() {
                    return Some(Ok(None));
                }
                let row = self
                    .record
                    .deserialize::<RawRow>(Some(&self.header))
                    .map_err(LollipopError::from);
                Some(row.map(Some))
            }
        }
    }
}

/// Read a headered variant table into a [`RawTable`].
pub fn read_variant_table(filepath: impl Into<PathBuf>) -> Result<RawTable, LollipopError> {
    VariantTableReader::new(filepath)?.into_raw_table()
}
