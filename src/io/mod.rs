//! Types and methods for reading variant tables and writing output.

pub mod file;
pub mod tsv;

pub use file::{InputFile, OutputFile};
pub use tsv::{read_variant_table, VariantTableReader};
