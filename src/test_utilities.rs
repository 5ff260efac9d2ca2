//! Test cases and test utility functions.
//!

use rand::{thread_rng, Rng};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::{
    variants::{RawTable, Variant},
    Position,
};

// Stochastic test table defaults
//
// largest gap between neighboring random variants; with the default
// clustering distance of 10 this gives a mix of chained and isolated variants
pub const MAX_GAP: Position = 25;

// probability that the next random variant starts a new exon
pub const EXON_BREAK_PROB: f64 = 0.1;

// probability that a random raw row has an unparseable position
pub const MALFORMED_PROB: f64 = 0.05;

/// The header of random raw tables, using the `dot` column convention with
/// the cohorts `all` and `healthy`.
pub const RANDOM_TABLE_HEADER: [&str; 7] = [
    "AA",
    "exon",
    "variant",
    "all.Het",
    "all.Hom_A1",
    "healthy.Het",
    "healthy.Hom_A1",
];

/// Build a [`RawTable`] from a header and rows of cells.
pub fn raw_table(header: &[&str], rows: &[&[&str]]) -> RawTable {
    let mut raw = RawTable::new(header.iter().map(|c| c.to_string()).collect());
    for row in rows {
        raw.push_cells(row.iter().copied());
    }
    raw
}

/// Variants on one exon at the given positions, labeled by position.
pub fn variants_on(exon: &str, positions: &[Position]) -> Vec<Variant> {
    positions
        .iter()
        .map(|&position| Variant::new(position, exon, format!("p{}", position)))
        .collect()
}

/// Build `n` random variants, sorted by position, in contiguous runs of exons.
pub fn random_variants(n: usize) -> Vec<Variant> {
    let mut rng = thread_rng();
    let mut position: Position = 1;
    let mut exon = 1;
    let mut variants = Vec::with_capacity(n);
    for _i in 0..n {
        position += rng.gen_range(0..=MAX_GAP);
        if rng.gen_bool(EXON_BREAK_PROB) {
            exon += 1;
        }
        variants.push(Variant::new(
            position,
            format!("exon{}", exon),
            format!("v{}", position),
        ));
    }
    variants
}

/// Build a random, unsorted [`RawTable`] of `n` rows with the
/// [`RANDOM_TABLE_HEADER`] columns. Some positions are unparseable.
pub fn random_raw_table(n: usize) -> RawTable {
    let mut rng = thread_rng();
    let mut raw = raw_table(&RANDOM_TABLE_HEADER, &[]);
    for _i in 0..n {
        let position = if rng.gen_bool(MALFORMED_PROB) {
            "NA".to_string()
        } else {
            rng.gen_range(1..2000u32).to_string()
        };
        let exon = format!("exon{}", rng.gen_range(1..12));
        let label = format!("v{}", rng.gen_range(0..100_000));
        let counts: Vec<String> = (0..4).map(|_| rng.gen_range(0..3u32).to_string()).collect();
        let mut cells = vec![position, exon, label];
        cells.extend(counts);
        raw.push_cells(cells);
    }
    raw
}

/// Write a raw table to a temporary TSV file.
pub fn temp_variant_file(raw: &RawTable) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("could not create temporary file");
    writeln!(file, "{}", raw.header.join("\t")).expect("could not write header");
    for row in &raw.rows {
        let cells: Vec<&str> = row.values().map(String::as_str).collect();
        writeln!(file, "{}", cells.join("\t")).expect("could not write row");
    }
    file.flush().expect("could not flush temporary file");
    file
}
