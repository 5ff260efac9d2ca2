//! Traits used by the lollipop library.
//!

use crate::Position;

/// The [`GenericVariant`] trait defines the functionality the clustering and
/// exon band stages need from a variant: where it sits on the protein, and
/// which exon it belongs to.
pub trait GenericVariant {
    fn position(&self) -> Position;
    fn exon(&self) -> &str;

    /// Whether this variant can be chained onto `prev` in a proximity cluster,
    /// i.e. they share an exon and are at most `distance` residues apart.
    fn chains_onto<V: GenericVariant>(&self, prev: &V, distance: Position) -> bool {
        self.exon() == prev.exon() && self.position().abs_diff(prev.position()) <= distance
    }
}

/// Defines how to serialize something to TSV.
pub trait TsvSerialize {
    // Serialize something to a TSV [`String`].
    fn to_tsv(&self) -> String;
}

impl TsvSerialize for String {
    fn to_tsv(&self) -> String {
        self.to_string()
    }
}

impl<U: TsvSerialize> TsvSerialize for Vec<U> {
    fn to_tsv(&self) -> String {
        self.iter()
            .map(|x| x.to_tsv())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
