
pub mod traits;
pub mod variants;
pub mod cohorts;
pub mod clusters;
pub mod exons;
pub mod labels;
pub mod layout;
pub mod pipeline;
pub mod reporting;
pub mod commands;
pub mod io;
pub mod error;
pub mod test_utilities;

/// An amino acid coordinate.
pub type Position = u32;

/// A number of carriers.
pub type Count = u32;

pub mod prelude {
    pub use crate::cohorts::{CohortConfig, CohortView, ColumnConvention, LabelOrder};
    pub use crate::error::LollipopError;
    pub use crate::pipeline::{Pipeline, Rendering};
    pub use crate::variants::{RawTable, TableSchema, Variant, VariantTable};
}
