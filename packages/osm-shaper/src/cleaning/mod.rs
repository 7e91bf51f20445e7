//! Canonicalization of individual tag keys and values.

mod street;
mod subfield;
mod value;

pub use street::normalize_street;
pub use subfield::{classify, Subfield, SubfieldRejection};
pub use value::clean_value;
