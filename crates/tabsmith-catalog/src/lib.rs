//! Static type metadata and display-only sample values.
//!
//! The catalog is read-only reference data shared by the schema editor and the
//! payload lint. The previewer never talks to the generation service.

pub mod catalog;
pub mod preview;

pub use catalog::{ALL_CATEGORIES, TypeCatalog, TypeDescriptor};
pub use preview::{FALLBACK_PREVIEW, preview, preview_with_rng};
