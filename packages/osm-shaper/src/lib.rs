//! OSM Shaper - Clean an OpenStreetMap extract into JSON documents.
//!
//! This crate reads the nodes and ways of an OSM XML extract, keeps the ones
//! inside the Minneapolis city rectangle and reshapes each into a
//! [`NormalizedDocument`]: flat attributes, a cleaned `address`, Metropolitan
//! Council data under `organization_data`, way member references and edit
//! provenance.
//!
//! # Example
//!
//! ```
//! use osm_shaper::{shape, ElementKind, RawElement};
//!
//! let element = RawElement::new(ElementKind::Point)
//!     .with_attribute("lat", "44.9778")
//!     .with_attribute("lon", "-93.2650")
//!     .with_attribute("user", "mapper")
//!     .with_tag("addr:street", "Hennepin Ave")
//!     .with_tag("addr:postcode", "55403");
//!
//! let doc = shape(&element).into_document().unwrap();
//! assert_eq!(doc.address_field("street"), Some("Hennepin Avenue"));
//! assert_eq!(doc.address_field("postcode"), Some("55403"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Lookup tables, constants and input validation
//! - [`types`]: Raw elements, normalized documents and the document builder
//! - [`error`]: Error types and Result alias
//! - [`cleaning`]: Value cleaning, street normalization, subfield routing
//! - [`geofence`]: Region bounding rectangle
//! - [`shaper`]: One element to one document
//! - [`osm`]: OSM XML reading
//! - [`sink`]: JSON Lines and in-memory document sinks
//! - [`pipeline`]: Driver over a whole extract
//! - [`audit`]: Frequency reports over a raw extract
//! - [`cli`]: Command-line interface

pub mod audit;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod error;
pub mod geofence;
pub mod osm;
pub mod pipeline;
pub mod shaper;
pub mod sink;
pub mod types;

// Re-export main functions
pub use pipeline::{process_file, run, RunOptions, RunStats};
pub use shaper::{shape, ElementRejection, ShapeOutcome};

// Re-export commonly used items
pub use error::{Result, ShaperError};
pub use types::{DocumentBuilder, DocumentKind, ElementKind, NormalizedDocument, RawElement};
