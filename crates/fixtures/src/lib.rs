//! Fixture data source for Clinicdash.
//!
//! Loads clinics, orders and communications usage from JSON. The bundled
//! fixture is compiled into the binary; a file path from configuration
//! replaces it.

pub mod error;
pub mod source;

pub use error::SourceError;
pub use source::FixtureSource;
