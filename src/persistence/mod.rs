//! State persistence across the host boundary
//!
//! Features:
//! - Versioned flat JSON record
//! - Version check before full parsing
//! - Full invariant validation on decode
//!
//! Storage is the host's business; nothing here writes to disk.

pub mod record;

pub use record::{StateRecord, decode, encode};
