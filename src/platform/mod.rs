//! Platform abstraction layer
//!
//! Native hosts link the library directly. Browser hosts go through the
//! wasm32 bindings, which wrap the JSON boundary and route logging and panics
//! to the browser console.

#[cfg(target_arch = "wasm32")]
pub mod wasm;
