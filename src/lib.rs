// Library root
// -----------
// Client for the nutrition & health tracking backend. The binary
// (`main.rs`) wires these modules into an interactive terminal app.
//
// Module responsibilities:
// - `api`: request descriptors for every backend endpoint and the
//   blocking client that executes them.
// - `session`: the two persisted session markers (token, user info).
// - `router`: the page table and the navigation guard deciding whether a
//   page may be shown, given the session markers.
// - `ui`: terminal pages; every page change goes through `router`.
// - `config` / `error`: command line options and the library error type.
pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod session;
pub mod ui;

pub use error::{ClientError, Result};
