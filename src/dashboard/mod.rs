//! Dashboard State
//!
//! Explicit state for the patient dashboard: the loaded list, the current
//! selection, and the load status, advanced through discrete transitions
//! (`loaded`, `selected`, `failed`).

mod state;

pub use state::{DashboardState, LoadStatus, SelectionError};
