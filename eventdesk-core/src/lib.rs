//! Core library for eventdesk.
//!
//! - `event`: the event model and its wire format
//! - `validate`: local input checks
//! - `remote`: the `EventsApi` seam and its HTTP implementation
//! - `cache` / `coordinator`: the optimistic event cache
//! - `query`: sorting and filtering for display

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod query;
pub mod remote;
pub mod validate;

pub use coordinator::{EventCoordinator, MutationKind};
pub use error::{ApiError, ApiResult};
pub use event::*;
