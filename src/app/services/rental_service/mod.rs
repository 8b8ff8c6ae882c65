//! Rental record service
//!
//! Entry points used by the CLI and by embedding callers. Each operation is
//! one unit of work: it opens a store transaction, applies its writes and
//! commits, so a failure partway leaves the store as it was.
//!
//! ## Architecture
//!
//! - [`service`] - Import, edit, delete, listing, attachment and export operations
//! - [`report`] - Result types returned by those operations

pub mod report;
pub mod service;

#[cfg(test)]
mod tests;

pub use report::{AddOutcome, EditOutcome, ImportReport, ListReport};
pub use service::RentalService;
