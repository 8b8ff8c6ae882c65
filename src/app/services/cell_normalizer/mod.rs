//! Cell normalization for locale-specific spreadsheet values
//!
//! Pure conversions from a single raw cell to a canonical scalar. Nothing in
//! here touches I/O; the spreadsheet parser and the field table both call
//! into these functions.
//!
//! ## Architecture
//!
//! - [`raw_cell`] - Workbook-independent cell representation
//! - [`month`] - Indonesian month names and date serials to `YYYY-MM`
//! - [`currency`] - `Rp` strings with dotted thousands to decimal amounts
//! - [`fallback`] - Policy applied when a cell cannot be normalized
//!
//! ## Usage
//!
//! ```rust
//! use rental_processor::app::services::cell_normalizer::{normalize_month, RawCell};
//!
//! let month = normalize_month(&RawCell::Text("17 Januari 2024".to_string())).unwrap();
//! assert_eq!(month.as_deref(), Some("2024-01"));
//! ```

pub mod currency;
pub mod fallback;
pub mod month;
pub mod raw_cell;

#[cfg(test)]
mod tests;

pub use currency::normalize_currency;
pub use fallback::{FailureKind, FallbackPolicy, NormalizationFailure};
pub use month::{normalize_month, serial_to_datetime};
pub use raw_cell::RawCell;
