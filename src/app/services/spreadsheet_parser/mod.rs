//! Spreadsheet parser for leased-equipment contract exports
//!
//! Reads the first worksheet of an xlsx/xls/ods workbook, applies the fixed
//! fifteen-column layout, repairs vertically merged cells and converts each
//! data row into a [`RentalRow`](crate::app::models::RentalRow).
//!
//! ## Architecture
//!
//! - [`parser`] - Workbook reading and orchestration
//! - [`column_mapping`] - Fixed column layout and width validation
//! - [`forward_fill`] - Merged-cell repair
//! - [`row_parser`] - Conversion of one row of cells into a typed row
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rental_processor::app::services::spreadsheet_parser::SpreadsheetParser;
//! use rental_processor::config::ParserConfig;
//!
//! # fn example() -> rental_processor::Result<()> {
//! let parser = SpreadsheetParser::new(ParserConfig::default());
//! let result = parser.parse_file(std::path::Path::new("rental.xlsx"))?;
//!
//! println!("Parsed {} rows from {} data rows",
//!          result.stats.records_parsed,
//!          result.stats.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod forward_fill;
pub mod parser;
pub mod row_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnLayout;
pub use parser::{SpreadsheetParser, read_grid};
pub use row_parser::{RowOutcome, parse_rental_row};
pub use stats::{CellWarning, ParseResult, ParseStats};
