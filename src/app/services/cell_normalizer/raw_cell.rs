//! Raw cell values as read from a workbook

use super::month::serial_to_datetime;
use crate::constants::NULL_MARKERS;
use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Single spreadsheet cell before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Boolean(bool),
}

impl RawCell {
    /// True for empty cells and whitespace-only text
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// True for the literal `nan` markers written by older exports
    pub fn is_null_marker(&self) -> bool {
        matches!(self, RawCell::Text(text) if NULL_MARKERS.contains(&text.trim()))
    }

    /// Trimmed text rendition, `None` when the cell is empty
    ///
    /// Whole numbers render without a fractional part so that terminal ids
    /// and phone numbers stored as numbers keep their written form.
    pub fn cell_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawCell::Number(value) => Some(format_number(*value)),
            RawCell::Date(value) => Some(if value.time().num_seconds_from_midnight() == 0 {
                value.format("%Y-%m-%d").to_string()
            } else {
                value.format("%Y-%m-%d %H:%M:%S").to_string()
            }),
            RawCell::Boolean(value) => Some(value.to_string()),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl From<&Data> for RawCell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => RawCell::Empty,
            Data::String(text) => RawCell::Text(text.clone()),
            Data::Int(value) => RawCell::Number(*value as f64),
            Data::Float(value) => RawCell::Number(*value),
            Data::Bool(value) => RawCell::Boolean(*value),
            Data::DateTime(value) => serial_to_datetime(value.as_f64())
                .map_or(RawCell::Number(value.as_f64()), RawCell::Date),
            Data::DateTimeIso(text) => parse_iso_datetime(text)
                .map_or_else(|| RawCell::Text(text.clone()), RawCell::Date),
            Data::DurationIso(text) => RawCell::Text(text.clone()),
        }
    }
}

fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl From<&str> for RawCell {
    fn from(text: &str) -> Self {
        RawCell::Text(text.to_string())
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}
