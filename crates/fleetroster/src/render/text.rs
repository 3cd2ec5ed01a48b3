//! Plain-text rendering of the card grid for terminals.
//!
//! Terminals do not interpret markup, so nothing is escaped here.

use std::fmt::Write;

use crate::vehicle::VehicleRecord;

use super::{CardView, EMPTY_MESSAGE};

/// Render one card as a block of lines.
#[must_use]
pub fn card(record: &VehicleRecord) -> String {
    let view = CardView::from(record);
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", view.reg_no, view.id);
    let _ = writeln!(out, "  Category:     {}", view.category);
    let _ = writeln!(out, "  Driver:       {}", view.driver_name);
    let _ = writeln!(out, "  Availability: {}", view.availability);
    out
}

/// Render the grid: cards separated by blank lines, or the empty message.
#[must_use]
pub fn card_grid(records: &[VehicleRecord]) -> String {
    if records.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }
    records.iter().map(card).collect::<Vec<_>>().join("\n")
}
