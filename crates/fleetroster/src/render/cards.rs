//! Vehicle card components.

use crate::vehicle::VehicleRecord;

use super::{el, Node};

/// Image shown on every card.
pub const VEHICLE_IMAGE: &str = "https://via.placeholder.com/400x240?text=Vehicle";

/// Message shown instead of cards when nothing passes the filters.
pub const EMPTY_MESSAGE: &str = "No vehicles added yet.";

/// What a card shows for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Record id, carried so actions can find their target.
    pub id: String,
    /// Registration number.
    pub reg_no: String,
    /// Category name.
    pub category: String,
    /// Driver name.
    pub driver_name: String,
    /// `Available` or `Unavailable`.
    pub availability: &'static str,
    /// Label of the availability toggle button.
    pub toggle_label: &'static str,
}

impl From<&VehicleRecord> for CardView {
    fn from(record: &VehicleRecord) -> Self {
        Self {
            id: record.id.clone(),
            reg_no: record.reg_no.clone(),
            category: record.category.clone(),
            driver_name: record.driver_name.clone(),
            availability: record.availability_label(),
            toggle_label: if record.is_available {
                "Make Unavailable"
            } else {
                "Make Available"
            },
        }
    }
}

/// One vehicle card.
#[must_use]
pub fn card(record: &VehicleRecord) -> Node {
    let view = CardView::from(record);

    el("div")
        .class("card")
        .attr("data-id", view.id)
        .child(
            el("img")
                .class("fleet-img")
                .attr("src", VEHICLE_IMAGE)
                .attr("alt", "vehicle image"),
        )
        .child(el("h3").text(view.reg_no))
        .child(
            el("div")
                .class("meta")
                .child(el("div").text(format!("Category: {}", view.category)))
                .child(
                    el("div")
                        .text("Driver: ")
                        .child(el("span").class("driver-name").text(view.driver_name)),
                )
                .child(
                    el("div")
                        .text("Availability: ")
                        .child(el("strong").class("avail-text").text(view.availability)),
                ),
        )
        .child(
            el("div")
                .class("btn-row")
                .child(
                    el("button")
                        .class("btn small update-driver")
                        .text("Update Driver"),
                )
                .child(
                    el("button")
                        .class("btn small toggle-availability")
                        .text(view.toggle_label),
                )
                .child(
                    el("button")
                        .class("btn small danger delete-vehicle")
                        .text("Delete Vehicle"),
                ),
        )
        .into()
}

/// The cards container for `records`, or the empty placeholder.
#[must_use]
pub fn card_grid(records: &[VehicleRecord]) -> Node {
    let grid = el("div").attr("id", "cardsContainer").class("cards");

    if records.is_empty() {
        return grid
            .child(
                el("div")
                    .class("card empty")
                    .child(el("p").class("muted").text(EMPTY_MESSAGE)),
            )
            .into();
    }

    grid.children(records.iter().map(card)).into()
}
