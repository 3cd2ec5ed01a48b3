//! The admin page document.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::filter::{Filters, ALL};
use crate::vehicle::{Category, CATEGORIES};

use super::{el, Element, Node};

/// Build the full admin page around an already rendered card grid.
///
/// The add form offers every category; the filter selects show the current
/// filter values as selected.
#[must_use]
pub fn admin_page(grid: Node, filters: &Filters) -> Node {
    let header = el("header")
        .class("topbar")
        .child(el("h1").text("Fleet Admin"))
        .child(
            el("button")
                .attr("id", "logoutBtn")
                .class("btn")
                .text("Logout"),
        );

    let form = el("form")
        .attr("id", "fleetForm")
        .class("card form")
        .child(
            el("input")
                .attr("id", "regNo")
                .attr("type", "text")
                .attr("placeholder", "Reg No"),
        )
        .child(category_select("category", None, false))
        .child(
            el("input")
                .attr("id", "driverName")
                .attr("type", "text")
                .attr("placeholder", "Driver Name"),
        )
        .child(
            el("label")
                .child(
                    el("input")
                        .attr("id", "isAvailable")
                        .attr("type", "checkbox"),
                )
                .text(" Available"),
        )
        .child(
            el("button")
                .attr("type", "submit")
                .class("btn")
                .text("Add Fleet"),
        );

    let filter_bar = el("div")
        .class("filters")
        .child(category_select(
            "filterCategory",
            Some(filters.category.value()),
            true,
        ))
        .child(select(
            "filterAvailability",
            [ALL, "Available", "Unavailable"],
            filters.availability.value(),
        ))
        .child(
            el("button")
                .attr("id", "clearFilters")
                .class("btn")
                .text("Clear Filters"),
        );

    el("html")
        .child(
            el("head")
                .child(el("meta").attr("charset", "utf-8"))
                .child(el("title").text("Fleet Admin")),
        )
        .child(
            el("body")
                .child(header)
                .child(el("main").child(form).child(filter_bar).child(grid)),
        )
        .into()
}

/// Serialize the admin page with a doctype.
#[must_use]
pub fn admin_document(grid: Node, filters: &Filters) -> String {
    format!("<!DOCTYPE html>\n{}\n", admin_page(grid, filters).to_html())
}

/// Write the admin page document to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_admin_document(path: &Path, grid: Node, filters: &Filters) -> Result<()> {
    std::fs::write(path, admin_document(grid, filters))?;
    debug!("Wrote admin page to {}", path.display());
    Ok(())
}

fn category_select(id: &'static str, selected: Option<&str>, with_all: bool) -> Element {
    let mut values: Vec<&str> = Vec::new();
    if with_all {
        values.push(ALL);
    } else {
        values.push("");
    }
    values.extend(CATEGORIES.iter().map(Category::as_str));
    select(id, values, selected.unwrap_or(""))
}

fn select<'a>(
    id: &'static str,
    values: impl IntoIterator<Item = &'a str>,
    selected: &str,
) -> Element {
    let options = values
        .into_iter()
        .map(|value| option(value, value == selected));
    el("select").attr("id", id).children(options)
}

fn option(value: &str, selected: bool) -> Node {
    let label = if value.is_empty() {
        "Select category"
    } else {
        value
    };
    let option = el("option").attr("value", value);
    let option = if selected {
        option.attr("selected", "selected")
    } else {
        option
    };
    option.text(label).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::card_grid;

    #[test]
    fn test_admin_document_structure() {
        let html = admin_document(card_grid(&[]), &Filters::default());

        assert!(html.starts_with("<!DOCTYPE html>\n<html>"));
        assert!(html.contains(r#"id="fleetForm""#));
        assert!(html.contains(r#"id="cardsContainer""#));
        assert!(html.contains(r#"id="logoutBtn""#));
        assert!(html.contains("No vehicles added yet."));
    }

    #[test]
    fn test_form_offers_every_category() {
        let html = admin_document(card_grid(&[]), &Filters::default());
        for category in CATEGORIES {
            let option = format!(r#"<option value="{category}">{category}</option>"#);
            assert!(html.contains(&option));
        }
    }

    #[test]
    fn test_filters_marked_selected() {
        let filters = Filters::from_values("Bus", "Unavailable");
        let html = admin_document(card_grid(&[]), &filters);

        let bus = r#"<option value="Bus" selected="selected">Bus</option>"#;
        let status = r#"<option value="Unavailable" selected="selected">Unavailable</option>"#;
        assert!(html.contains(bus));
        assert!(html.contains(status));
    }

    #[test]
    fn test_write_admin_document() {
        let path = std::env::temp_dir().join(format!(
            "fleetroster_admin_page_test_{}.html",
            std::process::id()
        ));

        write_admin_document(&path, card_grid(&[]), &Filters::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, admin_document(card_grid(&[]), &Filters::default()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_admin_document_missing_directory() {
        let path = std::env::temp_dir()
            .join("fleetroster_no_such_dir")
            .join("admin.html");

        let err =
            write_admin_document(&path, card_grid(&[]), &Filters::default()).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }
}
