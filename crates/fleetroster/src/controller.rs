//! The admin page controller.
//!
//! One [`AdminController`] corresponds to one load of the restricted page. It
//! owns the fleet repository, the user-interaction capability and the
//! transient filter state. Every mutation reads the whole fleet, changes it,
//! writes it back and re-renders; nothing else can run in between.

use tracing::{debug, info};

use crate::error::Result;
use crate::filter::{AvailabilityFilter, CategoryFilter, Filters};
use crate::interaction::Interaction;
use crate::render::{card_grid, Node};
use crate::repository::FleetRepository;
use crate::session::{AccessGuard, Navigation, Page, Session};
use crate::storage::ItemStore;
use crate::vehicle::VehicleRecord;

/// Prompt text for the driver name.
pub const DRIVER_PROMPT: &str = "Enter new driver name:";

/// Message when a driver update is empty.
pub const EMPTY_DRIVER_MESSAGE: &str = "Driver name cannot be empty.";

/// Question asked before deleting a vehicle.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this vehicle?";

/// The add-vehicle form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    /// Registration number input.
    pub reg_no: String,
    /// Category select value.
    pub category: String,
    /// Driver name input.
    pub driver_name: String,
    /// Availability checkbox.
    pub is_available: bool,
}

impl VehicleForm {
    /// A filled-in form.
    pub fn new(
        reg_no: impl Into<String>,
        category: impl Into<String>,
        driver_name: impl Into<String>,
        is_available: bool,
    ) -> Self {
        Self {
            reg_no: reg_no.into(),
            category: category.into(),
            driver_name: driver_name.into(),
            is_available,
        }
    }

    /// Clear every input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The message for the first required field that is blank after trimming.
    fn missing_field(&self) -> Option<&'static str> {
        if self.reg_no.trim().is_empty() {
            Some("Reg No is required")
        } else if self.category.trim().is_empty() {
            Some("Category is required")
        } else if self.driver_name.trim().is_empty() {
            Some("Driver Name is required")
        } else {
            None
        }
    }
}

/// Why an action left the fleet untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Required input was missing; the user has been told.
    Invalid,
    /// The user dismissed a prompt.
    Cancelled,
    /// The user declined a confirmation.
    Declined,
    /// No record has the requested id.
    NotFound,
}

/// Result of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The fleet was changed and written.
    Applied {
        /// Id of the affected record.
        id: String,
        /// The re-rendered card grid.
        view: Node,
    },
    /// Nothing was changed or written.
    Skipped(Skip),
}

impl Outcome {
    /// Whether the fleet was changed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Result of loading the restricted page.
#[derive(Debug)]
pub enum PageLoad<C> {
    /// Access granted.
    Ready(C),
    /// Access denied; go to this page instead.
    Redirect(Page),
}

/// Controller for the restricted admin page.
#[derive(Debug)]
pub struct AdminController<S, I> {
    repository: FleetRepository<S>,
    interaction: I,
    filters: Filters,
}

impl<S: ItemStore, I: Interaction> AdminController<S, I> {
    /// Load the restricted page.
    ///
    /// The access guard runs first. Without a logged-in session the result is
    /// a redirect to the entry page and the repository is never read.
    pub fn load<T: ItemStore>(
        session: &Session<T>,
        repository: FleetRepository<S>,
        interaction: I,
    ) -> PageLoad<Self> {
        match AccessGuard::check(session) {
            Navigation::Stay => PageLoad::Ready(Self::new(repository, interaction)),
            Navigation::Redirect(page) => PageLoad::Redirect(page),
        }
    }

    /// A controller with both filters at `All`, skipping the access guard.
    pub fn new(repository: FleetRepository<S>, interaction: I) -> Self {
        Self {
            repository,
            interaction,
            filters: Filters::default(),
        }
    }

    /// The active filters.
    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// The interaction capability.
    pub fn interaction(&self) -> &I {
        &self.interaction
    }

    /// Mutable access to the interaction capability.
    pub fn interaction_mut(&mut self) -> &mut I {
        &mut self.interaction
    }

    /// The whole fleet, ignoring filters.
    #[must_use]
    pub fn records(&self) -> Vec<VehicleRecord> {
        self.repository.read_all()
    }

    /// The records passing the active filters.
    #[must_use]
    pub fn visible_records(&self) -> Vec<VehicleRecord> {
        self.filters.apply(&self.repository.read_all())
    }

    /// Render the card grid for the records passing the active filters.
    #[must_use]
    pub fn render_all(&self) -> Node {
        card_grid(&self.visible_records())
    }

    /// Add a vehicle from the form.
    ///
    /// Each field is trimmed. The first blank required field is reported
    /// through [`Interaction::notify`] and nothing is stored. On success the
    /// record is appended, the form is reset and the grid re-rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if the fleet cannot be written.
    pub fn add(&mut self, form: &mut VehicleForm) -> Result<Outcome> {
        if let Some(message) = form.missing_field() {
            self.interaction.notify(message);
            return Ok(Outcome::Skipped(Skip::Invalid));
        }

        let record = VehicleRecord::new(
            form.reg_no.trim(),
            form.category.trim(),
            form.driver_name.trim(),
            form.is_available,
        );
        let id = record.id.clone();

        let mut records = self.repository.read_all();
        records.push(record);
        self.repository.write_all(&records)?;
        info!("Added vehicle {} ({})", form.reg_no.trim(), id);

        form.reset();
        Ok(self.applied(id))
    }

    /// Replace the driver of vehicle `id`.
    ///
    /// The user is asked for the new name, pre-filled with the current one.
    /// Cancelling does nothing; a blank name is reported and does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the fleet cannot be written.
    pub fn update_driver(&mut self, id: &str) -> Result<Outcome> {
        let mut records = self.repository.read_all();
        let Some(index) = position(&records, id) else {
            return Ok(not_found(id));
        };

        let Some(name) = self
            .interaction
            .request_text(DRIVER_PROMPT, &records[index].driver_name)
        else {
            return Ok(Outcome::Skipped(Skip::Cancelled));
        };

        let name = name.trim();
        if name.is_empty() {
            self.interaction.notify(EMPTY_DRIVER_MESSAGE);
            return Ok(Outcome::Skipped(Skip::Invalid));
        }

        records[index].driver_name = name.to_string();
        self.repository.write_all(&records)?;
        info!("Vehicle {} driver is now {}", id, name);

        Ok(self.applied(id.to_string()))
    }

    /// Flip the availability of vehicle `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fleet cannot be written.
    pub fn toggle_availability(&mut self, id: &str) -> Result<Outcome> {
        let mut records = self.repository.read_all();
        let Some(index) = position(&records, id) else {
            return Ok(not_found(id));
        };

        let record = &mut records[index];
        record.is_available = !record.is_available;
        let label = record.availability_label();
        self.repository.write_all(&records)?;
        info!("Vehicle {} is now {}", id, label);

        Ok(self.applied(id.to_string()))
    }

    /// Delete vehicle `id` after the user confirms.
    ///
    /// # Errors
    ///
    /// Returns an error if the fleet cannot be written.
    pub fn delete(&mut self, id: &str) -> Result<Outcome> {
        let mut records = self.repository.read_all();
        if position(&records, id).is_none() {
            return Ok(not_found(id));
        }

        if !self.interaction.confirm(DELETE_CONFIRMATION) {
            return Ok(Outcome::Skipped(Skip::Declined));
        }

        records.retain(|record| record.id != id);
        self.repository.write_all(&records)?;
        info!("Deleted vehicle {}", id);

        Ok(self.applied(id.to_string()))
    }

    /// Change the category filter and re-render.
    pub fn set_category_filter(&mut self, value: &str) -> Node {
        self.filters.category = CategoryFilter::from_value(value);
        self.render_all()
    }

    /// Change the availability filter and re-render.
    pub fn set_availability_filter(&mut self, value: &str) -> Node {
        self.filters.availability = AvailabilityFilter::from_value(value);
        self.render_all()
    }

    /// Reset both filters to `All` and re-render.
    pub fn clear_filters(&mut self) -> Node {
        self.filters.clear();
        self.render_all()
    }

    /// Clear the session flag and leave for the entry page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub fn logout<T: ItemStore>(&mut self, session: &mut Session<T>) -> Result<Navigation> {
        session.logout()?;
        Ok(Navigation::Redirect(Page::Entry))
    }

    fn applied(&self, id: String) -> Outcome {
        Outcome::Applied {
            id,
            view: self.render_all(),
        }
    }
}

fn position(records: &[VehicleRecord], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id == id)
}

fn not_found(id: &str) -> Outcome {
    debug!("No vehicle with id {}, ignoring", id);
    Outcome::Skipped(Skip::NotFound)
}
