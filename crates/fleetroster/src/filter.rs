//! Category and availability filters for the card grid.
//!
//! Filters are view state only. They are never stored.

use crate::vehicle::VehicleRecord;

/// The "no restriction" value of both filter selects.
pub const ALL: &str = "All";

/// Restrict the grid to one category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Only records whose category equals this name.
    Only(String),
}

impl CategoryFilter {
    /// Parse a select value. `"All"` and an empty value mean no restriction.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => record.category == *category,
        }
    }

    /// The select value this filter corresponds to.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(category) => category,
        }
    }
}

/// Restrict the grid by availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    /// Available and unavailable vehicles.
    #[default]
    All,
    /// Only available vehicles.
    Available,
    /// Only unavailable vehicles.
    Unavailable,
}

impl AvailabilityFilter {
    /// Parse a select value.
    ///
    /// `"Available"` keeps available vehicles; any other value except `"All"`
    /// or empty keeps unavailable ones.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "" | ALL => Self::All,
            "Available" => Self::Available,
            _ => Self::Unavailable,
        }
    }

    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        match self {
            Self::All => true,
            Self::Available => record.is_available,
            Self::Unavailable => !record.is_available,
        }
    }

    /// The select value this filter corresponds to.
    #[must_use]
    pub fn value(&self) -> &'static str {
        match self {
            Self::All => ALL,
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
    }
}

/// Both active filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    /// Category filter.
    pub category: CategoryFilter,
    /// Availability filter.
    pub availability: AvailabilityFilter,
}

impl Filters {
    /// Filters from the two select values.
    #[must_use]
    pub fn from_values(category: &str, availability: &str) -> Self {
        Self {
            category: CategoryFilter::from_value(category),
            availability: AvailabilityFilter::from_value(availability),
        }
    }

    /// Whether `record` passes both filters.
    #[must_use]
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        self.category.matches(record) && self.availability.matches(record)
    }

    /// The records passing both filters, in their original order.
    #[must_use]
    pub fn apply(&self, records: &[VehicleRecord]) -> Vec<VehicleRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    /// Reset both filters to `All`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether neither filter restricts anything.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}
