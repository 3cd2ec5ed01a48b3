//! Vehicle records and their identifiers.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Digits used by the base-36 id encoding.
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of random base-36 characters appended to each id.
const ID_RANDOM_LEN: usize = 6;

/// Vehicle categories offered by the add form, in display order.
pub const CATEGORIES: [Category; 4] = [
    Category::Auto,
    Category::Car,
    Category::Truck,
    Category::Bus,
];

/// The fixed set of vehicle categories.
///
/// Records keep their category as a plain string, so this type only describes
/// what the form offers; a stored record with some other category still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Auto-rickshaws and other three-wheelers.
    Auto,
    /// Passenger cars.
    Car,
    /// Goods vehicles.
    Truck,
    /// Buses.
    Bus,
}

impl Category {
    /// The category's stored and displayed name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Bus => "Bus",
        }
    }

    /// Look up a category by its exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        CATEGORIES.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vehicle in the fleet.
///
/// Serialized with the field names `id`, `regNo`, `category`, `driverName`
/// and `isAvailable`. The `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Registration number.
    pub reg_no: String,
    /// Category name, normally one of [`CATEGORIES`].
    pub category: String,
    /// Name of the assigned driver.
    pub driver_name: String,
    /// Whether the vehicle can be dispatched.
    pub is_available: bool,
}

impl VehicleRecord {
    /// Create a record with a freshly generated id.
    #[must_use]
    pub fn new(
        reg_no: impl Into<String>,
        category: impl Into<String>,
        driver_name: impl Into<String>,
        is_available: bool,
    ) -> Self {
        Self {
            id: generate_id(),
            reg_no: reg_no.into(),
            category: category.into(),
            driver_name: driver_name.into(),
            is_available,
        }
    }

    /// Human-readable availability.
    #[must_use]
    pub fn availability_label(&self) -> &'static str {
        if self.is_available {
            "Available"
        } else {
            "Unavailable"
        }
    }
}

/// Generate a new vehicle id.
///
/// The id is `id_` followed by the current Unix time in milliseconds and six
/// random characters, all base 36. Uniqueness is probabilistic; nothing checks
/// the id against existing records.
#[must_use]
pub fn generate_id() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut rng = rand::rng();
    let random: String = (0..ID_RANDOM_LEN)
        .map(|_| char::from(BASE36_DIGITS[rng.random_range(0..BASE36_DIGITS.len())]))
        .collect();
    format!("id_{}{random}", to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = usize::try_from(value % 36)
            .ok()
            .and_then(|index| BASE36_DIGITS.get(index));
        digits.extend(digit.copied().map(char::from));
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        let names: Vec<&str> = CATEGORIES.iter().map(Category::as_str).collect();
        assert_eq!(names, vec!["Auto", "Car", "Truck", "Bus"]);
        assert_eq!(Category::Truck.to_string(), "Truck");
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("Bus"), Some(Category::Bus));
        assert_eq!(Category::from_name("bus"), None);
        assert_eq!(Category::from_name(""), None);
    }

    #[test]
    fn test_record_new_assigns_id() {
        let record = VehicleRecord::new("KA01", "Truck", "Sam", true);
        assert!(record.id.starts_with("id_"));
        assert_eq!(record.reg_no, "KA01");
        assert_eq!(record.category, "Truck");
        assert_eq!(record.driver_name, "Sam");
        assert!(record.is_available);
    }

    #[test]
    fn test_availability_label() {
        let mut record = VehicleRecord::new("KA01", "Truck", "Sam", true);
        assert_eq!(record.availability_label(), "Available");
        record.is_available = false;
        assert_eq!(record.availability_label(), "Unavailable");
    }

    #[test]
    fn test_record_json_field_names() {
        let record = VehicleRecord {
            id: "a".to_string(),
            reg_no: "KA01".to_string(),
            category: "Truck".to_string(),
            driver_name: "Sam".to_string(),
            is_available: true,
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "a",
                "regNo": "KA01",
                "category": "Truck",
                "driverName": "Sam",
                "isAvailable": true
            })
        );
    }

    #[test]
    fn test_record_accepts_unknown_category() {
        let json = r#"{"id":"x","regNo":"R","category":"Tractor","driverName":"D","isAvailable":false}"#;
        let record: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "Tractor");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let body = id.strip_prefix("id_").unwrap();

        assert!(body.len() > ID_RANDOM_LEN);
        assert!(body
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_id_differs() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }
}
