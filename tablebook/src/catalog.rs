//! YAML catalog of restaurants and their tables.
//!
//! Restaurant and table records are owned by another system; a catalog file
//! is how they get into the store for operation and testing.
//!
//! ```yaml
//! restaurants:
//!   - name: Trattoria Roma
//!     capacity: 40
//!     opening_hours:
//!       monday: { open: "12:00", close: "23:00" }
//!       tuesday: { open: "12:00", close: "23:00" }
//!     tables:
//!       - { name: T1, seats: 2 }
//!       - { name: T2, seats: 4 }
//!       - { name: Patio, seats: 6, active: false }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{RestaurantId, TableId};
use crate::schedule::OpeningHours;

/// A set of restaurants to import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Restaurants in file order.
    #[serde(default)]
    pub restaurants: Vec<CatalogRestaurant>,
}

/// One restaurant entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogRestaurant {
    /// Display name.
    pub name: String,
    /// Optional capacity hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Weekly schedule; days left out are closed.
    #[serde(default)]
    pub opening_hours: OpeningHours,
    /// Physical tables.
    #[serde(default)]
    pub tables: Vec<CatalogTable>,
}

/// One table entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogTable {
    /// Optional label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Seat count.
    pub seats: u32,
    /// Whether the table can be booked.
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Ids assigned to one imported restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedRestaurant {
    /// New restaurant id.
    pub id: RestaurantId,
    /// Restaurant name.
    pub name: String,
    /// New table ids in catalog order.
    pub table_ids: Vec<TableId>,
}

impl Catalog {
    /// Parses a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed YAML or unknown fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::catalog::Catalog;
    ///
    /// let catalog = Catalog::from_yaml_str(
    ///     "restaurants:\n  - name: Corner\n    tables:\n      - seats: 2\n",
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.restaurants[0].tables[0].seats, 2);
    /// assert!(catalog.restaurants[0].tables[0].active);
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a configuration
    /// error if it cannot be parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot read catalog: {e}"),
        })?;
        Self::from_yaml_str(&text)
    }

    /// Total number of tables across all restaurants.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.restaurants.iter().map(|r| r.tables.len()).sum()
    }
}
