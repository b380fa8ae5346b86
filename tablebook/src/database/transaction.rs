//! Multi-statement write helpers.

use crate::catalog::{Catalog, ImportedRestaurant};
use crate::error::Result;
use crate::restaurant::{NewRestaurant, NewTable};

use super::connection::Database;

impl Database {
    /// Imports every restaurant and table of a catalog in a single
    /// transaction.
    ///
    /// This operation is atomic - either the whole catalog is stored or
    /// nothing is.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction cannot be started
    /// - Any record is invalid (blank name, zero seats)
    /// - Any insert fails
    /// - The transaction cannot be committed
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::catalog::Catalog;
    /// use tablebook::database::Database;
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let catalog = Catalog::from_yaml_str(
    ///     "restaurants:\n  - name: Corner\n    tables:\n      - seats: 2\n      - seats: 4\n",
    /// )
    /// .unwrap();
    ///
    /// let imported = db.import_catalog(&catalog).unwrap();
    /// assert_eq!(imported[0].table_ids.len(), 2);
    /// ```
    pub fn import_catalog(&mut self, catalog: &Catalog) -> Result<Vec<ImportedRestaurant>> {
        let tx = self.begin_transaction()?;

        let mut imported = Vec::with_capacity(catalog.restaurants.len());
        for entry in &catalog.restaurants {
            let id = Self::insert_restaurant(
                &tx,
                &NewRestaurant {
                    name: entry.name.clone(),
                    capacity: entry.capacity,
                    opening_hours: entry.opening_hours.clone(),
                },
            )?;

            let mut table_ids = Vec::with_capacity(entry.tables.len());
            for table in &entry.tables {
                table_ids.push(Self::insert_table(
                    &tx,
                    &NewTable {
                        restaurant_id: id,
                        name: table.name.clone(),
                        seats: table.seats,
                        is_active: table.active,
                    },
                )?);
            }

            log::debug!(
                "imported restaurant {id} '{}' with {} tables",
                entry.name,
                table_ids.len()
            );
            imported.push(ImportedRestaurant {
                id,
                name: entry.name.clone(),
                table_ids,
            });
        }

        tx.commit()?;
        Ok(imported)
    }
}
