use super::backend::StorageBackend;
use super::workbook::{Cell, RowRef, Sheet, Table, Workbook, MENU, RESTAURANTS};
use crate::error::{MenuError, Result};
use crate::model::{Product, Restaurant};
use std::collections::HashMap;
use tracing::debug;

/// CRUD for restaurants and products over a [`StorageBackend`].
///
/// Each call loads the whole workbook, works on it in memory and, when
/// something changed, writes the whole workbook back.
pub struct Repository<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Repository<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts the restaurant if it has no ID yet (assigning one), otherwise
    /// overwrites its row. Returns the restaurant's ID.
    pub fn save_restaurant(&mut self, restaurant: &mut Restaurant) -> Result<u32> {
        let row = |id: u32| {
            vec![
                Cell::from(id),
                Cell::text(&restaurant.name),
                Cell::text(restaurant.phone()),
                Cell::text(&restaurant.address),
            ]
        };
        let id = self.upsert(&RESTAURANTS, "Restaurant", restaurant.id, row)?;
        restaurant.id = Some(id);
        Ok(id)
    }

    /// Inserts or updates a product row. Returns the product's ID.
    pub fn save_product(&mut self, product: &mut Product) -> Result<u32> {
        let row = |id: u32| {
            vec![
                Cell::from(id),
                Cell::from(product.restaurant_id()),
                Cell::text(&product.name),
                Cell::from(product.price()),
                Cell::from(product.is_available()),
            ]
        };
        let id = self.upsert(&MENU, "Product", product.id, row)?;
        product.id = Some(id);
        Ok(id)
    }

    /// Every restaurant in store order, without menus. Rows with a blank ID are skipped.
    pub fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        let workbook = self.backend.load()?;
        let sheet = workbook.sheet(&RESTAURANTS)?;

        let mut restaurants = Vec::new();
        for (pos, cells) in sheet.data_rows() {
            let row = RowRef::new(&RESTAURANTS, pos, cells);
            let Some(id) = row.opt_u32("ID")? else {
                continue;
            };
            let phone = row.text("Phone");
            let restaurant =
                Restaurant::from_parts(id, row.text("Name"), phone, row.text("Address")).map_err(
                    |e| MenuError::DataCorruption {
                        table: RESTAURANTS.name.to_string(),
                        row: pos + 1,
                        column: "Phone".to_string(),
                        reason: e.to_string(),
                    },
                )?;
            restaurants.push(restaurant);
        }
        Ok(restaurants)
    }

    /// Products owned by `restaurant_id`, in store order.
    pub fn list_products(&self, restaurant_id: u32) -> Result<Vec<Product>> {
        Ok(self
            .list_all_products()?
            .into_iter()
            .filter(|p| p.restaurant_id() == restaurant_id)
            .collect())
    }

    /// Every product in store order. Rows with a blank ID are skipped.
    pub fn list_all_products(&self) -> Result<Vec<Product>> {
        let workbook = self.backend.load()?;
        let sheet = workbook.sheet(&MENU)?;

        let mut products = Vec::new();
        for (pos, cells) in sheet.data_rows() {
            let row = RowRef::new(&MENU, pos, cells);
            let Some(id) = row.opt_u32("ID")? else {
                continue;
            };
            products.push(Product::from_parts(
                id,
                row.u32("RestaurantID")?,
                row.text("Name"),
                row.f64("Price")?,
                row.bool("Status")?,
            ));
        }
        Ok(products)
    }

    /// Restaurants with their menus attached, read in one pass over each table.
    pub fn load_working_set(&self) -> Result<Vec<Restaurant>> {
        let mut restaurants = self.list_restaurants()?;
        let mut menus: HashMap<u32, Vec<Product>> = HashMap::new();
        for product in self.list_all_products()? {
            menus
                .entry(product.restaurant_id())
                .or_default()
                .push(product);
        }
        for restaurant in &mut restaurants {
            if let Some(id) = restaurant.id {
                restaurant.menu = menus.remove(&id).unwrap_or_default();
            }
        }
        debug!(
            restaurants = restaurants.len(),
            orphaned_menus = menus.len(),
            "loaded working set"
        );
        Ok(restaurants)
    }

    /// Removes the restaurant and every product that references it.
    /// Returns `false` (and leaves the store untouched) if no row has that ID.
    pub fn delete_restaurant(&mut self, id: u32) -> Result<bool> {
        let mut workbook = self.backend.load()?;

        let Some(pos) = find_row(workbook.sheet(&RESTAURANTS)?, &RESTAURANTS, id)? else {
            debug!(id, "delete_restaurant: no such row");
            return Ok(false);
        };
        workbook.sheet_mut(&RESTAURANTS)?.rows.remove(pos);

        let menu = workbook.sheet_mut(&MENU)?;
        let mut owned = Vec::new();
        for (pos, cells) in menu.data_rows() {
            let row = RowRef::new(&MENU, pos, cells);
            if row.opt_u32("RestaurantID")? == Some(id) {
                owned.push(pos);
            }
        }
        // Highest position first so earlier removals don't shift later ones
        for pos in owned.iter().rev() {
            menu.rows.remove(*pos);
        }

        self.backend.save(&workbook)?;
        debug!(id, products = owned.len(), "deleted restaurant");
        Ok(true)
    }

    /// Removes one product. Returns `false` if no row has that ID.
    pub fn delete_product(&mut self, id: u32) -> Result<bool> {
        let mut workbook = self.backend.load()?;

        let Some(pos) = find_row(workbook.sheet(&MENU)?, &MENU, id)? else {
            debug!(id, "delete_product: no such row");
            return Ok(false);
        };
        workbook.sheet_mut(&MENU)?.rows.remove(pos);

        self.backend.save(&workbook)?;
        debug!(id, "deleted product");
        Ok(true)
    }

    fn upsert(
        &mut self,
        table: &Table,
        entity: &'static str,
        id: Option<u32>,
        build_row: impl Fn(u32) -> Vec<Cell>,
    ) -> Result<u32> {
        let mut workbook = self.backend.load()?;

        let id = match id {
            Some(id) => {
                let sheet = workbook.sheet(table)?;
                let pos = find_row(sheet, table, id)?.ok_or(MenuError::NotFound { entity, id })?;
                workbook.sheet_mut(table)?.rows[pos] = build_row(id);
                debug!(table = table.name, id, "updated row");
                id
            }
            None => {
                let id = allocate_id(&mut workbook, table)?;
                workbook.sheet_mut(table)?.append(build_row(id));
                debug!(table = table.name, id, "appended row");
                id
            }
        };

        self.backend.save(&workbook)?;
        Ok(id)
    }
}

/// Position of the first row whose ID equals `id`.
fn find_row(sheet: &Sheet, table: &Table, id: u32) -> Result<Option<usize>> {
    for (pos, cells) in sheet.data_rows() {
        if RowRef::new(table, pos, cells).opt_u32("ID")? == Some(id) {
            return Ok(Some(pos));
        }
    }
    Ok(None)
}

/// Next ID for `table`: one past both the highest ID in the table and the
/// highest ID ever handed out, so deleted IDs are never reused.
fn allocate_id(workbook: &mut Workbook, table: &Table) -> Result<u32> {
    let mut max = 0;
    for (pos, cells) in workbook.sheet(table)?.data_rows() {
        if let Some(id) = RowRef::new(table, pos, cells).opt_u32("ID")? {
            max = max.max(id);
        }
    }
    let next = max
        .max(workbook.counter(table))
        .checked_add(1)
        .ok_or_else(|| MenuError::Storage(format!("ID space exhausted in '{}'", table.name)))?;
    workbook.set_counter(table, next);
    Ok(next)
}
