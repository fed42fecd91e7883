//! # Working Set
//!
//! The restaurants (with menus) a session operates on. It is loaded once from
//! the repository when the session starts and kept in step with the store by
//! the commands: every mutation is persisted first and only then applied here.
//!
//! Users address restaurants and products by their 1-based position in the
//! lists they were shown, so lookups here take those display indexes.

use crate::error::{MenuError, Result};
use crate::model::{Product, Restaurant};

/// A restaurant paired with the index it is shown under.
#[derive(Debug, Clone)]
pub struct ListedRestaurant {
    pub index: usize,
    pub restaurant: Restaurant,
}

/// A product paired with its index in its restaurant's menu.
#[derive(Debug, Clone)]
pub struct ListedProduct {
    pub index: usize,
    pub product: Product,
}

#[derive(Debug, Default, Clone)]
pub struct WorkingSet {
    restaurants: Vec<Restaurant>,
}

fn slot(index: usize, len: usize, what: &str) -> Result<usize> {
    if index == 0 || index > len {
        return Err(MenuError::Api(format!("No {} at position {}", what, index)));
    }
    Ok(index - 1)
}

impl WorkingSet {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn restaurant(&self, index: usize) -> Result<&Restaurant> {
        let i = slot(index, self.restaurants.len(), "restaurant")?;
        Ok(&self.restaurants[i])
    }

    pub fn restaurant_mut(&mut self, index: usize) -> Result<&mut Restaurant> {
        let i = slot(index, self.restaurants.len(), "restaurant")?;
        Ok(&mut self.restaurants[i])
    }

    pub fn product(&self, index: usize, product: usize) -> Result<&Product> {
        let menu = self.restaurant(index)?.menu();
        let p = slot(product, menu.len(), "dish")?;
        Ok(&menu[p])
    }

    pub fn product_mut(&mut self, index: usize, product: usize) -> Result<&mut Product> {
        let menu = self.restaurant_mut(index)?.menu_mut();
        let p = slot(product, menu.len(), "dish")?;
        Ok(&mut menu[p])
    }

    pub(crate) fn push(&mut self, restaurant: Restaurant) -> usize {
        self.restaurants.push(restaurant);
        self.restaurants.len()
    }

    pub(crate) fn replace(&mut self, index: usize, restaurant: Restaurant) -> Result<()> {
        *self.restaurant_mut(index)? = restaurant;
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<Restaurant> {
        let i = slot(index, self.restaurants.len(), "restaurant")?;
        Ok(self.restaurants.remove(i))
    }

    pub(crate) fn remove_product(&mut self, index: usize, product: usize) -> Result<Product> {
        let restaurant = self.restaurant_mut(index)?;
        let p = slot(product, restaurant.menu.len(), "dish")?;
        Ok(restaurant.menu.remove(p))
    }

    /// Every restaurant with its display index.
    pub fn listed(&self) -> Vec<ListedRestaurant> {
        self.restaurants
            .iter()
            .enumerate()
            .map(|(i, r)| ListedRestaurant {
                index: i + 1,
                restaurant: r.clone(),
            })
            .collect()
    }

    pub fn listed_menu(&self, index: usize) -> Result<Vec<ListedProduct>> {
        Ok(self
            .restaurant(index)?
            .menu()
            .iter()
            .enumerate()
            .map(|(i, p)| ListedProduct {
                index: i + 1,
                product: p.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> WorkingSet {
        let mut mario =
            Restaurant::from_parts(1, "Mario's".into(), "89991234567".into(), "Main".into())
                .unwrap();
        mario
            .add_product(Product::from_parts(1, 1, "Pizza".into(), 450.0, true))
            .unwrap();
        let luigi =
            Restaurant::from_parts(2, "Luigi's".into(), "9991234567".into(), "Side".into())
                .unwrap();
        WorkingSet::new(vec![mario, luigi])
    }

    #[test]
    fn lookups_are_one_based() {
        let ws = set();
        assert_eq!(ws.restaurant(1).unwrap().name, "Mario's");
        assert_eq!(ws.restaurant(2).unwrap().name, "Luigi's");
        assert_eq!(ws.product(1, 1).unwrap().name, "Pizza");
    }

    #[test]
    fn out_of_range_positions_are_errors() {
        let ws = set();
        assert!(matches!(ws.restaurant(0), Err(MenuError::Api(_))));
        assert!(matches!(ws.restaurant(3), Err(MenuError::Api(_))));
        assert!(matches!(ws.product(1, 2), Err(MenuError::Api(_))));
        assert!(matches!(ws.product(2, 1), Err(MenuError::Api(_))));
    }

    #[test]
    fn listed_carries_display_indexes() {
        let ws = set();
        let listed = ws.listed();
        assert_eq!(listed[0].index, 1);
        assert_eq!(listed[1].index, 2);
        assert_eq!(listed[1].restaurant.name, "Luigi's");

        let menu = ws.listed_menu(1).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].index, 1);
    }
}
