//! Dish management for one restaurant's menu.

use crate::commands::helpers::saved_id;
use crate::commands::{CmdMessage, CmdResult, ProductUpdate};
use crate::error::Result;
use crate::model::{non_empty, parse_price, Product};
use crate::store::{Repository, StorageBackend};
use crate::working_set::{ListedProduct, WorkingSet};

pub fn add_product<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    index: usize,
    name: &str,
    price: &str,
) -> Result<CmdResult> {
    let restaurant = ws.restaurant_mut(index)?;
    let owner = saved_id(restaurant)?;
    let price = parse_price(price)?;

    let mut product = Product::new(owner, name.trim(), price)?;
    repo.save_product(&mut product)?;
    restaurant.add_product(product.clone())?;

    let position = restaurant.menu().len();
    Ok(CmdResult::default()
        .with_listed_products(vec![ListedProduct {
            index: position,
            product,
        }])
        .with_message(CmdMessage::success(format!(
            "Dish added to {}: {}",
            restaurant.name,
            name.trim()
        ))))
}

/// Renames and/or reprices a dish. An invalid price rejects the whole update.
pub fn update_product<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    index: usize,
    dish: usize,
    update: &ProductUpdate,
) -> Result<CmdResult> {
    let mut product = ws.product(index, dish)?.clone();
    if let Some(price) = non_empty(update.price.as_deref()) {
        product.update_price(price)?;
    }
    if let Some(name) = non_empty(update.name.as_deref()) {
        product.update_name(name.trim());
    }

    repo.save_product(&mut product)?;
    *ws.product_mut(index, dish)? = product.clone();

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Dish updated ({}): {}",
            dish, product.name
        )))
        .with_listed_products(vec![ListedProduct {
            index: dish,
            product,
        }]))
}

pub fn delete_product<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    index: usize,
    dish: usize,
) -> Result<CmdResult> {
    let product = ws.product(index, dish)?;
    let name = product.name.clone();

    let existed = match product.id() {
        Some(id) => repo.delete_product(id)?,
        None => false,
    };
    ws.remove_product(index, dish)?;

    let message = if existed {
        CmdMessage::success(format!("Dish deleted ({}): {}", dish, name))
    } else {
        CmdMessage::warning(format!("Dish '{}' was already gone from the store", name))
    };
    Ok(CmdResult::default().with_message(message))
}

/// Flips a dish between available and unavailable.
pub fn toggle_status<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    index: usize,
    dish: usize,
) -> Result<CmdResult> {
    let mut product = ws.product(index, dish)?.clone();
    product.toggle_status();
    repo.save_product(&mut product)?;
    *ws.product_mut(index, dish)? = product.clone();

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Status of {} changed to {}",
            product.name,
            product.status_label()
        )))
        .with_listed_products(vec![ListedProduct {
            index: dish,
            product,
        }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::SessionFixture;
    use crate::commands::{create, delete};
    use crate::error::MenuError;

    fn fixture() -> SessionFixture {
        SessionFixture::new()
            .with_restaurant("Mario's", "89991234567", "Main St 1")
            .with_product("Pizza", 450.0)
    }

    #[test]
    fn add_product_persists_under_owner() {
        let mut fx = fixture();
        let result = add_product(&mut fx.ws, &mut fx.repo, 1, "Pasta", "380.5").unwrap();

        assert_eq!(result.listed_products[0].index, 2);
        let stored = fx.repo.list_products(1).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].name, "Pasta");
        assert_eq!(stored[1].price(), 380.5);
        assert!(stored[1].is_available());
    }

    #[test]
    fn add_product_rejects_bad_price() {
        let mut fx = fixture();
        let err = add_product(&mut fx.ws, &mut fx.repo, 1, "Pasta", "lots").unwrap_err();

        assert!(matches!(err, MenuError::InvalidPrice(_)));
        assert_eq!(fx.ws.restaurant(1).unwrap().menu().len(), 1);
        assert_eq!(fx.repo.list_products(1).unwrap().len(), 1);
    }

    #[test]
    fn update_product_keeps_blank_fields() {
        let mut fx = fixture();
        let update = ProductUpdate {
            name: Some(String::new()),
            price: Some("500".into()),
        };
        update_product(&mut fx.ws, &mut fx.repo, 1, 1, &update).unwrap();

        let stored = &fx.repo.list_products(1).unwrap()[0];
        assert_eq!(stored.name, "Pizza");
        assert_eq!(stored.price(), 500.0);
    }

    #[test]
    fn update_product_with_bad_price_changes_nothing() {
        let mut fx = fixture();
        let update = ProductUpdate::new("Calzone", "free");

        assert!(update_product(&mut fx.ws, &mut fx.repo, 1, 1, &update).is_err());
        assert_eq!(fx.ws.product(1, 1).unwrap().name, "Pizza");
        assert_eq!(fx.repo.list_products(1).unwrap()[0].name, "Pizza");
    }

    #[test]
    fn delete_product_removes_from_menu_and_store() {
        let mut fx = fixture().with_product("Pasta", 380.0);
        delete_product(&mut fx.ws, &mut fx.repo, 1, 1).unwrap();

        assert_eq!(fx.ws.restaurant(1).unwrap().menu().len(), 1);
        assert_eq!(fx.ws.product(1, 1).unwrap().name, "Pasta");
        let stored = fx.repo.list_products(1).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Pasta");
    }

    #[test]
    fn toggle_status_round_trips_through_store() {
        let mut fx = fixture();
        let result = toggle_status(&mut fx.ws, &mut fx.repo, 1, 1).unwrap();

        assert!(!result.listed_products[0].product.is_available());
        assert!(result.messages[0].content.contains("unavailable"));
        assert!(!fx.reloaded().product(1, 1).unwrap().is_available());

        toggle_status(&mut fx.ws, &mut fx.repo, 1, 1).unwrap();
        assert!(fx.reloaded().product(1, 1).unwrap().is_available());
    }

    #[test]
    fn full_restaurant_lifecycle() {
        let mut fx = SessionFixture::new();
        create::run(&mut fx.ws, &mut fx.repo, "Mario's", "89991234567", "Main St 1").unwrap();
        let marios = fx.ws.restaurant(1).unwrap().id().unwrap();

        add_product(&mut fx.ws, &mut fx.repo, 1, "Pizza", "450.0").unwrap();
        let products = fx.repo.list_products(marios).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Pizza");
        assert_eq!(products[0].price(), 450.0);
        assert!(products[0].is_available());

        toggle_status(&mut fx.ws, &mut fx.repo, 1, 1).unwrap();
        assert!(!fx.repo.list_products(marios).unwrap()[0].is_available());

        delete::run(&mut fx.ws, &mut fx.repo, 1).unwrap();
        assert!(fx.repo.list_restaurants().unwrap().is_empty());
        assert!(fx.repo.list_products(marios).unwrap().is_empty());
    }
}
