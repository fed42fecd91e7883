use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Restaurant;
use crate::store::{Repository, StorageBackend};
use crate::working_set::{ListedRestaurant, WorkingSet};

/// Validates, stores and adds a new restaurant to the working set.
pub fn run<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    name: &str,
    phone: &str,
    address: &str,
) -> Result<CmdResult> {
    let mut restaurant = Restaurant::new(name.trim(), phone.trim(), address.trim())?;
    let id = repo.save_restaurant(&mut restaurant)?;
    let index = ws.push(restaurant.clone());

    Ok(CmdResult::default()
        .with_listed_restaurants(vec![ListedRestaurant { index, restaurant }])
        .with_message(CmdMessage::success(format!(
            "Restaurant added ({}): {} [id {}]",
            index,
            name.trim(),
            id
        ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::SessionFixture;
    use crate::error::MenuError;

    #[test]
    fn adds_and_persists() {
        let mut fx = SessionFixture::new();
        let result = run(&mut fx.ws, &mut fx.repo, "Mario's", "89991234567", "Main St 1").unwrap();

        assert_eq!(result.listed_restaurants[0].index, 1);
        assert_eq!(result.listed_restaurants[0].restaurant.id(), Some(1));
        assert_eq!(fx.ws.len(), 1);

        let stored = fx.repo.list_restaurants().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Mario's");
        assert_eq!(stored[0].phone(), "89991234567");
        assert_eq!(stored[0].address, "Main St 1");
    }

    #[test]
    fn invalid_phone_stores_nothing() {
        let mut fx = SessionFixture::new();
        let err = run(&mut fx.ws, &mut fx.repo, "Mario's", "12345", "Main St 1").unwrap_err();

        assert!(matches!(err, MenuError::InvalidPhone(_)));
        assert!(fx.ws.is_empty());
        assert!(fx.repo.list_restaurants().unwrap().is_empty());
    }

    #[test]
    fn failed_write_keeps_working_set_unchanged() {
        let mut fx = SessionFixture::new();
        fx.repo.backend().set_simulate_write_error(true);

        assert!(run(&mut fx.ws, &mut fx.repo, "Mario's", "89991234567", "Main").is_err());
        assert!(fx.ws.is_empty());
    }
}
