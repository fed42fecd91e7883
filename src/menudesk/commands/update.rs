use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{non_empty, RestaurantUpdate};
use crate::store::{Repository, StorageBackend};
use crate::working_set::{ListedRestaurant, WorkingSet};

/// Applies `update` to the restaurant at `index` and persists it.
///
/// The change is made on a copy; the working set is only updated once the
/// store accepted it.
pub fn run<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    index: usize,
    update: &RestaurantUpdate,
) -> Result<CmdResult> {
    let mut restaurant = ws.restaurant(index)?.clone();
    restaurant.update_info(update)?;
    repo.save_restaurant(&mut restaurant)?;
    ws.replace(index, restaurant.clone())?;

    let mut changed = Vec::new();
    if non_empty(update.name.as_deref()).is_some() {
        changed.push("name");
    }
    if non_empty(update.phone.as_deref()).is_some() {
        changed.push("phone");
    }
    if non_empty(update.address.as_deref()).is_some() {
        changed.push("address");
    }

    let mut result = CmdResult::default();
    if changed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Nothing to change ({}): {}",
            index, restaurant.name
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Updated {} ({}): {}",
            changed.join(", "),
            index,
            restaurant.name
        )));
    }
    Ok(result.with_listed_restaurants(vec![ListedRestaurant { index, restaurant }]))
}
