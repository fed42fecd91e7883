use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::working_set::{ListedRestaurant, WorkingSet};

/// One restaurant with its full menu.
pub fn run(ws: &WorkingSet, index: usize) -> Result<CmdResult> {
    let restaurant = ws.restaurant(index)?.clone();
    let menu = ws.listed_menu(index)?;

    let mut result = CmdResult::default();
    if menu.is_empty() {
        result.add_message(CmdMessage::info("The menu is empty."));
    }
    Ok(result
        .with_listed_restaurants(vec![ListedRestaurant { index, restaurant }])
        .with_listed_products(menu))
}
