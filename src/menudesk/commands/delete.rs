use crate::commands::helpers::saved_id;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Repository, StorageBackend};
use crate::working_set::WorkingSet;

/// Deletes the restaurant at `index` together with its whole menu.
pub fn run<B: StorageBackend>(
    ws: &mut WorkingSet,
    repo: &mut Repository<B>,
    index: usize,
) -> Result<CmdResult> {
    let restaurant = ws.restaurant(index)?;
    let id = saved_id(restaurant)?;
    let dishes = restaurant.menu().len();

    let existed = repo.delete_restaurant(id)?;
    let removed = ws.remove(index)?;

    let mut result = CmdResult::default();
    if existed {
        result.add_message(CmdMessage::success(format!(
            "Restaurant deleted ({}): {} ({} dishes removed)",
            index, removed.name, dishes
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Restaurant '{}' was already gone from the store",
            removed.name
        )));
    }
    Ok(result)
}
