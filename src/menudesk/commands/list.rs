use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::working_set::WorkingSet;

pub fn run(ws: &WorkingSet) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_listed_restaurants(ws.listed());
    if ws.is_empty() {
        result.add_message(CmdMessage::info("No restaurants yet."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::SessionFixture;

    #[test]
    fn lists_in_working_set_order() {
        let fx = SessionFixture::new()
            .with_restaurant("B", "89991234567", "x")
            .with_restaurant("A", "9991234567", "y");

        let result = run(&fx.ws).unwrap();
        let names: Vec<_> = result
            .listed_restaurants
            .iter()
            .map(|lr| lr.restaurant.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_set_has_a_message() {
        let fx = SessionFixture::new();
        let result = run(&fx.ws).unwrap();
        assert!(result.listed_restaurants.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
