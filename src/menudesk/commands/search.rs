use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::working_set::WorkingSet;

/// Restaurants whose name or address contains `term`, ignoring case.
/// Results keep their working-set index so they can be selected afterwards.
pub fn run(ws: &WorkingSet, term: &str) -> Result<CmdResult> {
    let term = term.trim();
    let found: Vec<_> = ws
        .listed()
        .into_iter()
        .filter(|lr| lr.restaurant.matches(term))
        .collect();

    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("Nothing found for '{}'", term)));
    }
    Ok(result.with_listed_restaurants(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::SessionFixture;

    fn fixture() -> SessionFixture {
        SessionFixture::new()
            .with_restaurant("Mario's", "89991234567", "Main St 1")
            .with_restaurant("Luigi's", "9991234567", "Mario Avenue 5")
            .with_restaurant("Peach", "+79991234567", "Castle Rd")
    }

    #[test]
    fn matches_name_or_address() {
        let fx = fixture();
        let result = run(&fx.ws, "MARIO").unwrap();
        let indexes: Vec<_> = result.listed_restaurants.iter().map(|lr| lr.index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn no_match_reports_message() {
        let fx = fixture();
        let result = run(&fx.ws, "bowser").unwrap();
        assert!(result.listed_restaurants.is_empty());
        assert!(result.messages[0].content.contains("bowser"));
    }

    #[test]
    fn empty_term_matches_everything() {
        let fx = fixture();
        assert_eq!(run(&fx.ws, "  ").unwrap().listed_restaurants.len(), 3);
    }
}
