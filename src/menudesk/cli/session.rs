//! The interactive session: login, then a line-oriented menu loop.
//!
//! Generic over input and output so tests can drive it with in-memory buffers.

use super::print::{print_details, print_error, print_menu, print_messages, print_restaurants};
use colored::Colorize;
use menudesk::api::{CmdResult, MenuApi, ProductUpdate};
use menudesk::error::MenuError;
use menudesk::model::{parse_price, validate_phone, RestaurantUpdate};
use menudesk::store::StorageBackend;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Why the menu loop stopped early.
#[derive(Debug)]
enum Interrupt {
    /// Input closed; treated like choosing "exit".
    EndOfInput,
    Fatal(MenuError),
}

impl From<MenuError> for Interrupt {
    fn from(err: MenuError) -> Self {
        Interrupt::Fatal(err)
    }
}

impl From<io::Error> for Interrupt {
    fn from(err: io::Error) -> Self {
        Interrupt::Fatal(MenuError::Io(err))
    }
}

type Flow<T> = std::result::Result<T, Interrupt>;

pub struct Session<'a, B: StorageBackend, R: BufRead, W: Write> {
    api: &'a mut MenuApi<B>,
    input: R,
    out: W,
    currency: String,
}

impl<'a, B: StorageBackend, R: BufRead, W: Write> Session<'a, B, R, W> {
    pub fn new(api: &'a mut MenuApi<B>, input: R, out: W, currency: impl Into<String>) -> Self {
        Self {
            api,
            input,
            out,
            currency: currency.into(),
        }
    }

    /// Runs login and then the main menu until the user exits.
    /// Only storage failures are returned as errors.
    pub fn run(mut self) -> Result<(), MenuError> {
        let outcome = match self.login() {
            Ok(true) => self.main_menu(),
            Ok(false) => Ok(()),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) | Err(Interrupt::EndOfInput) => {
                writeln!(self.out, "Goodbye")?;
                Ok(())
            }
            Err(Interrupt::Fatal(e)) => Err(e),
        }
    }

    fn prompt(&mut self, label: &str) -> Flow<String> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn confirm(&mut self, label: &str) -> Flow<bool> {
        let answer = self.prompt(label)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn error(&mut self, message: impl std::fmt::Display) -> Flow<()> {
        print_error(&mut self.out, message)?;
        Ok(())
    }

    /// Prints the outcome of a command. Recoverable errors are shown and
    /// yield `None`; storage errors end the session.
    fn report(&mut self, result: Result<CmdResult, MenuError>) -> Flow<Option<CmdResult>> {
        match result {
            Ok(result) => {
                print_messages(&mut self.out, &result.messages)?;
                Ok(Some(result))
            }
            Err(e) if e.is_fatal() => Err(Interrupt::Fatal(e)),
            Err(e) => {
                self.error(&e)?;
                Ok(None)
            }
        }
    }

    fn login(&mut self) -> Flow<bool> {
        loop {
            let username = self.prompt("Username: ")?;
            let password = self.prompt("Password: ")?;
            match self.api.login(&username, &password)? {
                Some(identity) => {
                    info!(user = identity.id, role = %identity.role, "logged in");
                    writeln!(
                        self.out,
                        "{}",
                        format!("Welcome, {} ({})", username.trim(), identity.role).green()
                    )?;
                    return Ok(true);
                }
                None => {
                    self.error("Invalid username or password")?;
                    if !self.confirm("Try again? (y/n): ")? {
                        return Ok(false);
                    }
                }
            }
        }
    }

    fn main_menu(&mut self) -> Flow<()> {
        loop {
            writeln!(self.out, "\n{}", "Main menu:".bold())?;
            writeln!(self.out, "1. Add restaurant")?;
            writeln!(self.out, "2. Edit restaurant")?;
            writeln!(self.out, "3. Edit menu")?;
            writeln!(self.out, "4. List restaurants")?;
            writeln!(self.out, "5. Restaurant details")?;
            writeln!(self.out, "6. Search restaurants")?;
            writeln!(self.out, "7. Exit")?;

            let choice = self.prompt("Choose an action: ")?;
            debug!(choice = choice.trim(), "main menu");
            match choice.trim() {
                "1" => self.add_restaurant()?,
                "2" => self.edit_restaurant()?,
                "3" => self.edit_menu()?,
                "4" => self.list_restaurants()?,
                "5" => self.show_details()?,
                "6" => self.search()?,
                "7" => return Ok(()),
                _ => self.error("Invalid choice, try again")?,
            }
        }
    }

    fn add_restaurant(&mut self) -> Flow<()> {
        let name = self.prompt("Restaurant name: ")?;
        let address = self.prompt("Address: ")?;
        let phone = loop {
            let phone = self.prompt("Phone (8XXXXXXXXXX, +7XXXXXXXXXX or XXXXXXXXXX): ")?;
            let phone = phone.trim();
            match validate_phone(phone) {
                Ok(()) => break phone.to_string(),
                Err(e) => self.error(format!("{}. Try again.", e))?,
            }
        };
        let result = self.api.add_restaurant(&name, &phone, &address);
        self.report(result)?;
        Ok(())
    }

    /// Lists restaurants and reads a 1-based choice.
    fn select_restaurant(&mut self, label: &str) -> Flow<Option<usize>> {
        let listed = self.api.working_set().listed();
        if listed.is_empty() {
            writeln!(self.out, "{}", "No restaurants available".dimmed())?;
            return Ok(None);
        }
        print_restaurants(&mut self.out, "Restaurants:", &listed)?;
        self.select_number(label, listed.len(), "Invalid restaurant number")
    }

    fn select_number(
        &mut self,
        label: &str,
        len: usize,
        out_of_range: &str,
    ) -> Flow<Option<usize>> {
        let raw = self.prompt(label)?;
        match raw.trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(Some(n)),
            Ok(_) => {
                self.error(out_of_range)?;
                Ok(None)
            }
            Err(_) => {
                self.error("Enter a number!")?;
                Ok(None)
            }
        }
    }

    fn select_dish(&mut self, label: &str, dishes: usize) -> Flow<Option<usize>> {
        self.select_number(label, dishes, "Invalid dish number")
    }

    fn edit_restaurant(&mut self) -> Flow<()> {
        let Some(index) = self.select_restaurant("Restaurant to edit: ")? else {
            return Ok(());
        };
        let restaurant = self.api.working_set().restaurant(index)?.clone();
        writeln!(self.out, "\nCurrent information:")?;
        writeln!(self.out, "{}", restaurant)?;

        writeln!(self.out, "\nWhat do you want to change?")?;
        writeln!(self.out, "1. Name")?;
        writeln!(self.out, "2. Phone")?;
        writeln!(self.out, "3. Address")?;
        writeln!(self.out, "4. Delete restaurant")?;
        writeln!(self.out, "5. Back")?;

        let choice = self.prompt("Choose an action: ")?;
        match choice.trim() {
            "1" => {
                let name = self.prompt("New name: ")?;
                let result = self.api.update_restaurant(index, &RestaurantUpdate::name(name));
                self.report(result)?;
            }
            "2" => loop {
                let phone = self.prompt("New phone: ")?;
                let result = self
                    .api
                    .update_restaurant(index, &RestaurantUpdate::phone(phone.trim()));
                match result {
                    Err(e @ MenuError::InvalidPhone(_)) => self.error(e)?,
                    other => {
                        self.report(other)?;
                        break;
                    }
                }
            },
            "3" => {
                let address = self.prompt("New address: ")?;
                let result = self
                    .api
                    .update_restaurant(index, &RestaurantUpdate::address(address));
                self.report(result)?;
            }
            "4" => {
                let question = format!(
                    "Delete '{}' and its whole menu? (y/n): ",
                    restaurant.name
                );
                if self.confirm(&question)? {
                    let result = self.api.delete_restaurant(index);
                    self.report(result)?;
                }
            }
            "5" => {}
            _ => self.error("Invalid choice")?,
        }
        Ok(())
    }

    /// Prints the menu of the restaurant at `index`; returns its length.
    fn show_menu(&mut self, index: usize) -> Flow<usize> {
        let restaurant = self.api.working_set().restaurant(index)?.clone();
        let products = self.api.working_set().listed_menu(index)?;
        print_menu(&mut self.out, &restaurant, &products, &self.currency)?;
        Ok(products.len())
    }

    fn edit_menu(&mut self) -> Flow<()> {
        let Some(index) = self.select_restaurant("Restaurant whose menu to edit: ")? else {
            return Ok(());
        };

        loop {
            writeln!(self.out, "\n{}", "Menu editing:".bold())?;
            let dishes = self.show_menu(index)?;

            if dishes == 0 {
                writeln!(self.out, "1. Add dish")?;
                writeln!(self.out, "2. Back")?;
                match self.prompt("Choose an action: ")?.trim() {
                    "1" => self.add_dish(index)?,
                    "2" => return Ok(()),
                    _ => self.error("Invalid choice")?,
                }
                continue;
            }

            writeln!(self.out, "1. Add dish")?;
            writeln!(self.out, "2. Edit dish")?;
            writeln!(self.out, "3. Delete dish")?;
            writeln!(self.out, "4. Toggle dish status")?;
            writeln!(self.out, "5. Back")?;
            match self.prompt("Choose an action: ")?.trim() {
                "1" => self.add_dish(index)?,
                "2" => {
                    if let Some(dish) = self.select_dish("Dish to edit: ", dishes)? {
                        self.edit_dish(index, dish)?;
                    }
                }
                "3" => {
                    if let Some(dish) = self.select_dish("Dish to delete: ", dishes)? {
                        let result = self.api.delete_product(index, dish);
                        self.report(result)?;
                    }
                }
                "4" => {
                    if let Some(dish) = self.select_dish("Dish to toggle: ", dishes)? {
                        let result = self.api.toggle_product(index, dish);
                        self.report(result)?;
                    }
                }
                "5" => return Ok(()),
                _ => self.error("Invalid choice")?,
            }
        }
    }

    fn add_dish(&mut self, index: usize) -> Flow<()> {
        let name = self.prompt("Dish name: ")?;
        let price = loop {
            let price = self.prompt("Dish price: ")?;
            match parse_price(&price) {
                Ok(_) => break price,
                Err(_) => self.error("Price must be a number. Try again.")?,
            }
        };
        let result = self.api.add_product(index, &name, &price);
        self.report(result)?;
        Ok(())
    }

    fn edit_dish(&mut self, index: usize, dish: usize) -> Flow<()> {
        let product = self.api.working_set().product(index, dish)?.clone();
        let name = self.prompt(&format!("New name (current: {}): ", product.name))?;
        let price = self.prompt(&format!("New price (current: {:.2}): ", product.price()))?;

        let result = self
            .api
            .update_product(index, dish, &ProductUpdate::new(name, price));
        match result {
            Err(MenuError::InvalidPrice(_)) => {
                self.error("Price must be a number. Changes not saved.")?
            }
            other => {
                self.report(other)?;
            }
        }
        Ok(())
    }

    fn list_restaurants(&mut self) -> Flow<()> {
        let result = self.api.list_restaurants();
        if let Some(result) = self.report(result)? {
            print_restaurants(&mut self.out, "Restaurants:", &result.listed_restaurants)?;
        }
        Ok(())
    }

    fn show_details(&mut self) -> Flow<()> {
        let Some(index) = self.select_restaurant("Restaurant to view: ")? else {
            return Ok(());
        };
        let result = self.api.view_restaurant(index);
        if let Some(result) = self.report(result)? {
            if let Some(listed) = result.listed_restaurants.first() {
                print_details(&mut self.out, &listed.restaurant)?;
                if !result.listed_products.is_empty() {
                    print_menu(
                        &mut self.out,
                        &listed.restaurant,
                        &result.listed_products,
                        &self.currency,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn search(&mut self) -> Flow<()> {
        let term = self.prompt("Part of a name or address: ")?;
        let result = self.api.search_restaurants(&term);
        if let Some(result) = self.report(result)? {
            print_restaurants(&mut self.out, "Search results:", &result.listed_restaurants)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menudesk::store::mem_backend::MemBackend;
    use menudesk::store::Repository;
    use std::io::Cursor;

    fn drive(backend: &MemBackend, script: &str) -> (Result<(), MenuError>, String) {
        colored::control::set_override(false);
        let mut api = MenuApi::open(backend).unwrap();
        let mut out = Vec::new();
        let result = Session::new(&mut api, Cursor::new(script.to_string()), &mut out, "₽").run();
        (result, String::from_utf8(out).unwrap())
    }

    const LOGIN: &str = "admin\nadmin\n";

    #[test]
    fn declining_retry_after_bad_login_exits_cleanly() {
        let backend = MemBackend::new();
        let (result, out) = drive(&backend, "admin\nwrong\nn\n");
        assert!(result.is_ok());
        assert!(out.contains("Invalid username or password"));
        assert!(!out.contains("Main menu"));
    }

    #[test]
    fn retrying_login_reaches_the_menu() {
        let backend = MemBackend::new();
        let (result, out) = drive(&backend, "nouser\nadmin\ny\nadmin\nadmin\n7\n");
        assert!(result.is_ok());
        assert!(out.contains("Welcome, admin (admin)"));
        assert!(out.contains("Main menu"));
    }

    #[test]
    fn adds_restaurant_after_reprompting_for_phone() {
        let backend = MemBackend::new();
        let script = format!("{LOGIN}1\nMario's\nMain St 1\n123\n89991234567\n4\n7\n");
        let (result, out) = drive(&backend, &script);

        assert!(result.is_ok());
        assert!(out.contains("Invalid phone number: '123'"));
        assert!(out.contains("1. Mario's - Main St 1"));
        let stored = Repository::new(&backend).list_restaurants().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].phone(), "89991234567");
    }

    #[test]
    fn edits_menu_end_to_end() {
        let backend = MemBackend::new();
        let script = format!(
            "{LOGIN}1\nMario's\nMain St 1\n89991234567\n\
             3\n1\n1\nPizza\nabc\n450\n4\n1\n5\n7\n"
        );
        let (result, out) = drive(&backend, &script);

        assert!(result.is_ok());
        assert!(out.contains("Price must be a number. Try again."));
        assert!(out.contains("Pizza - 450.00₽ (available)"));
        assert!(out.contains("Status of Pizza changed to unavailable"));
        let products = Repository::new(&backend).list_products(1).unwrap();
        assert_eq!(products.len(), 1);
        assert!(!products[0].is_available());
    }

    #[test]
    fn invalid_selection_returns_to_main_menu() {
        let backend = MemBackend::new();
        let script = format!("{LOGIN}1\nMario's\nMain\n9991234567\n5\nx\n5\n9\n7\n");
        let (result, out) = drive(&backend, &script);

        assert!(result.is_ok());
        assert!(out.contains("Enter a number!"));
        assert!(out.contains("Invalid restaurant number"));
    }

    #[test]
    fn searches_and_deletes() {
        let backend = MemBackend::new();
        let script = format!(
            "{LOGIN}1\nMario's\nMain St 1\n89991234567\n\
             6\nmain\n\
             2\n1\n4\ny\n\
             4\n7\n"
        );
        let (result, out) = drive(&backend, &script);

        assert!(result.is_ok());
        assert!(out.contains("Search results:"));
        assert!(out.contains("Restaurant deleted"));
        assert!(out.contains("No restaurants yet."));
        assert!(Repository::new(&backend).list_restaurants().unwrap().is_empty());
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let backend = MemBackend::new();
        let (result, out) = drive(&backend, &format!("{LOGIN}1\nMario's\n"));
        assert!(result.is_ok());
        assert!(out.ends_with("Goodbye\n"));
    }

    #[test]
    fn storage_failure_ends_the_session() {
        let backend = MemBackend::new();
        colored::control::set_override(false);
        let mut api = MenuApi::open(&backend).unwrap();
        backend.set_simulate_write_error(true);

        let script = format!("{LOGIN}1\nMario's\nMain\n89991234567\n7\n");
        let mut out = Vec::new();
        let result = Session::new(&mut api, Cursor::new(script), &mut out, "₽").run();

        assert!(matches!(result, Err(MenuError::Io(_))));
    }
}
