use crate::error::{MenuError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:8[0-9]{10}|\+7[0-9]{10}|[0-9]{10})$")
        .expect("phone pattern is a valid regex")
});

/// Checks a phone number against the accepted shapes:
/// `8` + 10 digits, `+7` + 10 digits, or 10 bare digits.
///
/// The whole string must match; surrounding whitespace is not trimmed.
pub fn validate_phone(raw: &str) -> Result<()> {
    if PHONE_PATTERN.is_match(raw) {
        Ok(())
    } else {
        Err(MenuError::InvalidPhone(raw.to_string()))
    }
}

/// Coerces user input into a price.
pub fn parse_price(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MenuError::InvalidPrice(raw.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(MenuError::InvalidPrice(raw.to_string()));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Other(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        if value == "admin" {
            Role::Admin
        } else {
            Role::Other(value.to_string())
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// The result of a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: u32,
    pub role: Role,
}

/// A menu item. Products only exist under a saved restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub(crate) id: Option<u32>,
    restaurant_id: u32,
    pub name: String,
    price: f64,
    status: bool,
}

impl Product {
    pub fn new(restaurant_id: u32, name: impl Into<String>, price: f64) -> Result<Self> {
        if !price.is_finite() || price < 0.0 {
            return Err(MenuError::InvalidPrice(price.to_string()));
        }
        Ok(Self {
            id: None,
            restaurant_id,
            name: name.into(),
            price,
            status: true,
        })
    }

    pub(crate) fn from_parts(
        id: u32,
        restaurant_id: u32,
        name: String,
        price: f64,
        status: bool,
    ) -> Self {
        Self {
            id: Some(id),
            restaurant_id,
            name,
            price,
            status,
        }
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn restaurant_id(&self) -> u32 {
        self.restaurant_id
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn is_available(&self) -> bool {
        self.status
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parses and applies a new price. On failure the current price is kept.
    pub fn update_price(&mut self, raw: &str) -> Result<f64> {
        let price = parse_price(raw)?;
        self.price = price;
        Ok(price)
    }

    /// Flips availability and returns the new status.
    pub fn toggle_status(&mut self) -> bool {
        self.status = !self.status;
        self.status
    }

    pub fn status_label(&self) -> &'static str {
        if self.status {
            "available"
        } else {
            "unavailable"
        }
    }

    /// One-line description, e.g. `Pizza - 450.00₽ (available)`.
    pub fn describe(&self, currency: &str) -> String {
        format!(
            "{} - {:.2}{} ({})",
            self.name,
            self.price,
            currency,
            self.status_label()
        )
    }
}

/// Field changes for a restaurant. `None` or empty strings leave a field as is.
#[derive(Debug, Clone, Default)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl RestaurantUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }
}

/// `None` for absent or whitespace-only input.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// A restaurant and its in-memory menu.
///
/// The phone number is private so that every path that sets it goes through
/// [`validate_phone`]; a `Restaurant` with an invalid phone cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub(crate) id: Option<u32>,
    pub name: String,
    phone: String,
    pub address: String,
    pub(crate) menu: Vec<Product>,
}

impl Restaurant {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self> {
        let phone = phone.into();
        validate_phone(&phone)?;
        Ok(Self {
            id: None,
            name: name.into(),
            phone,
            address: address.into(),
            menu: Vec::new(),
        })
    }

    pub(crate) fn from_parts(
        id: u32,
        name: String,
        phone: String,
        address: String,
    ) -> Result<Self> {
        let mut restaurant = Self::new(name, phone, address)?;
        restaurant.id = Some(id);
        Ok(restaurant)
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn menu(&self) -> &[Product] {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut [Product] {
        &mut self.menu
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<()> {
        let phone = phone.into();
        validate_phone(&phone)?;
        self.phone = phone;
        Ok(())
    }

    /// Applies every non-blank field of `update`, trimming names and
    /// addresses. The phone is validated before anything is assigned, so a
    /// rejected update changes nothing.
    pub fn update_info(&mut self, update: &RestaurantUpdate) -> Result<()> {
        let phone = non_empty(update.phone.as_deref());
        if let Some(phone) = phone {
            validate_phone(phone)?;
        }
        if let Some(name) = non_empty(update.name.as_deref()) {
            self.name = name.trim().to_string();
        }
        if let Some(phone) = phone {
            self.phone = phone.to_string();
        }
        if let Some(address) = non_empty(update.address.as_deref()) {
            self.address = address.trim().to_string();
        }
        Ok(())
    }

    /// Attaches a product to the in-memory menu. The product must belong to
    /// this restaurant.
    pub fn add_product(&mut self, product: Product) -> Result<()> {
        match self.id {
            Some(id) if id == product.restaurant_id => {
                self.menu.push(product);
                Ok(())
            }
            _ => Err(MenuError::Api(format!(
                "Product '{}' does not belong to restaurant '{}'",
                product.name, self.name
            ))),
        }
    }

    /// `name - address`, as shown in lists.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.name, self.address)
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.address.to_lowercase().contains(&term)
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Restaurant: {}", self.name)?;
        writeln!(f, "Address: {}", self.address)?;
        write!(f, "Phone: {}", self.phone)
    }
}
