use crate::error::{MenuError, Result};
use crate::model::Restaurant;

/// The store ID of a restaurant that has already been saved.
pub(crate) fn saved_id(restaurant: &Restaurant) -> Result<u32> {
    restaurant.id().ok_or_else(|| {
        MenuError::Api(format!(
            "Restaurant '{}' has not been saved yet",
            restaurant.name
        ))
    })
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Product, Restaurant};
    use crate::store::mem_backend::MemBackend;
    use crate::store::{CredentialStore, Repository};
    use crate::working_set::WorkingSet;

    /// An initialized in-memory store and a working set loaded from it.
    pub struct SessionFixture {
        pub repo: Repository<MemBackend>,
        pub ws: WorkingSet,
    }

    impl Default for SessionFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SessionFixture {
        pub fn new() -> Self {
            let repo = Repository::new(MemBackend::new());
            CredentialStore::new(repo.backend()).initialize().unwrap();
            Self {
                repo,
                ws: WorkingSet::default(),
            }
        }

        pub fn with_restaurant(mut self, name: &str, phone: &str, address: &str) -> Self {
            let mut restaurant = Restaurant::new(name, phone, address).unwrap();
            self.repo.save_restaurant(&mut restaurant).unwrap();
            self.ws.push(restaurant);
            self
        }

        /// Adds a dish to the most recently added restaurant.
        pub fn with_product(mut self, name: &str, price: f64) -> Self {
            let index = self.ws.len();
            let restaurant = self.ws.restaurant_mut(index).unwrap();
            let mut product = Product::new(restaurant.id().unwrap(), name, price).unwrap();
            self.repo.save_product(&mut product).unwrap();
            restaurant.add_product(product).unwrap();
            self
        }

        /// Reloads the working set from the store, as a new session would.
        pub fn reloaded(&self) -> WorkingSet {
            WorkingSet::new(self.repo.load_working_set().unwrap())
        }
    }
}
