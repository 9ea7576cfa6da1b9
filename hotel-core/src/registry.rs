use std::collections::HashMap;
use std::sync::Arc;

use crate::HotelService;

/// Maps service names ("room", "booking", ...) to service instances.
pub struct HotelServiceRegistry<R, P = ()> {
    services: HashMap<String, Arc<dyn HotelService<R, P>>>,
}

impl<R, P> HotelServiceRegistry<R, P> {
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Register a service under a given name. A second registration
    /// under the same name replaces the first.
    pub fn register<S>(&mut self, name: S, service: Arc<dyn HotelService<R, P>>)
    where
        S: Into<String>,
    {
        self.services.insert(name.into(), service);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn HotelService<R, P>>> {
        self.services.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(|s| s.as_str())
    }
}

impl<R, P> Default for HotelServiceRegistry<R, P> {
    fn default() -> Self {
        Self::new()
    }
}
