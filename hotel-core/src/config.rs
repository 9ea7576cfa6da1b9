//! # Configuration
//!
//! A minimal string key/value store, set and read through
//! `HotelApp::set` / `HotelApp::get`:
//!
//! ```rust
//! use hotel_core::HotelApp;
//! let app = HotelApp::<(), ()>::new();
//!
//! app.set("http.port", "3000");
//!
//! assert_eq!(app.get("http.port"), Some("3000".to_string()));
//! ```
//!
//! Loading from the environment is left to the application, which
//! maps variables such as `HOTEL__HTTP__PORT` onto dotted keys
//! (`http.port`) before the server starts. Hooks receive a
//! [`HotelConfigSnapshot`] taken at call time.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct HotelConfig {
    values: HashMap<String, String>,
}

impl HotelConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn snapshot(&self) -> HotelConfigSnapshot {
        HotelConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HotelConfigSnapshot {
    map: HashMap<String, String>,
}

impl HotelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }
}
