use std::cell::RefCell;
use std::collections::HashMap;

use common::config::AppConfig;

/// Client-side persistent key/value storage (the browser's local storage or
/// cookies). Single-threaded, so mutation goes through `&self`.
pub trait ClientStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Fixed keys the console persists under.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    pub token: String,
    pub theme: String,
}

impl StorageKeys {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token: config.token_key.clone(),
            theme: config.theme_key.clone(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            items: RefCell::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }
}

impl ClientStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::with_items([("theme", "dark")]);
        assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
        storage.set_item("jwt_token", "abc");
        assert_eq!(storage.get_item("jwt_token").as_deref(), Some("abc"));
        storage.remove_item("jwt_token");
        assert_eq!(storage.get_item("jwt_token"), None);
    }
}
