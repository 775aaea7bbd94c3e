use std::cell::RefCell;
use std::collections::HashMap;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use console::storage::{ClientStorage, StorageKeys};

/// Client storage backed by the browser's cookies. Reads come from the
/// request; writes are recorded and replayed onto the response.
#[derive(Debug, Default)]
pub struct CookieStorage {
    items: RefCell<HashMap<String, String>>,
    changes: RefCell<Vec<(String, Option<String>)>>,
}

impl CookieStorage {
    pub fn from_request(req: &HttpRequest, keys: &StorageKeys) -> Self {
        let items = [&keys.token, &keys.theme]
            .into_iter()
            .filter_map(|key| req.cookie(key).map(|c| (key.clone(), c.value().to_string())))
            .collect();
        Self {
            items: RefCell::new(items),
            changes: RefCell::default(),
        }
    }

    /// Emits one `Set-Cookie` per key changed during the request, last write wins.
    pub fn apply(&self, resp: &mut HttpResponseBuilder) {
        let changes = self.changes.borrow();
        let mut seen = Vec::new();
        for (key, value) in changes.iter().rev() {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            let mut cookie = Cookie::build(key.clone(), value.clone().unwrap_or_default())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();
            if value.is_none() {
                cookie.make_removal();
            }
            resp.cookie(cookie);
        }
    }
}

impl ClientStorage for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.changes
            .borrow_mut()
            .push((key.to_string(), Some(value.to_string())));
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
        self.changes.borrow_mut().push((key.to_string(), None));
    }
}
