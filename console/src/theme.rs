use std::rc::Rc;

use common::models::Theme;

use crate::storage::ClientStorage;
use crate::view::ViewHandle;

/// Dark/light preference, persisted in client storage.
pub struct ThemeController {
    storage: Rc<dyn ClientStorage>,
    key: String,
    view: ViewHandle,
}

impl ThemeController {
    pub fn new(storage: Rc<dyn ClientStorage>, key: impl Into<String>, view: ViewHandle) -> Self {
        Self {
            storage,
            key: key.into(),
            view,
        }
    }

    /// A stored preference wins; with none stored, the host's hint decides.
    pub fn init(&self, prefers_dark: bool) -> Theme {
        let theme = match self.storage.get_item(&self.key).as_deref() {
            Some("dark") => Theme::Dark,
            Some(_) => Theme::Light,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        };
        self.apply(theme);
        theme
    }

    pub fn apply(&self, theme: Theme) {
        self.view.borrow_mut().theme = theme;
        self.storage.set_item(&self.key, theme.as_str());
    }

    pub fn toggle(&self) -> Theme {
        let next = self.view.borrow().theme.toggled();
        self.apply(next);
        next
    }
}
