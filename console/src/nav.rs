use crate::entity::EntityKind;
use crate::view::ViewHandle;

/// Section visibility and nav highlighting. Loading the selected section is
/// the caller's job.
pub struct NavigationController {
    view: ViewHandle,
}

impl NavigationController {
    pub fn new(view: ViewHandle) -> Self {
        Self { view }
    }

    pub fn show_section(&self, id: EntityKind) {
        for section in &mut self.view.borrow_mut().sections {
            section.visible = section.id == id;
        }
    }

    pub fn activate_nav_button(&self, id: EntityKind) {
        for button in &mut self.view.borrow_mut().nav {
            button.active = button.section == id;
        }
    }

    pub fn select(&self, id: EntityKind) {
        log::debug!("showing section {}", id.slug());
        self.show_section(id);
        self.activate_nav_button(id);
    }
}
