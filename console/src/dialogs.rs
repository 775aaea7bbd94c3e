/// Blocking yes/no prompts owned by the host.
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;
}

/// A confirmation the user already answered before the action reached the
/// console, e.g. a `confirmed` form field set by the browser's prompt.
#[derive(Debug, Clone, Copy)]
pub struct Answered(pub bool);

impl Dialogs for Answered {
    fn confirm(&self, message: &str) -> bool {
        log::debug!("confirm {:?} -> {}", message, self.0);
        self.0
    }
}
