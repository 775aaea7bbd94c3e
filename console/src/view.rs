//! The console's view state: everything a host needs to draw the page.
//!
//! Controllers share one [`Document`] through a [`ViewHandle`] and mutate it
//! in place. Borrows are always released before awaiting network calls.

use std::cell::RefCell;
use std::rc::Rc;

use common::models::Theme;

use crate::entity::EntityKind;
use crate::forms::{CreateForm, FormFields};

pub type ViewHandle = Rc<RefCell<Document>>;

/// Which of the two static pages is hosting the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPage {
    /// `/`: tables, with the login/register panel on the same page.
    Index,
    /// `/dashboard`: list layout, no auth panel of its own.
    Dashboard,
}

impl HostPage {
    pub fn slug(self) -> &'static str {
        match self {
            HostPage::Index => "index",
            HostPage::Dashboard => "dashboard",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "index" => Some(HostPage::Index),
            "dashboard" => Some(HostPage::Dashboard),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            HostPage::Index => "/",
            HostPage::Dashboard => "/dashboard",
        }
    }

    /// Where the login form lives.
    pub fn login_location(self) -> &'static str {
        HostPage::Index.path()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopView {
    Auth,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthPanel {
    pub form: AuthForm,
    pub login_message: Option<Message>,
    pub register_message: Option<Message>,
}

#[derive(Debug, Clone)]
pub struct NavButton {
    pub section: EntityKind,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: EntityKind,
    pub visible: bool,
    pub container: Container,
}

/// Opaque payload cell of a conversation log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Missing,
    /// Not structured: first N characters, `...` when cut.
    Preview(String),
    /// Parsed and pretty-printed; collapsed until toggled.
    Structured { pretty: String, expanded: bool },
}

impl Payload {
    pub fn toggle_label(&self) -> Option<&'static str> {
        match self {
            Payload::Structured { expanded: false, .. } => Some("View Details"),
            Payload::Structured { expanded: true, .. } => Some("Hide Details"),
            _ => None,
        }
    }

    fn toggle(&mut self) -> Option<&'static str> {
        if let Payload::Structured { expanded, .. } = self {
            *expanded = !*expanded;
        }
        self.toggle_label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField {
    Request,
    Response,
}

impl PayloadField {
    pub fn label(self) -> &'static str {
        match self {
            PayloadField::Request => "Request",
            PayloadField::Response => "Response",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            PayloadField::Request => "request",
            PayloadField::Response => "response",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "request" => Some(PayloadField::Request),
            "response" => Some(PayloadField::Response),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Payload(Payload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub label: &'static str,
    pub value: CellValue,
}

impl Cell {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: CellValue::Text(value.into()),
        }
    }

    pub fn payload(label: &'static str, payload: Payload) -> Self {
        Self {
            label,
            value: CellValue::Payload(payload),
        }
    }
}

/// One rendered record. `key` is the record id, carried as `data-id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContainerContent {
    Idle,
    Loading,
    LoginRequired(String),
    Empty(String),
    Failed(String),
    Rows(Vec<Row>),
}

#[derive(Debug, Clone)]
pub struct Container {
    pub content: ContainerContent,
    /// Collection size reported by the backend, when it sends one.
    pub total: Option<i64>,
    delete_binding: Option<EntityKind>,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            content: ContainerContent::Idle,
            total: None,
            delete_binding: None,
        }
    }
}

impl Container {
    pub fn replace(&mut self, content: ContainerContent) {
        self.content = content;
    }

    /// Installs the container-level delete listener. Returns `false` when one
    /// is already bound; renders never rebind.
    pub fn bind_delete(&mut self, kind: EntityKind) -> bool {
        if self.delete_binding.is_some() || !kind.is_deletable() {
            return false;
        }
        self.delete_binding = Some(kind);
        true
    }

    pub fn delete_binding(&self) -> Option<EntityKind> {
        self.delete_binding
    }

    /// Row ids a click can currently resolve to a delete action.
    pub fn delete_targets(&self) -> Vec<&str> {
        match (&self.content, self.delete_binding) {
            (ContainerContent::Rows(rows), Some(_)) => {
                rows.iter().map(|r| r.key.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        match &self.content {
            ContainerContent::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows().iter().find(|r| r.key == key)
    }

    /// Flips one payload cell between collapsed and expanded. Returns the
    /// toggle's new label, or `None` when there is nothing to toggle.
    pub fn toggle_payload(&mut self, key: &str, field: PayloadField) -> Option<&'static str> {
        let ContainerContent::Rows(rows) = &mut self.content else {
            return None;
        };
        let cell = rows
            .iter_mut()
            .find(|r| r.key == key)?
            .cells
            .iter_mut()
            .find(|c| c.label == field.label())?;
        match &mut cell.value {
            CellValue::Payload(payload) => payload.toggle(),
            CellValue::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A `<select>` whose options come from a related collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    /// First, empty-valued option ("Loading providers...", "Select a Provider").
    pub placeholder: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalBody {
    pub form: CreateForm,
    pub select: Option<SelectControl>,
    /// Input kept from a rejected submit, drawn back into the fields.
    pub values: FormFields,
}

impl ModalBody {
    pub fn new(form: CreateForm, select: Option<SelectControl>) -> Self {
        Self {
            form,
            select,
            values: FormFields::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Modal {
    pub visible: bool,
    pub title: String,
    pub body: Option<ModalBody>,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub page: HostPage,
    pub top: TopView,
    pub auth: AuthPanel,
    pub nav: Vec<NavButton>,
    pub sections: Vec<Section>,
    pub modal: Modal,
    /// Blocking notices raised since the page was drawn, oldest first.
    pub notices: Vec<Message>,
    pub theme: Theme,
    /// Pending full-page navigation.
    pub location: Option<String>,
}

impl Document {
    pub fn new(page: HostPage) -> Self {
        let first = EntityKind::ALL[0];
        Self {
            page,
            top: TopView::Auth,
            auth: AuthPanel {
                form: AuthForm::Login,
                login_message: None,
                register_message: None,
            },
            nav: EntityKind::ALL
                .into_iter()
                .map(|section| NavButton {
                    section,
                    active: section == first,
                })
                .collect(),
            sections: EntityKind::ALL
                .into_iter()
                .map(|id| Section {
                    id,
                    visible: id == first,
                    container: Container::default(),
                })
                .collect(),
            modal: Modal::default(),
            notices: Vec::new(),
            theme: Theme::default(),
            location: None,
        }
    }

    pub fn into_handle(self) -> ViewHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn show_auth(&mut self) {
        self.top = TopView::Auth;
    }

    pub fn show_main(&mut self) {
        self.top = TopView::Main;
    }

    pub fn notify(&mut self, tone: Tone, text: impl Into<String>) {
        self.notices.push(Message::new(tone, text));
    }

    pub fn section(&self, id: EntityKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn container(&self, id: EntityKind) -> Option<&Container> {
        self.section(id).map(|s| &s.container)
    }

    pub fn container_mut(&mut self, id: EntityKind) -> Option<&mut Container> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.container)
    }

    pub fn visible_sections(&self) -> Vec<EntityKind> {
        self.sections
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.id)
            .collect()
    }

    pub fn active_nav(&self) -> Vec<EntityKind> {
        self.nav
            .iter()
            .filter(|b| b.active)
            .map(|b| b.section)
            .collect()
    }
}
