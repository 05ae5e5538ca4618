use serde::{Deserialize, Serialize};
use std::fmt::{Display as FmtDisplay, Formatter, Result as FmtResult};
use strum::{
    AsRefStr, Display, EnumIter, EnumProperty, EnumString, IntoEnumIterator, IntoStaticStr,
};

/// Application name used as the prefix of every document title
pub const APP_TITLE: &str = "CampusFlow";

/// A manageable entity type exposed through uniform list/create/show operations
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumProperty,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    #[strum(props(label = "Home", list = "/"))]
    Dashboard,
    #[strum(props(
        label = "Departments",
        list = "/departments",
        create = "/departments/create",
        show = "/departments/show"
    ))]
    Departments,
    #[strum(props(label = "Subjects", list = "/subjects", create = "/subjects/create"))]
    Subjects,
    #[strum(props(
        label = "Classes",
        list = "/classes",
        create = "/classes/create",
        show = "/classes/show"
    ))]
    Classes,
    #[strum(props(
        label = "Teachers",
        list = "/teachers",
        create = "/teachers/create",
        show = "/teachers/show"
    ))]
    Teachers,
    #[strum(props(
        label = "Students",
        list = "/students",
        create = "/students/create",
        show = "/students/show"
    ))]
    Students,
    #[strum(props(
        label = "Attendance",
        list = "/attendance",
        create = "/attendance/create",
        show = "/attendance/show"
    ))]
    Attendance,
    /// Backend collection behind `teachers`; it has no pages of its own
    #[strum(props(label = "Users"))]
    Users,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Human readable label shown in navigation and titles
    pub fn label(&self) -> &'static str {
        self.get_str("label").unwrap_or_default()
    }

    pub fn list_route(&self) -> Option<&'static str> {
        self.get_str("list")
    }

    pub fn create_route(&self) -> Option<&'static str> {
        self.get_str("create")
    }

    /// Route of the show page for a given record, if the resource has one
    pub fn show_route(&self, id: impl FmtDisplay) -> Option<String> {
        self.get_str("show").map(|base| format!("{base}/{id}"))
    }

    /// Resources that have at least one page in the dashboard
    pub fn navigable() -> Vec<Resource> {
        Resource::iter()
            .filter(|r| r.list_route().is_some())
            .collect()
    }

    pub fn all() -> Vec<Resource> {
        Resource::iter().collect()
    }
}

/// Page action used when computing a document title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    List,
    Create,
    Edit,
    Show,
    Clone,
}

/// Where the user currently is, for title purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'a> {
    Login,
    Resource {
        resource: Resource,
        action: Action,
        id: Option<&'a str>,
    },
    Other,
}

/// Document title for a page, e.g. `CampusFlow - Classes (#4)`
pub fn document_title(page: Page<'_>) -> String {
    match page {
        Page::Login => format!("{APP_TITLE} - Login"),
        Page::Resource {
            resource,
            action: Action::Show,
            id: Some(id),
        } => format!("{APP_TITLE} - {} (#{id})", resource.label()),
        Page::Resource { resource, .. } => format!("{APP_TITLE} - {}", resource.label()),
        Page::Other => APP_TITLE.to_string(),
    }
}

impl FmtDisplay for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", document_title(*self))
    }
}
