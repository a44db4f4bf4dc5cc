use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lifecycle::{ApplicationAction, Transition, TransitionError};

/// Identifier wrapper for tracked applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle position of an application. Transitions are defined in [`super::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Awaiting,
    Accepted,
    Rejected,
    Confirmed,
    Declined,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Awaiting,
            Self::Accepted,
            Self::Rejected,
            Self::Confirmed,
            Self::Declined,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Awaiting => "awaiting",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Awaiting => "Awaiting Response",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Confirmed => "Internship Confirmed",
            Self::Declined => "Internship Declined",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Confirmed | Self::Declined)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "awaiting" | "esperando" => Ok(Self::Awaiting),
            "accepted" | "aceptada" => Ok(Self::Accepted),
            "rejected" | "rechazada" => Ok(Self::Rejected),
            "confirmed" | "confirmada" => Ok(Self::Confirmed),
            "declined" | "declinada" => Ok(Self::Declined),
            _ => Err(ParseQueryError::Status(s.to_string())),
        }
    }
}

/// A student's candidacy for one offer.
///
/// Fields are read-only from outside the module; a record only changes by
/// [`Application::apply`], which returns a new snapshot and leaves `self` intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    id: ApplicationId,
    company: String,
    position: String,
    status: ApplicationStatus,
    application_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl Application {
    /// A freshly submitted application awaiting the company's answer.
    pub fn new(
        id: ApplicationId,
        company: impl Into<String>,
        position: impl Into<String>,
        application_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            company: company.into(),
            position: position.into(),
            status: ApplicationStatus::Awaiting,
            application_date,
            response_date: None,
            comment: None,
        }
    }

    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn application_date(&self) -> NaiveDate {
        self.application_date
    }

    pub fn response_date(&self) -> Option<NaiveDate> {
        self.response_date
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Actions the current status admits; presentation layers render only these.
    pub fn allowed_actions(&self) -> Vec<ApplicationAction> {
        self.status.allowed_actions()
    }

    /// Produce the snapshot that results from `transition`.
    pub fn apply(&self, transition: Transition) -> Result<Self, TransitionError> {
        let status = self.status.transition(transition.action())?;
        let mut next = self.clone();
        next.status = status;

        match transition {
            Transition::Accept { responded_on } => {
                next.response_date = Some(responded_on);
            }
            Transition::Reject {
                responded_on,
                comment,
            } => {
                next.response_date = Some(responded_on);
                next.comment = comment
                    .map(|text| text.trim().to_string())
                    .filter(|text| !text.is_empty());
            }
            Transition::Confirm | Transition::Decline => {}
        }

        Ok(next)
    }
}

/// Submission payload for a new application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub applied_on: NaiveDate,
}

/// Key used when ordering the application list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    ApplicationDate,
    ResponseDate,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicationDate => "application_date",
            Self::ResponseDate => "response_date",
        }
    }

    /// Missing values are `None`, which orders before any date.
    pub(crate) fn extract(self, application: &Application) -> Option<NaiveDate> {
        match self {
            Self::ApplicationDate => Some(application.application_date),
            Self::ResponseDate => application.response_date,
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "application_date" | "applicationdate" | "applied" => Ok(Self::ApplicationDate),
            "response_date" | "responsedate" | "responded" => Ok(Self::ResponseDate),
            _ => Err(ParseQueryError::SortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseQueryError::SortOrder(s.to_string())),
        }
    }
}

/// Parameters for the application list projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ApplicationQuery {
    /// Build a query from loosely typed input such as URL parameters or CLI flags.
    ///
    /// `all` and `todos` disable status filtering.
    pub fn parse(
        status: Option<&str>,
        sort_key: Option<&str>,
        sort_order: Option<&str>,
    ) -> Result<Self, ParseQueryError> {
        let status: Option<ApplicationStatus> = match status.map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") || raw.eq_ignore_ascii_case("todos") => {
                None
            }
            Some(raw) => Some(raw.parse::<ApplicationStatus>()?),
        };
        let sort_key = sort_key
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        let sort_order = sort_order
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            status,
            sort_key,
            sort_order,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseQueryError {
    #[error("unknown application status '{0}'")]
    Status(String),
    #[error("unknown sort key '{0}', expected application_date or response_date")]
    SortKey(String),
    #[error("unknown sort order '{0}', expected asc or desc")]
    SortOrder(String),
}

/// Per-status tally shown on the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub count: usize,
}
