use serde::{Deserialize, Deserializer, Serialize};

/// A monitored target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Monitor {
    /// Monitor ID
    pub id: u64,
    /// Display name
    pub name: String,
}

/// How a maintenance window is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStrategy {
    /// Activated and deactivated by hand.
    Manual,
    /// A single window between two dates.
    Single,
    /// Repeats every N days.
    RecurringInterval,
    /// Repeats on given weekdays.
    RecurringWeekday,
    /// Repeats on given days of the month.
    RecurringDayOfMonth,
    /// Scheduled by a cron expression.
    Cron,
    /// A strategy this client does not know about.
    #[serde(other)]
    Unknown,
}

/// An existing maintenance window as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    /// Maintenance ID
    pub id: u64,
    /// Title
    pub title: String,
    /// Free-form description. Missing and `null` both read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Whether the window is enabled
    pub active: bool,
    /// Scheduling strategy
    #[serde(default)]
    pub strategy: Option<MaintenanceStrategy>,
    /// Start and end of the window, when the strategy has one
    #[serde(default)]
    pub date_range: Vec<Option<String>>,
    /// Window length in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Timezone the schedule is expressed in
    #[serde(default)]
    pub timezone_option: Option<String>,
}

/// Payload for creating a maintenance window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenance {
    /// Title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Scheduling strategy
    pub strategy: MaintenanceStrategy,
    /// Whether the window is enabled
    pub active: bool,
    /// Interval in days for recurring strategies
    pub interval_day: u32,
    /// Start and end, formatted as `%Y-%m-%d %H:%M:%S`
    pub date_range: [String; 2],
    /// Weekdays for `recurring-weekday`
    pub weekdays: Vec<u8>,
    /// Days of month for `recurring-day-of-month`
    pub days_of_month: Vec<u8>,
    /// Cron expression for `cron`
    pub cron: Option<String>,
    /// Window length in minutes
    pub duration_minutes: u32,
    /// Timezone the schedule is expressed in
    pub timezone_option: String,
}

/// A public status page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusPage {
    /// Status page ID
    pub id: u64,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// Title
    #[serde(default)]
    pub title: String,
}

/// Reference to another record by ID, used by the attach endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdRef {
    /// Referenced ID
    pub id: u64,
}

impl From<u64> for IdRef {
    fn from(id: u64) -> Self {
        Self { id }
    }
}

/// Result of a username/password login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Logged in; the service issued this session token.
    Token(String),
    /// The account has 2FA enabled and the one-time code is missing.
    TotpRequired,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) token_required: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddMaintenanceResponse {
    #[serde(rename = "maintenanceID")]
    pub(crate) maintenance_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) msg: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
