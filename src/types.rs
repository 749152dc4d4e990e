use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// Reads a missing or `null` enum-like field as its default (`Unknown`).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Tabled)]
pub struct ClientTableRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub company: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }

    /// Parses a user-supplied filter such as `open` or `in-progress`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    pub fn as_query(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Resolved => "RESOLVED",
            TicketStatus::Closed => "CLOSED",
            TicketStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
            TicketStatus::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TicketPriority {
    /// Urgency rank, higher is more urgent. `Unknown` ranks below `Low`.
    pub fn rank(&self) -> u8 {
        match self {
            TicketPriority::Unknown => 0,
            TicketPriority::Low => 1,
            TicketPriority::Medium => 2,
            TicketPriority::High => 3,
            TicketPriority::Critical => 4,
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
            TicketPriority::Critical => "Critical",
            TicketPriority::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TicketStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: TicketPriority,
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub technician_id: Option<u64>,
    #[serde(default)]
    pub required_skill: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    /// Overdue flag computed by the server, when it sends one.
    #[serde(default)]
    pub overdue: Option<bool>,
}

impl Ticket {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn is_assigned(&self) -> bool {
        self.technician_id.is_some()
    }

    /// The server flag wins; otherwise an open ticket past its due date is overdue.
    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        if let Some(flag) = self.overdue {
            return flag;
        }
        match self.due_date {
            Some(due) => self.is_open() && due < now,
            None => false,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Local::now().naive_local())
    }
}

#[derive(Tabled)]
pub struct TicketTableRow {
    pub id: u64,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub technician: String,
    pub due: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub current_workload: u32,
    #[serde(default)]
    pub max_workload: u32,
}

fn default_true() -> bool {
    true
}

impl Technician {
    pub fn is_available(&self) -> bool {
        self.active && self.current_workload < self.max_workload
    }

    pub fn workload_percent(&self) -> u32 {
        if self.max_workload == 0 {
            return 0;
        }
        self.current_workload * 100 / self.max_workload
    }
}

#[derive(Tabled)]
pub struct TechnicianTableRow {
    pub id: u64,
    pub name: String,
    pub skills: String,
    pub workload: String,
    pub available: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    #[serde(default)]
    pub ticket_id: Option<u64>,
    #[serde(default)]
    pub technician_id: Option<u64>,
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub location: Option<String>,
}

impl Appointment {
    pub fn is_upcoming_at(&self, now: NaiveDateTime) -> bool {
        self.status == AppointmentStatus::Scheduled && self.scheduled_at > now
    }
}

#[derive(Tabled)]
pub struct AppointmentTableRow {
    pub id: u64,
    pub scheduled: String,
    pub minutes: u32,
    pub ticket: String,
    pub technician: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketStatistics {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub closed: u64,
    pub overdue: u64,
    pub average_resolution_hours: Option<f64>,
}

impl TicketStatistics {
    /// Share of tickets that reached resolved or closed, in percent.
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.resolved + self.closed) as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientStatistics {
    pub total: u64,
    pub active: u64,
    pub new_this_month: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicianStatistics {
    pub total: u64,
    pub active: u64,
    pub available: u64,
    pub average_workload: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentStatistics {
    pub total: u64,
    pub scheduled: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub upcoming: u64,
}

/// Aggregate of the four statistics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatistics {
    pub tickets: TicketStatistics,
    pub clients: ClientStatistics,
    pub technicians: TechnicianStatistics,
    pub appointments: AppointmentStatistics,
}

#[derive(Tabled)]
pub struct StatisticTableRow {
    pub area: String,
    pub metric: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCoverage {
    pub skill: String,
    #[serde(default)]
    pub technician_count: u32,
    #[serde(default)]
    pub open_ticket_count: u32,
}

impl SkillCoverage {
    pub fn is_understaffed(&self) -> bool {
        self.technician_count == 0 || self.technician_count < self.open_ticket_count
    }
}

#[derive(Tabled)]
pub struct SkillCoverageTableRow {
    pub skill: String,
    pub technicians: u32,
    pub open_tickets: u32,
    pub coverage: String,
}
