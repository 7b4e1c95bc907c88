use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Review states the homework API can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Parse the wire value of a record's `status` field.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// The fixed verdict sentence announced to the chat for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A homework submission whose fields passed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

/// The validated API response envelope for one poll cycle.
///
/// `homeworks` stays as raw JSON: per-record field checks happen in the
/// formatter so each record failure carries its own tagged error.
#[derive(Debug, Clone)]
pub struct StatusesPage {
    /// Most recent record first; only the first element is reported per cycle.
    pub homeworks: Vec<Value>,
    /// Server-side timestamp used as the next poll cursor.
    pub current_date: i64,
}
