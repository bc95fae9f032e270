use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::error::ActionError;

/// Task priority. "None" is represented by `Option::None` on the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Next step in the none → low → medium → high → none cycle
    pub fn cycle(current: Option<Priority>) -> Option<Priority> {
        match current {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => None,
        }
    }

    /// Marker shown in front of the task text
    pub fn marker(self) -> &'static str {
        match self {
            Priority::High => "!!!",
            Priority::Medium => "!!",
            Priority::Low => "!",
        }
    }
}

/// A due date as year, month and day, stored as `YYYY-MM-DD`.
///
/// Dates typed by the user must name a real calendar day. Dates read back
/// from the task file only need three integer components, so a file written
/// by an older, looser version still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct DueDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DueDate {
    /// Parse `Y-M-D` typed by the user. The text must split into exactly
    /// three integer components that name a real calendar day.
    pub fn parse(text: &str) -> Result<DueDate, ActionError> {
        let date = DueDate::from_stored(text)?;
        NaiveDate::from_ymd_opt(date.year, date.month, date.day)
            .map(|_| date)
            .ok_or(ActionError::InvalidDateFormat)
    }

    /// Parse `Y-M-D` from the task file: three integer components, no
    /// calendar check.
    pub fn from_stored(text: &str) -> Result<DueDate, ActionError> {
        let parts: Vec<&str> = text.trim().split('-').collect();
        let [y, m, d] = parts.as_slice() else {
            return Err(ActionError::InvalidDateFormat);
        };
        Ok(DueDate {
            year: y.parse().map_err(|_| ActionError::InvalidDateFormat)?,
            month: m.parse().map_err(|_| ActionError::InvalidDateFormat)?,
            day: d.parse().map_err(|_| ActionError::InvalidDateFormat)?,
        })
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<DueDate> for String {
    fn from(value: DueDate) -> Self {
        value.to_string()
    }
}

/// Read an optional stored due date. A value that is not three integer
/// components is dropped with a warning instead of failing the whole file.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DueDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match DueDate::from_stored(&text) {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            tracing::warn!(due_date = %text, "dropping unreadable due date");
            Ok(None)
        }
    }
}

/// A single task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text
    #[serde(rename = "task")]
    pub text: String,
    pub checked: bool,
    /// Owning context name
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "deserialize_due_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DueDate>,
    /// Tags without the `#` prefix, in insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Task {
    /// Create an unchecked task with no priority, date or tags
    pub fn new(text: impl Into<String>, context: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            checked: false,
            context: context.into(),
            priority: None,
            due_date: None,
            tags: Vec::new(),
        }
    }

    /// Add a tag unless it is already present. Returns true if added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Text with priority marker, due date and tags, as shown in lists
    pub fn display_line(&self) -> String {
        let mut out = String::new();
        if let Some(p) = self.priority {
            out.push_str(p.marker());
            out.push(' ');
        }
        out.push_str(&self.text);
        if let Some(due) = self.due_date {
            out.push_str(&format!(" [Due: {}]", due));
        }
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("#{}", t)).collect();
            out.push_str(&format!(" [{}]", tags.join(", ")));
        }
        out
    }
}

/// The built-in task list used when no task file can be read
pub fn default_tasks() -> Vec<Task> {
    let mut done = Task::new("Task 2", "Personal");
    done.checked = true;
    vec![Task::new("Task 1", "Work"), done, Task::new("Task 3", "Work")]
}
