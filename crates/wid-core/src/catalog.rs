//! Task aliases and typical-task descriptions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved task for time that was not spent on anything in particular.
pub const VOID_TASK: &str = "VOID";

/// Recurring weekly meeting ("let" is short for the team's stand-up).
const MEETING_TASK: &str = "PP-2991";

/// Generic tooling / housekeeping task.
const TOOLING_TASK: &str = "WDDADM-3";

/// Fixed lookup tables applied while aggregating a day.
///
/// Keys are canonical (uppercase) task identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCatalog {
    /// Task token to canonical task identifier.
    #[serde(rename = "alias", default)]
    pub aliases: BTreeMap<String, String>,

    /// Typical tasks: their written descriptions are replaced by these.
    #[serde(rename = "description", default)]
    pub typical: BTreeMap<String, String>,

    /// Task excluded from the worked-minutes total.
    #[serde(default = "default_void_task")]
    pub void: String,
}

fn default_void_task() -> String {
    VOID_TASK.to_string()
}

impl Default for TaskCatalog {
    fn default() -> Self {
        let aliases = BTreeMap::from([("LET".to_string(), MEETING_TASK.to_string())]);
        let typical = BTreeMap::from([
            (
                TOOLING_TASK.to_string(),
                "TeamWox / JIRA / Stash / Fisheye".to_string(),
            ),
            (
                MEETING_TASK.to_string(),
                "discussion of completed tasks, problems and questions / stand-up".to_string(),
            ),
            (VOID_TASK.to_string(), "<not specified>".to_string()),
        ]);

        Self {
            aliases,
            typical,
            void: default_void_task(),
        }
    }
}

impl TaskCatalog {
    /// Resolves an uppercased task token to its canonical identifier.
    pub fn resolve(&self, token: &str) -> String {
        self.aliases
            .get(token)
            .map_or_else(|| token.to_string(), Clone::clone)
    }

    /// Returns the canned description when `task` is a typical task.
    pub fn typical_description(&self, task: &str) -> Option<&str> {
        self.typical.get(task).map(String::as_str)
    }

    /// Whether `task` is the reserved "unspecified work" task.
    pub fn is_void(&self, task: &str) -> bool {
        self.void == task
    }
}
