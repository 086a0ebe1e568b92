// src/server/protocol.rs

use serde::{Deserialize, Serialize};

use crate::task::{AssetCatalog, Priority, Task};

/// One inbound command, tagged by `cmd`.
///
/// ```json
/// {"cmd": "text", "text": "HELLO", "font": "helvetica", "priority": "high"}
/// {"cmd": "animation", "name": "fire"}
/// {"cmd": "emoji", "id": 42}
/// {"cmd": "stop"}
/// ```
///
/// Unknown fields are ignored; missing parameters resolve to documented
/// defaults downstream, so a sloppy client never sees an error for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Command {
    Text {
        #[serde(default)]
        text: String,
        /// Accepts the older `fontName` spelling as well.
        #[serde(default, alias = "fontName")]
        font: Option<String>,
    },
    Animation {
        #[serde(default)]
        name: Option<String>,
    },
    Emoji {
        /// Wider than the valid id range on purpose: out-of-range values
        /// are clamped to the default rather than rejected at parse time.
        #[serde(default)]
        id: Option<i64>,
    },
    Rain {
        #[serde(default)]
        duration: Option<u64>,
    },
    Perlin {
        #[serde(default)]
        duration: Option<u64>,
    },
    Stop,
    Hello,
}

/// Full inbound line: a command plus the optional priority hint.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(flatten)]
    pub command: Command,
    #[serde(default)]
    pub priority: Option<String>,
}

/// What the listener should do with a parsed submission.
#[derive(Debug)]
pub enum Request {
    Submit { task: Task, priority: Priority },
    Stop,
    Hello,
}

impl Submission {
    /// Resolve the submission into a runtime request, filling defaults from
    /// the asset catalog.
    pub fn into_request(self, catalog: &AssetCatalog) -> Request {
        let priority = Priority::from_hint(self.priority.as_deref());

        let task = match self.command {
            Command::Text { text, font } => Task::text(text, font.as_deref(), catalog),
            Command::Animation { name } => Task::animation(name.as_deref(), catalog),
            Command::Emoji { id } => {
                Task::emoji(id.and_then(|v| u32::try_from(v).ok()), catalog)
            }
            Command::Rain { duration } => Task::rain(duration),
            Command::Perlin { duration } => Task::perlin(duration),
            Command::Stop => return Request::Stop,
            Command::Hello => return Request::Hello,
        };

        Request::Submit { task, priority }
    }
}

/// One outbound line, tagged by `event`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ServerEvent {
    Idle,
}

impl ServerEvent {
    /// Serialize as a single wire line, newline included.
    pub fn to_line(self) -> String {
        // Serialization of a fieldless tagged enum cannot fail.
        let mut line = serde_json::to_string(&self).unwrap_or_default();
        line.push('\n');
        line
    }
}
