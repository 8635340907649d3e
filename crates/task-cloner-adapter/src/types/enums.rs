/*
[INPUT]:  Webhook action names and backend selection
[OUTPUT]: Typed enums with serialization support
[POS]:    Data layer - type definitions for webhook communication
[UPDATE]: When new webhook actions are added
*/

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookAction {
    ImportTask,
    CreateTask,
}

impl WebhookAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookAction::ImportTask => "import_task",
            WebhookAction::CreateTask => "create_task",
        }
    }
}

impl fmt::Display for WebhookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
