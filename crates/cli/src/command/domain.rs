use crate::browse::ViewportClass;
use materials_compare::ComparisonTable;
use materials_protocol::Material;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    List,
    Types,
    Show,
    Search,
    Compare,
    Draft,
    Info,
}

impl CommandAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::List => "list",
            CommandAction::Types => "types",
            CommandAction::Show => "show",
            CommandAction::Search => "search",
            CommandAction::Compare => "compare",
            CommandAction::Draft => "draft",
            CommandAction::Info => "info",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<usize>,
}

pub(crate) fn parse_payload<T: DeserializeOwned>(payload: Value) -> anyhow::Result<T> {
    serde_json::from_value(payload).map_err(|err| anyhow::anyhow!("Invalid payload: {err}"))
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListPayload {
    #[serde(rename = "type")]
    pub material_type: Option<String>,
    pub query: Option<String>,
    /// Number of "Show More" presses
    pub more: usize,
    /// Viewport width; desktop when absent
    pub width: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub viewport: ViewportClass,
    pub page_size: usize,
    pub total: usize,
    pub remaining: usize,
    pub can_show_less: bool,
    pub materials: Vec<Material>,
}

#[derive(Debug, Serialize)]
pub struct TypeCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TypesOutput {
    pub types: Vec<TypeCount>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ShowPayload {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub material: Material,
    pub summary: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchPayload {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub total: usize,
    pub materials: Vec<Material>,
}

/// Either explicit ids (applied in order) or a deep link (store order)
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ComparePayload {
    pub ids: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareOutput {
    pub href: String,
    pub ids: Vec<String>,
    pub unknown: Vec<String>,
    pub table: ComparisonTable,
}

#[derive(Debug, Serialize)]
pub struct DraftOutput {
    pub material: Material,
    pub json: String,
    pub instructions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InfoOutput {
    pub name: String,
    pub version: String,
    pub repository: String,
    pub dataset: String,
    pub materials: usize,
    pub types: usize,
}
