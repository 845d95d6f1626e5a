pub mod domain;

pub use domain::{CommandAction, CommandRequest, CommandResponse, CommandStatus, ResponseMeta};

use crate::catalog::Catalog;
use anyhow::Result;
use domain::parse_payload;
use serde_json::Value;
use std::time::Instant;

/// Run one JSON Command API request against a loaded catalog.
pub fn execute(catalog: &mut Catalog, request: CommandRequest) -> CommandResponse {
    let started = Instant::now();
    let CommandRequest { action, payload } = request;
    let result = dispatch(catalog, action, payload);

    let meta = ResponseMeta {
        action: Some(action.as_str()),
        duration_ms: Some(started.elapsed().as_millis() as u64),
        dataset: Some(catalog.config().dataset.source.clone()),
        materials: Some(catalog.store().len()),
    };

    match result {
        Ok(data) => CommandResponse {
            status: CommandStatus::Ok,
            message: None,
            data,
            meta,
        },
        Err(err) => {
            log::debug!("Command {} failed: {err:#}", action.as_str());
            CommandResponse {
                status: CommandStatus::Error,
                message: Some(format!("{err:#}")),
                data: Value::Null,
                meta,
            }
        }
    }
}

fn dispatch(catalog: &mut Catalog, action: CommandAction, payload: Value) -> Result<Value> {
    let data = match action {
        CommandAction::List => serde_json::to_value(catalog.list(parse_payload(payload)?))?,
        CommandAction::Types => serde_json::to_value(catalog.types())?,
        CommandAction::Show => serde_json::to_value(catalog.show(parse_payload(payload)?)?)?,
        CommandAction::Search => serde_json::to_value(catalog.search(parse_payload(payload)?))?,
        CommandAction::Compare => serde_json::to_value(catalog.compare(parse_payload(payload)?)?)?,
        CommandAction::Draft => serde_json::to_value(catalog.draft(parse_payload(payload)?)?)?,
        CommandAction::Info => serde_json::to_value(catalog.info())?,
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use materials_store::MaterialStore;
    use serde_json::json;

    fn catalog() -> Catalog {
        let store = MaterialStore::from_json(
            r#"{"materials": [{"name": "Copper", "shortName": "Cu", "type": "Metal"}]}"#,
        )
        .unwrap();
        Catalog::with_store(CatalogConfig::default(), store).unwrap()
    }

    fn request(raw: Value) -> CommandRequest {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn payload_defaults_to_empty_object() {
        let mut catalog = catalog();
        let response = execute(&mut catalog, request(json!({"action": "list"})));
        assert!(!response.is_error());
        assert_eq!(response.data["total"], 1);
        assert_eq!(response.meta.action, Some("list"));
    }

    #[test]
    fn missing_required_payload_field_is_reported() {
        let mut catalog = catalog();
        let response = execute(&mut catalog, request(json!({"action": "show"})));
        assert!(response.is_error());
        assert!(response.message.unwrap().contains("Invalid payload"));
    }

    #[test]
    fn show_uses_assigned_id() {
        let mut catalog = catalog();
        let response = execute(
            &mut catalog,
            request(json!({"action": "show", "payload": {"id": "1"}})),
        );
        assert_eq!(response.data["material"]["shortName"], "Cu");
    }

    #[test]
    fn compare_with_ids_and_link_is_an_error() {
        let mut catalog = catalog();
        let response = execute(
            &mut catalog,
            request(json!({
                "action": "compare",
                "payload": {"ids": ["1"], "link": "/compare?compare=1"}
            })),
        );
        assert!(response.is_error());
        assert!(response.message.unwrap().contains("not both"));
    }

    #[test]
    fn unknown_action_does_not_parse() {
        let parsed: std::result::Result<CommandRequest, _> =
            serde_json::from_value(json!({"action": "delete"}));
        assert!(parsed.is_err());
    }
}
