//! Validation of recovered JSON into plans and draft analyses.
//!
//! The model is only given a schema *description*, so every item is checked
//! here: plan items need a string `command` and an object `params` whose
//! values are scalars; drafts need a string `draft_answer` and string lists.

use crate::core::error::DomainError;
use crate::orchestration::value_objects::DraftAnalysis;
use crate::tool::entities::{Plan, ToolCommand};
use serde_json::{Map, Value, json};

/// Schema description sent with the planning prompt.
pub fn plan_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "command": {"type": "string"},
                "params": {"type": "object"}
            },
            "required": ["command"]
        }
    })
}

/// Schema description sent with the drafting prompt.
pub fn draft_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "draft_answer": {"type": "string"},
            "suggestions": {"type": "array", "items": {"type": "string"}},
            "needs_search": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["draft_answer"]
    })
}

/// Parse recovered values into a [`Plan`].
///
/// The command name is kept verbatim; the allow-list is enforced at
/// dispatch.
pub fn parse_plan(values: &[Value]) -> Result<Plan, DomainError> {
    values
        .iter()
        .enumerate()
        .map(|(index, item)| parse_plan_item(index, item))
        .collect()
}

fn parse_plan_item(index: usize, item: &Value) -> Result<ToolCommand, DomainError> {
    let object = item
        .as_object()
        .ok_or_else(|| DomainError::InvalidPlan(format!("item {} is not an object", index)))?;

    let name = object
        .get("command")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            DomainError::InvalidPlan(format!("item {} has no string 'command'", index))
        })?;

    let mut command = ToolCommand::new(name);

    match object.get("params") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) if items.is_empty() => {}
        Some(Value::Object(params)) => {
            for (key, value) in params {
                let value = param_value_to_string(value).ok_or_else(|| {
                    DomainError::InvalidPlan(format!(
                        "item {} param '{}' must be a string, number, or boolean",
                        index, key
                    ))
                })?;
                if let Some(value) = value {
                    command = command.with_param(key, value);
                }
            }
        }
        Some(_) => {
            return Err(DomainError::InvalidPlan(format!(
                "item {} 'params' is not an object",
                index
            )));
        }
    }

    Ok(command)
}

/// Scalars become strings and null is dropped so a default can fill it.
/// Empty strings are kept. `None` means the value type is not allowed.
fn param_value_to_string(value: &Value) -> Option<Option<String>> {
    match value {
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Null => Some(None),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse recovered values into a [`DraftAnalysis`], using the first value.
pub fn parse_draft(values: &[Value]) -> Result<DraftAnalysis, DomainError> {
    let first = values
        .first()
        .ok_or_else(|| DomainError::InvalidDraft("empty response".to_string()))?;
    let object = first
        .as_object()
        .ok_or_else(|| DomainError::InvalidDraft("response is not an object".to_string()))?;

    let draft_answer = object
        .get("draft_answer")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::InvalidDraft("missing string 'draft_answer'".to_string()))?;

    Ok(DraftAnalysis {
        draft_answer: draft_answer.to_string(),
        suggestions: string_list(object, "suggestions")?,
        needs_search: string_list(object, "needs_search")?,
    })
}

fn string_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, DomainError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()),
        Some(_) => Err(DomainError::InvalidDraft(format!(
            "'{}' is not an array",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_with_location() {
        let values = vec![json!({"command": "weather", "params": {"location": "London"}})];
        let plan = parse_plan(&values).unwrap();
        assert_eq!(
            plan.commands(),
            &[ToolCommand::new("weather").with_param("location", "London")]
        );
    }

    #[test]
    fn test_parse_plan_empty_params() {
        let values = vec![json!({"command": "weather", "params": {}})];
        let plan = parse_plan(&values).unwrap();
        assert_eq!(plan.commands(), &[ToolCommand::new("weather")]);
    }

    #[test]
    fn test_parse_plan_missing_params_is_empty() {
        let plan = parse_plan(&[json!({"command": "help"})]).unwrap();
        assert!(plan.commands()[0].params.is_empty());
    }

    #[test]
    fn test_parse_plan_keeps_unknown_command_names() {
        let plan = parse_plan(&[json!({"command": "shell", "params": {}})]).unwrap();
        assert_eq!(plan.commands()[0].name, "shell");
        assert!(plan.commands()[0].command().is_err());
    }

    #[test]
    fn test_parse_plan_coerces_scalars() {
        let values = vec![json!({
            "command": "search",
            "params": {"query": "rust", "num": 3, "safe": true, "empty": "", "none": null}
        })];
        let plan = parse_plan(&values).unwrap();
        let command = &plan.commands()[0];
        assert_eq!(command.param("num"), Some("3"));
        assert_eq!(command.param("safe"), Some("true"));
        assert_eq!(command.param("empty"), Some(""));
        assert_eq!(command.param("none"), None);
    }

    #[test]
    fn test_parse_plan_accepts_empty_params_list() {
        let values = vec![json!({"command": "weather", "params": []})];
        let plan = parse_plan(&values).unwrap();
        assert!(plan.commands()[0].params.is_empty());
    }

    #[test]
    fn test_parse_plan_rejects_non_empty_params_list() {
        let values = vec![json!({"command": "weather", "params": ["Paris"]})];
        assert!(matches!(
            parse_plan(&values),
            Err(DomainError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_parse_plan_rejects_nested_param() {
        let values = vec![json!({"command": "weather", "params": {"location": {"city": "Rome"}}})];
        assert!(matches!(
            parse_plan(&values),
            Err(DomainError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_parse_plan_rejects_missing_command() {
        let values = vec![json!({"params": {}})];
        let err = parse_plan(&values).unwrap_err();
        assert!(err.to_string().contains("item 0"));
    }

    #[test]
    fn test_parse_plan_rejects_non_object_item() {
        assert!(parse_plan(&[json!("weather")]).is_err());
    }

    #[test]
    fn test_parse_plan_preserves_order() {
        let values = vec![
            json!({"command": "weather", "params": {"location": "Paris"}}),
            json!({"command": "time", "params": {"timezone": "Europe/Paris"}}),
        ];
        let plan = parse_plan(&values).unwrap();
        let names: Vec<_> = plan.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["weather", "time"]);
    }

    #[test]
    fn test_parse_draft() {
        let values = vec![json!({
            "draft_answer": "It will rain.",
            "suggestions": ["Bring an umbrella"],
            "needs_search": ["best compact umbrella", 42, "  "]
        })];
        let draft = parse_draft(&values).unwrap();
        assert_eq!(
            draft,
            DraftAnalysis::new("It will rain.")
                .with_suggestion("Bring an umbrella")
                .with_search("best compact umbrella")
        );
    }

    #[test]
    fn test_parse_draft_missing_lists() {
        let draft = parse_draft(&[json!({"draft_answer": "x"})]).unwrap();
        assert!(draft.suggestions.is_empty());
        assert!(draft.needs_search.is_empty());
    }

    #[test]
    fn test_parse_draft_rejects_missing_answer() {
        let err = parse_draft(&[json!({"suggestions": []})]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDraft(_)));
    }

    #[test]
    fn test_parse_draft_rejects_non_array_list() {
        let err = parse_draft(&[json!({"draft_answer": "x", "needs_search": "weather"})]);
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_draft_empty() {
        assert!(parse_draft(&[]).is_err());
    }

    #[test]
    fn test_schemas_name_required_fields() {
        assert_eq!(plan_schema()["items"]["required"], json!(["command"]));
        assert_eq!(draft_schema()["required"], json!(["draft_answer"]));
    }
}
