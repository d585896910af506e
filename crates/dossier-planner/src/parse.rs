//! Parse and validate generated plans
//!
//! Generation output is loosely shaped: intents may be bare strings or
//! objects, and fields may be missing. Parsing validates everything into a
//! typed [`Plan`] or returns an error so the caller can fall back.

use dossier_domain::{Intent, Plan, TimeSensitivity};
use dossier_llm::parse_json_block;
use serde_json::Value;

/// Parse a generated response into a validated [`Plan`].
pub fn parse_plan(response: &str) -> Result<Plan, String> {
    let json = parse_json_block(response).map_err(|e| format!("plan response: {}", e))?;

    let obj = json.as_object().ok_or("plan is not a JSON object")?;

    let raw_intents = obj
        .get("intents")
        .and_then(|v| v.as_array())
        .ok_or("missing 'intents' array")?;

    let mut intents = Vec::with_capacity(raw_intents.len());
    for raw in raw_intents {
        intents.push(parse_intent(raw)?);
    }

    let must_include = obj
        .get("must_include")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let time_sensitivity = match obj.get("time_sensitivity") {
        None | Some(Value::Null) => TimeSensitivity::None,
        Some(Value::String(s)) => match s.as_str() {
            "none" => TimeSensitivity::None,
            "recent" => TimeSensitivity::Recent,
            "current" => TimeSensitivity::Current,
            other => return Err(format!("unknown time_sensitivity: {:?}", other)),
        },
        Some(other) => return Err(format!("time_sensitivity is not a string: {}", other)),
    };

    let plan = Plan {
        intents,
        must_include,
        time_sensitivity,
    };
    plan.validate()?;
    Ok(plan)
}

/// An intent is either a bare query string or a `{query, rationale}` object.
fn parse_intent(raw: &Value) -> Result<Intent, String> {
    match raw {
        Value::String(query) => Ok(Intent::new(query.trim())),
        Value::Object(obj) => {
            let query = obj
                .get("query")
                .and_then(|v| v.as_str())
                .ok_or("intent object missing 'query'")?;
            let rationale = obj
                .get("rationale")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            Ok(Intent {
                query: query.trim().to_string(),
                rationale,
            })
        }
        other => Err(format!("intent is neither string nor object: {}", other)),
    }
}
