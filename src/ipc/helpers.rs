use crate::error::DeskError;
use crate::ipc::error::desk_err;
use crate::ipc::types::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn bad_params(req: &Request, message: String) -> Value {
    desk_err(&req.id, DeskError::BadParams(message))
}

/// Ids are matched exactly; only a missing or empty value is rejected.
pub fn required_str(req: &Request, key: &str) -> Result<String, Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| bad_params(req, format!("missing {}", key)))
}

pub fn optional_str<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

pub fn optional_limit(req: &Request, default: usize) -> Result<usize, Value> {
    match req.params.get("limit") {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v.as_u64().map(|n| n as usize).ok_or_else(|| {
            bad_params(req, "limit must be a non-negative integer".to_string())
        }),
    }
}

/// Deserializes `params[key]` into a draft record. Missing or mistyped
/// fields are a `bad_params` reply naming the serde error.
pub fn required_record<T: DeserializeOwned>(req: &Request, key: &str) -> Result<T, Value> {
    let Some(raw) = req.params.get(key) else {
        return Err(bad_params(req, format!("missing {}", key)));
    };
    serde_json::from_value(raw.clone())
        .map_err(|e| bad_params(req, format!("invalid {}: {}", key, e)))
}

pub fn actor(req: &Request) -> Option<&str> {
    optional_str(req, "actorId")
}
