use crate::error::DeskError;
use crate::ipc::error::{desk_err, ok};
use crate::ipc::helpers::{actor, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Parses an uploaded results CSV for preview. Nothing is written to the
/// students; the reply lists accepted rows and per-line errors.
fn handle_results_parse_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let exam_id = match required_str(req, "examId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(csv_text) = req.params.get("csv").and_then(|v| v.as_str()) else {
        return desk_err(&req.id, DeskError::BadParams("missing csv".to_string()));
    };
    match state.session.parse_results_csv(&exam_id, csv_text, actor(req)) {
        Ok(parsed) => ok(&req.id, json!(parsed)),
        Err(e) => desk_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "results.parseCsv" => Some(handle_results_parse_csv(state, req)),
        _ => None,
    }
}
