use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::query;
use serde_json::json;

fn handle_dashboard_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(query::dashboard_summary(state.session.data())))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.summary" => Some(handle_dashboard_summary(state, req)),
        _ => None,
    }
}
