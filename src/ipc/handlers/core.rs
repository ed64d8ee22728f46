use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::query;
use crate::records::IdStrategy;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    let fixtures = state.fixtures.data();
    let options = state.session.options();
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "fixturesDir": state.config.fixtures_dir.as_ref().map(|p| p.to_string_lossy().to_string()),
            "fixtureCounts": {
                "colleges": fixtures.colleges.len(),
                "exams": fixtures.exams.len(),
                "students": fixtures.students.len(),
                "members": fixtures.members.len(),
            },
            "idStrategy": match options.id_strategy {
                IdStrategy::Sequential => "sequential",
                IdStrategy::Uuid => "uuid",
            },
            "enforcePermissions": options.enforce_permissions,
        }),
    )
}

fn handle_session_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.reset(&state.fixtures);
    ok(&req.id, json!(query::dashboard_summary(state.session.data())))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.reset" => Some(handle_session_reset(state, req)),
        _ => None,
    }
}
