use crate::error::DeskError;
use crate::ipc::error::{desk_err, ok};
use crate::ipc::helpers::{actor, optional_str, required_record, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::NewCollege;
use crate::query;
use serde_json::json;

fn handle_colleges_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let q = optional_str(req, "query").unwrap_or("");
    let colleges: Vec<_> = state
        .session
        .data()
        .colleges
        .iter()
        .filter(|c| query::college_matches(c, q))
        .collect();
    ok(&req.id, json!({ "colleges": colleges }))
}

fn handle_colleges_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let college_id = match required_str(req, "collegeId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::college_by_id(state.session.data(), &college_id) {
        Some(college) => ok(&req.id, json!({ "college": college })),
        None => desk_err(&req.id, DeskError::not_found("college", college_id)),
    }
}

fn handle_colleges_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: NewCollege = match required_record(req, "college") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.create_college(draft, actor(req)) {
        Ok(college) => ok(&req.id, json!({ "college": college })),
        Err(e) => desk_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "colleges.list" => Some(handle_colleges_list(state, req)),
        "colleges.get" => Some(handle_colleges_get(state, req)),
        "colleges.create" => Some(handle_colleges_create(state, req)),
        _ => None,
    }
}
