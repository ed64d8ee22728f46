use crate::error::DeskError;
use crate::ipc::error::{desk_err, ok};
use crate::ipc::helpers::{actor, optional_str, required_record, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::NewMember;
use crate::query;
use serde_json::json;

fn handle_members_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let data = state.session.data();
    let q = optional_str(req, "query").unwrap_or("");
    let members = match optional_str(req, "collegeId") {
        Some(college_id) => query::members_by_college(data, college_id),
        None => data.members.iter().collect(),
    };
    let members: Vec<_> = members
        .into_iter()
        .filter(|m| query::member_matches(m, q))
        .collect();
    ok(&req.id, json!({ "members": members }))
}

fn handle_members_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let member_id = match required_str(req, "memberId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::member_by_id(state.session.data(), &member_id) {
        Some(member) => ok(&req.id, json!({ "member": member })),
        None => desk_err(&req.id, DeskError::not_found("member", member_id)),
    }
}

fn handle_members_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: NewMember = match required_record(req, "member") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.create_member(draft, actor(req)) {
        Ok(member) => ok(&req.id, json!({ "member": member })),
        Err(e) => desk_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "members.list" => Some(handle_members_list(state, req)),
        "members.get" => Some(handle_members_get(state, req)),
        "members.create" => Some(handle_members_create(state, req)),
        _ => None,
    }
}
