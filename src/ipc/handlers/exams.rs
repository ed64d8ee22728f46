use crate::error::DeskError;
use crate::ipc::error::{desk_err, ok};
use crate::ipc::helpers::{actor, optional_limit, optional_str, required_record, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::NewExam;
use crate::query;
use serde_json::json;

fn handle_exams_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let data = state.session.data();
    let q = optional_str(req, "query").unwrap_or("");
    let exams = match optional_str(req, "collegeId") {
        Some(college_id) => query::exams_by_college(data, college_id),
        None => data.exams.iter().collect(),
    };
    let exams: Vec<_> = exams
        .into_iter()
        .filter(|e| query::exam_matches(e, q))
        .collect();
    ok(&req.id, json!({ "exams": exams }))
}

fn handle_exams_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let exam_id = match required_str(req, "examId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::exam_by_id(state.session.data(), &exam_id) {
        Some(exam) => ok(&req.id, json!({ "exam": exam })),
        None => desk_err(&req.id, DeskError::not_found("exam", exam_id)),
    }
}

fn handle_exams_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: NewExam = match required_record(req, "exam") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.create_exam(draft, actor(req)) {
        Ok(exam) => ok(&req.id, json!({ "exam": exam })),
        Err(e) => desk_err(&req.id, e),
    }
}

fn handle_exams_pass_rate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let exam_id = match required_str(req, "examId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    // Unknown exams have no takers, so the rate is 0 rather than an error.
    let rate = query::exam_pass_rate(state.session.data(), &exam_id);
    ok(&req.id, json!({ "examId": exam_id, "passRate": rate }))
}

fn handle_exams_upcoming(state: &mut AppState, req: &Request) -> serde_json::Value {
    let limit = match optional_limit(req, state.config.default_list_limit) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let exams = query::upcoming_exams(state.session.data(), limit);
    ok(&req.id, json!({ "exams": exams }))
}

fn handle_exams_performance(state: &mut AppState, req: &Request) -> serde_json::Value {
    let limit = match optional_limit(req, state.config.default_list_limit) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let rows = query::exam_performance(state.session.data(), limit);
    ok(&req.id, json!({ "rows": rows }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exams.list" => Some(handle_exams_list(state, req)),
        "exams.get" => Some(handle_exams_get(state, req)),
        "exams.create" => Some(handle_exams_create(state, req)),
        "exams.passRate" => Some(handle_exams_pass_rate(state, req)),
        "exams.upcoming" => Some(handle_exams_upcoming(state, req)),
        "exams.performance" => Some(handle_exams_performance(state, req)),
        _ => None,
    }
}
