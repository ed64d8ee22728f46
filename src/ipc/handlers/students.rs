use crate::error::DeskError;
use crate::ipc::error::{desk_err, ok};
use crate::ipc::helpers::{actor, optional_str, required_record, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{NewExamResult, NewStudent};
use crate::query;
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let data = state.session.data();
    let q = optional_str(req, "query").unwrap_or("");
    let students = match optional_str(req, "collegeId") {
        Some(college_id) => query::students_by_college(data, college_id),
        None => data.students.iter().collect(),
    };

    // Rows carry the college name the listing shows next to each student.
    let rows: Vec<_> = students
        .into_iter()
        .filter(|s| query::student_matches(s, q))
        .map(|s| {
            let mut row = json!(s);
            if let Some(name) = query::college_name(data, &s.college_id) {
                row["collegeName"] = json!(name);
            }
            row
        })
        .collect();
    ok(&req.id, json!({ "students": rows }))
}

fn handle_students_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match query::student_by_id(state.session.data(), &student_id) {
        Some(student) => ok(&req.id, json!({ "student": student })),
        None => desk_err(&req.id, DeskError::not_found("student", student_id)),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft: NewStudent = match required_record(req, "student") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.create_student(draft, actor(req)) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => desk_err(&req.id, e),
    }
}

fn handle_students_add_result(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let result: NewExamResult = match required_record(req, "result") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.add_exam_result(&student_id, result, actor(req)) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => desk_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.addResult" => Some(handle_students_add_result(state, req)),
        _ => None,
    }
}
