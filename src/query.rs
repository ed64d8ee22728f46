use crate::fixtures::Dataset;
use crate::model::{College, Exam, ExamStatus, Member, Student};
use serde::Serialize;

const PERFORMANCE_LABEL_CHARS: usize = 15;

pub fn college_by_id<'a>(data: &'a Dataset, id: &str) -> Option<&'a College> {
    data.colleges.iter().find(|c| c.id == id)
}

pub fn exam_by_id<'a>(data: &'a Dataset, id: &str) -> Option<&'a Exam> {
    data.exams.iter().find(|e| e.id == id)
}

pub fn student_by_id<'a>(data: &'a Dataset, id: &str) -> Option<&'a Student> {
    data.students.iter().find(|s| s.id == id)
}

pub fn member_by_id<'a>(data: &'a Dataset, id: &str) -> Option<&'a Member> {
    data.members.iter().find(|m| m.id == id)
}

pub fn college_name<'a>(data: &'a Dataset, id: &str) -> Option<&'a str> {
    college_by_id(data, id).map(|c| c.name.as_str())
}

pub fn students_by_college<'a>(data: &'a Dataset, college_id: &str) -> Vec<&'a Student> {
    data.students
        .iter()
        .filter(|s| s.college_id == college_id)
        .collect()
}

pub fn exams_by_college<'a>(data: &'a Dataset, college_id: &str) -> Vec<&'a Exam> {
    data.exams
        .iter()
        .filter(|e| e.is_held_at(college_id))
        .collect()
}

/// Members with an empty college scope are included for every college.
pub fn members_by_college<'a>(data: &'a Dataset, college_id: &str) -> Vec<&'a Member> {
    data.members
        .iter()
        .filter(|m| m.covers_college(college_id))
        .collect()
}

/// Percentage of students with a passing result for the exam among the
/// students with any result for it. Each student counts once regardless of
/// how many results they have for the exam. No takers yields 0.
pub fn exam_pass_rate(data: &Dataset, exam_id: &str) -> f64 {
    let mut takers: usize = 0;
    let mut passers: usize = 0;
    for s in &data.students {
        if s.took_exam(exam_id) {
            takers += 1;
        }
        if s.passed_exam(exam_id) {
            passers += 1;
        }
    }
    if takers == 0 {
        return 0.0;
    }
    100.0 * (passers as f64) / (takers as f64)
}

pub fn exam_count_by_status(data: &Dataset, status: ExamStatus) -> usize {
    data.exams.iter().filter(|e| e.status == status).count()
}

// Search: case-insensitive substring over the fields each listing shows.
// An empty query matches everything; whitespace is matched literally.

fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

fn any_field_contains(needle: &str, fields: &[&str]) -> bool {
    needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(needle))
}

pub fn college_matches(c: &College, query: &str) -> bool {
    any_field_contains(&normalize_query(query), &[c.name.as_str(), c.location.as_str()])
}

pub fn exam_matches(e: &Exam, query: &str) -> bool {
    any_field_contains(&normalize_query(query), &[e.name.as_str(), e.description.as_str()])
}

pub fn student_matches(s: &Student, query: &str) -> bool {
    any_field_contains(
        &normalize_query(query),
        &[
            s.name.as_str(),
            s.email.as_str(),
            s.enrollment_number.as_str(),
        ],
    )
}

pub fn member_matches(m: &Member, query: &str) -> bool {
    any_field_contains(
        &normalize_query(query),
        &[m.name.as_str(), m.email.as_str(), m.role.as_str()],
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub college_count: usize,
    pub exam_count: usize,
    pub student_count: usize,
    pub member_count: usize,
    pub upcoming_exam_count: usize,
    pub ongoing_exam_count: usize,
    pub completed_exam_count: usize,
    pub completed_percent: i64,
}

pub fn dashboard_summary(data: &Dataset) -> DashboardSummary {
    let exam_count = data.exams.len();
    let completed = exam_count_by_status(data, ExamStatus::Completed);
    let completed_percent = if exam_count > 0 {
        (100.0 * completed as f64 / exam_count as f64).round() as i64
    } else {
        0
    };
    DashboardSummary {
        college_count: data.colleges.len(),
        exam_count,
        student_count: data.students.len(),
        member_count: data.members.len(),
        upcoming_exam_count: exam_count_by_status(data, ExamStatus::Upcoming),
        ongoing_exam_count: exam_count_by_status(data, ExamStatus::Ongoing),
        completed_exam_count: completed,
        completed_percent,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExam<'a> {
    #[serde(flatten)]
    pub exam: &'a Exam,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_college_name: Option<&'a str>,
    pub other_college_count: usize,
}

/// First `limit` upcoming exams in fixture order.
pub fn upcoming_exams(data: &Dataset, limit: usize) -> Vec<UpcomingExam<'_>> {
    data.exams
        .iter()
        .filter(|e| e.status == ExamStatus::Upcoming)
        .take(limit)
        .map(|exam| UpcomingExam {
            exam,
            first_college_name: exam
                .college_ids
                .first()
                .and_then(|id| college_name(data, id)),
            other_college_count: exam.college_ids.len().saturating_sub(1),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub exam_id: String,
    pub label: String,
    pub pass_rate: i64,
    pub fail_rate: i64,
}

fn performance_label(name: &str) -> String {
    if name.chars().count() > PERFORMANCE_LABEL_CHARS {
        let head: String = name.chars().take(PERFORMANCE_LABEL_CHARS).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Pass/fail split for the first `limit` exams in fixture order.
pub fn exam_performance(data: &Dataset, limit: usize) -> Vec<PerformanceRow> {
    data.exams
        .iter()
        .take(limit)
        .map(|exam| {
            let rate = exam_pass_rate(data, &exam.id);
            PerformanceRow {
                exam_id: exam.id.clone(),
                label: performance_label(&exam.name),
                pass_rate: rate.round() as i64,
                fail_rate: (100.0 - rate).round() as i64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureStore;
    use crate::model::{ExamResult, Role};
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn exam(id: &str, passing: i64, colleges: &[&str], status: ExamStatus) -> Exam {
        Exam {
            id: id.into(),
            name: format!("Exam {id}"),
            description: "desc".into(),
            college_ids: colleges.iter().map(|c| c.to_string()).collect(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15).expect("date"),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("time"),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).expect("time"),
            location: "Hall".into(),
            total_marks: 100,
            passing_marks: passing,
            status,
        }
    }

    fn student(id: &str, college: &str, results: &[(&str, i64, bool)]) -> Student {
        Student {
            id: id.into(),
            name: format!("Student {id}"),
            email: format!("{id}@example.edu"),
            phone: "555".into(),
            college_id: college.into(),
            enrollment_number: format!("EN-{id}"),
            program: "Science".into(),
            year: 1,
            exam_results: results
                .iter()
                .map(|(e, marks, passed)| ExamResult {
                    exam_id: e.to_string(),
                    marks: *marks,
                    passed: *passed,
                })
                .collect(),
        }
    }

    fn member(id: &str, colleges: &[&str]) -> Member {
        Member {
            id: id.into(),
            name: format!("Member {id}"),
            email: format!("{id}@desk.org"),
            phone: "555".into(),
            role: Role::Employee,
            permissions: vec![],
            college_ids: colleges.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn bundled() -> Dataset {
        FixtureStore::bundled().expect("bundled").data().clone()
    }

    #[test]
    fn unknown_ids_are_absent() {
        let d = bundled();
        assert!(college_by_id(&d, "c99").is_none());
        assert!(exam_by_id(&d, "e99").is_none());
        assert!(student_by_id(&d, "s99").is_none());
        assert!(member_by_id(&d, "m99").is_none());
        // Exact, case-sensitive match.
        assert!(college_by_id(&d, "C1").is_none());
        assert_eq!(college_by_id(&d, "c1").map(|c| c.name.as_str()), Some("Westlake University"));
    }

    #[test]
    fn students_by_college_is_order_preserving_subsequence() {
        let d = bundled();
        for c in &d.colleges {
            let got: Vec<&str> = students_by_college(&d, &c.id)
                .into_iter()
                .map(|s| s.id.as_str())
                .collect();
            let want: Vec<&str> = d
                .students
                .iter()
                .filter(|s| s.college_id == c.id)
                .map(|s| s.id.as_str())
                .collect();
            assert_eq!(got, want);
        }
        let c1: Vec<&str> = students_by_college(&d, "c1")
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(c1, vec!["s1", "s7"]);
    }

    #[test]
    fn exams_by_college_uses_set_membership() {
        let d = bundled();
        let ids: Vec<&str> = exams_by_college(&d, "c2")
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e2", "e5"]);
        assert!(exams_by_college(&d, "c99").is_empty());
    }

    #[test]
    fn unscoped_members_appear_for_any_college() {
        let d = Dataset {
            members: vec![member("m1", &[]), member("m2", &["c1"]), member("m3", &["c2"])],
            ..Dataset::default()
        };
        let ids = |college: &str| -> Vec<String> {
            members_by_college(&d, college)
                .into_iter()
                .map(|m| m.id.clone())
                .collect()
        };
        assert_eq!(ids("c1"), vec!["m1", "m2"]);
        assert_eq!(ids("c2"), vec!["m1", "m3"]);
        assert_eq!(ids("no-such-college"), vec!["m1"]);
    }

    #[test]
    fn pass_rate_half_for_one_pass_one_fail() {
        let d = Dataset {
            exams: vec![exam("e1", 40, &["c1"], ExamStatus::Completed)],
            students: vec![
                student("s1", "c1", &[("e1", 85, true)]),
                student("s2", "c1", &[("e1", 30, false)]),
            ],
            ..Dataset::default()
        };
        assert_eq!(exam_pass_rate(&d, "e1"), 50.0);
    }

    #[test]
    fn pass_rate_zero_without_results() {
        let d = bundled();
        assert_eq!(exam_pass_rate(&d, "e3"), 0.0);
        assert_eq!(exam_pass_rate(&d, "unknown"), 0.0);
    }

    #[test]
    fn pass_rate_counts_each_student_once() {
        // s1 has a failing retake and a pass; s2 failed twice.
        let d = Dataset {
            students: vec![
                student("s1", "c1", &[("e1", 20, false), ("e1", 60, true)]),
                student("s2", "c1", &[("e1", 10, false), ("e1", 12, false)]),
                student("s3", "c1", &[("e2", 90, true)]),
            ],
            ..Dataset::default()
        };
        assert_eq!(exam_pass_rate(&d, "e1"), 50.0);
        assert_eq!(exam_pass_rate(&d, "e2"), 100.0);
    }

    #[test]
    fn queries_are_idempotent() {
        let d = bundled();
        assert_eq!(exam_pass_rate(&d, "e1"), exam_pass_rate(&d, "e1"));
        assert_eq!(dashboard_summary(&d), dashboard_summary(&d));
        assert_eq!(exam_performance(&d, 4), exam_performance(&d, 4));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let d = bundled();
        let colleges: Vec<&str> = d
            .colleges
            .iter()
            .filter(|c| college_matches(c, "RIDGE"))
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(colleges, vec!["c3"]);

        let members: Vec<&str> = d
            .members
            .iter()
            .filter(|m| member_matches(m, "admin"))
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(members, vec!["m1"]);

        let students: Vec<&str> = d
            .students
            .iter()
            .filter(|s| student_matches(s, "mt2021"))
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(students, vec!["s3", "s4"]);

        assert!(d.exams.iter().all(|e| exam_matches(e, "")));
        assert!(!d.exams.iter().any(|e| exam_matches(e, "  ")));
        assert!(exam_matches(&d.exams[1], "statics"));
    }

    #[test]
    fn dashboard_summary_counts_statuses() {
        let d = bundled();
        let s = dashboard_summary(&d);
        assert_eq!(
            s,
            DashboardSummary {
                college_count: 5,
                exam_count: 6,
                student_count: 7,
                member_count: 4,
                upcoming_exam_count: 3,
                ongoing_exam_count: 1,
                completed_exam_count: 2,
                completed_percent: 33,
            }
        );
        assert_eq!(dashboard_summary(&Dataset::default()).completed_percent, 0);
    }

    #[test]
    fn upcoming_exams_limit_and_college_hint() {
        let d = bundled();
        let up = upcoming_exams(&d, 2);
        assert_eq!(up.len(), 2);
        assert_eq!(up[0].exam.id, "e4");
        assert_eq!(up[0].first_college_name, Some("Lakeshore Medical College"));
        assert_eq!(up[0].other_college_count, 0);
        assert_eq!(up[1].exam.id, "e5");
        assert_eq!(up[1].other_college_count, 2);

        let all = upcoming_exams(&d, 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].first_college_name, None);
    }

    #[test]
    fn performance_rows_truncate_and_round() {
        let d = bundled();
        let rows = exam_performance(&d, 4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].label, "Computer Scienc...");
        assert_eq!(rows[0].pass_rate, 50);
        assert_eq!(rows[0].fail_rate, 50);
        assert_eq!(rows[1].pass_rate, 100);
        assert_eq!(rows[1].fail_rate, 0);
        assert_eq!(rows[2].label, "Business Accoun...");
        assert_eq!(rows[3].label, "Human Anatomy");
        assert_eq!(rows[3].fail_rate, 100);
    }
}
