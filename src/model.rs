use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub name: String,
    pub location: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub established_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Upcoming,
    Ongoing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub name: String,
    pub description: String,
    pub college_ids: Vec<String>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: chrono::NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: chrono::NaiveTime,
    pub location: String,
    pub total_marks: i64,
    pub passing_marks: i64,
    pub status: ExamStatus,
}

impl Exam {
    pub fn is_held_at(&self, college_id: &str) -> bool {
        self.college_ids.iter().any(|c| c == college_id)
    }

    pub fn passes(&self, marks: i64) -> bool {
        marks >= self.passing_marks
    }
}

/// One student's mark for one exam. `passed` is derived against the exam's
/// passing threshold when the result is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub exam_id: String,
    pub marks: i64,
    pub passed: bool,
}

impl ExamResult {
    pub fn graded(exam: &Exam, marks: i64) -> Self {
        Self {
            exam_id: exam.id.clone(),
            marks,
            passed: exam.passes(marks),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college_id: String,
    pub enrollment_number: String,
    pub program: String,
    pub year: u8,
    #[serde(default)]
    pub exam_results: Vec<ExamResult>,
}

impl Student {
    pub fn took_exam(&self, exam_id: &str) -> bool {
        self.exam_results.iter().any(|r| r.exam_id == exam_id)
    }

    pub fn passed_exam(&self, exam_id: &str) -> bool {
        self.exam_results
            .iter()
            .any(|r| r.exam_id == exam_id && r.passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageColleges,
    ManageExams,
    ManageStudents,
    ManageMembers,
    ViewReports,
    UploadResults,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ManageColleges => "manage_colleges",
            Permission::ManageExams => "manage_exams",
            Permission::ManageStudents => "manage_students",
            Permission::ManageMembers => "manage_members",
            Permission::ViewReports => "view_reports",
            Permission::UploadResults => "upload_results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// Empty means the member covers every college.
    #[serde(default)]
    pub college_ids: Vec<String>,
}

impl Member {
    pub fn covers_college(&self, college_id: &str) -> bool {
        self.college_ids.is_empty() || self.college_ids.iter().any(|c| c == college_id)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

// Drafts: the record shapes a form submits, before an id is assigned.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollege {
    pub name: String,
    pub location: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub established_year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub college_ids: Vec<String>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: chrono::NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: chrono::NaiveTime,
    pub location: String,
    pub total_marks: i64,
    pub passing_marks: i64,
    pub status: ExamStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college_id: String,
    pub enrollment_number: String,
    pub program: String,
    pub year: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub college_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamResult {
    pub exam_id: String,
    pub marks: i64,
}

/// Exam times travel as `HH:MM`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}
