use crate::model::{
    College, Exam, ExamResult, Member, NewCollege, NewExam, NewMember, NewStudent, Student,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    College,
    Exam,
    Student,
    Member,
}

impl RecordKind {
    pub fn prefix(self) -> &'static str {
        match self {
            RecordKind::College => "c",
            RecordKind::Exam => "e",
            RecordKind::Student => "s",
            RecordKind::Member => "m",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `<prefix><n>`, counting up from the fixture length.
    #[default]
    Sequential,
    /// `<prefix>-<uuid v4>`.
    Uuid,
}

/// Hands out identifiers for one collection. The sequential counter starts
/// at `fixture_len + 1` and never goes backwards; ids already taken are
/// skipped.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    kind: RecordKind,
    strategy: IdStrategy,
    next: usize,
}

impl IdAllocator {
    pub fn new(kind: RecordKind, strategy: IdStrategy, fixture_len: usize) -> Self {
        Self {
            kind,
            strategy,
            next: fixture_len + 1,
        }
    }

    pub fn allocate(&mut self, taken: impl Fn(&str) -> bool) -> String {
        match self.strategy {
            IdStrategy::Sequential => loop {
                let id = format!("{}{}", self.kind.prefix(), self.next);
                self.next += 1;
                if !taken(&id) {
                    return id;
                }
            },
            IdStrategy::Uuid => format!("{}-{}", self.kind.prefix(), Uuid::new_v4()),
        }
    }
}

pub fn build_college(draft: NewCollege, id: String) -> College {
    College {
        id,
        name: draft.name,
        location: draft.location,
        contact_email: draft.contact_email,
        contact_phone: draft.contact_phone,
        address: draft.address,
        established_year: draft.established_year,
    }
}

pub fn build_exam(draft: NewExam, id: String) -> Exam {
    Exam {
        id,
        name: draft.name,
        description: draft.description,
        college_ids: draft.college_ids,
        date: draft.date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        location: draft.location,
        total_marks: draft.total_marks,
        passing_marks: draft.passing_marks,
        status: draft.status,
    }
}

/// New students start with no results.
pub fn build_student(draft: NewStudent, id: String) -> Student {
    Student {
        id,
        name: draft.name,
        email: draft.email,
        phone: draft.phone,
        college_id: draft.college_id,
        enrollment_number: draft.enrollment_number,
        program: draft.program,
        year: draft.year,
        exam_results: Vec::new(),
    }
}

pub fn build_member(draft: NewMember, id: String) -> Member {
    Member {
        id,
        name: draft.name,
        email: draft.email,
        phone: draft.phone,
        role: draft.role,
        permissions: draft.permissions,
        college_ids: draft.college_ids,
    }
}

/// Copy of `student` with `result` appended.
pub fn with_exam_result(student: &Student, result: ExamResult) -> Student {
    let mut updated = student.clone();
    updated.exam_results.push(result);
    updated
}
