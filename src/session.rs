use crate::error::{DeskError, DeskResult};
use crate::fixtures::{Dataset, FixtureStore};
use crate::model::{
    College, Exam, ExamResult, Member, NewCollege, NewExam, NewExamResult, NewMember, NewStudent,
    Permission, Student,
};
use crate::query;
use crate::records::{self, IdAllocator, IdStrategy, RecordKind};
use crate::results_csv::{self, CsvParse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub id_strategy: IdStrategy,
    pub enforce_permissions: bool,
}

#[derive(Debug, Clone)]
struct Allocators {
    colleges: IdAllocator,
    exams: IdAllocator,
    students: IdAllocator,
    members: IdAllocator,
}

impl Allocators {
    fn seeded(data: &Dataset, strategy: IdStrategy) -> Self {
        Self {
            colleges: IdAllocator::new(RecordKind::College, strategy, data.colleges.len()),
            exams: IdAllocator::new(RecordKind::Exam, strategy, data.exams.len()),
            students: IdAllocator::new(RecordKind::Student, strategy, data.students.len()),
            members: IdAllocator::new(RecordKind::Member, strategy, data.members.len()),
        }
    }
}

/// Working copy of the fixture collections. Created records are appended
/// here and disappear on `reset` or process exit; the fixture store itself
/// is never written.
#[derive(Debug, Clone)]
pub struct Session {
    view: Dataset,
    ids: Allocators,
    options: SessionOptions,
}

impl Session {
    pub fn new(fixtures: &FixtureStore, options: SessionOptions) -> Self {
        let view = fixtures.data().clone();
        let ids = Allocators::seeded(&view, options.id_strategy);
        Self { view, ids, options }
    }

    /// Drops every record created since the session started. Identifier
    /// counters are not rewound.
    pub fn reset(&mut self, fixtures: &FixtureStore) {
        self.view = fixtures.data().clone();
        tracing::debug!("session reset to fixture data");
    }

    pub fn data(&self) -> &Dataset {
        &self.view
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn create_college(
        &mut self,
        draft: NewCollege,
        actor: Option<&str>,
    ) -> DeskResult<College> {
        self.authorize(actor, Permission::ManageColleges, &[])?;
        let view = &self.view;
        let id = self.ids.colleges.allocate(|id| query::college_by_id(view, id).is_some());
        let college = records::build_college(draft, id);
        tracing::info!(college_id = %college.id, "college created");
        self.view.colleges.push(college.clone());
        Ok(college)
    }

    pub fn create_exam(&mut self, draft: NewExam, actor: Option<&str>) -> DeskResult<Exam> {
        let scope: Vec<&str> = draft.college_ids.iter().map(String::as_str).collect();
        self.authorize(actor, Permission::ManageExams, &scope)?;
        if draft.passing_marks > draft.total_marks {
            return Err(DeskError::InvalidRecord(format!(
                "passingMarks {} exceeds totalMarks {}",
                draft.passing_marks, draft.total_marks
            )));
        }
        let view = &self.view;
        let id = self.ids.exams.allocate(|id| query::exam_by_id(view, id).is_some());
        let exam = records::build_exam(draft, id);
        tracing::info!(exam_id = %exam.id, "exam created");
        self.view.exams.push(exam.clone());
        Ok(exam)
    }

    pub fn create_student(
        &mut self,
        draft: NewStudent,
        actor: Option<&str>,
    ) -> DeskResult<Student> {
        self.authorize(actor, Permission::ManageStudents, &[draft.college_id.as_str()])?;
        let view = &self.view;
        let id = self.ids.students.allocate(|id| query::student_by_id(view, id).is_some());
        let student = records::build_student(draft, id);
        tracing::info!(student_id = %student.id, college_id = %student.college_id, "student created");
        self.view.students.push(student.clone());
        Ok(student)
    }

    pub fn create_member(&mut self, draft: NewMember, actor: Option<&str>) -> DeskResult<Member> {
        self.authorize(actor, Permission::ManageMembers, &[])?;
        let view = &self.view;
        let id = self.ids.members.allocate(|id| query::member_by_id(view, id).is_some());
        let member = records::build_member(draft, id);
        tracing::info!(member_id = %member.id, "member created");
        self.view.members.push(member.clone());
        Ok(member)
    }

    /// Grades `result` against its exam and appends it to the student.
    pub fn add_exam_result(
        &mut self,
        student_id: &str,
        result: NewExamResult,
        actor: Option<&str>,
    ) -> DeskResult<Student> {
        let exam = query::exam_by_id(&self.view, &result.exam_id)
            .ok_or_else(|| DeskError::not_found("exam", result.exam_id.clone()))?;
        let graded = ExamResult::graded(exam, result.marks);
        let mut scope = exam.college_ids.clone();

        let pos = self
            .view
            .students
            .iter()
            .position(|s| s.id == student_id)
            .ok_or_else(|| DeskError::not_found("student", student_id))?;
        // The actor must cover both the student's college and every college
        // the exam is held at.
        scope.push(self.view.students[pos].college_id.clone());
        let scope: Vec<&str> = scope.iter().map(String::as_str).collect();
        self.authorize(actor, Permission::UploadResults, &scope)?;

        let updated = records::with_exam_result(&self.view.students[pos], graded);
        self.view.students[pos] = updated.clone();
        tracing::info!(student_id, exam_id = %result.exam_id, "exam result recorded");
        Ok(updated)
    }

    pub fn parse_results_csv(
        &self,
        exam_id: &str,
        csv_text: &str,
        actor: Option<&str>,
    ) -> DeskResult<CsvParse> {
        let scope: Vec<&str> = query::exam_by_id(&self.view, exam_id)
            .map(|exam| exam.college_ids.iter().map(String::as_str).collect())
            .unwrap_or_default();
        self.authorize(actor, Permission::UploadResults, &scope)?;
        Ok(results_csv::parse_exam_results_csv(&self.view, csv_text, exam_id))
    }

    fn authorize(
        &self,
        actor: Option<&str>,
        permission: Permission,
        colleges: &[&str],
    ) -> DeskResult<()> {
        if !self.options.enforce_permissions {
            return Ok(());
        }
        let Some(actor_id) = actor else {
            return Err(DeskError::Forbidden("actorId is required".to_string()));
        };
        let Some(member) = query::member_by_id(&self.view, actor_id) else {
            return Err(DeskError::Forbidden(format!("unknown actor {actor_id}")));
        };
        if !member.has_permission(permission) {
            tracing::warn!(actor_id, permission = permission.as_str(), "permission denied");
            return Err(DeskError::Forbidden(format!(
                "{actor_id} lacks {}",
                permission.as_str()
            )));
        }
        if let Some(college) = colleges.iter().find(|c| !member.covers_college(c)) {
            tracing::warn!(actor_id, college_id = *college, "college out of scope");
            return Err(DeskError::Forbidden(format!(
                "{actor_id} has no access to college {college}"
            )));
        }
        Ok(())
    }
}
