use crate::model::{College, Exam, Member, Student};
use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;

const COLLEGES_FILE: &str = "colleges.json";
const EXAMS_FILE: &str = "exams.json";
const STUDENTS_FILE: &str = "students.json";
const MEMBERS_FILE: &str = "members.json";

const BUNDLED_COLLEGES: &str = include_str!("../fixtures/colleges.json");
const BUNDLED_EXAMS: &str = include_str!("../fixtures/exams.json");
const BUNDLED_STUDENTS: &str = include_str!("../fixtures/students.json");
const BUNDLED_MEMBERS: &str = include_str!("../fixtures/members.json");

/// The four record collections, in fixture order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub colleges: Vec<College>,
    pub exams: Vec<Exam>,
    pub students: Vec<Student>,
    pub members: Vec<Member>,
}

/// Read-only initial data. Nothing hands out a mutable borrow of it.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    data: Dataset,
}

impl FixtureStore {
    pub fn bundled() -> anyhow::Result<Self> {
        let data = Dataset {
            colleges: parse_collection(COLLEGES_FILE, BUNDLED_COLLEGES)?,
            exams: parse_collection(EXAMS_FILE, BUNDLED_EXAMS)?,
            students: parse_collection(STUDENTS_FILE, BUNDLED_STUDENTS)?,
            members: parse_collection(MEMBERS_FILE, BUNDLED_MEMBERS)?,
        };
        Self::from_dataset(data)
    }

    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let data = Dataset {
            colleges: read_collection(dir, COLLEGES_FILE)?,
            exams: read_collection(dir, EXAMS_FILE)?,
            students: read_collection(dir, STUDENTS_FILE)?,
            members: read_collection(dir, MEMBERS_FILE)?,
        };
        Self::from_dataset(data)
    }

    pub fn from_dataset(data: Dataset) -> anyhow::Result<Self> {
        check_unique(COLLEGES_FILE, data.colleges.iter().map(|c| c.id.as_str()))?;
        check_unique(EXAMS_FILE, data.exams.iter().map(|e| e.id.as_str()))?;
        check_unique(STUDENTS_FILE, data.students.iter().map(|s| s.id.as_str()))?;
        check_unique(MEMBERS_FILE, data.members.iter().map(|m| m.id.as_str()))?;

        for exam in &data.exams {
            if exam.passing_marks > exam.total_marks {
                tracing::warn!(
                    exam_id = %exam.id,
                    passing_marks = exam.passing_marks,
                    total_marks = exam.total_marks,
                    "fixture exam has passing marks above total marks"
                );
            }
        }

        tracing::info!(
            colleges = data.colleges.len(),
            exams = data.exams.len(),
            students = data.students.len(),
            members = data.members.len(),
            "fixture store loaded"
        );
        Ok(Self { data })
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }
}

fn parse_collection<T: DeserializeOwned>(name: &str, text: &str) -> anyhow::Result<Vec<T>> {
    serde_json::from_str(text).with_context(|| format!("failed to parse fixture {name}"))
}

fn read_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> anyhow::Result<Vec<T>> {
    let path = dir.join(name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture {}", path.to_string_lossy()))?;
    parse_collection(name, &text)
}

fn check_unique<'a>(name: &str, ids: impl Iterator<Item = &'a str>) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(anyhow!("duplicate id {id:?} in fixture {name}"));
        }
    }
    Ok(())
}
