use crate::fixtures::Dataset;
use crate::model::ExamResult;
use crate::query;
use serde::Serialize;

/// One accepted CSV line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub line: usize,
    pub student_id: String,
    #[serde(flatten)]
    pub result: ExamResult,
}

/// One rejected CSV line. `line` is 1-based and counts the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineError {
    pub line: usize,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvParse {
    pub results: Vec<ParsedResult>,
    pub errors: Vec<LineError>,
}

/// Parses `student_id,marks` rows for one exam.
///
/// The first line is dropped without looking at it. Blank lines are skipped.
/// Each row is split at its first comma; marks must be an integer. When the
/// exam is unknown nothing is emitted and no errors are reported. Results are
/// not attached to students.
pub fn parse_exam_results_csv(data: &Dataset, csv_text: &str, exam_id: &str) -> CsvParse {
    let mut out = CsvParse::default();
    let Some(exam) = query::exam_by_id(data, exam_id) else {
        tracing::debug!(exam_id, "csv upload for unknown exam; nothing parsed");
        return out;
    };

    for (idx, raw) in csv_text.trim().lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((student_id, marks_field)) = line.split_once(',') else {
            out.errors.push(LineError {
                line: line_no,
                code: "missing_marks",
                message: "expected student_id,marks".to_string(),
            });
            continue;
        };

        let marks = match marks_field.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                out.errors.push(LineError {
                    line: line_no,
                    code: "bad_marks",
                    message: format!("marks is not an integer: {:?}", marks_field.trim()),
                });
                continue;
            }
        };

        out.results.push(ParsedResult {
            line: line_no,
            student_id: student_id.trim().to_string(),
            result: ExamResult::graded(exam, marks),
        });
    }

    if !out.errors.is_empty() {
        tracing::warn!(
            exam_id,
            rejected = out.errors.len(),
            accepted = out.results.len(),
            "csv upload had malformed lines"
        );
    }
    out
}
