use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use std::path::Path;

fn spawn_sidecar(fixtures_dir: &Path) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_examdeskd");
    let mut child = Command::new(exe)
        .env_remove("EXAMDESK_CONFIG")
        .env_remove("EXAMDESK_ENFORCE_PERMISSIONS")
        .env("EXAMDESK_FIXTURES_DIR", fixtures_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn examdeskd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn write_fixtures(dir: &Path) {
    std::fs::write(
        dir.join("colleges.json"),
        json!([{
            "id": "c1",
            "name": "Solo College",
            "location": "Anywhere",
            "contactEmail": "solo@x.edu",
            "contactPhone": "1",
            "address": "1 Solo Street",
            "establishedYear": 1999
        }])
        .to_string(),
    )
    .expect("write colleges");
    std::fs::write(
        dir.join("exams.json"),
        json!([{
            "id": "e1",
            "name": "Only Exam",
            "description": "The one",
            "collegeIds": ["c1"],
            "date": "2025-06-15",
            "startTime": "09:00",
            "endTime": "10:00",
            "location": "Hall",
            "totalMarks": 100,
            "passingMarks": 40,
            "status": "completed"
        }])
        .to_string(),
    )
    .expect("write exams");
    std::fs::write(
        dir.join("students.json"),
        json!([
            {
                "id": "s1", "name": "A", "email": "a@x.edu", "phone": "1",
                "collegeId": "c1", "enrollmentNumber": "1", "program": "P", "year": 1,
                "examResults": [{ "examId": "e1", "marks": 85, "passed": true }]
            },
            {
                "id": "s2", "name": "B", "email": "b@x.edu", "phone": "2",
                "collegeId": "c1", "enrollmentNumber": "2", "program": "P", "year": 1,
                "examResults": [{ "examId": "e1", "marks": 30, "passed": false }]
            }
        ])
        .to_string(),
    )
    .expect("write students");
    std::fs::write(dir.join("members.json"), "[]").expect("write members");
}

#[test]
fn fixtures_dir_replaces_bundled_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixtures(dir.path());
    let (mut child, mut stdin, mut reader) = spawn_sidecar(dir.path());

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["result"]["fixtureCounts"]["colleges"], 1);
    assert_eq!(health["result"]["fixtureCounts"]["members"], 0);

    let rate = request(&mut stdin, &mut reader, "2", "exams.passRate", json!({ "examId": "e1" }));
    assert_eq!(rate["result"]["passRate"].as_f64(), Some(50.0));

    let csv = request(
        &mut stdin,
        &mut reader,
        "3",
        "results.parseCsv",
        json!({ "examId": "e1", "csv": "student_id,marks\ns1,85\ns2,30\ns3,n/a" }),
    );
    assert_eq!(
        csv["result"]["results"],
        json!([
            { "line": 2, "studentId": "s1", "examId": "e1", "marks": 85, "passed": true },
            { "line": 3, "studentId": "s2", "examId": "e1", "marks": 30, "passed": false }
        ])
    );
    assert_eq!(csv["result"]["errors"][0]["code"], "bad_marks");
    assert_eq!(csv["result"]["errors"][0]["line"], 4);

    // Parsing never writes results back to students.
    let s1 = request(&mut stdin, &mut reader, "4", "students.get", json!({ "studentId": "s1" }));
    assert_eq!(s1["result"]["student"]["examResults"].as_array().map(|a| a.len()), Some(1));

    let created = request(
        &mut stdin,
        &mut reader,
        "5",
        "colleges.create",
        json!({ "college": {
            "name": "Second", "location": "L", "contactEmail": "e", "contactPhone": "p",
            "address": "a", "establishedYear": 2020
        }}),
    );
    assert_eq!(created["result"]["college"]["id"], "c2");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn broken_fixtures_dir_stops_the_daemon() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixtures(dir.path());
    std::fs::write(dir.path().join("members.json"), "{ not json").expect("corrupt");

    let output = Command::new(env!("CARGO_BIN_EXE_examdeskd"))
        .env_remove("EXAMDESK_CONFIG")
        .env("EXAMDESK_FIXTURES_DIR", dir.path())
        .stdin(Stdio::null())
        .output()
        .expect("run examdeskd");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("members.json"), "stderr: {}", stderr);
}
