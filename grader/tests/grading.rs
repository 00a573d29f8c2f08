//tests/grading.rs
use grader::error::GraderError;
use grader::harness::{HarnessRenderer, ReportChannel, ReportLine};
use grader::stores::memory_store::MemoryStore;
use grader::test_case::{load_test_cases, only_graded, only_screening, only_static};
use grader::types::{StaticOutcome, Submission, TestCase};
use grader::Grader;

const PROMPT_CASES: &str = r#"[
    {
        "id": 1,
        "coding_prompt": { "id": 10, "class_name": "Answer", "method_name": "sum" },
        "input": "keyword: for, while",
        "expected_output": "",
        "description": "Uses a loop",
        "weight": 0,
        "static": true,
        "screening": true
    },
    {
        "id": 2,
        "coding_prompt": { "id": 10, "class_name": "Answer", "method_name": "sum" },
        "input": "methods: stream",
        "expected_output": "0",
        "negative_feedback": "Please solve this without streams",
        "weight": 1,
        "static": true
    },
    {
        "id": 3,
        "coding_prompt": { "id": 10, "class_name": "Answer", "method_name": "sum" },
        "input": "new int[] {1, 2, 3}",
        "expected_output": "6",
        "weight": 2,
        "example": true
    },
    {
        "id": 4,
        "coding_prompt": { "id": 10, "class_name": "Answer", "method_name": "sum" },
        "input": "new int[] {}",
        "expected_output": "0",
        "weight": 3,
        "hidden": true
    }
]"#;

const LOOPING_ANSWER: &str = "\
public int sum(int[] values) {
    int total = 0;
    // values.stream() would be shorter
    for (int v : values) {
        total += v;
    }
    return total;
}";

const STREAM_ANSWER: &str = "\
public int sum(int[] values) {
    return java.util.Arrays.stream(values).sum();
}";

fn passing_record() -> Vec<String> {
    record("", "", "1")
}

fn record(exception: &str, message: &str, flag: &str) -> Vec<String> {
    let mut fields = vec![String::new(); 5];
    fields.push(exception.to_string());
    fields.push(message.to_string());
    fields.push(flag.to_string());
    fields
}

fn cases() -> Vec<TestCase> {
    load_test_cases(PROMPT_CASES).expect("fixture cases load")
}

#[test]
fn test_full_grading_run_for_a_looping_answer() {
    let cases = cases();
    let grader = Grader::new(MemoryStore::new());
    let submission = Submission::new(7, 70, LOOPING_ANSWER);

    for case in only_screening(&cases) {
        let outcome = grader.check_static(case, &submission).unwrap();
        assert_eq!(outcome, StaticOutcome::Screened(None));
    }
    assert!(grader.store().is_empty(), "screening never persists");

    let mut score = 0.0;
    for case in only_graded(&cases) {
        if case.is_static {
            let StaticOutcome::Graded(result) = grader.check_static(case, &submission).unwrap()
            else {
                panic!("graded static case {} was not graded", case.id);
            };
            if result.pass {
                score += case.weight;
            }
        } else {
            score += grader
                .record_result(case, &submission, &passing_record())
                .unwrap();
        }
    }

    assert_eq!(score, 6.0);
    let saved = grader.store().results();
    assert_eq!(saved.len(), only_graded(&cases).len());
    assert!(saved.iter().all(|r| r.pass && r.feedback.is_none()));
    assert!(saved.iter().all(|r| r.user_id == 7 && r.answer_id == 70));
}

#[test]
fn test_forbidden_method_fails_with_authored_feedback() {
    let cases = cases();
    let grader = Grader::new(MemoryStore::new());
    let submission = Submission::new(7, 71, STREAM_ANSWER);

    let no_streams = &cases[1];
    let StaticOutcome::Graded(result) = grader.check_static(no_streams, &submission).unwrap()
    else {
        panic!("expected a graded outcome");
    };
    assert!(!result.pass);
    assert_eq!(
        result.feedback.as_deref(),
        Some("Please solve this without streams")
    );

    // Screening feedback is synthesized from the rule, not taken from the description.
    let loop_gate = &cases[0];
    assert_eq!(
        grader.check_static(loop_gate, &submission).unwrap(),
        StaticOutcome::Screened(Some("Answer must use for, while".to_string()))
    );
    assert_eq!(grader.store().len(), 1);
}

#[test]
fn test_dynamic_failures_score_nothing() {
    let cases = cases();
    let grader = Grader::new(MemoryStore::new());
    let submission = Submission::new(7, 72, "");
    let example = &cases[2];

    let timeout = record(
        "java.lang.Exception",
        "test timed out after 60000 milliseconds",
        "0",
    );
    assert_eq!(grader.record_result(example, &submission, &timeout).unwrap(), 0.0);

    let truncated = vec!["Answer".to_string(), "1".to_string()];
    assert_eq!(grader.record_result(example, &submission, &truncated).unwrap(), 0.0);

    let saved = grader.store().results();
    assert_eq!(saved[0].feedback.as_deref(), Some("Timed out after 60 seconds"));
    assert!(!saved[1].pass);
    assert_eq!(saved.len(), 2);
}

#[test]
fn test_static_case_on_dynamic_path_is_skipped() {
    let cases = cases();
    let grader = Grader::new(MemoryStore::new());
    let submission = Submission::new(7, 73, LOOPING_ANSWER);
    for case in cases.iter().filter(|c| !c.is_static) {
        assert_eq!(
            grader.check_static(case, &submission).unwrap(),
            StaticOutcome::NotApplicable
        );
    }
    assert_eq!(only_static(&cases).len(), 2);
    assert!(grader.store().is_empty());
}

#[test]
fn test_invalid_case_json_is_configuration_error() {
    let err = load_test_cases(r#"[{"id": 1}]"#).unwrap_err();
    assert!(matches!(err, GraderError::Configuration(_)));
}

#[test]
fn test_display_descriptions() {
    let cases = cases();
    assert_eq!(cases[0].display_description(false), "Uses a loop");
    assert_eq!(cases[2].display_description(true), "sum({1, 2, 3}) -> 6");
    assert_eq!(cases[2].display_description(false), "sum({1, 2, 3})");
    assert_eq!(cases[3].display_description(true), "hidden");
}

#[test]
fn test_rendered_harness_reports_parse_back() {
    let cases = cases();
    let renderer = HarnessRenderer::new();
    let channel = ReportChannel::new("$report");
    let rendered = renderer
        .render_with_channel("ruby", &cases[2], &channel)
        .unwrap();

    assert!(rendered.contains(r#"$report.write("1,,3\n")"#));
    assert!(rendered.contains(r#"$report.write("0,\"\",3\n")"#));
    assert!(rendered.contains("assert_equal(sum(new int[] {1, 2, 3}), 6)"));
    assert_eq!(ReportLine::parse("1,,3"), Some(ReportLine::passed(3)));
    let failed = ReportLine::parse(r#"0,"",3"#).unwrap();
    assert!(!failed.pass);
    assert_eq!(failed.feedback, None);
    assert_eq!(
        rendered,
        renderer
            .render_with_channel("Ruby", &cases[2], &channel)
            .unwrap()
    );
}
