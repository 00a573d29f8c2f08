//! # Test Case Behaviour
//!
//! Loader-side validation, display text and selection helpers for [`TestCase`].
//! Grading itself lives in [`static_check`](crate::static_check),
//! [`interpreter`](crate::interpreter) and [`harness`](crate::harness); this module
//! only covers what the surrounding application needs to present and filter cases.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GraderError, Result};
use crate::types::TestCase;
use crate::utilities::text::{is_blank, non_blank};

/// Array-construction noise stripped from display strings, e.g. `new int[][] `.
static ARRAY_CONSTRUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"new\s+[a-zA-Z0-9]+(\s*\[\s*\])+\s*").expect("static pattern compiles")
});

impl TestCase {
    /// True when no usable description was authored.
    pub fn no_description(&self) -> bool {
        non_blank(self.description.as_deref()).is_none()
    }

    pub fn is_example(&self) -> bool {
        self.example
    }

    /// Checks the invariants a loader must enforce before grading.
    ///
    /// - `weight` is finite and non-negative.
    /// - Without a description, both `input` and `expected_output` are required.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(GraderError::Configuration(format!(
                "Test case {} has invalid weight {}",
                self.id, self.weight
            )));
        }
        if self.no_description() {
            if is_blank(&self.input) {
                return Err(GraderError::Configuration(format!(
                    "Test case {} needs an input when it has no description",
                    self.id
                )));
            }
            if is_blank(&self.expected_output) {
                return Err(GraderError::Configuration(format!(
                    "Test case {} needs an expected output when it has no description",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// The text shown to students for this case.
    ///
    /// Hidden cases always read `hidden`. Otherwise an authored description wins;
    /// failing that, the call is reconstructed as `method(input)`, with
    /// ` -> expected` appended when `pass` is true (a failing case does not reveal
    /// the expected value).
    pub fn display_description(&self, pass: bool) -> String {
        if self.hidden {
            return "hidden".to_string();
        }
        if let Some(description) = non_blank(self.description.as_deref()) {
            return description.to_string();
        }

        let mut result = format!(
            "{}({})",
            self.coding_prompt.method_name,
            strip_array_construction(&self.input)
        );
        if pass {
            result.push_str(" -> ");
            result.push_str(&strip_array_construction(&self.expected_output));
        }
        result
    }

    /// True when `expected_output` builds an array (`new T[]...` or `array(...)`).
    /// Harness templates use this to pick an array-aware assertion.
    pub fn expects_array(&self) -> bool {
        let expected = &self.expected_output;
        (expected.starts_with("new ") && expected.contains("[]")) || expected.starts_with("array(")
    }
}

fn strip_array_construction(text: &str) -> String {
    ARRAY_CONSTRUCTION.replace_all(text, "").into_owned()
}

/// Parses a JSON array of test cases and validates each one.
pub fn load_test_cases(json: &str) -> Result<Vec<TestCase>> {
    let cases: Vec<TestCase> = serde_json::from_str(json)
        .map_err(|e| GraderError::Configuration(format!("Invalid test case JSON: {e}")))?;
    for case in &cases {
        case.validate()?;
    }
    Ok(cases)
}

pub fn only_examples(cases: &[TestCase]) -> Vec<&TestCase> {
    cases.iter().filter(|c| c.example).collect()
}

pub fn only_hidden(cases: &[TestCase]) -> Vec<&TestCase> {
    cases.iter().filter(|c| c.hidden).collect()
}

pub fn only_static(cases: &[TestCase]) -> Vec<&TestCase> {
    cases.iter().filter(|c| c.is_static).collect()
}

pub fn only_dynamic(cases: &[TestCase]) -> Vec<&TestCase> {
    cases.iter().filter(|c| !c.is_static).collect()
}

pub fn only_screening(cases: &[TestCase]) -> Vec<&TestCase> {
    cases.iter().filter(|c| c.screening).collect()
}

/// Cases that produce stored verdicts, i.e. everything except screening gates.
pub fn only_graded(cases: &[TestCase]) -> Vec<&TestCase> {
    cases.iter().filter(|c| !c.screening).collect()
}
