//! # Harness Rendering
//!
//! Renders a test case into a unit-test snippet for a target language, so that an
//! external build pipeline can compile and run it against the student's answer.
//!
//! Templates are MiniJinja templates keyed by a free-form language name. Ruby, Python
//! and Java are embedded; further languages are added with
//! [`HarnessRenderer::register`] or loaded from a directory of `<language>.jinja`
//! files, and an override replaces the embedded template of the same name.
//!
//! ## Template context
//!
//! | Variable | Value |
//! |----------|-------|
//! | `id` | test case id |
//! | `class_name`, `method_name` | from the owning prompt |
//! | `input`, `expected_output` | verbatim |
//! | `negative_feedback` | verbatim, empty when unset |
//! | `array_marker` | `expected_output` builds an array |
//! | `report_sink` | explicit [`ReportChannel`] sink, or none |
//! | `report_pass`, `report_fail` | [`ReportLine`]s escaped for a string literal |
//!
//! Rendering is plain substitution: the output is not checked for syntax.
//!
//! ## Known gap
//!
//! The Java template writes no report line. Its assertion message carries the
//! feedback instead, and the runner reports through JUnit's own results.

pub mod report;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use tracing::{debug, info};
use util::config::AppConfig;

use crate::error::{GraderError, Result};
use crate::types::TestCase;

pub use report::{ReportChannel, ReportLine};

mod embedded {
    pub const RUBY: &str = include_str!("../../templates/ruby.jinja");
    pub const PYTHON: &str = include_str!("../../templates/python.jinja");
    pub const JAVA: &str = include_str!("../../templates/java.jinja");
}

const TEMPLATE_EXTENSION: &str = "jinja";

/// Per-language harness templates.
pub struct HarnessRenderer {
    env: Environment<'static>,
    /// Lowercased language name to registered name, for case-insensitive lookup.
    languages: BTreeMap<String, String>,
}

impl HarnessRenderer {
    /// A renderer holding the embedded Ruby, Python and Java templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let mut renderer = Self {
            env,
            languages: BTreeMap::new(),
        };
        for (language, source) in [
            ("Ruby", embedded::RUBY),
            ("Python", embedded::PYTHON),
            ("Java", embedded::JAVA),
        ] {
            renderer
                .register(language, source)
                .expect("embedded harness templates are valid");
        }
        renderer
    }

    /// The embedded templates plus any overrides from the configured template directory.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut renderer = Self::new();
        if let Some(dir) = &config.template_dir {
            renderer.load_dir(dir)?;
        }
        Ok(renderer)
    }

    /// Adds or replaces the template for `language`. Other languages are untouched.
    pub fn register(&mut self, language: &str, source: impl Into<String>) -> Result<()> {
        let language = language.trim();
        if language.is_empty() {
            return Err(GraderError::Configuration(
                "Harness language name is empty".to_string(),
            ));
        }

        // A replacement registered under different casing takes over the old entry.
        let key = language.to_lowercase();
        if let Some(previous) = self.languages.get(&key) {
            if previous != language {
                self.env.remove_template(previous);
            }
        }

        self.env
            .add_template_owned(language.to_string(), source.into())
            .map_err(|e| {
                GraderError::Configuration(format!("Invalid {language} harness template: {e}"))
            })?;
        self.languages.insert(key, language.to_string());
        debug!(language, "Registered harness template");
        Ok(())
    }

    /// Loads every `<language>.jinja` file in `dir`.
    pub fn load_dir(&mut self, dir: &Path) -> Result<()> {
        let mut entries: Vec<_> = fs::read_dir(dir)?
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(TEMPLATE_EXTENSION)
            })
            .collect();
        entries.sort();

        for path in entries {
            let Some(language) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)?;
            self.register(language, source)?;
            info!(language, path = %path.display(), "Loaded harness template override");
        }
        Ok(())
    }

    /// Registered language names, sorted case-insensitively.
    pub fn languages(&self) -> Vec<&str> {
        self.languages.values().map(String::as_str).collect()
    }

    fn resolve(&self, language: &str) -> Result<&str> {
        self.languages
            .get(&language.trim().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| {
                GraderError::Configuration(format!(
                    "No harness template registered for language '{language}'"
                ))
            })
    }

    /// Renders `test_case` for `language`, letting the template pick its default
    /// report sink.
    pub fn render(&self, language: &str, test_case: &TestCase) -> Result<String> {
        self.render_inner(language, test_case, None)
    }

    /// Renders `test_case` for `language`, writing report lines through `channel`.
    pub fn render_with_channel(
        &self,
        language: &str,
        test_case: &TestCase,
        channel: &ReportChannel,
    ) -> Result<String> {
        self.render_inner(language, test_case, Some(channel))
    }

    fn render_inner(
        &self,
        language: &str,
        test_case: &TestCase,
        channel: Option<&ReportChannel>,
    ) -> Result<String> {
        let name = self.resolve(language)?;
        let template = self
            .env
            .get_template(name)
            .map_err(|e| GraderError::Configuration(e.to_string()))?;

        let negative_feedback = test_case.negative_feedback.as_deref().unwrap_or("");
        let ctx = context! {
            id => test_case.id,
            class_name => &test_case.coding_prompt.class_name,
            method_name => &test_case.coding_prompt.method_name,
            input => &test_case.input,
            expected_output => &test_case.expected_output,
            negative_feedback => negative_feedback,
            array_marker => test_case.expects_array(),
            report_sink => channel.map(|c| c.sink.as_str()),
            report_pass => ReportLine::passed(test_case.id).as_string_literal_body(),
            report_fail => ReportLine::failed(test_case.id, negative_feedback).as_string_literal_body(),
        };

        template
            .render(ctx)
            .map_err(|e| GraderError::Render(format!("{name} harness for test {}: {e}", test_case.id)))
    }
}

impl Default for HarnessRenderer {
    fn default() -> Self {
        Self::new()
    }
}
