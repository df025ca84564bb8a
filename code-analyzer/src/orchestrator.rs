//! Per-file and whole-project AI analysis.
//!
//! Flow for one file:
//!   1) validate filename and code (no remote call on failure);
//!   2) build the four prompts (style, SOLID, issues, recommendations);
//!   3) send them concurrently and wait for all four; the first transport
//!      failure fails the file as a whole, no partial result is returned;
//!   4) parse each answer independently (never fails);
//!   5) score.
//!
//! Batches run files with bounded concurrency and report per file.
//!
//! Logs:
//! - `INFO`: per-file summary (score, #issues, degraded answers, timing)
//! - `DEBUG`: per-prompt timings.

use std::time::Instant;

use ai_llm_service::{AiLlmError, ChatCompletion, ConfigError, ModelClientConfig, OpenAiService};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::cache::ResultStore;
use crate::errors::{AnalyzerError, AnalyzerResult};
use crate::models::{AnalysisResult, PackageReport, SourceFile};
use crate::parser::{
    self, ParseOutcome, parse_issues, parse_recommendations, parse_solid, parse_style,
};
use crate::prompt::{PromptKind, build_file_prompt, build_package_prompt};
use crate::score::{ScoringConfig, overall_score};
use crate::validation::{validate_code, validate_filename, validate_package};

/// Default number of files analyzed at the same time in a batch.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub filename: String,
    pub result: AnalyzerResult<AnalysisResult>,
}

/// Per-answer parse status, exposed for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub style: ParseOutcome,
    pub solid: ParseOutcome,
    pub issues: ParseOutcome,
    pub recommendations: ParseOutcome,
}

impl ParseReport {
    pub fn degraded_count(&self) -> usize {
        [&self.style, &self.solid, &self.issues, &self.recommendations]
            .into_iter()
            .filter(|o| matches!(o, ParseOutcome::Degraded { .. }))
            .count()
    }
}

/// Sequences prompt building, the remote calls, parsing and scoring.
///
/// Generic over the model backend; production uses [`OpenAiService`].
#[derive(Debug)]
pub struct AnalysisOrchestrator<M> {
    model: M,
    scoring: ScoringConfig,
    batch_concurrency: usize,
}

impl AnalysisOrchestrator<OpenAiService> {
    /// Builds the production orchestrator from the environment.
    ///
    /// Reads the model client variables plus `ANALYZER_BATCH_CONCURRENCY`
    /// (optional, default 4).
    ///
    /// # Errors
    /// [`AnalyzerError::Config`] on missing credentials, an unsupported
    /// model, a malformed concurrency value, or an HTTP client that cannot
    /// be built.
    pub fn from_env() -> AnalyzerResult<Self> {
        let cfg = ModelClientConfig::from_env().map_err(AnalyzerError::Config)?;
        let concurrency = batch_concurrency_from(|name| std::env::var(name).ok())?;
        Ok(Self::from_config(cfg)?.with_batch_concurrency(concurrency))
    }

    pub fn from_config(cfg: ModelClientConfig) -> AnalyzerResult<Self> {
        let model = OpenAiService::new(cfg).map_err(AnalyzerError::Config)?;
        Ok(Self::new(model))
    }
}

impl<M> AnalysisOrchestrator<M>
where
    M: ChatCompletion + Sync,
{
    pub fn new(model: M) -> Self {
        Self {
            model,
            scoring: ScoringConfig::default(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_batch_concurrency(mut self, n: usize) -> Self {
        self.batch_concurrency = n.max(1);
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Analyzes one file's code text.
    ///
    /// # Errors
    /// - [`AnalyzerError::Validation`] for an unsupported filename or blank code
    /// - [`AnalyzerError::Model`] if any of the four remote calls fails
    pub async fn analyze_code_text(
        &self,
        code: &str,
        filename: &str,
    ) -> AnalyzerResult<AnalysisResult> {
        self.analyze_with_report(code, filename)
            .await
            .map(|(result, _)| result)
    }

    /// Same as [`analyze_code_text`](Self::analyze_code_text), also returning
    /// how each answer parsed.
    #[instrument(name = "analyze_file", skip(self, code), fields(code_len = code.len()))]
    pub async fn analyze_with_report(
        &self,
        code: &str,
        filename: &str,
    ) -> AnalyzerResult<(AnalysisResult, ParseReport)> {
        validate_filename(filename)?;
        let code = validate_code(code)?;
        let t0 = Instant::now();

        let [style_p, solid_p, issues_p, recs_p] =
            PromptKind::ALL.map(|kind| (kind, build_file_prompt(kind, code, filename)));

        let (style_raw, solid_raw, issues_raw, recs_raw) = tokio::try_join!(
            self.ask(style_p.0, &style_p.1),
            self.ask(solid_p.0, &solid_p.1),
            self.ask(issues_p.0, &issues_p.1),
            self.ask(recs_p.0, &recs_p.1),
        )
        .map_err(|e| {
            warn!(%filename, error = %e, "file analysis failed");
            AnalyzerError::model(filename, e)
        })?;

        let style = parse_style(&style_raw);
        let solid = parse_solid(&solid_raw);
        let issues = parse_issues(&issues_raw);
        let recommendations = parse_recommendations(&recs_raw);

        let report = ParseReport {
            style: style.outcome,
            solid: solid.outcome,
            issues: issues.outcome,
            recommendations: recommendations.outcome,
        };

        let overall_score =
            overall_score(&style.value, &solid.value, &issues.value, &self.scoring);

        let result = AnalysisResult {
            filename: filename.to_string(),
            code_style: style.value,
            solid_principles: solid.value,
            potential_issues: issues.value,
            recommendations: recommendations.value,
            overall_score,
        };

        info!(
            %filename,
            score = result.overall_score,
            issues = result.potential_issues.len(),
            degraded = report.degraded_count(),
            elapsed_ms = t0.elapsed().as_millis(),
            "file analysis completed"
        );

        Ok((result, report))
    }

    /// Analyzes the file whose code text the latest parse batch captured.
    ///
    /// # Errors
    /// [`AnalyzerError::NotFound`] on a store miss, otherwise as
    /// [`analyze_code_text`](Self::analyze_code_text).
    pub async fn analyze_cached(
        &self,
        store: &ResultStore,
        filename: &str,
    ) -> AnalyzerResult<AnalysisResult> {
        let code = store.lookup(filename).await?;
        self.analyze_code_text(&code, filename).await
    }

    /// Analyzes several files; one file's failure never affects the others.
    ///
    /// Outcomes are returned in input order.
    pub async fn analyze_batch(&self, files: Vec<SourceFile>) -> Vec<FileOutcome> {
        let t0 = Instant::now();
        let outcomes: Vec<FileOutcome> = stream::iter(files)
            .map(|f| async move {
                let result = self.analyze_code_text(&f.content, &f.filename).await;
                FileOutcome {
                    filename: f.filename,
                    result,
                }
            })
            .buffered(self.batch_concurrency)
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            files = outcomes.len(),
            failed,
            elapsed_ms = t0.elapsed().as_millis(),
            "batch analysis completed"
        );
        outcomes
    }

    /// Whole-project overview from file names only.
    ///
    /// # Errors
    /// - [`AnalyzerError::Validation`] for an empty list
    /// - [`AnalyzerError::PackageModel`] if the remote call fails
    #[instrument(name = "analyze_package", skip_all, fields(files = file_list.len()))]
    pub async fn analyze_package_structure<S>(
        &self,
        file_list: &[S],
    ) -> AnalyzerResult<PackageReport>
    where
        S: AsRef<str> + Sync,
    {
        if file_list.is_empty() {
            return Err(AnalyzerError::Validation(
                "at least one file is required".into(),
            ));
        }
        let prompt = build_package_prompt(file_list);
        let raw = self
            .model
            .complete(&prompt)
            .await
            .map_err(AnalyzerError::PackageModel)?;

        let parsed = parser::parse_package_report(&raw);
        info!(outcome = ?parsed.outcome, "package analysis completed");
        Ok(parsed.into_value())
    }

    /// Validates uploaded files and analyzes the project by their paths.
    ///
    /// File contents are validated only; they never reach the prompt.
    pub async fn analyze_package_files(
        &self,
        files: &[SourceFile],
    ) -> AnalyzerResult<PackageReport> {
        validate_package(files)?;
        let names: Vec<&str> = files.iter().map(SourceFile::display_path).collect();
        self.analyze_package_structure(&names).await
    }

    async fn ask(&self, kind: PromptKind, prompt: &str) -> Result<String, AiLlmError> {
        let t = Instant::now();
        let out = self.model.complete(prompt).await;
        debug!(
            prompt = kind.as_str(),
            ok = out.is_ok(),
            elapsed_ms = t.elapsed().as_millis(),
            "model answered"
        );
        out
    }
}

/// Reads `ANALYZER_BATCH_CONCURRENCY` through `lookup`.
fn batch_concurrency_from<F>(lookup: F) -> AnalyzerResult<usize>
where
    F: Fn(&str) -> Option<String>,
{
    const VAR: &str = "ANALYZER_BATCH_CONCURRENCY";
    match lookup(VAR) {
        None => Ok(DEFAULT_BATCH_CONCURRENCY),
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            Ok(_) => Err(ConfigError::OutOfRange {
                field: VAR,
                detail: "must be at least 1",
            }
            .into()),
            Err(_) => Err(ConfigError::InvalidNumber {
                var: VAR,
                reason: "expected a positive integer",
            }
            .into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use ai_llm_service::ModelError;

    use super::*;
    use crate::models::ParsedFileRecord;
    use crate::parser::sentinels::{INSUFFICIENT_DATA, PARSE_ERROR};
    use crate::prompt::PACKAGE_INSTRUCTION;

    /// Answers by prompt kind; records every prompt it receives.
    #[derive(Default)]
    struct ScriptedModel {
        answers: HashMap<&'static str, String>,
        fail_on: Option<&'static str>,
        fail_for_code: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn answering(pairs: &[(&'static str, &str)]) -> Self {
            Self {
                answers: pairs.iter().map(|(k, v)| (*k, v.to_string())).collect(),
                ..Self::default()
            }
        }

        fn key_for(prompt: &str) -> &'static str {
            if prompt.starts_with(PACKAGE_INSTRUCTION) {
                return "package";
            }
            PromptKind::ALL
                .into_iter()
                .find(|k| prompt.starts_with(k.instruction()))
                .map(PromptKind::as_str)
                .unwrap_or("unknown")
        }
    }

    impl ChatCompletion for ScriptedModel {
        fn complete(
            &self,
            prompt: &str,
        ) -> impl Future<Output = Result<String, AiLlmError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            let key = Self::key_for(prompt);
            let fail = self.fail_on == Some(key)
                || self.fail_for_code.is_some_and(|c| prompt.contains(c));
            let answer = self.answers.get(key).cloned().unwrap_or_default();
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                if fail {
                    Err(ModelError::Timeout(Duration::from_secs(60)).into())
                } else {
                    Ok(answer)
                }
            }
        }
    }

    const GOOD_STYLE: &str = r#"{"formatting":"хорошо","naming":"хорошо","documentation":"хорошо","structure":"хорошо"}"#;
    const GOOD_SOLID: &str = r#"```json
{"SRP":"соответствует","OCP":"соответствует","LSP":"соответствует","ISP":"соответствует","DIP":"соответствует"}
```"#;

    fn happy_model() -> ScriptedModel {
        ScriptedModel::answering(&[
            ("style", GOOD_STYLE),
            ("solid", GOOD_SOLID),
            ("issues", "[{}, {}]"),
            ("recommendations", r#"["добавить docstring", ""]"#),
            ("package", r#"{"architecture": "плоская"}"#),
        ])
    }

    #[tokio::test]
    async fn full_analysis_scores_and_parses() {
        let orch = AnalysisOrchestrator::new(happy_model());
        let (res, report) = orch
            .analyze_with_report("def f():\n    return 1\n", "a.py")
            .await
            .unwrap();

        assert_eq!(res.filename, "a.py");
        assert_eq!(res.code_style.naming, "хорошо");
        assert_eq!(res.solid_principles.dip, "соответствует");
        assert_eq!(res.potential_issues.len(), 2);
        assert_eq!(res.recommendations, vec!["добавить docstring"]);
        assert!((res.overall_score - 0.8).abs() < 1e-9);
        assert_eq!(report.degraded_count(), 0);
        assert_eq!(orch.model().calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn all_four_prompts_carry_the_trimmed_code() {
        let orch = AnalysisOrchestrator::new(happy_model());
        orch.analyze_code_text("\n\n  x = 1  \n", "a.py").await.unwrap();

        let prompts = orch.model().prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 4);
        let mut kinds: Vec<_> = prompts.iter().map(|p| ScriptedModel::key_for(p)).collect();
        kinds.sort();
        assert_eq!(kinds, vec!["issues", "recommendations", "solid", "style"]);
        assert!(prompts.iter().all(|p| p.contains("\nx = 1\n")));
    }

    #[tokio::test]
    async fn garbage_answers_degrade_without_failing() {
        let model = ScriptedModel::answering(&[
            ("style", "не JSON"),
            ("solid", "{not json}"),
            ("issues", "oops"),
            ("recommendations", "{}"),
        ]);
        let orch = AnalysisOrchestrator::new(model);
        let (res, report) = orch.analyze_with_report("x = 1", "a.py").await.unwrap();

        assert_eq!(report.degraded_count(), 4);
        for (_, text) in res.solid_principles.entries() {
            assert_eq!(text, PARSE_ERROR);
        }
        // The single parse-failure issue still counts as one issue.
        assert_eq!(res.potential_issues.len(), 1);
        assert!((res.overall_score - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn one_failing_prompt_fails_the_whole_file() {
        let mut model = happy_model();
        model.fail_on = Some("issues");
        let orch = AnalysisOrchestrator::new(model);

        let err = orch.analyze_code_text("x = 1", "a.py").await.unwrap_err();
        match err {
            AnalyzerError::Model { filename, source } => {
                assert_eq!(filename, "a.py");
                assert!(matches!(source, AiLlmError::Model(ModelError::Timeout(_))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn validation_happens_before_any_remote_call() {
        let orch = AnalysisOrchestrator::new(happy_model());

        assert!(matches!(
            orch.analyze_code_text("   ", "a.py").await,
            Err(AnalyzerError::Validation(_))
        ));
        assert!(matches!(
            orch.analyze_code_text("x = 1", "a.js").await,
            Err(AnalyzerError::Validation(_))
        ));
        assert_eq!(orch.model().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn batch_isolates_failures_and_keeps_order() {
        let mut model = happy_model();
        model.fail_for_code = Some("BROKEN");
        let orch = AnalysisOrchestrator::new(model).with_batch_concurrency(2);

        let files = vec![
            SourceFile::new("a.py", "x = 1"),
            SourceFile::new("b.py", "BROKEN = 1"),
            SourceFile::new("c.txt", "x = 1"),
            SourceFile::new("d.py", "y = 2"),
        ];
        let out = orch.analyze_batch(files).await;

        let names: Vec<_> = out.iter().map(|o| o.filename.as_str()).collect();
        assert_eq!(names, vec!["a.py", "b.py", "c.txt", "d.py"]);
        assert!(out[0].result.is_ok());
        assert!(matches!(out[1].result, Err(AnalyzerError::Model { .. })));
        assert!(matches!(out[2].result, Err(AnalyzerError::Validation(_))));
        assert!(out[3].result.is_ok());
    }

    #[tokio::test]
    async fn cached_analysis_uses_store_text() {
        let store = ResultStore::new();
        store
            .populate_from_parsed(vec![ParsedFileRecord {
                filename: "a.py".into(),
                file_content: "cached_code = 1".into(),
                metadata: Default::default(),
            }])
            .await;
        let orch = AnalysisOrchestrator::new(happy_model());

        let res = orch.analyze_cached(&store, "a.py").await.unwrap();
        assert_eq!(res.filename, "a.py");
        assert!(
            orch.model()
                .prompts
                .lock()
                .unwrap()
                .iter()
                .all(|p| p.contains("cached_code = 1"))
        );

        assert!(matches!(
            orch.analyze_cached(&store, "b.py").await,
            Err(AnalyzerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn package_prompt_never_contains_file_contents() {
        let orch = AnalysisOrchestrator::new(happy_model());
        let files = vec![
            SourceFile::new("a.py", "SECRET_CONTENT_A = 1"),
            SourceFile::new("b.py", "SECRET_CONTENT_B = 2"),
        ];
        let report = orch.analyze_package_files(&files).await.unwrap();

        let prompts = orch.model().prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("a.py"));
        assert!(prompts[0].contains("b.py"));
        assert!(!prompts[0].contains("SECRET_CONTENT_A"));
        assert!(!prompts[0].contains("SECRET_CONTENT_B"));

        assert_eq!(report.get("architecture").unwrap(), "плоская");
        assert_eq!(report.get("weak_points").unwrap(), INSUFFICIENT_DATA);
    }

    #[test]
    fn batch_concurrency_env_parsing() {
        assert_eq!(batch_concurrency_from(|_| None).unwrap(), 4);
        assert_eq!(batch_concurrency_from(|_| Some(" 8 ".into())).unwrap(), 8);
        assert!(matches!(
            batch_concurrency_from(|_| Some("0".into())),
            Err(AnalyzerError::Config(_))
        ));
        assert!(matches!(
            batch_concurrency_from(|_| Some("many".into())),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn package_failure_and_empty_list() {
        let mut model = happy_model();
        model.fail_on = Some("package");
        let orch = AnalysisOrchestrator::new(model);

        assert!(matches!(
            orch.analyze_package_structure(&["a.py"]).await,
            Err(AnalyzerError::PackageModel(_))
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            orch.analyze_package_structure(&empty).await,
            Err(AnalyzerError::Validation(_))
        ));
    }
}
