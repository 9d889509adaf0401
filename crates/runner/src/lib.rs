//! # Beaker Runner
//!
//! Orchestrates the simulated run of the editor buffer against the
//! oracle: run, detect failure in the raw output, then branch to a
//! diagnostic or an explanation call, assembling the displayed
//! transcript stage by stage.
//!
//! A "failure" here is not a system error: it is a successful oracle
//! response whose content indicates the simulated program failed,
//! detected by substring matching on the failure markers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio::sync::broadcast;

use oracle::{EXPLAIN_FALLBACK, Oracle, RUN_FALLBACK};

/// Raw-output substrings that route a run to the diagnostic branch
pub const FAILURE_MARKERS: &[&str] = &["Traceback", "Error", "Exception"];

/// Transient placeholder while the run request is in flight
pub const RUNNING_PLACEHOLDER: &str = "Running… ⚗️";
/// Transient placeholder while the diagnostic request is in flight
pub const INSPECTING_PLACEHOLDER: &str = "🔍 Inspecting the failure…";
/// Transient placeholder while the explanation request is in flight
pub const ANALYZING_PLACEHOLDER: &str = "👀 Beaker is studying the result…";
/// Transient placeholder for the explain-only action
pub const EXAMINING_PLACEHOLDER: &str = "🔬 Examining the code, separating the molecules…";

/// Rule between the raw output and the oracle's section
pub const SECTION_RULE: &str = "-------------------";
/// Banner over the diagnostic section
pub const DIAGNOSIS_BANNER: &str = "🧪 Beaker's lab notes:";
/// Banner over the explanation section
pub const EXPLANATION_BANNER: &str = "🧪 Beaker's analysis:";

/// Run lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Failed,
    Succeeded,
}

/// Terminal result of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Failed,
    Succeeded,
}

/// Events published while a run progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Started,
    TranscriptChanged,
    Finished(RunOutcome),
}

/// Simulated-run orchestrator
pub struct Runner {
    oracle: Arc<dyn Oracle>,
    /// Gates concurrent run/explain triggers
    busy: AtomicBool,
    phase: RwLock<RunPhase>,
    transcript: RwLock<String>,
    events: broadcast::Sender<RunEvent>,
}

impl Runner {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            oracle,
            busy: AtomicBool::new(false),
            phase: RwLock::new(RunPhase::Idle),
            transcript: RwLock::new(String::new()),
            events,
        }
    }

    /// Subscribe to run progress events
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.events.subscribe()
    }

    /// Is a run or explain currently in flight?
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> RunPhase {
        *self.phase.read()
    }

    /// Assembled transcript for display
    pub fn transcript(&self) -> String {
        self.transcript.read().clone()
    }

    /// Empty the transcript (the terminal's clear action)
    pub fn clear(&self) {
        self.set_transcript(String::new());
    }

    /// Run the buffer through the oracle's simulation.
    ///
    /// Returns None when another run or explain is already in flight.
    pub async fn run(&self, code: &str) -> Option<RunOutcome> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return None;
        }

        *self.phase.write() = RunPhase::Running;
        let _ = self.events.send(RunEvent::Started);
        self.set_transcript(RUNNING_PLACEHOLDER.to_string());

        let raw = match self.oracle.simulate_run(code).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(%error, "run simulation failed in transport");
                RUN_FALLBACK.to_string()
            }
        };

        let failed = FAILURE_MARKERS.iter().any(|marker| raw.contains(marker));

        let outcome = if failed {
            self.set_transcript(format!("{raw}\n\n{INSPECTING_PLACEHOLDER}"));

            // Non-fatal: an empty diagnosis leaves the raw output alone.
            let diagnosis = match self.oracle.diagnose(code, &raw).await {
                Ok(diagnosis) => diagnosis,
                Err(error) => {
                    tracing::warn!(%error, "diagnostic call failed");
                    String::new()
                }
            };

            if diagnosis.is_empty() {
                self.set_transcript(raw);
            } else {
                self.set_transcript(format!(
                    "{raw}\n\n{SECTION_RULE}\n{DIAGNOSIS_BANNER}\n{diagnosis}"
                ));
            }
            RunOutcome::Failed
        } else {
            self.set_transcript(format!("{raw}\n\n{ANALYZING_PLACEHOLDER}"));

            let explanation = match self.oracle.explain(code).await {
                Ok(explanation) => explanation,
                Err(error) => {
                    tracing::warn!(%error, "explanation call failed");
                    EXPLAIN_FALLBACK.to_string()
                }
            };

            self.set_transcript(format!(
                "{raw}\n\n{SECTION_RULE}\n{EXPLANATION_BANNER}\n{explanation}"
            ));
            RunOutcome::Succeeded
        };

        *self.phase.write() = match outcome {
            RunOutcome::Failed => RunPhase::Failed,
            RunOutcome::Succeeded => RunPhase::Succeeded,
        };
        let _ = self.events.send(RunEvent::Finished(outcome));

        // Terminal states resolve back to idle once the transcript is
        // final; only the busy flag tracked the in-flight window.
        *self.phase.write() = RunPhase::Idle;
        self.busy.store(false, Ordering::SeqCst);

        Some(outcome)
    }

    /// Explain the buffer without a run phase, replacing the transcript.
    ///
    /// No-ops (returns false) on blank code or while a run is in flight.
    pub async fn explain(&self, code: &str) -> bool {
        if code.trim().is_empty() {
            return false;
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            return false;
        }

        self.set_transcript(EXAMINING_PLACEHOLDER.to_string());

        let explanation = match self.oracle.explain(code).await {
            Ok(explanation) => explanation,
            Err(error) => {
                tracing::warn!(%error, "explanation call failed");
                EXPLAIN_FALLBACK.to_string()
            }
        };
        self.set_transcript(explanation);

        self.busy.store(false, Ordering::SeqCst);
        true
    }

    fn set_transcript(&self, text: String) {
        *self.transcript.write() = text;
        let _ = self.events.send(RunEvent::TranscriptChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oracle::{ChatTurn, FragmentStream, OracleError};

    struct ScriptedOracle {
        run_output: &'static str,
        diagnosis: Result<&'static str, ()>,
        explanation: &'static str,
    }

    impl ScriptedOracle {
        fn new(run_output: &'static str) -> Self {
            Self {
                run_output,
                diagnosis: Ok("check the flask name"),
                explanation: "mixes two reagents",
            }
        }
    }

    #[async_trait]
    impl Oracle for ScriptedOracle {
        async fn simulate_run(&self, _code: &str) -> Result<String, OracleError> {
            Ok(self.run_output.to_string())
        }

        async fn diagnose(&self, _code: &str, _failure: &str) -> Result<String, OracleError> {
            match self.diagnosis {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(OracleError::MalformedResponse),
            }
        }

        async fn explain(&self, _code: &str) -> Result<String, OracleError> {
            Ok(self.explanation.to_string())
        }

        async fn chat_stream(&self, _turns: &[ChatTurn]) -> Result<FragmentStream, OracleError> {
            Ok(Box::pin(futures::stream::empty()))
        }
    }

    #[tokio::test]
    async fn test_failure_marker_routes_to_diagnosis() {
        let runner = Runner::new(Arc::new(ScriptedOracle::new(
            "Traceback (most recent call last):\nNameError: name 'x' is not defined",
        )));

        let outcome = runner.run("print(x)").await;
        assert_eq!(outcome, Some(RunOutcome::Failed));

        let transcript = runner.transcript();
        assert!(transcript.starts_with("Traceback"));
        assert!(transcript.contains(DIAGNOSIS_BANNER));
        assert!(!transcript.contains(EXPLANATION_BANNER));
    }

    #[tokio::test]
    async fn test_clean_output_routes_to_explanation() {
        let runner = Runner::new(Arc::new(ScriptedOracle::new("4")));

        let outcome = runner.run("print(2 + 2)").await;
        assert_eq!(outcome, Some(RunOutcome::Succeeded));

        let transcript = runner.transcript();
        assert!(transcript.starts_with("4"));
        assert!(transcript.contains(EXPLANATION_BANNER));
        assert!(!transcript.contains(DIAGNOSIS_BANNER));
    }

    #[tokio::test]
    async fn test_empty_diagnosis_leaves_raw_output_only() {
        let mut oracle = ScriptedOracle::new("ValueError: bad reagent");
        oracle.diagnosis = Err(());
        let runner = Runner::new(Arc::new(oracle));

        runner.run("x").await;
        assert_eq!(runner.transcript(), "ValueError: bad reagent");
    }

    #[tokio::test]
    async fn test_explain_only_replaces_transcript() {
        let runner = Runner::new(Arc::new(ScriptedOracle::new("4")));

        assert!(runner.explain("print(2 + 2)").await);
        assert_eq!(runner.transcript(), "mixes two reagents");
    }

    #[tokio::test]
    async fn test_explain_skips_blank_code() {
        let runner = Runner::new(Arc::new(ScriptedOracle::new("4")));
        assert!(!runner.explain("   \n").await);
        assert_eq!(runner.transcript(), "");
    }

    #[tokio::test]
    async fn test_busy_flag_gates_second_run() {
        struct BlockedOracle {
            release: tokio::sync::Notify,
        }

        #[async_trait]
        impl Oracle for BlockedOracle {
            async fn simulate_run(&self, _code: &str) -> Result<String, OracleError> {
                self.release.notified().await;
                Ok("4".to_string())
            }

            async fn diagnose(&self, _c: &str, _f: &str) -> Result<String, OracleError> {
                Ok(String::new())
            }

            async fn explain(&self, _code: &str) -> Result<String, OracleError> {
                Ok(String::new())
            }

            async fn chat_stream(&self, _turns: &[ChatTurn]) -> Result<FragmentStream, OracleError> {
                Ok(Box::pin(futures::stream::empty()))
            }
        }

        let oracle = Arc::new(BlockedOracle {
            release: tokio::sync::Notify::new(),
        });
        let runner = Arc::new(Runner::new(Arc::clone(&oracle) as Arc<dyn Oracle>));

        let in_flight = tokio::spawn({
            let runner = Arc::clone(&runner);
            async move { runner.run("print(2 + 2)").await }
        });
        tokio::task::yield_now().await;

        assert!(runner.is_busy());
        assert_eq!(runner.run("print(2 + 2)").await, None);
        assert!(!runner.explain("print(2 + 2)").await);

        oracle.release.notify_one();
        assert_eq!(in_flight.await.unwrap(), Some(RunOutcome::Succeeded));
        assert!(!runner.is_busy());
    }

    #[tokio::test]
    async fn test_clear_empties_transcript() {
        let runner = Runner::new(Arc::new(ScriptedOracle::new("4")));
        runner.run("x").await;
        assert!(!runner.transcript().is_empty());
        runner.clear();
        assert_eq!(runner.transcript(), "");
    }
}
