//! Concurrent command dispatch
//!
//! Parses a batch of intents, resolves each verb against the registry,
//! fans out one blocking task per resolved command, and reports
//! per-command outcomes in submission order. One slow or failing handler
//! never blocks or voids its siblings: "open chrome, open firefox" must
//! open both and say what happened to each.

use crate::command::parser::{parse, CommandInput};
use crate::handlers::{Handler, HandlerSet};
use crate::verbs::{Arity, VerbRegistry};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Success,
    /// Handler completed but reported an incomplete outcome
    Warning,
    /// Handler returned an error or its task aborted
    Failure,
}

/// Per-command report entry, index-correlated to submission order
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub description: String,
    pub status: CommandStatus,
    pub detail: Option<String>,
}

/// Why an intent was dropped before execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No verb token could be extracted
    Unparsable,
    /// The verb requires a target and none was given
    MissingTarget { verb: String },
    /// The verb tag resolves to nothing in the registry
    UnknownVerb { verb_tag: String },
    /// Registered verb, but its capability has no bound handler
    UnboundCapability { verb: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedIntent {
    pub input: String,
    pub reason: SkipReason,
}

/// Whether the batch had anything to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Completed,
    /// Empty batch, or nothing survived parsing and resolution
    NoTasks,
}

/// The aggregated outcome of one dispatch call
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub results: Vec<ExecutionResult>,
    pub skipped: Vec<SkippedIntent>,
    pub status: BatchStatus,
}

impl DispatchReport {
    /// Overall success flag: no hard failures (warnings pass)
    pub fn success(&self) -> bool {
        self.results
            .iter()
            .all(|r| r.status != CommandStatus::Failure)
    }
}

/// A validated command ready to run
struct ResolvedCommand {
    description: String,
    handler: Arc<dyn Handler>,
    target: String,
}

pub struct Dispatcher {
    registry: VerbRegistry,
    handlers: HandlerSet,
}

impl Dispatcher {
    pub fn new(registry: VerbRegistry, handlers: HandlerSet) -> Self {
        Self { registry, handlers }
    }

    /// Run one batch of intents
    ///
    /// Never returns an error: unusable intents become skip diagnostics,
    /// handler outcomes become per-command results, and an empty batch is
    /// an explicit no-op.
    pub async fn dispatch(&self, batch: &[CommandInput]) -> DispatchReport {
        if batch.is_empty() {
            tracing::debug!("dispatch called with an empty batch");
            return DispatchReport {
                results: Vec::new(),
                skipped: Vec::new(),
                status: BatchStatus::NoTasks,
            };
        }

        let mut skipped = Vec::new();
        let mut commands = Vec::new();

        for input in batch {
            match self.resolve(input) {
                Ok(command) => commands.push(command),
                Err(reason) => {
                    tracing::warn!(intent = %input, ?reason, "skipping intent");
                    skipped.push(SkippedIntent {
                        input: input.to_string(),
                        reason,
                    });
                }
            }
        }

        if commands.is_empty() {
            return DispatchReport {
                results: Vec::new(),
                skipped,
                status: BatchStatus::NoTasks,
            };
        }

        // One task per command; all spawned before any is awaited, so the
        // batch runs concurrently. Awaiting the handles in submission order
        // is the join-all and keeps the report index-correlated.
        let mut pending = Vec::with_capacity(commands.len());
        for command in commands {
            let ResolvedCommand {
                description,
                handler,
                target,
            } = command;
            let handle = tokio::task::spawn_blocking(move || handler.execute(&target));
            pending.push((description, handle));
        }

        let mut results = Vec::with_capacity(pending.len());
        for (description, handle) in pending {
            let (status, detail) = match handle.await {
                Ok(Ok(true)) => (CommandStatus::Success, None),
                Ok(Ok(false)) => (
                    CommandStatus::Warning,
                    Some("completed with warnings".to_string()),
                ),
                Ok(Err(e)) => (CommandStatus::Failure, Some(e.to_string())),
                Err(join_error) => (
                    CommandStatus::Failure,
                    Some(format!("task aborted: {join_error}")),
                ),
            };
            match status {
                CommandStatus::Success => tracing::info!(command = %description, "ok"),
                CommandStatus::Warning => tracing::warn!(command = %description, "warning"),
                CommandStatus::Failure => {
                    tracing::error!(command = %description, detail = ?detail, "failed")
                }
            }
            results.push(ExecutionResult {
                description,
                status,
                detail,
            });
        }

        DispatchReport {
            results,
            skipped,
            status: BatchStatus::Completed,
        }
    }

    fn resolve(&self, input: &CommandInput) -> Result<ResolvedCommand, SkipReason> {
        let (verb_tag, target) = parse(&self.registry, input);
        if verb_tag.is_empty() {
            return Err(SkipReason::Unparsable);
        }

        let verb = self
            .registry
            .resolve(&verb_tag)
            .ok_or(SkipReason::UnknownVerb {
                verb_tag: verb_tag.clone(),
            })?;

        let target = if target.is_empty() {
            match verb.arity() {
                Arity::Required => {
                    return Err(SkipReason::MissingTarget {
                        verb: verb.canonical().to_string(),
                    })
                }
                Arity::Optional { default } => default.to_string(),
            }
        } else {
            target
        };

        let handler = self
            .handlers
            .get(verb.capability())
            .ok_or(SkipReason::UnboundCapability {
                verb: verb.canonical().to_string(),
            })?;

        let description = if target.is_empty() {
            verb.canonical().to_string()
        } else {
            format!("{verb} {target}")
        };

        Ok(ResolvedCommand {
            description,
            handler,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{Result as VResult, VesperError};
    use crate::verbs::Capability;
    use std::sync::Mutex;
    use std::time::Duration;

    struct AlwaysOk;
    impl Handler for AlwaysOk {
        fn execute(&self, _target: &str) -> VResult<bool> {
            Ok(true)
        }
    }

    struct AlwaysWarn;
    impl Handler for AlwaysWarn {
        fn execute(&self, _target: &str) -> VResult<bool> {
            Ok(false)
        }
    }

    struct AlwaysFail;
    impl Handler for AlwaysFail {
        fn execute(&self, _target: &str) -> VResult<bool> {
            Err(VesperError::Handler("boom".into()))
        }
    }

    struct SlowOk(Duration);
    impl Handler for SlowOk {
        fn execute(&self, _target: &str) -> VResult<bool> {
            std::thread::sleep(self.0);
            Ok(true)
        }
    }

    struct Recording(Mutex<Vec<String>>);
    impl Handler for Recording {
        fn execute(&self, target: &str) -> VResult<bool> {
            self.0.lock().unwrap().push(target.to_string());
            Ok(true)
        }
    }

    fn dispatcher(bind: impl FnOnce(&mut HandlerSet)) -> Dispatcher {
        let mut handlers = HandlerSet::new();
        bind(&mut handlers);
        Dispatcher::new(VerbRegistry::new(), handlers)
    }

    #[tokio::test]
    async fn test_empty_batch_is_an_explicit_no_op() {
        let dispatcher = dispatcher(|_| {});
        let report = dispatcher.dispatch(&[]).await;
        assert_eq!(report.status, BatchStatus::NoTasks);
        assert!(report.results.is_empty());
        assert!(report.success());
    }

    #[tokio::test]
    async fn test_batch_preserves_submission_order() {
        // The first command is much slower than the second; the report must
        // still come back in submission order.
        let dispatcher = dispatcher(|set| {
            set.bind(
                Capability::AppOpen,
                Arc::new(SlowOk(Duration::from_millis(150))),
            );
            set.bind(Capability::AppClose, Arc::new(AlwaysOk));
        });

        let report = dispatcher
            .dispatch(&["open notepad".into(), "close chrome".into()])
            .await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].description, "open notepad");
        assert_eq!(report.results[1].description, "close chrome");
        assert!(report.success());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_touch_siblings() {
        let dispatcher = dispatcher(|set| {
            set.bind(Capability::AppOpen, Arc::new(AlwaysOk));
            set.bind(Capability::AppClose, Arc::new(AlwaysFail));
        });

        let report = dispatcher
            .dispatch(&[
                "open notepad".into(),
                "close chrome".into(),
                "open firefox".into(),
                "open calculator".into(),
            ])
            .await;

        assert_eq!(report.results.len(), 4);
        assert_eq!(report.results[0].status, CommandStatus::Success);
        assert_eq!(report.results[1].status, CommandStatus::Failure);
        assert!(report.results[1].detail.as_deref().unwrap().contains("boom"));
        assert_eq!(report.results[2].status, CommandStatus::Success);
        assert_eq!(report.results[3].status, CommandStatus::Success);
        assert!(!report.success());
    }

    #[tokio::test]
    async fn test_warning_status_for_falsy_handler_result() {
        let dispatcher = dispatcher(|set| {
            set.bind(Capability::AppOpen, Arc::new(AlwaysWarn));
        });

        let report = dispatcher.dispatch(&["open notepad".into()]).await;
        assert_eq!(report.results[0].status, CommandStatus::Warning);
        // A warning is not a failure.
        assert!(report.success());
    }

    #[tokio::test]
    async fn test_skip_reasons_are_distinguished() {
        let dispatcher = dispatcher(|set| {
            set.bind(Capability::AppOpen, Arc::new(AlwaysOk));
        });

        let report = dispatcher
            .dispatch(&[
                CommandInput::Tokens(vec![]),          // unparsable
                "frobnicate the widget".into(),        // unknown verb
                "open".into(),                         // missing required target
                "generate image a red fox".into(),     // registered but unbound
                "open notepad".into(),                 // runs
            ])
            .await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.skipped.len(), 4);
        assert_eq!(report.skipped[0].reason, SkipReason::Unparsable);
        assert_eq!(
            report.skipped[1].reason,
            SkipReason::UnknownVerb {
                verb_tag: "frobnicate".into()
            }
        );
        assert_eq!(
            report.skipped[2].reason,
            SkipReason::MissingTarget { verb: "open".into() }
        );
        assert_eq!(
            report.skipped[3].reason,
            SkipReason::UnboundCapability {
                verb: "generate image".into()
            }
        );
    }

    #[tokio::test]
    async fn test_optional_target_gets_its_sentinel() {
        let recording = Arc::new(Recording(Mutex::new(Vec::new())));
        let dispatcher = dispatcher(|set| {
            set.bind(
                Capability::File(crate::verbs::FileOp::List),
                recording.clone(),
            );
        });

        let report = dispatcher.dispatch(&["list files".into()]).await;
        assert_eq!(report.results.len(), 1);
        assert_eq!(recording.0.lock().unwrap().as_slice(), ["."]);
    }

    #[tokio::test]
    async fn test_mixed_input_shapes_in_one_batch() {
        let recording = Arc::new(Recording(Mutex::new(Vec::new())));
        let dispatcher = dispatcher(|set| {
            set.bind(Capability::AppOpen, recording.clone());
        });

        let report = dispatcher
            .dispatch(&[
                "open notepad".into(),
                CommandInput::Tokens(vec!["open".into(), "mission".into(), "control".into()]),
            ])
            .await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(
            recording.0.lock().unwrap().as_slice(),
            ["notepad", "mission control"]
        );
    }

    #[tokio::test]
    async fn test_all_skipped_reports_no_tasks() {
        let dispatcher = dispatcher(|_| {});
        let report = dispatcher.dispatch(&["nonsense".into()]).await;
        assert_eq!(report.status, BatchStatus::NoTasks);
        assert_eq!(report.skipped.len(), 1);
    }
}
