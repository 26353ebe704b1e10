//! Analysis controller.
//!
//! Holds the transient state of one evaluator session: the input text, a busy
//! flag and the current result. At most one classification request is in
//! flight; a submit while busy is dropped, not queued.

use crate::client::DignityClassifier;
use crate::error::AppError;
use crate::models::AnalysisResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Receives the user-facing error conditions.
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &AppError);
}

/// Writes a trace and the user message to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, err: &AppError) {
        match std::error::Error::source(err) {
            Some(cause) => error!(%cause, "{}", err),
            None => error!("{}", err),
        }
        eprintln!("{}", err);
    }
}

/// What a call to `submit` did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The request succeeded and the result replaced the current one.
    Analyzed(AnalysisResult),
    /// The input was blank; no request was made.
    Rejected,
    /// A request was already in flight; nothing happened.
    Ignored,
    /// The request failed; the current result is unchanged.
    Failed,
}

// Clears the busy flag when the submit finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct AnalysisController<C: DignityClassifier> {
    classifier: Arc<C>,
    notifier: Arc<dyn Notifier>,
    input: Mutex<String>,
    busy: AtomicBool,
    result: Mutex<Option<AnalysisResult>>,
}

impl<C: DignityClassifier> AnalysisController<C> {
    pub fn new(classifier: Arc<C>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            classifier,
            notifier,
            input: Mutex::new(String::new()),
            busy: AtomicBool::new(false),
            result: Mutex::new(None),
        }
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *lock(&self.input) = text.into();
    }

    pub fn input(&self) -> String {
        lock(&self.input).clone()
    }

    /// True while a request is in flight. Front ends disable the trigger on it.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn current_result(&self) -> Option<AnalysisResult> {
        lock(&self.result).clone()
    }

    /// Submits the current input for analysis.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Submit ignored: a request is already in flight");
            return SubmitOutcome::Ignored;
        }
        let _guard = BusyGuard(&self.busy);

        let text = self.input();
        if text.trim().is_empty() {
            self.notifier.notify(&AppError::EmptyInput);
            return SubmitOutcome::Rejected;
        }

        info!("Submitting {} characters for analysis", text.chars().count());
        match self.classifier.analyze(&text).await {
            Ok(result) => {
                info!(score = result.score, category = %result.category, "Analysis complete");
                *lock(&self.result) = Some(result.clone());
                SubmitOutcome::Analyzed(result)
            }
            Err(e) => {
                self.notifier.notify(&e);
                SubmitOutcome::Failed
            }
        }
    }
}
