use tracing::{debug, info, warn};

use crate::lang::TranslationRequest;
use crate::worker::{Job, Outcome, TranslationWorker};

/// What the output pane shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub copy_visible: bool,
}

impl Output {
    fn clear(&mut self) {
        self.text.clear();
        self.copy_visible = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Calling { id: u64 },
    Displayed,
    Errored,
}

/// Routes finalized requests to the worker and applies outcomes to the
/// output. Only the outcome of the most recent request is ever shown.
pub struct Dispatcher {
    worker: TranslationWorker,
    state: DispatchState,
    output: Output,
    next_id: u64,
}

impl Dispatcher {
    pub fn new(worker: TranslationWorker) -> Self {
        Self { worker, state: DispatchState::Idle, output: Output::default(), next_id: 0 }
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, DispatchState::Calling { .. })
    }

    pub fn dispatch(&mut self, request: TranslationRequest) {
        // bumping the id makes anything still in flight stale
        self.next_id += 1;
        let id = self.next_id;

        if request.is_empty() {
            debug!("Dispatch: empty input, clearing output");
            self.output.clear();
            self.state = DispatchState::Idle;
            return;
        }

        info!(
            "Dispatch #{}: {} chars {} -> {}",
            id,
            request.text.chars().count(),
            request.source.code(),
            request.target.code()
        );
        if self.worker.submit(Job { id, request }) {
            self.state = DispatchState::Calling { id };
        } else {
            warn!("Dispatch #{}: worker is gone", id);
            self.show_error("translation worker stopped");
        }
    }

    /// Applies any finished outcomes. Returns true if the output changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(outcome) = self.worker.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    fn apply(&mut self, outcome: Outcome) -> bool {
        if self.state != (DispatchState::Calling { id: outcome.id }) {
            debug!("Dispatch #{}: stale outcome dropped", outcome.id);
            return false;
        }
        match outcome.result {
            Ok(text) => {
                info!("Dispatch #{}: translated ({} chars)", outcome.id, text.chars().count());
                self.output.text = text;
                self.output.copy_visible = true;
                self.state = DispatchState::Displayed;
            }
            Err(e) => {
                warn!("Dispatch #{}: {}", outcome.id, e);
                self.show_error(&e.to_string());
            }
        }
        true
    }

    fn show_error(&mut self, detail: &str) {
        self.output.text = format!("Translation failed: {}", detail);
        self.output.copy_visible = false;
        self.state = DispatchState::Errored;
    }

    #[cfg(test)]
    fn wait(&mut self) {
        let timeout = std::time::Duration::from_secs(5);
        if let Some(outcome) = self.worker.recv_timeout(timeout) {
            self.apply(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{SourceLang, TargetLang};
    use crate::translator::testing::{Handles, ScriptedTranslator};
    use std::sync::Arc;

    fn setup() -> (Dispatcher, Arc<ScriptedTranslator>, Handles) {
        let (t, h) = ScriptedTranslator::new();
        let t = Arc::new(t);
        let worker = TranslationWorker::spawn(t.clone(), None).unwrap();
        (Dispatcher::new(worker), t, h)
    }

    fn req(text: &str) -> TranslationRequest {
        TranslationRequest::new(text, SourceLang::Auto, TargetLang::English)
    }

    #[test]
    fn success_shows_text_verbatim_with_copy() {
        let (mut d, _t, _h) = setup();
        d.dispatch(req("おはよう"));
        assert!(d.is_busy());
        d.wait();
        assert_eq!(d.output().text, "[en] おはよう");
        assert!(d.output().copy_visible);
        assert_eq!(d.state(), DispatchState::Displayed);
    }

    #[test]
    fn failure_shows_detail_and_hides_copy() {
        let (mut d, _t, _h) = setup();
        d.dispatch(req("ok"));
        d.wait();
        d.dispatch(req("!connection refused"));
        d.wait();
        assert!(d.output().text.contains("connection refused"));
        assert!(d.output().text.starts_with("Translation failed: "));
        assert!(!d.output().copy_visible);
        assert_eq!(d.state(), DispatchState::Errored);
    }

    #[test]
    fn empty_text_clears_without_calling_translator() {
        let (mut d, t, _h) = setup();
        d.dispatch(req("hello"));
        d.wait();
        assert!(d.output().copy_visible);

        d.dispatch(req(""));
        assert_eq!(d.output(), &Output::default());
        assert_eq!(d.state(), DispatchState::Idle);
        assert!(!d.poll());
        assert_eq!(*t.calls.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[test]
    fn clearing_while_in_flight_discards_late_result() {
        let (mut d, _t, h) = setup();
        d.dispatch(req("slow"));
        h.started.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        d.dispatch(req(""));
        h.release.send(()).unwrap();
        d.wait();
        assert_eq!(d.output(), &Output::default());
        assert_eq!(d.state(), DispatchState::Idle);
    }

    #[test]
    fn only_latest_request_is_displayed() {
        let (mut d, t, h) = setup();
        d.dispatch(req("slow"));
        h.started.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        d.dispatch(req("second"));
        d.dispatch(req("third"));
        h.release.send(()).unwrap();

        // "slow" comes back first but is stale
        d.wait();
        assert!(d.is_busy());
        assert_eq!(d.output().text, "");
        d.wait();
        assert_eq!(d.output().text, "[en] third");
        assert_eq!(*t.calls.lock().unwrap(), vec!["slow".to_string(), "third".to_string()]);
    }
}
