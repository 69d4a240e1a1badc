use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

use crate::lang::TranslationRequest;
use crate::translator::{TranslationFailure, Translator};

pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug)]
pub struct Job {
    pub id: u64,
    pub request: TranslationRequest,
}

#[derive(Debug)]
pub struct Outcome {
    pub id: u64,
    pub result: Result<String, TranslationFailure>,
}

/// Runs translator calls on a dedicated thread, one at a time. Queued jobs
/// that are superseded before they start are dropped without an outcome.
pub struct TranslationWorker {
    jobs: Sender<Job>,
    outcomes: Receiver<Outcome>,
}

impl TranslationWorker {
    pub fn spawn(translator: Arc<dyn Translator>, waker: Option<Waker>) -> anyhow::Result<Self> {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();
        let (out_tx, out_rx) = crossbeam_channel::unbounded::<Outcome>();
        thread::Builder::new()
            .name("translator".into())
            .spawn(move || run(translator, job_rx, out_tx, waker))?;
        Ok(Self { jobs: job_tx, outcomes: out_rx })
    }

    pub fn submit(&self, job: Job) -> bool {
        self.jobs.send(job).is_ok()
    }

    pub fn try_recv(&self) -> Option<Outcome> {
        self.outcomes.try_recv().ok()
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Outcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

fn run(translator: Arc<dyn Translator>, jobs: Receiver<Job>, outcomes: Sender<Outcome>, waker: Option<Waker>) {
    let rt = tokio::runtime::Runtime::new().map_err(|e| e.to_string());
    match &rt {
        Ok(_) => info!("Worker: started with {} translator", translator.name()),
        Err(e) => error!("Worker: failed to build tokio runtime: {}", e),
    }

    while let Ok(mut job) = jobs.recv() {
        while let Ok(newer) = jobs.try_recv() {
            debug!("Worker: job {} superseded by {}", job.id, newer.id);
            job = newer;
        }

        let result = match &rt {
            Ok(rt) => rt.block_on(translator.translate(&job.request)),
            Err(e) => Err(TranslationFailure::Unavailable(e.clone())),
        };
        if outcomes.send(Outcome { id: job.id, result }).is_err() {
            break;
        }
        if let Some(wake) = &waker {
            wake();
        }
    }
    info!("Worker: stopped");
}
