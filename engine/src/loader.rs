//! Lazy, single-flight loading of the local model.
//!
//! The loader moves through `Unloaded → Loading → Ready`, or
//! `Unloaded → Loading → Failed`. Concurrent first callers share one
//! initialization and all see its outcome. A failed load is final: every
//! later call returns [`TtsError::ModelUnavailable`] without loading again.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::adapter::{LocalModel, ModelFactory, VoiceOptions};
use crate::error::{AdapterError, TtsError};
use crate::waveform::Synthesized;

/// Lifecycle state of a [`ModelLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for LoaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderState::Unloaded => write!(f, "unloaded"),
            LoaderState::Loading => write!(f, "loading"),
            LoaderState::Ready => write!(f, "ready"),
            LoaderState::Failed => write!(f, "failed"),
        }
    }
}

/// Shared reference to the loaded model.
#[derive(Clone)]
pub struct ModelHandle {
    model: Arc<dyn LocalModel>,
    // Present for models that are not reentrant.
    inference: Option<Arc<Mutex<()>>>,
}

impl ModelHandle {
    fn new(model: Arc<dyn LocalModel>) -> Self {
        let inference = (!model.is_reentrant()).then(|| Arc::new(Mutex::new(())));
        Self { model, inference }
    }

    pub fn model(&self) -> &Arc<dyn LocalModel> {
        &self.model
    }

    /// Runs one blocking inference, serialized unless the model is reentrant.
    pub fn synthesize(&self, text: &str, options: &VoiceOptions) -> Result<Synthesized, AdapterError> {
        let _guard = self.inference.as_ref().map(|lock| lock.lock());
        self.model.synthesize(text, options)
    }
}

struct Inner {
    factory: Box<dyn ModelFactory>,
    cell: OnceCell<Result<ModelHandle, String>>,
    loading: AtomicBool,
    attempts: AtomicUsize,
}

impl Inner {
    async fn load(self: Arc<Self>) -> Result<ModelHandle, String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.loading.store(true, Ordering::SeqCst);
        info!("loader: loading local model");

        let started = Instant::now();
        let this = Arc::clone(&self);
        let outcome = match tokio::task::spawn_blocking(move || this.factory.load()).await {
            Ok(Ok(model)) => Ok(ModelHandle::new(model)),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("model load task failed: {e}")),
        };
        self.loading.store(false, Ordering::SeqCst);

        match &outcome {
            Ok(_) => info!(elapsed_ms = started.elapsed().as_millis() as u64, "loader: local model ready"),
            Err(e) => error!(error = %e, "loader: local model failed to load"),
        }
        outcome
    }
}

/// Owns the local model and loads it on first use.
///
/// The load runs in its own task, so a caller that gives up mid-load does
/// not abort it and a later caller never starts a second one.
pub struct ModelLoader {
    inner: Arc<Inner>,
}

impl ModelLoader {
    pub fn new(factory: impl ModelFactory + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                factory: Box::new(factory),
                cell: OnceCell::new(),
                loading: AtomicBool::new(false),
                attempts: AtomicUsize::new(0),
            }),
        }
    }

    /// Returns the model, loading it if no load has happened yet.
    pub async fn get(&self) -> Result<ModelHandle, TtsError> {
        if let Some(outcome) = self.inner.cell.get() {
            return outcome.clone().map_err(TtsError::ModelUnavailable);
        }

        let inner = Arc::clone(&self.inner);
        let outcome = tokio::spawn(async move {
            let loader = Arc::clone(&inner);
            inner.cell.get_or_init(|| loader.load()).await.clone()
        })
        .await
        .map_err(|e| TtsError::ModelUnavailable(format!("model load task failed: {e}")))?;

        outcome.map_err(TtsError::ModelUnavailable)
    }

    /// Loads the model now; used for eager startup.
    pub async fn preload(&self) -> Result<(), TtsError> {
        self.get().await.map(|_| ())
    }

    pub fn state(&self) -> LoaderState {
        match self.inner.cell.get() {
            Some(Ok(_)) => LoaderState::Ready,
            Some(Err(_)) => LoaderState::Failed,
            None if self.inner.loading.load(Ordering::SeqCst) => LoaderState::Loading,
            None => LoaderState::Unloaded,
        }
    }

    /// Number of times the factory has been invoked.
    pub fn load_attempts(&self) -> usize {
        self.inner.attempts.load(Ordering::SeqCst)
    }
}
