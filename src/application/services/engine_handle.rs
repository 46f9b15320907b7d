use std::sync::{Arc, OnceLock};

use crate::application::ports::TranscriptionEngine;

/// Write-once slot for the transcription engine.
///
/// Startup installs the engine at most once, possibly from a background task;
/// until then (or forever, if loading failed) the handle reports not ready.
#[derive(Clone, Default)]
pub struct EngineHandle {
    slot: Arc<OnceLock<Arc<dyn TranscriptionEngine>>>,
}

impl EngineHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: Arc<dyn TranscriptionEngine>) -> Self {
        let handle = Self::new();
        handle.install(engine);
        handle
    }

    /// Returns `false` if an engine was already installed.
    pub fn install(&self, engine: Arc<dyn TranscriptionEngine>) -> bool {
        self.slot.set(engine).is_ok()
    }

    pub fn get(&self) -> Option<Arc<dyn TranscriptionEngine>> {
        self.slot.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }
}
