use crate::backend::RecipeBackend;
use crate::error::ApiError;
use crate::session::{lock, VoicePicker};
use crate::status_log::StatusLog;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceLoad {
    Loaded(usize),
    /// The catalog was already requested this session; nothing was fetched.
    AlreadyAttempted,
}

/// Fills the voice picker once at startup. A failure is terminal for the
/// session; there is no retry.
pub struct VoiceCatalogLoader {
    backend: Arc<dyn RecipeBackend>,
    picker: Arc<Mutex<VoicePicker>>,
    log: Arc<StatusLog>,
    attempted: AtomicBool,
}

impl VoiceCatalogLoader {
    pub fn new(
        backend: Arc<dyn RecipeBackend>,
        picker: Arc<Mutex<VoicePicker>>,
        log: Arc<StatusLog>,
    ) -> Self {
        Self {
            backend,
            picker,
            log,
            attempted: AtomicBool::new(false),
        }
    }

    pub async fn load_voices(&self) -> Result<VoiceLoad, ApiError> {
        if self.attempted.swap(true, Ordering::SeqCst) {
            debug!("voice catalog already requested, skipping");
            return Ok(VoiceLoad::AlreadyAttempted);
        }

        match self.backend.fetch_voices().await {
            Ok(voices) => {
                lock(&self.picker).replace_with(&voices);
                self.log.log(&format!("Loaded {} voices.", voices.len()));
                Ok(VoiceLoad::Loaded(voices.len()))
            }
            Err(e) => {
                warn!("voice catalog unavailable: {}", e);
                lock(&self.picker).show_error();
                self.log.log(&format!("Voice load error: {}", e));
                Err(e)
            }
        }
    }
}
