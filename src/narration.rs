use crate::backend::RecipeBackend;
use crate::config_loader::Settings;
use crate::error::{ActionError, InputError};
use crate::models::{NarrationRequest, NarrationResult};
use crate::notify::Notifier;
use crate::object_url::LocalAudioStore;
use crate::sequence::RequestSequencer;
use crate::session::{lock, AudioView};
use crate::status_log::StatusLog;
use std::sync::{Arc, Mutex};
use tracing::debug;

const STEP_SEPARATOR: &str = ". ";

/// The audio now bound to the player and download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundAudio {
    Remote(String),
    Local(String),
}

impl BoundAudio {
    pub fn url(&self) -> &str {
        match self {
            BoundAudio::Remote(url) | BoundAudio::Local(url) => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    Ready(BoundAudio),
    Superseded,
}

pub fn derive_utterance(steps: &[String]) -> String {
    steps.join(STEP_SEPARATOR)
}

pub struct NarrationController {
    backend: Arc<dyn RecipeBackend>,
    audio: Arc<Mutex<AudioView>>,
    store: Arc<LocalAudioStore>,
    log: Arc<StatusLog>,
    notifier: Arc<dyn Notifier>,
    settings: Settings,
    sequence: RequestSequencer,
    /// The live local reference, released when superseded.
    current_local: Mutex<Option<String>>,
}

impl NarrationController {
    pub fn new(
        backend: Arc<dyn RecipeBackend>,
        audio: Arc<Mutex<AudioView>>,
        store: Arc<LocalAudioStore>,
        log: Arc<StatusLog>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Self {
        Self {
            backend,
            audio,
            store,
            log,
            notifier,
            settings,
            sequence: RequestSequencer::new(),
            current_local: Mutex::new(None),
        }
    }

    pub fn effective_voice<'a>(&'a self, selected: &'a str) -> &'a str {
        if selected.is_empty() {
            &self.settings.default_voice_id
        } else {
            selected
        }
    }

    pub async fn narrate(
        &self,
        steps: &[String],
        selected_voice: &str,
    ) -> Result<NarrationOutcome, ActionError> {
        let text = derive_utterance(steps);
        if text.is_empty() {
            let err = InputError::EmptyUtterance;
            self.notifier.alert(&err.to_string());
            return Err(err.into());
        }

        let voice_id = self.effective_voice(selected_voice).to_string();
        self.log
            .log(&format!("Sending to TTS with voice: {}", voice_id));

        let request = NarrationRequest {
            text,
            voice_id,
            format: self.settings.audio_format.clone(),
            style: self.settings.voice_style.clone(),
        };

        let ticket = self.sequence.issue();
        let response = self.backend.synthesize(&request).await;

        if !self.sequence.is_current(ticket) {
            debug!("dropping stale narration #{}", ticket.value());
            return Ok(NarrationOutcome::Superseded);
        }

        let result = match response {
            Ok(result) => result,
            Err(e) => {
                self.log.log(&format!("Error: {}", e));
                return Err(e.into());
            }
        };

        let bound = match result {
            NarrationResult::RemoteAudio { url } => BoundAudio::Remote(url),
            NarrationResult::InlineAudio { bytes, mime } => {
                BoundAudio::Local(self.store.create(bytes, &mime))
            }
        };

        lock(&self.audio).bind(bound.url());
        self.release_previous(&bound);
        self.log.log("Recipe audio ready!");

        Ok(NarrationOutcome::Ready(bound))
    }

    fn release_previous(&self, bound: &BoundAudio) {
        let next = match bound {
            BoundAudio::Local(url) => Some(url.clone()),
            BoundAudio::Remote(_) => None,
        };
        let previous = std::mem::replace(&mut *lock(&self.current_local), next);
        if let Some(url) = previous {
            self.store.revoke(&url);
        }
    }
}
