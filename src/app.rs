use crate::backend::RecipeBackend;
use crate::config_loader::Settings;
use crate::detail::RecipeDetailPresenter;
use crate::error::ActionError;
use crate::narration::{BoundAudio, NarrationController, NarrationOutcome};
use crate::notify::Notifier;
use crate::object_url::LocalAudioStore;
use crate::search::{RecipeSearchController, SearchOutcome};
use crate::session::{lock, AudioView, DetailView, ResultEntry, SessionState, VoiceOption};
use crate::status_log::StatusLog;
use crate::voices::{VoiceCatalogLoader, VoiceLoad};
use std::sync::Arc;

/// Named user actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Page became ready.
    LoadVoices,
    SelectVoice(String),
    Search(String),
    /// Activate the result entry at this position.
    SelectRecipe(usize),
    Narrate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    VoicesLoaded(usize),
    /// The catalog is fetched once per session; later requests are no-ops.
    VoicesAlreadyRequested,
    VoiceSelected,
    ResultsRendered(usize),
    NoMatches,
    RecipePresented,
    AudioReady(BoundAudio),
    /// A later request of the same kind took over.
    Superseded,
}

/// Owns the session record and wires each component to its views.
pub struct RecipeApp {
    session: SessionState,
    log: Arc<StatusLog>,
    store: Arc<LocalAudioStore>,
    voices: VoiceCatalogLoader,
    search: RecipeSearchController,
    detail: RecipeDetailPresenter,
    narration: NarrationController,
}

impl RecipeApp {
    pub fn new(
        backend: Arc<dyn RecipeBackend>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Self {
        let session = SessionState::new();
        let log = Arc::new(StatusLog::new());
        let store = Arc::new(LocalAudioStore::new());

        let voices =
            VoiceCatalogLoader::new(backend.clone(), session.voices.clone(), log.clone());
        let search = RecipeSearchController::new(
            backend.clone(),
            session.results.clone(),
            log.clone(),
            notifier.clone(),
        );
        let detail = RecipeDetailPresenter::new(session.detail.clone());
        let narration = NarrationController::new(
            backend,
            session.audio.clone(),
            store.clone(),
            log.clone(),
            notifier,
            settings,
        );

        Self {
            session,
            log,
            store,
            voices,
            search,
            detail,
            narration,
        }
    }

    pub async fn dispatch(&self, action: UiAction) -> Result<Outcome, ActionError> {
        match action {
            UiAction::LoadVoices => self.load_voices().await,
            UiAction::SelectVoice(id) => self.select_voice(&id),
            UiAction::Search(ingredients) => self.search(&ingredients).await,
            UiAction::SelectRecipe(index) => self.select_recipe(index),
            UiAction::Narrate => self.narrate().await,
        }
    }

    pub async fn load_voices(&self) -> Result<Outcome, ActionError> {
        Ok(match self.voices.load_voices().await? {
            VoiceLoad::Loaded(count) => Outcome::VoicesLoaded(count),
            VoiceLoad::AlreadyAttempted => Outcome::VoicesAlreadyRequested,
        })
    }

    pub fn select_voice(&self, voice_id: &str) -> Result<Outcome, ActionError> {
        if lock(&self.session.voices).select(voice_id) {
            Ok(Outcome::VoiceSelected)
        } else {
            Err(ActionError::UnknownVoice(voice_id.to_string()))
        }
    }

    pub async fn search(&self, ingredients: &str) -> Result<Outcome, ActionError> {
        Ok(match self.search.search(ingredients).await? {
            SearchOutcome::Rendered(n) => Outcome::ResultsRendered(n),
            SearchOutcome::NoMatches => Outcome::NoMatches,
            SearchOutcome::Superseded => Outcome::Superseded,
        })
    }

    pub fn select_recipe(&self, index: usize) -> Result<Outcome, ActionError> {
        let recipe = lock(&self.session.results)
            .recipe_at(index)
            .cloned()
            .ok_or(ActionError::UnknownRecipe(index))?;
        self.detail.present(&recipe);
        Ok(Outcome::RecipePresented)
    }

    /// Reads the steps currently on screen and the selected voice, then narrates.
    pub async fn narrate(&self) -> Result<Outcome, ActionError> {
        let steps = lock(&self.session.detail).steps.clone();
        let voice = lock(&self.session.voices).selected_value().to_string();

        Ok(match self.narration.narrate(&steps, &voice).await? {
            NarrationOutcome::Ready(bound) => Outcome::AudioReady(bound),
            NarrationOutcome::Superseded => Outcome::Superseded,
        })
    }

    pub fn voice_options(&self) -> Vec<VoiceOption> {
        lock(&self.session.voices).options().to_vec()
    }

    pub fn selected_voice(&self) -> String {
        lock(&self.session.voices).selected_value().to_string()
    }

    pub fn result_entries(&self) -> Vec<ResultEntry> {
        lock(&self.session.results).entries().to_vec()
    }

    pub fn detail_view(&self) -> DetailView {
        lock(&self.session.detail).clone()
    }

    pub fn audio_view(&self) -> AudioView {
        lock(&self.session.audio).clone()
    }

    pub fn status_log(&self) -> &StatusLog {
        &self.log
    }

    pub fn audio_store(&self) -> &LocalAudioStore {
        &self.store
    }
}

