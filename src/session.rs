//! Session state: everything the user currently sees.
//!
//! Each view sits behind its own lock so a component is only handed the
//! views it owns. Guards are never held across an `.await`.

use crate::models::{Recipe, Voice};
use std::sync::{Arc, Mutex, MutexGuard};

pub const VOICE_ERROR_LABEL: &str = "Error loading voices";
pub const NO_MATCHES_LABEL: &str = "No matching recipes found.";

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOption {
    /// Empty for the error sentinel.
    pub value: String,
    pub label: String,
}

/// The selectable voice list.
#[derive(Debug, Default)]
pub struct VoicePicker {
    options: Vec<VoiceOption>,
    selected: Option<usize>,
}

impl VoicePicker {
    /// Replaces every option; the first one becomes selected.
    pub fn replace_with(&mut self, voices: &[Voice]) {
        self.options = voices
            .iter()
            .map(|v| VoiceOption {
                value: v.voice_id.clone(),
                label: v.label(),
            })
            .collect();
        self.selected = if self.options.is_empty() { None } else { Some(0) };
    }

    pub fn show_error(&mut self) {
        self.options = vec![VoiceOption {
            value: String::new(),
            label: VOICE_ERROR_LABEL.to_string(),
        }];
        self.selected = Some(0);
    }

    pub fn select(&mut self, voice_id: &str) -> bool {
        match self
            .options
            .iter()
            .position(|o| !o.value.is_empty() && o.value == voice_id)
        {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Value of the selected option, empty when nothing usable is selected.
    pub fn selected_value(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    pub fn options(&self) -> &[VoiceOption] {
        &self.options
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultEntry {
    /// Selectable; activating it presents the recipe.
    Recipe(Recipe),
    Placeholder(String),
}

impl ResultEntry {
    pub fn label(&self) -> &str {
        match self {
            ResultEntry::Recipe(r) => &r.title,
            ResultEntry::Placeholder(text) => text,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultList {
    entries: Vec<ResultEntry>,
}

impl ResultList {
    pub fn render(&mut self, recipes: Vec<Recipe>) {
        self.entries = if recipes.is_empty() {
            vec![ResultEntry::Placeholder(NO_MATCHES_LABEL.to_string())]
        } else {
            recipes.into_iter().map(ResultEntry::Recipe).collect()
        };
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn selectable(&self) -> Vec<&Recipe> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ResultEntry::Recipe(r) => Some(r),
                ResultEntry::Placeholder(_) => None,
            })
            .collect()
    }

    /// Recipe behind the entry at `index`, if that entry is selectable.
    pub fn recipe_at(&self, index: usize) -> Option<&Recipe> {
        match self.entries.get(index) {
            Some(ResultEntry::Recipe(r)) => Some(r),
            _ => None,
        }
    }
}

/// Title and step list of the active recipe, plus the narration controls.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub steps: Vec<String>,
    pub visible: bool,
    pub narration_controls_visible: bool,
}

/// Playback element and download link for the current narration.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioView {
    pub player_src: Option<String>,
    pub download_href: Option<String>,
    pub visible: bool,
}

impl AudioView {
    pub fn bind(&mut self, url: &str) {
        self.player_src = Some(url.to_string());
        self.download_href = Some(url.to_string());
        self.visible = true;
    }
}

/// The single session-state record.
#[derive(Clone, Default)]
pub struct SessionState {
    pub voices: Arc<Mutex<VoicePicker>>,
    pub results: Arc<Mutex<ResultList>>,
    pub detail: Arc<Mutex<DetailView>>,
    pub audio: Arc<Mutex<AudioView>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
