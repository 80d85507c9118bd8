//! Local, revocable references to in-memory audio.
//!
//! A reference is a `blob:` URL that resolves to bytes held by the store
//! until it is revoked. Nothing leaves the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

const SCHEME_PREFIX: &str = "blob:recipe-narrator/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAudio {
    pub bytes: Vec<u8>,
    pub mime: String,
}

#[derive(Default)]
pub struct LocalAudioStore {
    entries: Mutex<HashMap<String, Arc<LocalAudio>>>,
}

impl LocalAudioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, bytes: Vec<u8>, mime: &str) -> String {
        let url = format!("{}{}", SCHEME_PREFIX, Uuid::new_v4());
        let audio = Arc::new(LocalAudio {
            bytes,
            mime: mime.to_string(),
        });
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.clone(), audio);
        url
    }

    /// Returns false if the url was unknown or already revoked.
    pub fn revoke(&self, url: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url)
            .is_some()
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<LocalAudio>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned()
    }

    pub fn live_count(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_local(url: &str) -> bool {
        url.starts_with(SCHEME_PREFIX)
    }
}
