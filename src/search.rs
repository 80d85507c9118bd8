use crate::backend::RecipeBackend;
use crate::error::{ActionError, InputError};
use crate::notify::Notifier;
use crate::sequence::RequestSequencer;
use crate::session::{lock, ResultList};
use crate::status_log::StatusLog;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Rendered(usize),
    NoMatches,
    /// A newer search was issued while this one was in flight.
    Superseded,
}

pub struct RecipeSearchController {
    backend: Arc<dyn RecipeBackend>,
    results: Arc<Mutex<ResultList>>,
    log: Arc<StatusLog>,
    notifier: Arc<dyn Notifier>,
    sequence: RequestSequencer,
}

impl RecipeSearchController {
    pub fn new(
        backend: Arc<dyn RecipeBackend>,
        results: Arc<Mutex<ResultList>>,
        log: Arc<StatusLog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            results,
            log,
            notifier,
            sequence: RequestSequencer::new(),
        }
    }

    pub async fn search(&self, ingredients: &str) -> Result<SearchOutcome, ActionError> {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            let err = InputError::EmptyIngredients;
            self.notifier.alert(&err.to_string());
            return Err(err.into());
        }

        let ticket = self.sequence.issue();
        let response = self.backend.search_recipes(ingredients).await;

        if !self.sequence.is_current(ticket) {
            debug!("dropping stale search #{} for {:?}", ticket.value(), ingredients);
            return Ok(SearchOutcome::Superseded);
        }

        match response {
            Ok(recipes) => {
                let count = recipes.len();
                lock(&self.results).render(recipes);
                if count > 0 {
                    self.log
                        .log(&format!("Found {} matching recipe(s).", count));
                    Ok(SearchOutcome::Rendered(count))
                } else {
                    self.log.log("No matches.");
                    Ok(SearchOutcome::NoMatches)
                }
            }
            Err(e) => {
                self.log.log(&format!("Error: {}", e));
                Err(e.into())
            }
        }
    }
}
