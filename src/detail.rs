use crate::models::Recipe;
use crate::session::{lock, DetailView};
use std::sync::{Arc, Mutex};

/// Shows the active recipe and reveals the narration controls.
pub struct RecipeDetailPresenter {
    view: Arc<Mutex<DetailView>>,
}

impl RecipeDetailPresenter {
    pub fn new(view: Arc<Mutex<DetailView>>) -> Self {
        Self { view }
    }

    /// Idempotent: presenting the same recipe again yields the same view.
    pub fn present(&self, recipe: &Recipe) {
        let mut view = lock(&self.view);
        view.title = recipe.title.clone();
        view.steps = recipe.steps.clone();
        view.visible = true;
        view.narration_controls_visible = true;
    }
}
