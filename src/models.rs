use serde::{Deserialize, Serialize};

/// A narration voice as listed by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub voice_id: String,
    pub display_name: String,
    pub locale: String,
}

impl Voice {
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.locale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Recipe {
    pub fn new(title: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            title: title.into(),
            steps,
            id: None,
            ingredients: Vec::new(),
            score: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub ingredients: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub recipes: Option<Vec<Recipe>>,
}

/// Body of a synthesis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationRequest {
    pub text: String,
    pub voice_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Decided once, from the response content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationResult {
    RemoteAudio { url: String },
    InlineAudio { bytes: Vec<u8>, mime: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_voice_uses_camel_case_fields() {
        let voice: Voice = serde_json::from_value(json!({
            "voiceId": "en-US-ken",
            "displayName": "Ken",
            "locale": "en-US",
            "gender": "Male"
        }))
        .unwrap();
        assert_eq!(voice.voice_id, "en-US-ken");
        assert_eq!(voice.label(), "Ken (en-US)");
    }

    #[test]
    fn test_recipe_tolerates_extra_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "pancakes",
            "title": "Fluffy Pancakes",
            "ingredients": ["flour", "milk"],
            "steps": ["Mix.", "Cook."],
            "score": 2
        }))
        .unwrap();
        assert_eq!(recipe.steps, vec!["Mix.", "Cook."]);
        assert_eq!(recipe.score, Some(2));
    }

    #[test]
    fn test_narration_request_omits_unset_options() {
        let request = NarrationRequest {
            text: "Boil water".to_string(),
            voice_id: "en-UK-Hazel".to_string(),
            format: None,
            style: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "text": "Boil water", "voiceId": "en-UK-Hazel" })
        );
    }
}
