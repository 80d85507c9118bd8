use crate::config_loader::Settings;
use crate::error::ApiError;
use crate::models::{NarrationRequest, NarrationResult, Recipe, SearchRequest, SearchResponse, Voice};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const VOICES_PATH: &str = "/api/voices";
pub const RECIPES_PATH: &str = "/api/recipes";
pub const TTS_PATH: &str = "/api/tts";

const FALLBACK_AUDIO_MIME: &str = "application/octet-stream";

/// The three endpoints the client talks to.
/// Every call is a single round trip; no retries happen at this layer.
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    async fn fetch_voices(&self) -> Result<Vec<Voice>, ApiError>;

    /// An absent or null `recipes` field comes back as an empty list.
    async fn search_recipes(&self, ingredients: &str) -> Result<Vec<Recipe>, ApiError>;

    /// Branches on the response content type, never on the status code.
    async fn synthesize(&self, request: &NarrationRequest) -> Result<NarrationResult, ApiError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, &settings.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Turns a non-2xx response into `ApiError::Status`, keeping the server's
/// `{"error": ...}` message when there is one.
async fn ensure_success(endpoint: &'static str, resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.json::<Value>().await.ok().and_then(|body| {
        body.get("error")
            .and_then(|e| e.as_str())
            .map(|e| e.to_string())
    });

    Err(ApiError::Status {
        endpoint,
        status: status.as_u16(),
        message,
    })
}

async fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Payload(e.to_string()))
}

fn content_type(resp: &Response) -> String {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[async_trait]
impl RecipeBackend for HttpBackend {
    async fn fetch_voices(&self) -> Result<Vec<Voice>, ApiError> {
        debug!("GET {}", VOICES_PATH);
        let resp = self.client.get(self.url(VOICES_PATH)).send().await?;
        let resp = ensure_success(VOICES_PATH, resp).await?;
        parse_json(resp).await
    }

    async fn search_recipes(&self, ingredients: &str) -> Result<Vec<Recipe>, ApiError> {
        debug!("POST {} ingredients={:?}", RECIPES_PATH, ingredients);
        let resp = self
            .client
            .post(self.url(RECIPES_PATH))
            .json(&SearchRequest { ingredients })
            .send()
            .await?;
        let resp = ensure_success(RECIPES_PATH, resp).await?;
        let parsed: SearchResponse = parse_json(resp).await?;
        Ok(parsed.recipes.unwrap_or_default())
    }

    async fn synthesize(&self, request: &NarrationRequest) -> Result<NarrationResult, ApiError> {
        debug!("POST {} voice={}", TTS_PATH, request.voice_id);
        let resp = self
            .client
            .post(self.url(TTS_PATH))
            .json(request)
            .send()
            .await?;
        let resp = ensure_success(TTS_PATH, resp).await?;

        let ct = content_type(&resp);
        if ct.to_ascii_lowercase().contains("application/json") {
            let body: Value = parse_json(resp).await?;
            return match body.get("audioUrl").and_then(|u| u.as_str()) {
                Some(url) if !url.is_empty() => Ok(NarrationResult::RemoteAudio {
                    url: url.to_string(),
                }),
                _ => Err(ApiError::MissingAudioUrl),
            };
        }

        let mime = if ct.is_empty() {
            FALLBACK_AUDIO_MIME.to_string()
        } else {
            ct
        };
        let bytes = resp.bytes().await?.to_vec();
        Ok(NarrationResult::InlineAudio { bytes, mime })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn backend(server: &mockito::Server) -> HttpBackend {
        HttpBackend::with_client(Client::new(), &server.url())
    }

    fn request(text: &str) -> NarrationRequest {
        NarrationRequest {
            text: text.to_string(),
            voice_id: "en-US-ken".to_string(),
            format: None,
            style: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_voices_preserves_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/voices")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"voiceId": "b", "displayName": "Bea", "locale": "en-GB"},
                    {"voiceId": "a", "displayName": "Al", "locale": "en-US"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let voices = backend(&server).fetch_voices().await.unwrap();
        mock.assert_async().await;
        let ids: Vec<_> = voices.iter().map(|v| v.voice_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_fetch_voices_malformed_body_is_payload_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/voices")
            .with_status(200)
            .with_body("{\"voices\": 3}")
            .create_async()
            .await;

        let err = backend(&server).fetch_voices().await.unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/voices")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(json!({"error": "Failed to fetch voices"}).to_string())
            .create_async()
            .await;

        match backend(&server).fetch_voices().await {
            Err(ApiError::Status {
                status, message, ..
            }) => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("Failed to fetch voices"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_posts_exact_ingredient_string() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/recipes")
            .match_body(Matcher::Json(json!({"ingredients": "egg, tomato"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"recipes": [
                    {"title": "Omelette", "steps": ["Beat eggs.", "Cook."]}
                ]})
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let recipes = backend(&server).search_recipes("egg, tomato").await.unwrap();
        mock.assert_async().await;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].steps, vec!["Beat eggs.", "Cook."]);
    }

    #[tokio::test]
    async fn test_search_missing_recipes_field_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/recipes")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let recipes = backend(&server).search_recipes("rice").await.unwrap();
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_synthesize_json_response_is_remote_audio() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/tts")
            .match_body(Matcher::Json(
                json!({"text": "Boil water. Add pasta", "voiceId": "en-US-ken"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(json!({"audioUrl": "https://x/y.mp3"}).to_string())
            .create_async()
            .await;

        let result = backend(&server)
            .synthesize(&request("Boil water. Add pasta"))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(
            result,
            NarrationResult::RemoteAudio {
                url: "https://x/y.mp3".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_synthesize_json_without_url_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/tts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"audioFile": null}).to_string())
            .create_async()
            .await;

        let err = backend(&server).synthesize(&request("Stir")).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingAudioUrl));
        assert_eq!(err.to_string(), "No audio URL in response");
    }

    #[tokio::test]
    async fn test_synthesize_binary_response_is_inline_audio() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/tts")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(vec![0x49u8, 0x44, 0x33, 0x04])
            .create_async()
            .await;

        let result = backend(&server).synthesize(&request("Stir")).await.unwrap();
        assert_eq!(
            result,
            NarrationResult::InlineAudio {
                bytes: vec![0x49, 0x44, 0x33, 0x04],
                mime: "audio/mpeg".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_synthesize_binary_without_content_type_is_octet_stream() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/tts")
            .with_status(200)
            .with_body(vec![1u8, 2])
            .create_async()
            .await;

        let result = backend(&server).synthesize(&request("Stir")).await.unwrap();
        assert_eq!(
            result,
            NarrationResult::InlineAudio {
                bytes: vec![1, 2],
                mime: "application/octet-stream".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_synthesize_malformed_json_is_payload_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/tts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{audioUrl: https://x/y.mp3")
            .create_async()
            .await;

        let err = backend(&server).synthesize(&request("Stir")).await.unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }

    #[tokio::test]
    async fn test_synthesize_content_type_match_ignores_case() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/tts")
            .with_status(200)
            .with_header("content-type", "Application/JSON; charset=UTF-8")
            .with_body(json!({"audioUrl": "https://x/y.mp3"}).to_string())
            .create_async()
            .await;

        let result = backend(&server).synthesize(&request("Stir")).await.unwrap();
        assert_eq!(
            result,
            NarrationResult::RemoteAudio {
                url: "https://x/y.mp3".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_synthesize_forwards_optional_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/tts")
            .match_body(Matcher::Json(json!({
                "text": "Stir",
                "voiceId": "en-US-ken",
                "format": "WAV",
                "style": "Calm"
            })))
            .with_status(200)
            .with_header("content-type", "audio/wav")
            .with_body("RIFF")
            .create_async()
            .await;

        let mut req = request("Stir");
        req.format = Some("WAV".to_string());
        req.style = Some("Calm".to_string());
        backend(&server).synthesize(&req).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let backend = HttpBackend::with_client(Client::new(), "http://127.0.0.1:1");
        let err = backend.search_recipes("egg").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
