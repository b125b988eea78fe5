//! Image label demo — fetch one image and log its annotation.

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::annotate::AnnotateRequest;
use crate::error::{VisionError, VisionResult};

/// Startup demo that labels one remote image through the annotation
/// service and logs the raw response.
pub struct ImageLabelDemo {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    image_url: String,
}

impl ImageLabelDemo {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            api_key,
            image_url: image_url.into(),
        }
    }

    /// Run the demo once: fetch the image bytes, send one label-detection
    /// request, log and return the full response body.
    pub async fn run(&self) -> VisionResult<Value> {
        let image = self.fetch_image().await?;
        info!(bytes = image.len(), url = %self.image_url, "image fetched");

        let request = AnnotateRequest::label_detection(&image);
        let response = self.annotate(&request).await?;
        info!(response = %response, "label annotation response");
        Ok(response)
    }

    async fn fetch_image(&self) -> VisionResult<Vec<u8>> {
        let bytes = self
            .http
            .get(&self.image_url)
            .send()
            .await
            .map_err(|e| VisionError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| VisionError::Fetch(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| VisionError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn annotate(&self, request: &AnnotateRequest) -> VisionResult<Value> {
        let url = format!("{}/v1/images:annotate", self.endpoint.trim_end_matches('/'));
        let mut call = self.http.post(&url).json(request);
        if let Some(key) = &self.api_key {
            call = call.query(&[("key", key.as_str())]);
        }
        call.send()
            .await
            .map_err(|e| VisionError::Annotate(e.to_string()))?
            .error_for_status()
            .map_err(|e| VisionError::Annotate(e.to_string()))?
            .json::<Value>()
            .await
            .map_err(|e| VisionError::Annotate(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::Query;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use base64::{engine::general_purpose, Engine as _};

    const IMAGE_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];

    #[derive(Default)]
    struct StubState {
        annotate_body: Option<Value>,
        annotate_query: Option<HashMap<String, String>>,
    }

    /// Serve a fake image and a capturing annotate endpoint on an
    /// ephemeral port. Returns the base URL and the capture slot.
    async fn spawn_stub() -> (String, Arc<Mutex<StubState>>) {
        let state = Arc::new(Mutex::new(StubState::default()));
        let captured = state.clone();

        let app = Router::new()
            .route("/cat.jpg", get(|| async { IMAGE_BYTES.to_vec() }))
            .route(
                "/v1/images:annotate",
                post(
                    move |Query(query): Query<HashMap<String, String>>,
                          Json(body): Json<Value>| {
                        let captured = captured.clone();
                        async move {
                            let mut slot = captured.lock().unwrap();
                            slot.annotate_body = Some(body);
                            slot.annotate_query = Some(query);
                            Json(serde_json::json!({
                                "responses": [{
                                    "labelAnnotations": [
                                        {"description": "cat", "score": 0.98}
                                    ]
                                }]
                            }))
                        }
                    },
                ),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), state)
    }

    #[tokio::test]
    async fn demo_posts_encoded_image_and_returns_response() {
        let (base, state) = spawn_stub().await;
        let demo = ImageLabelDemo::new(
            base.clone(),
            Some("test-key".to_string()),
            format!("{base}/cat.jpg"),
        );

        let response = demo.run().await.unwrap();
        assert_eq!(
            response["responses"][0]["labelAnnotations"][0]["description"],
            "cat"
        );

        let slot = state.lock().unwrap();
        let body = slot.annotate_body.as_ref().unwrap();
        let content = body["requests"][0]["image"]["content"].as_str().unwrap();
        assert_eq!(
            general_purpose::STANDARD.decode(content).unwrap(),
            IMAGE_BYTES
        );
        assert_eq!(body["requests"][0]["features"][0]["type"], "LABEL_DETECTION");

        let query = slot.annotate_query.as_ref().unwrap();
        assert_eq!(query.get("key").map(String::as_str), Some("test-key"));
    }

    #[tokio::test]
    async fn unreachable_image_url_is_a_fetch_error() {
        // Port 1 won't be listening.
        let demo = ImageLabelDemo::new(
            "http://127.0.0.1:1".to_string(),
            None,
            "http://127.0.0.1:1/cat.jpg".to_string(),
        );
        let err = demo.run().await.unwrap_err();
        assert!(matches!(err, VisionError::Fetch(_)));
    }

    #[tokio::test]
    async fn unreachable_annotate_endpoint_is_an_annotate_error() {
        let (base, _state) = spawn_stub().await;
        // Image served by the stub, annotate pointed at a dead port.
        let demo = ImageLabelDemo::new(
            "http://127.0.0.1:1".to_string(),
            None,
            format!("{base}/cat.jpg"),
        );
        let err = demo.run().await.unwrap_err();
        assert!(matches!(err, VisionError::Annotate(_)));
    }
}
