//! HttpReplyService -- [`ReplyService`] over a JSON POST endpoint.
//!
//! Request body is the [`ReplyRequest`] (`{ transcript, metadata }`), the
//! response body is `{ "reply": "..." }`.

use conseil_core::reply::service::ReplyService;
use conseil_types::error::ReplyError;
use conseil_types::reply::{ReplyRequest, ReplyResponse};

use super::truncate_body;

pub struct HttpReplyService {
    client: reqwest::Client,
    url: String,
}

impl HttpReplyService {
    /// Create a service posting to `url` with a fresh client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Reuse an existing client (connection pool shared with the summary sink).
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReplyService for HttpReplyService {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, request: &ReplyRequest) -> Result<ReplyResponse, ReplyError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ReplyError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReplyError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        response
            .json::<ReplyResponse>()
            .await
            .map_err(|e| ReplyError::Decode(format!("failed to parse response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use conseil_types::chat::Turn;
    use conseil_types::contact::ContactMetadata;

    use super::*;
    use crate::http::stub;

    fn request(transcript: Vec<Turn>) -> ReplyRequest {
        ReplyRequest {
            transcript,
            metadata: ContactMetadata::new("Eve", "e@x.com").with_phone("514-555-0199"),
        }
    }

    #[tokio::test]
    async fn test_posts_transcript_and_metadata() {
        let router = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                let name = body["metadata"]["name"].as_str().unwrap_or_default().to_string();
                let turns = body["transcript"].as_array().map(Vec::len).unwrap_or_default();
                Json(json!({ "reply": format!("Bonjour {name} ({turns})") }))
            }),
        );
        let base = stub::serve(router).await;
        let service = HttpReplyService::new(format!("{base}/chat"));

        let greeting = service.generate(&request(Vec::new())).await.unwrap();
        assert_eq!(greeting.reply, "Bonjour Eve (0)");

        let answer = service
            .generate(&request(vec![Turn::advisor("Bonjour"), Turn::visitor("Aidez-moi")]))
            .await
            .unwrap();
        assert_eq!(answer.reply, "Bonjour Eve (2)");
    }

    #[tokio::test]
    async fn test_wire_field_names() {
        let router = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                let ok = body["transcript"][0]["role"] == "visitor"
                    && body["transcript"][0]["text"] == "Aidez-moi"
                    && body["metadata"]["phone"] == "514-555-0199"
                    && body["metadata"].get("creditScore").is_none();
                Json(json!({ "reply": ok.to_string() }))
            }),
        );
        let base = stub::serve(router).await;
        let service = HttpReplyService::new(format!("{base}/chat"));

        let response = service
            .generate(&request(vec![Turn::visitor("Aidez-moi")]))
            .await
            .unwrap();
        assert_eq!(response.reply, "true");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let router = Router::new().route(
            "/chat",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get response") }),
        );
        let base = stub::serve(router).await;
        let service = HttpReplyService::new(format!("{base}/chat"));

        match service.generate(&request(Vec::new())).await {
            Err(ReplyError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "Failed to get response");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_maps_to_decode() {
        let router = Router::new().route("/chat", post(|| async { "not json" }));
        let base = stub::serve(router).await;
        let service = HttpReplyService::new(format!("{base}/chat"));

        let err = service.generate(&request(Vec::new())).await.unwrap_err();
        assert!(matches!(err, ReplyError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_maps_to_transport() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpReplyService::new(format!("http://{addr}/chat"));
        let err = service.generate(&request(Vec::new())).await.unwrap_err();
        assert!(matches!(err, ReplyError::Transport(_)), "got {err:?}");
    }
}
