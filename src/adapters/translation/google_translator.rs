//! Google Translate adapter.
//!
//! Uses the public `translate_a/single` endpoint with source-language
//! auto-detection. The reply is a nested JSON array whose first element holds
//! one `[translated, original, ...]` segment per sentence.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::screening::DisplayLanguage;
use crate::ports::{CapabilityError, Translator};

pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translate.googleapis.com";

/// Translator backed by Google's public translate endpoint.
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CapabilityError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CapabilityError::unavailable(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.base_url.trim_end_matches('/'))
    }
}

/// Joins the translated segments of a `translate_a/single` reply.
fn parse_translation(body: &serde_json::Value) -> Result<String, CapabilityError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| CapabilityError::malformed("translation reply has no segments"))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if translated.trim().is_empty() {
        return Err(CapabilityError::malformed("translation reply is empty"));
    }
    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: DisplayLanguage,
    ) -> Result<String, CapabilityError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CapabilityError::Timeout(self.timeout.as_secs())
                } else {
                    CapabilityError::unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CapabilityError::unavailable(format!(
                "translate endpoint returned {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CapabilityError::malformed(e.to_string()))?;

        parse_translation(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn joins_sentence_segments() {
        let body = serde_json::json!([
            [["Hallo. ", "Hello. ", null], ["Wie geht's?", "How are you?", null]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Hallo. Wie geht's?");
    }

    #[test]
    fn unexpected_shape_is_malformed() {
        let body = serde_json::json!({"error": "nope"});
        assert!(matches!(
            parse_translation(&body),
            Err(CapabilityError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn blank_text_skips_the_network() {
        let translator =
            GoogleTranslator::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert_eq!(
            translator.translate("  ", DisplayLanguage::Hindi).await.unwrap(),
            "  "
        );
    }

    #[tokio::test]
    async fn sends_target_code_with_auto_source() {
        let router = Router::new().route(
            "/translate_a/single",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("sl").map(String::as_str), Some("auto"));
                assert_eq!(params.get("client").map(String::as_str), Some("gtx"));
                let tagged = format!(
                    "[{}] {}",
                    params.get("tl").cloned().unwrap_or_default(),
                    params.get("q").cloned().unwrap_or_default()
                );
                Json(serde_json::json!([[[tagged, "x", null]]]))
            }),
        );
        let base = serve(router).await;
        let translator = GoogleTranslator::new(base, Duration::from_secs(5)).unwrap();

        let out = translator
            .translate("Great! Now, please describe your tech stack.", DisplayLanguage::French)
            .await
            .unwrap();

        assert_eq!(out, "[fr] Great! Now, please describe your tech stack.");
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let router = Router::new().route(
            "/translate_a/single",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = serve(router).await;
        let translator = GoogleTranslator::new(base, Duration::from_secs(5)).unwrap();

        let err = translator
            .translate("hello", DisplayLanguage::German)
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::Unavailable(_)));
    }
}
