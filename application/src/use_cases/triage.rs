//! Triage classifier
//!
//! One JSON-mode completion decides whether a request can be answered
//! directly or needs a full mission. Triage never errors: any failure
//! falls back to the complex verdict so the request still gets handled.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest};
use std::sync::Arc;
use taskforce_domain::{
    Message, ModelParams, TriagePromptTemplate, TriageVerdict, parse_triage_verdict,
};
use tracing::{debug, warn};

/// Classifies requests as simple or complex
pub struct TriageClassifier {
    gateway: Arc<dyn CompletionGateway>,
    params: ModelParams,
}

impl TriageClassifier {
    pub fn new(gateway: Arc<dyn CompletionGateway>, params: ModelParams) -> Self {
        Self { gateway, params }
    }

    /// Evaluate one request. Infallible by contract: failures yield the
    /// fail-safe complex verdict.
    pub async fn evaluate(&self, request: &str, context: &str) -> TriageVerdict {
        let completion = CompletionRequest::new(
            vec![
                Message::system(TriagePromptTemplate::system()),
                Message::user(TriagePromptTemplate::request(request, context)),
            ],
            self.params.clone(),
        )
        .json_mode();

        let response = match self.gateway.complete(completion, None).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Triage completion failed: {}", e);
                return TriageVerdict::fail_safe("Error during triage");
            }
        };

        match parse_triage_verdict(&response.text_content()) {
            Ok(verdict) => {
                debug!(
                    is_complex = verdict.is_complex,
                    "Triage verdict: {}", verdict.reasoning
                );
                verdict
            }
            Err(e) => {
                warn!("Triage verdict unparseable: {}", e);
                TriageVerdict::fail_safe("Error during triage")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_gateway::{ChunkHandler, GatewayError};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use taskforce_domain::CompletionResponse;

    struct OneShotGateway {
        response: Result<String, GatewayError>,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionGateway for OneShotGateway {
        async fn complete(
            &self,
            request: CompletionRequest,
            _on_chunk: Option<ChunkHandler>,
        ) -> Result<CompletionResponse, GatewayError> {
            *self.last_request.lock().unwrap() = Some(request);
            match &self.response {
                Ok(text) => Ok(CompletionResponse::text_only(text, "test-model")),
                Err(_) => Err(GatewayError::RequestFailed("down".into())),
            }
        }
    }

    fn classifier(response: Result<String, GatewayError>) -> (TriageClassifier, Arc<OneShotGateway>) {
        let gateway = Arc::new(OneShotGateway {
            response,
            last_request: Mutex::new(None),
        });
        (
            TriageClassifier::new(gateway.clone(), ModelParams::default()),
            gateway,
        )
    }

    #[tokio::test]
    async fn test_simple_verdict_passes_through() {
        let (classifier, gateway) = classifier(Ok(
            r#"{"isComplex": false, "reasoning": "greeting", "directResponse": "Hi!"}"#.into(),
        ));
        let verdict = classifier.evaluate("hello", "none").await;
        assert!(!verdict.is_complex);
        assert_eq!(verdict.direct_response.as_deref(), Some("Hi!"));

        // Triage runs in JSON mode with exactly one completion
        let request = gateway.last_request.lock().unwrap().take().unwrap();
        assert!(request.json_mode);
        assert!(request.tools.is_empty());
    }

    #[tokio::test]
    async fn test_complex_verdict_passes_through() {
        let (classifier, _) = classifier(Ok(
            r#"{"isComplex": true, "reasoning": "needs tools"}"#.into(),
        ));
        let verdict = classifier.evaluate("build me a site", "none").await;
        assert!(verdict.is_complex);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_fail_safe_complex() {
        let (classifier, _) = classifier(Err(GatewayError::RequestFailed("down".into())));
        let verdict = classifier.evaluate("hello", "none").await;
        assert!(verdict.is_complex);
        assert!(verdict.direct_response.is_none());
    }

    #[tokio::test]
    async fn test_malformed_verdict_is_fail_safe_complex() {
        let (classifier, _) = classifier(Ok("not json".into()));
        let verdict = classifier.evaluate("hello", "none").await;
        assert!(verdict.is_complex);
    }

    #[tokio::test]
    async fn test_simple_without_response_is_fail_safe_complex() {
        let (classifier, _) = classifier(Ok(
            r#"{"isComplex": false, "reasoning": "simple but empty"}"#.into(),
        ));
        let verdict = classifier.evaluate("hello", "none").await;
        assert!(verdict.is_complex);
    }
}
