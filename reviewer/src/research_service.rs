use crate::error::TransportError;
use crate::models::*;
use crate::webhook_service::WebhookService;
use serde_json::Value;

/// Client for a hosted agent flow (Langflow-style `/run` endpoint).
pub struct ResearchService {
    webhook: WebhookService,
    api_url: String,
    api_key: String,
}

impl ResearchService {
    pub fn new(webhook: WebhookService, api_url: &str, api_key: &str) -> Self {
        Self {
            webhook,
            api_url: run_endpoint(api_url),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.api_url
    }

    pub async fn research(&self, topic: &str) -> Result<ResearchOutcome, TransportError> {
        let request = ResearchRequest {
            input_value: topic.to_string(),
            output_type: "chat".to_string(),
            input_type: "chat".to_string(),
            tweaks: serde_json::Map::new(),
        };

        let response = self
            .webhook
            .post_json(&self.api_url, &request, &[("x-api-key", self.api_key.as_str())])
            .await?;

        Ok(match response.body {
            ResponseBody::Json(value) => extract_message(&value)
                .map(ResearchOutcome::Text)
                .unwrap_or(ResearchOutcome::Raw(value)),
            ResponseBody::Text(text) => ResearchOutcome::Text(text),
        })
    }
}

/// Make sure the flow URL targets the `/run` action.
pub fn run_endpoint(api_url: &str) -> String {
    let trimmed = api_url.trim().trim_end_matches('/');
    if trimmed.ends_with("/run") {
        trimmed.to_string()
    } else {
        format!("{}/run", trimmed)
    }
}

/// `outputs[0].outputs[0].results.message.text`
pub fn extract_message(value: &Value) -> Option<String> {
    value
        .get("outputs")?
        .get(0)?
        .get("outputs")?
        .get(0)?
        .get("results")?
        .get("message")?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_suffix_is_added_once() {
        let cases = [
            ("https://flow.example/api/v1/run/abc", "https://flow.example/api/v1/run/abc/run"),
            ("https://flow.example/api/v1/abc/run", "https://flow.example/api/v1/abc/run"),
            ("https://flow.example/api/v1/abc/", "https://flow.example/api/v1/abc/run"),
        ];
        for (input, expected) in cases {
            assert_eq!(run_endpoint(input), expected);
        }
    }

    #[test]
    fn message_text_is_pulled_from_nested_outputs() {
        let value = json!({
            "outputs": [{"outputs": [{"results": {"message": {"text": "AI chips are booming."}}}]}]
        });
        assert_eq!(extract_message(&value).as_deref(), Some("AI chips are booming."));
    }

    #[test]
    fn unexpected_shape_yields_none() {
        assert_eq!(extract_message(&json!({"outputs": []})), None);
        assert_eq!(extract_message(&json!({"result": "x"})), None);
    }
}
