use crate::error::TransportError;
use crate::models::*;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Outbound JSON POSTs to workflow-automation webhooks. One attempt per call.
#[derive(Debug, Clone)]
pub struct WebhookService {
    client: Client,
}

impl WebhookService {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        headers: &[(&str, &str)],
    ) -> Result<WebhookResponse, TransportError> {
        log::info!("POST {}", url);

        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("Webhook {} answered HTTP {}", url, status.as_u16());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(WebhookResponse {
            status: status.as_u16(),
            body: parse_body(text),
        })
    }

    pub async fn send_review(
        &self,
        url: &str,
        payload: &ReviewPayload,
    ) -> Result<WebhookResponse, TransportError> {
        self.post_json(url, payload, &[]).await
    }

    pub async fn send_decision(
        &self,
        url: &str,
        decision: Decision,
        contract_name: &str,
        review_summary: &str,
    ) -> Result<WebhookResponse, TransportError> {
        let payload = DecisionPayload {
            decision,
            contract_name: contract_name.to_string(),
            review_summary: review_summary.to_string(),
        };
        self.post_json(url, &payload, &[]).await
    }

    pub async fn lookup_item(
        &self,
        url: &str,
        item: &str,
    ) -> Result<WebhookResponse, TransportError> {
        let request = ItemLookupRequest {
            barang: item.trim().to_string(),
        };
        self.post_json(url, &request, &[]).await
    }
}

/// JSON when it parses, raw text otherwise.
pub fn parse_body(text: String) -> ResponseBody {
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_parsing_prefers_json() {
        assert_eq!(
            parse_body(r#"{"pesan":"ok"}"#.to_string()),
            ResponseBody::Json(json!({"pesan": "ok"}))
        );
        assert_eq!(
            parse_body("Workflow was started".to_string()),
            ResponseBody::Text("Workflow was started".to_string())
        );
    }

    #[test]
    fn decision_uses_workflow_wire_values() {
        let payload = DecisionPayload {
            decision: Decision::Rejected,
            contract_name: "nda.pdf".to_string(),
            review_summary: "High risk".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "decision": "ditolak",
                "contract_name": "nda.pdf",
                "review_summary": "High risk"
            })
        );
    }
}
