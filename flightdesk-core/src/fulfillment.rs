use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::results::{self, FlightOption, SearchSummary};
use crate::search::SearchQuery;
use crate::supplier::FlightSearchProvider;
use crate::CoreResult;

// ============================================================================
// Webhook request
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "sessionInfo", default)]
    pub session_info: Option<RequestSessionInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestSessionInfo {
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

impl WebhookRequest {
    /// Slot parameters; a missing `sessionInfo` or `parameters` is an empty map
    pub fn into_parameters(self) -> Map<String, Value> {
        self.session_info
            .and_then(|info| info.parameters)
            .unwrap_or_default()
    }
}

// ============================================================================
// Webhook reply
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentReply {
    pub fulfillment_response: FulfillmentResponse,
    pub session_info: ReplySessionInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentResponse {
    pub messages: Vec<ResponseMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseMessage {
    pub text: MessageText,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageText {
    pub text: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplySessionInfo {
    pub parameters: SessionParameters,
}

/// State the agent platform keeps across conversation turns
#[derive(Debug, Clone, Serialize)]
pub struct SessionParameters {
    pub flight_comparison_results: Vec<FlightOption>,
    pub origin: String,
    pub destination: String,
}

impl FulfillmentReply {
    pub fn assemble(summary: SearchSummary, query: &SearchQuery) -> Self {
        Self {
            fulfillment_response: FulfillmentResponse {
                messages: vec![ResponseMessage {
                    text: MessageText { text: summary.lines },
                }],
            },
            session_info: ReplySessionInfo {
                parameters: SessionParameters {
                    flight_comparison_results: summary.options,
                    origin: query.origin.clone(),
                    destination: query.destination.clone(),
                },
            },
        }
    }
}

// ============================================================================
// Orchestration
// ============================================================================

/// Normalize the slot parameters, run one provider search and shape the reply.
///
/// Only provider failures are errors; everything else degrades into the reply.
pub async fn fulfill(
    provider: &dyn FlightSearchProvider,
    parameters: &Map<String, Value>,
    today: NaiveDate,
) -> CoreResult<FulfillmentReply> {
    let query = SearchQuery::from_parameters(parameters, today);
    info!(
        origin = %query.origin,
        destination = %query.destination,
        outbound_date = %query.outbound_date,
        return_date = %query.return_date,
        adults = query.adults,
        "Searching flights"
    );

    let response = provider.search(&query).await?;
    let summary = results::summarize(&response, &query);
    info!(options = summary.options.len(), "Flight search summarized");

    Ok(FulfillmentReply::assemble(summary, &query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_parameters() {
        let req: WebhookRequest = serde_json::from_value(json!({
            "sessionInfo": {"parameters": {"departure_city": "Tokyo", "passenger_count": 2}}
        }))
        .unwrap();
        let params = req.into_parameters();

        assert_eq!(params.get("departure_city"), Some(&json!("Tokyo")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_request_without_session_info() {
        for body in [json!({}), json!({"sessionInfo": null}), json!({"sessionInfo": {"parameters": null}})] {
            let req: WebhookRequest = serde_json::from_value(body).unwrap();
            assert!(req.into_parameters().is_empty());
        }
    }

    #[test]
    fn test_reply_shape() {
        let query = SearchQuery::new(
            "TOK".into(),
            "PAR".into(),
            NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
            1,
        );
        let summary = results::summarize(&json!({}), &query);
        let reply = FulfillmentReply::assemble(summary, &query);

        assert_eq!(
            reply.fulfillment_response.messages[0].text.text,
            vec!["No flights found from TOK to PAR on 2025-12-25.".to_string()]
        );

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            json!({
                "fulfillmentResponse": {
                    "messages": [{"text": {"text": ["No flights found from TOK to PAR on 2025-12-25."]}}]
                },
                "sessionInfo": {
                    "parameters": {
                        "flight_comparison_results": [],
                        "origin": "TOK",
                        "destination": "PAR"
                    }
                }
            })
        );
    }
}
