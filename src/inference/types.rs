//! Wire types for the OpenAI-compatible `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body. Every call carries the same model and sampling parameters.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    /// One system instruction plus the user text as the only user turn.
    pub fn single_turn(
        model: &str,
        system_prompt: &str,
        user_text: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_text.to_string(),
                },
            ],
            max_tokens,
            temperature,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, trimmed. `None` if absent or blank.
    pub fn first_text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Accepts the shapes seen in the wild:
/// `{"error": {"message": "..."}}`, `{"error": "..."}` and `{"message": "..."}`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(serde_json::Value::Object(obj)) => obj.get("message").and_then(|m| m.as_str()),
        Some(serde_json::Value::String(s)) => Some(s.as_str()),
        _ => value.get("message").and_then(|m| m.as_str()),
    }?;
    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn_request_serializes() {
        let req = ChatRequest::single_turn("m", "be nice", "hello", 150, 0.7);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 150);
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "be nice");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_first_text_trims_whitespace() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Hi there!\n"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("Hi there!"));
    }

    #[test]
    fn test_first_text_missing_or_blank() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(resp.first_text(), None);

        let resp: ChatResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(resp.first_text(), None);

        let resp: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert_eq!(resp.first_text(), None);

        let resp: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn test_extract_error_message_shapes() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"Invalid API key","code":401}}"#).as_deref(),
            Some("Invalid API key")
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Model is loading"}"#).as_deref(),
            Some("Model is loading")
        );
        assert_eq!(
            extract_error_message(r#"{"message":"rate limited"}"#).as_deref(),
            Some("rate limited")
        );
    }

    #[test]
    fn test_extract_error_message_unparseable() {
        assert_eq!(extract_error_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message(r#"{"error":{"code":500}}"#), None);
    }
}
