//! Chat completions wire types and conversions
//!
//! Converts between the application's provider types and the
//! OpenAI-compatible `/chat/completions` JSON format.

use roundtable_application::{
    ChatMessage, ChatRole, GenerateOptions, Generation, ProviderError, TokenUsage,
};
use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Build a request; the system prompt, if any, becomes the first message.
pub fn build_request(
    model: &str,
    messages: &[ChatMessage],
    options: &GenerateOptions,
) -> ChatCompletionRequest {
    let system = options.system_prompt.as_deref().map(ChatMessage::system);

    let messages = system
        .iter()
        .chain(messages)
        .map(|m| WireMessage {
            role: m.role,
            content: m.content.clone(),
        })
        .collect();

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: options.max_tokens,
        temperature: options.temperature,
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// `null` when the model returned only a refusal or tool call
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Extract the first choice's text.
pub fn convert_response(response: ChatCompletionResponse) -> Result<Generation, ProviderError> {
    let usage = response.usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
    });

    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("response has no choices".to_string()))?
        .message
        .content
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ProviderError::InvalidResponse(
            "response content is empty".to_string(),
        ));
    }

    Ok(Generation { content, usage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_prepends_system_prompt() {
        let options = GenerateOptions::new(500, 0.3).with_system_prompt("You are Ada");
        let request = build_request("gpt-4o-mini", &[ChatMessage::user("Vote now")], &options);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are Ada");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Vote now");
    }

    #[test]
    fn test_build_request_without_system_prompt() {
        let options = GenerateOptions::new(100, 0.7);
        let request = build_request("m", &[ChatMessage::user("hi")], &options);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
    }

    #[test]
    fn test_convert_response() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "VOTE: 2"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let generation = convert_response(response).unwrap();
        assert_eq!(generation.content, "VOTE: 2");
        assert_eq!(generation.usage.unwrap().total(), 15);
    }

    #[test]
    fn test_convert_response_without_choices() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            convert_response(response),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_convert_response_null_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert!(convert_response(response).is_err());
    }
}
