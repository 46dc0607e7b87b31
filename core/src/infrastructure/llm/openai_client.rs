use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    llm::{ChatPrompt, LLMClient, LLMError, ResponseFormat},
};

#[derive(Debug, Clone)]
pub struct OpenAILLMClient {
    api_key: String,
    base_url: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatSpec>,
}

#[derive(Debug, Serialize)]
struct ResponseFormatSpec {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAILLMClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build OpenAI HTTP client: {}", e);
            CoreError::InvalidConfiguration(format!("OpenAI client: {}", e))
        })?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name,
            client,
        })
    }

    /// Returns `None` when the config carries no usable key.
    pub fn from_config(config: &LLMConfig) -> Result<Option<Self>, CoreError> {
        let Some(api_key) = config.api_key() else {
            return Ok(None);
        };

        Self::new(
            api_key.to_string(),
            config.openai_base_url.clone(),
            config.model.clone(),
            config.timeout,
        )
        .map(Some)
    }

    fn build_request(&self, prompt: ChatPrompt) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = prompt.system {
            messages.push(Message {
                role: "system",
                content: MessageContent::Text(system),
            });
        }

        let user_content = match prompt.image_data_url {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.instruction,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url },
                },
            ]),
            None => MessageContent::Text(prompt.instruction),
        };
        messages.push(Message {
            role: "user",
            content: user_content,
        });

        ChatCompletionRequest {
            model: prompt.model.unwrap_or_else(|| self.model_name.clone()),
            messages,
            temperature: prompt.temperature,
            response_format: match prompt.response_format {
                ResponseFormat::JsonObject => Some(ResponseFormatSpec {
                    kind: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        }
    }

    async fn call_openai_api(&self, request: ChatCompletionRequest) -> Result<String, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                if e.is_timeout() {
                    LLMError::Timeout
                } else {
                    LLMError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LLMError::Unauthorized,
                StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimited,
                _ => LLMError::Status {
                    status: status.as_u16(),
                    body: error_text,
                },
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            if e.is_timeout() {
                LLMError::Timeout
            } else {
                LLMError::Decode(e.to_string())
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LLMError::EmptyResponse)
    }
}

impl LLMClient for OpenAILLMClient {
    async fn generate(&self, prompt: ChatPrompt) -> Result<String, LLMError> {
        let request = self.build_request(prompt);
        self.call_openai_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{bearer_token, body_partial_json, method, path},
    };

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> OpenAILLMClient {
        OpenAILLMClient::new(
            "sk-test".to_string(),
            format!("{}/v1/", server.uri()),
            "gpt-4o-mini".to_string(),
            timeout,
        )
        .unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        })
    }

    #[test]
    fn test_request_shape_with_image() {
        let client = OpenAILLMClient::new(
            "sk-test".to_string(),
            "https://api.openai.com/v1".to_string(),
            "gpt-4o-mini".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let request = client.build_request(
            ChatPrompt::new("describe")
                .with_system("be terse")
                .with_image("data:image/png;base64,AAAA")
                .json(),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "response_format": {"type": "json_object"},
                "messages": [
                    {"role": "system", "content": "be terse"},
                    {"role": "user", "content": [
                        {"type": "text", "text": "describe"},
                        {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
                    ]}
                ]
            })
        );
    }

    #[test]
    fn test_request_shape_text_only() {
        let client = OpenAILLMClient::new(
            "sk-test".to_string(),
            "https://api.openai.com/v1".to_string(),
            "gpt-4o-mini".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let request =
            client.build_request(ChatPrompt::new("hello").with_model("gpt-4o").with_temperature(0.0));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "temperature": 0.0,
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_from_config_without_key() {
        let config = LLMConfig {
            openai_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(OpenAILLMClient::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generate_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(r#"{"recipes":[]}"#)))
            .expect(1)
            .mount(&server)
            .await;

        let content = client_for(&server, Duration::from_secs(5))
            .generate(ChatPrompt::new("json please").json())
            .await
            .unwrap();

        assert_eq!(content, r#"{"recipes":[]}"#);
    }

    #[tokio::test]
    async fn test_generate_maps_status_codes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": "insufficient_quota", "message": "You exceeded your current quota"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .generate(ChatPrompt::new("hi"))
            .await
            .unwrap_err();
        assert_eq!(err, LLMError::RateLimited);

        server.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .generate(ChatPrompt::new("hi"))
            .await
            .unwrap_err();
        assert_eq!(err, LLMError::Unauthorized);

        server.reset().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .generate(ChatPrompt::new("hi"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LLMError::Status {
                status: 503,
                body: "overloaded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("{}"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_millis(50))
            .generate(ChatPrompt::new("hi"))
            .await
            .unwrap_err();

        assert_eq!(err, LLMError::Timeout);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .generate(ChatPrompt::new("hi"))
            .await
            .unwrap_err();

        assert_eq!(err, LLMError::EmptyResponse);
    }
}
