use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::agents::errors::{RoutingError, RoutingResult};
use crate::agents::prompts::{format_tools, library, PromptTemplate};
use crate::agents::selector::{SkillSelector, ToolSpec};

/// Connection settings for an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct ChatCompletionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// SkillSelector that asks a chat model to call exactly one tool
///
/// Every ToolSpec becomes a function tool taking a single `input` string;
/// the name of the first tool call in the reply is the selected skill.
pub struct ChatCompletionSelector {
    config: ChatCompletionConfig,
    client: Client,
    prompt: PromptTemplate,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Vec<Value>,
    tool_choice: &'static str,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
}

impl ChatCompletionSelector {
    pub fn new(config: ChatCompletionConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            prompt: library::skill_selection(),
        }
    }

    fn build_request(&self, text: &str, tools: &[ToolSpec]) -> ChatRequest {
        let mut variables = HashMap::new();
        variables.insert("tools".to_string(), format_tools(tools));
        variables.insert("work_item".to_string(), text.to_string());

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.prompt.system.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: self.prompt.render(&variables),
                },
            ],
            tools: tools.iter().map(function_tool).collect(),
            tool_choice: "required",
            temperature: 0.0,
        }
    }
}

fn function_tool(tool: &ToolSpec) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": {
                    "input": {"type": "string", "description": "The user story text"}
                },
                "required": ["input"]
            }
        }
    })
}

#[async_trait]
impl SkillSelector for ChatCompletionSelector {
    async fn select(&self, text: &str, tools: &[ToolSpec]) -> RoutingResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = self.build_request(text, tools);

        tracing::debug!(
            model = %self.config.model,
            prompt = %self.prompt.name,
            version = %self.prompt.version,
            tools = tools.len(),
            "Asking selector for a tool"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| RoutingError::SelectorFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::SelectorFailed(format!(
                "selector answered HTTP {}: {}",
                status, body
            )));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| RoutingError::SelectorFailed(format!("invalid reply: {}", e)))?;

        let choice = reply
            .choices
            .into_iter()
            .flat_map(|choice| choice.message.tool_calls.unwrap_or_default())
            .map(|call| call.function.name)
            .next()
            .ok_or_else(|| {
                RoutingError::SelectorFailed(
                    "selector answered without choosing a tool".to_string(),
                )
            })?;

        tracing::info!(tool = %choice, "Selector chose tool");
        Ok(choice)
    }
}
