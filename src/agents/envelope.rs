// JSON-RPC task envelope exchanged with remote agents
//
// Request:  {"jsonrpc":"2.0","method":"tasks/send","id":..,
//            "params":{"session_id":..,"message":{"parts":[{"text":..}]}}}
// Response: {"result":{..}} or {"error":{"code":..,"message":..,"data":..}}

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{RoutingError, RoutingResult};

pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_SEND_TASK: &str = "tasks/send";

/// Server-defined error, used by agents for rejected payloads
pub const SERVER_ERROR: i64 = -32000;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    #[serde(default)]
    pub session_id: String,
    pub message: Message,
}

/// `tasks/send` request envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: String,
    pub params: TaskParams,
}

impl TaskRequest {
    /// Builds a `tasks/send` request carrying `text` as its single part
    pub fn send_task(
        id: impl Into<String>,
        session_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: METHOD_SEND_TASK.to_string(),
            id: id.into(),
            params: TaskParams {
                session_id: session_id.into(),
                message: Message {
                    parts: vec![MessagePart { text: text.into() }],
                },
            },
        }
    }

    pub fn encode(&self) -> RoutingResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a request on the receiving side
    pub fn decode(body: &str) -> Result<Self, JsonRpcError> {
        serde_json::from_str(body).map_err(|e| JsonRpcError {
            code: INVALID_REQUEST,
            message: format!("Invalid Request: {}", e),
            data: None,
        })
    }

    /// Text of the first message part, if any
    pub fn text(&self) -> Option<&str> {
        self.params
            .message
            .parts
            .first()
            .map(|part| part.text.as_str())
    }
}

/// Structured error returned by a remote agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Decoded reply to a `tasks/send` request
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResponse {
    Result(Value),
    Error(JsonRpcError),
}

impl TaskResponse {
    /// Serializes the reply the way an agent writes it on the wire
    pub fn to_json(&self, id: Option<&str>) -> Value {
        let mut body = Map::new();
        body.insert("jsonrpc".to_string(), Value::from(JSONRPC_VERSION));
        body.insert(
            "id".to_string(),
            id.map(Value::from).unwrap_or(Value::Null),
        );
        match self {
            TaskResponse::Result(result) => {
                body.insert("result".to_string(), result.clone());
            }
            TaskResponse::Error(error) => {
                body.insert(
                    "error".to_string(),
                    serde_json::to_value(error).unwrap_or(Value::Null),
                );
            }
        }
        Value::Object(body)
    }
}

/// Interprets the body of a remote reply
///
/// A non-null `result` wins; otherwise `error` must be a well-formed error
/// object. Anything else is a malformed response.
pub fn decode_response(body: &str) -> RoutingResult<TaskResponse> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| RoutingError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let object = value.as_object().ok_or_else(|| {
        RoutingError::MalformedResponse("reply is not a JSON object".to_string())
    })?;

    if let Some(result) = object.get("result").filter(|result| !result.is_null()) {
        return Ok(TaskResponse::Result(result.clone()));
    }

    match object.get("error").filter(|error| !error.is_null()) {
        Some(error) => serde_json::from_value::<JsonRpcError>(error.clone())
            .map(TaskResponse::Error)
            .map_err(|e| RoutingError::MalformedResponse(format!("invalid error object: {}", e))),
        None => Err(RoutingError::MalformedResponse(
            "reply has neither result nor error".to_string(),
        )),
    }
}

/// Receiver-side check of a `tasks/send` payload
///
/// The text must decode as a non-empty JSON array whose first element is an
/// object carrying `hu_id`. Violations are reported as `-32000` errors.
pub fn parse_work_item_payload(text: &str) -> Result<Vec<Map<String, Value>>, JsonRpcError> {
    let items: Vec<Value> = serde_json::from_str(text).map_err(|e| {
        JsonRpcError::new(SERVER_ERROR, format!("payload is not a JSON array: {}", e))
    })?;

    let first = items
        .first()
        .ok_or_else(|| JsonRpcError::new(SERVER_ERROR, "payload array is empty"))?;

    if first.get("hu_id").is_none() {
        return Err(JsonRpcError::new(SERVER_ERROR, "first work item has no hu_id"));
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => Err(JsonRpcError::new(
                SERVER_ERROR,
                format!("work item is not an object: {}", other),
            )),
        })
        .collect()
}
