//! JSON-RPC 2.0 envelope types and error codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HierarchyError;

/// Protocol tag carried by every request and response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Error codes used in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The payload was not valid JSON
    ParseError,
    /// The payload was JSON but not a request object
    InvalidRequest,
    /// No handler is registered under the method name
    MethodNotFound,
    /// Required parameters are missing or malformed
    InvalidParams,
    /// Any unexpected failure
    InternalError,
    /// A referenced record does not exist
    NotFound,
    /// A requested status change is not allowed
    InvalidState,
}

impl ErrorCode {
    /// Numeric value on the wire.
    pub const fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::NotFound => -32000,
            ErrorCode::InvalidState => -32001,
        }
    }

    /// Reverse of [`ErrorCode::code`].
    pub fn from_code(code: i64) -> Option<Self> {
        [
            ErrorCode::ParseError,
            ErrorCode::InvalidRequest,
            ErrorCode::MethodNotFound,
            ErrorCode::InvalidParams,
            ErrorCode::InternalError,
            ErrorCode::NotFound,
            ErrorCode::InvalidState,
        ]
        .into_iter()
        .find(|c| c.code() == code)
    }
}

/// Structured error member of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Attaches additional error data.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The known code this error carries, if any.
    pub fn kind(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.code)
    }

    pub fn invalid_params(message: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidParams, format!("Invalid params: {message}"))
    }

    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, message.to_string())
    }
}

impl From<HierarchyError> for RpcError {
    fn from(error: HierarchyError) -> Self {
        Self::new(error.rpc_code(), error.to_string())
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for RpcError {}

/// A decoded request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    /// Correlation id: a string, a number or absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Builds a request with the current protocol tag.
    pub fn new(method: impl Into<String>, id: Option<Value>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            id,
            params,
        }
    }
}

/// A response carrying exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// Echo of the request id; `null` when the request had none or could
    /// not be read
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Converts into the plain `Result` form.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error),
            (Some(result), None) => Ok(result),
            (None, None) => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_codes_match_wire_values() {
        assert_eq!(ErrorCode::ParseError.code(), -32700);
        assert_eq!(ErrorCode::InvalidRequest.code(), -32600);
        assert_eq!(ErrorCode::MethodNotFound.code(), -32601);
        assert_eq!(ErrorCode::InvalidParams.code(), -32602);
        assert_eq!(ErrorCode::InternalError.code(), -32603);
        assert_eq!(ErrorCode::NotFound.code(), -32000);
        assert_eq!(ErrorCode::InvalidState.code(), -32001);
        assert_eq!(ErrorCode::from_code(-32001), Some(ErrorCode::InvalidState));
        assert_eq!(ErrorCode::from_code(1), None);
    }

    #[test]
    fn test_response_has_exactly_one_member() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!(1), json!({"a": 1}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {"a": 1}}));

        let err = serde_json::to_value(JsonRpcResponse::failure(
            Value::Null,
            RpcError::new(ErrorCode::ParseError, "Parse error"),
        ))
        .unwrap();
        assert_eq!(
            err,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32700, "message": "Parse error"}})
        );
    }

    #[test]
    fn test_hierarchy_errors_convert() {
        let err: RpcError = HierarchyError::TaskNotFound { id: "task-1".into() }.into();
        assert_eq!(err.kind(), Some(ErrorCode::NotFound));
        assert_eq!(err.message, "Task not found: task-1");
    }
}
