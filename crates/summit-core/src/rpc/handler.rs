//! Name-based dispatch of JSON-RPC requests onto the [`Hierarchy`].

use std::{collections::HashMap, future::Future, pin::Pin};

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};

use super::{
    methods::*,
    protocol::{ErrorCode, JsonRpcRequest, JsonRpcResponse, RpcError, JSONRPC_VERSION},
};
use crate::{
    hierarchy::Hierarchy,
    params::{
        AddTasks, CreateObjective, CreatePlan, GetObjective, GetPlan, Id, LinkTask,
        ListObjectives, ListPlans, ListTasks, UpdateObjective, UpdatePlan, UpdateTask,
    },
};

type MethodFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, RpcError>> + Send + 'a>>;
type MethodFn = for<'a> fn(&'a Hierarchy, Value) -> MethodFuture<'a>;

/// Routes requests to handler functions registered by method name.
///
/// The handler keeps no entity data of its own; every call goes through the
/// wrapped [`Hierarchy`].
pub struct RpcHandler {
    hierarchy: Hierarchy,
    methods: HashMap<&'static str, MethodFn>,
}

impl RpcHandler {
    pub fn new(hierarchy: Hierarchy) -> Self {
        let mut methods: HashMap<&'static str, MethodFn> = HashMap::new();
        methods.insert(OBJECTIVES_CREATE, objectives_create);
        methods.insert(OBJECTIVES_GET, objectives_get);
        methods.insert(OBJECTIVES_LIST, objectives_list);
        methods.insert(OBJECTIVES_UPDATE, objectives_update);
        methods.insert(OBJECTIVES_DELETE, objectives_delete);
        methods.insert(PLANS_CREATE, plans_create);
        methods.insert(PLANS_GET, plans_get);
        methods.insert(PLANS_LIST, plans_list);
        methods.insert(PLANS_UPDATE, plans_update);
        methods.insert(PLANS_DELETE, plans_delete);
        methods.insert(TASKS_LIST, tasks_list);
        methods.insert(TASKS_ADD, tasks_add);
        methods.insert(TASKS_UPDATE, tasks_update);
        methods.insert(TASKS_LINK, tasks_link);

        Self { hierarchy, methods }
    }

    /// The service requests are dispatched to.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Registered method names in sorted order.
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatches a decoded request.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or(Value::Null);
        if request.jsonrpc != JSONRPC_VERSION {
            return JsonRpcResponse::failure(
                id,
                RpcError::new(
                    ErrorCode::InvalidRequest,
                    format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                ),
            );
        }
        let params = request.params.unwrap_or(Value::Null);
        match self.call(&request.method, params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        }
    }

    /// Validates the envelope of an arbitrary JSON value, then dispatches it.
    pub async fn handle_value(&self, value: Value) -> JsonRpcResponse {
        match parse_envelope(value) {
            Ok(request) => self.handle(request).await,
            Err((id, error)) => JsonRpcResponse::failure(id, error),
        }
    }

    /// Decodes and dispatches one raw JSON payload.
    pub async fn handle_str(&self, raw: &str) -> JsonRpcResponse {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                debug!("Rejected unparseable request: {e}");
                JsonRpcResponse::failure(
                    Value::Null,
                    RpcError::new(ErrorCode::ParseError, format!("Parse error: {e}")),
                )
            }
        }
    }

    /// Invokes a method directly, bypassing the envelope.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let Some(handler) = self.methods.get(method) else {
            debug!("Unknown method: {method}");
            return Err(RpcError::new(
                ErrorCode::MethodNotFound,
                format!("Method not found: {method}"),
            ));
        };

        debug!("{method}: {params}");
        let result = handler(&self.hierarchy, params).await;
        if let Err(ref error) = result {
            if error.kind() == Some(ErrorCode::InternalError) {
                warn!("{method} failed: {}", error.message);
            } else {
                debug!("{method} rejected: {}", error.message);
            }
        }
        result
    }
}

/// Checks the request shape, returning the id to echo alongside any error.
fn parse_envelope(value: Value) -> Result<JsonRpcRequest, (Value, RpcError)> {
    let invalid = |id: Value, message: &str| {
        Err((id, RpcError::new(ErrorCode::InvalidRequest, message.to_string())))
    };

    let Value::Object(mut object) = value else {
        return invalid(Value::Null, "Request must be a JSON object");
    };

    let id = match object.remove("id") {
        None | Some(Value::Null) => None,
        Some(id @ (Value::String(_) | Value::Number(_))) => Some(id),
        Some(_) => return invalid(Value::Null, "Request id must be a string or number"),
    };
    let echo = id.clone().unwrap_or(Value::Null);

    match object.get("jsonrpc") {
        Some(Value::String(version)) if version == JSONRPC_VERSION => {}
        _ => return invalid(echo, "Request must carry jsonrpc \"2.0\""),
    }

    let method = match object.remove("method") {
        Some(Value::String(method)) if !method.is_empty() => method,
        _ => return invalid(echo, "Request method must be a non-empty string"),
    };

    let params = match object.remove("params") {
        None | Some(Value::Null) => None,
        Some(params @ Value::Object(_)) => Some(params),
        Some(_) => {
            return Err((echo, RpcError::invalid_params("params must be an object")));
        }
    };

    Ok(JsonRpcRequest::new(method, id, params))
}

/// Deserializes a method's params; absent params read as an empty object.
fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    let params = match params {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(params).map_err(RpcError::invalid_params)
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}

fn deleted(id: &str) -> Value {
    json!({ "deleted": true, "id": id })
}

fn objectives_create(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: CreateObjective = parse_params(params)?;
        to_result(&h.create_objective(params).await?)
    })
}

fn objectives_get(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: GetObjective = parse_params(params)?;
        to_result(&h.get_objective(&params).await?)
    })
}

fn objectives_list(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: ListObjectives = parse_params(params)?;
        to_result(&h.list_objectives(params).await?)
    })
}

fn objectives_update(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: UpdateObjective = parse_params(params)?;
        to_result(&h.update_objective(params).await?)
    })
}

fn objectives_delete(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: Id = parse_params(params)?;
        h.delete_objective(&params).await?;
        Ok(deleted(&params.id))
    })
}

fn plans_create(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: CreatePlan = parse_params(params)?;
        to_result(&h.create_plan(params).await?)
    })
}

fn plans_get(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: GetPlan = parse_params(params)?;
        to_result(&h.get_plan(&params).await?)
    })
}

fn plans_list(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: ListPlans = parse_params(params)?;
        let plans = h.list_plans(&params).await?;
        Ok(json!({ "plans": to_result(&plans)? }))
    })
}

fn plans_update(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: UpdatePlan = parse_params(params)?;
        to_result(&h.update_plan(params).await?)
    })
}

fn plans_delete(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: Id = parse_params(params)?;
        h.delete_plan(&params).await?;
        Ok(deleted(&params.id))
    })
}

fn tasks_list(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: ListTasks = parse_params(params)?;
        let tasks = h.list_tasks(&params).await?;
        Ok(json!({ "tasks": to_result(&tasks)? }))
    })
}

fn tasks_add(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: AddTasks = parse_params(params)?;
        let tasks = h.add_tasks(params).await?;
        Ok(json!({ "tasks": to_result(&tasks)? }))
    })
}

fn tasks_update(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: UpdateTask = parse_params(params)?;
        to_result(&h.update_task(params).await?)
    })
}

fn tasks_link(h: &Hierarchy, params: Value) -> MethodFuture<'_> {
    Box::pin(async move {
        let params: LinkTask = parse_params(params)?;
        to_result(&h.link_task(&params).await?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyBuilder;

    async fn handler() -> RpcHandler {
        RpcHandler::new(HierarchyBuilder::new().in_memory().build().await.unwrap())
    }

    fn error_code(response: &JsonRpcResponse) -> Option<i64> {
        response.error.as_ref().map(|e| e.code)
    }

    #[tokio::test]
    async fn test_every_method_is_registered() {
        let handler = handler().await;
        let mut expected = ALL.to_vec();
        expected.sort_unstable();
        assert_eq!(handler.method_names(), expected);
    }

    #[tokio::test]
    async fn test_envelope_errors() {
        let handler = handler().await;

        let response = handler.handle_str("{not json").await;
        assert_eq!(error_code(&response), Some(-32700));
        assert_eq!(response.id, Value::Null);

        let response = handler.handle_str("[1, 2]").await;
        assert_eq!(error_code(&response), Some(-32600));

        let response = handler
            .handle_str(r#"{"jsonrpc":"1.0","id":7,"method":"objectives/list"}"#)
            .await;
        assert_eq!(error_code(&response), Some(-32600));
        assert_eq!(response.id, json!(7));

        let response = handler.handle_str(r#"{"jsonrpc":"2.0","id":"a"}"#).await;
        assert_eq!(error_code(&response), Some(-32600));
        assert_eq!(response.id, json!("a"));

        let response = handler
            .handle_str(r#"{"jsonrpc":"2.0","id":3,"method":"objectives/launch"}"#)
            .await;
        assert_eq!(error_code(&response), Some(-32601));

        let response = handler
            .handle_str(r#"{"jsonrpc":"2.0","id":4,"method":"objectives/list","params":[1]}"#)
            .await;
        assert_eq!(error_code(&response), Some(-32602));
    }

    #[tokio::test]
    async fn test_missing_required_params() {
        let handler = handler().await;
        for method in [OBJECTIVES_CREATE, OBJECTIVES_GET, PLANS_CREATE, TASKS_LINK] {
            let err = handler.call(method, json!({})).await.unwrap_err();
            assert_eq!(err.kind(), Some(ErrorCode::InvalidParams), "{method}");
        }

        let err = handler
            .call(OBJECTIVES_CREATE, json!({ "name": "" }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorCode::InvalidParams));
    }

    #[tokio::test]
    async fn test_list_accepts_absent_params() {
        let handler = handler().await;
        let response = handler
            .handle(JsonRpcRequest::new(OBJECTIVES_LIST, Some(json!(1)), None))
            .await;
        assert_eq!(
            response.result,
            Some(json!({ "objectives": [], "totalSize": 0 }))
        );
    }

    #[tokio::test]
    async fn test_delete_result_shape() {
        let handler = handler().await;
        let created = handler
            .call(OBJECTIVES_CREATE, json!({ "name": "Gone soon" }))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let result = handler
            .call(OBJECTIVES_DELETE, json!({ "id": id }))
            .await
            .unwrap();
        assert_eq!(result, json!({ "deleted": true, "id": id }));

        let err = handler
            .call(OBJECTIVES_DELETE, json!({ "id": id }))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorCode::NotFound));
    }
}
