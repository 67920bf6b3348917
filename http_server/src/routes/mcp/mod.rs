//! Minimal Model Context Protocol endpoint (JSON-RPC 2.0 over plain HTTP POST).
//!
//! Exposes one tool, `get_power_outages`, backed by the same query as `/api/outages`.

mod protocol;

use crate::app_container::Application;
use crate::sessions::SessionId;
use actix_web::{web, HttpRequest, HttpResponse};
use protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, PARSE_ERROR, SESSION_ERROR,
};
use serde_json::{json, Value};

pub const SESSION_HEADER: &str = "mcp-session-id";

const SERVER_NAME: &str = "power-outage-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2025-03-26";
const TOOL_NAME: &str = "get_power_outages";

fn session_id(req: &HttpRequest) -> Option<Option<SessionId>> {
    let raw = req.headers().get(SESSION_HEADER)?;
    Some(raw.to_str().ok().and_then(|value| value.parse().ok()))
}

#[tracing::instrument(skip(req, body, app), level = "info")]
async fn handle_request(
    req: HttpRequest,
    body: web::Bytes,
    app: web::Data<Application>,
) -> HttpResponse {
    let request = match serde_json::from_slice::<JsonRpcRequest>(&body) {
        Ok(request) => request,
        Err(err) => {
            return HttpResponse::BadRequest().json(JsonRpcResponse::failure(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {err}"),
            ))
        }
    };
    if request.jsonrpc != JSONRPC_VERSION {
        return HttpResponse::BadRequest().json(JsonRpcResponse::failure(
            request.id.unwrap_or(Value::Null),
            INVALID_REQUEST,
            "Invalid Request",
        ));
    }

    if request.method == "initialize" {
        return initialize(&app, request.id.unwrap_or(Value::Null), &request.params).await;
    }

    let known_session = match session_id(&req) {
        None => {
            return HttpResponse::BadRequest().json(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                SESSION_ERROR,
                "Bad Request: No valid session ID provided",
            ))
        }
        Some(Some(session_id)) => app.sessions.resume(&session_id).await,
        Some(None) => false,
    };
    if !known_session {
        return HttpResponse::NotFound().json(JsonRpcResponse::failure(
            request.id.unwrap_or(Value::Null),
            SESSION_ERROR,
            "Session not found",
        ));
    }

    let Some(id) = request.id else {
        tracing::debug!(method = %request.method, "Notification received");
        return HttpResponse::Accepted().finish();
    };
    HttpResponse::Ok().json(dispatch(&app, id, &request.method, &request.params).await)
}

async fn initialize(app: &Application, id: Value, params: &Value) -> HttpResponse {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);
    let session_id = app.sessions.open().await;
    tracing::info!(
        %session_id,
        open_sessions = app.sessions.open_count().await,
        "MCP session initialized"
    );

    HttpResponse::Ok()
        .insert_header((SESSION_HEADER, session_id.to_string()))
        .json(JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": protocol_version,
                "capabilities": { "tools": { "listChanged": false } },
                "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
            }),
        ))
}

async fn dispatch(app: &Application, id: Value, method: &str, params: &Value) -> JsonRpcResponse {
    match method {
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": [tool_definition(app)] })),
        "tools/call" => call_tool(app, id, params).await,
        other => JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
    }
}

fn tool_definition(app: &Application) -> Value {
    json!({
        "name": TOOL_NAME,
        "description": format!(
            "Get current power outage status for location: {}. Returns outage information including start/stop times, duration, and affected addresses.",
            app.query.place()
        ),
        "inputSchema": { "type": "object", "properties": {} },
    })
}

async fn call_tool(app: &Application, id: Value, params: &Value) -> JsonRpcResponse {
    match params.get("name").and_then(Value::as_str) {
        Some(TOOL_NAME) => JsonRpcResponse::success(id, get_power_outages(app).await),
        Some(name) => JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Tool {name} not found")),
        None => JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing tool name"),
    }
}

async fn get_power_outages(app: &Application) -> Value {
    let text = app
        .query
        .current_status()
        .await
        .map_err(anyhow::Error::from)
        .and_then(|status| serde_json::to_string_pretty(&status).map_err(anyhow::Error::from));

    match text {
        Ok(text) => json!({ "content": [{ "type": "text", "text": text }] }),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to get power outage status");
            json!({
                "content": [{
                    "type": "text",
                    "text": format!("Error fetching power outage status: {err}"),
                }],
                "isError": true,
            })
        }
    }
}

async fn close_session(req: HttpRequest, app: web::Data<Application>) -> HttpResponse {
    let closed = match session_id(&req).flatten() {
        Some(session_id) => app.sessions.close(&session_id).await,
        None => false,
    };
    if closed {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(JsonRpcResponse::failure(
            Value::Null,
            SESSION_ERROR,
            "Session not found",
        ))
    }
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/mcp")
            .route(web::post().to(handle_request))
            .route(web::delete().to(close_session))
            .route(web::get().to(method_not_allowed)),
    );
}
