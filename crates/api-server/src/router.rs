//! Route table and request dispatcher
//!
//! Routing is an explicit table assembled at startup: path pattern ->
//! method -> handler descriptor. The axum `Router` only hosts the listener
//! plumbing (CORS, tracing); every routing decision, including the 404/405
//! bodies, is made by [`RouteTable::dispatch`].

use std::collections::HashMap;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

/// Request bodies larger than this are rejected outright
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Named handler a route resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Health,
    ListTasks,
    CreateTask,
    UpdateTaskStatus,
    AssignTask,
}

/// Path parameters captured while matching, keyed by placeholder name
pub type PathParams = HashMap<&'static str, String>;

/// Decoded query parameters
pub type QueryParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

/// A registered path, literal except for `{param}` segments
#[derive(Debug, Clone, PartialEq, Eq)]
struct RoutePattern {
    raw: &'static str,
    segments: Vec<Segment>,
}

impl RoutePattern {
    fn new(raw: &'static str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(s),
            })
            .collect();
        Self { raw, segments }
    }

    /// Match a concrete request path, capturing `{param}` segments
    fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(*name, (*part).to_string());
                }
            }
        }
        Some(params)
    }
}

struct RouteEntry {
    pattern: RoutePattern,
    methods: Vec<(Method, Handler)>,
}

/// The routing table, built once at startup
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The full route surface of this service
    pub fn standard() -> Self {
        Self::new()
            .route("/health", Method::GET, Handler::Health)
            .route("/tasks", Method::GET, Handler::ListTasks)
            .route("/tasks", Method::POST, Handler::CreateTask)
            .route("/tasks/{id}", Method::PATCH, Handler::UpdateTaskStatus)
            .route("/tasks/{id}/assign", Method::PATCH, Handler::AssignTask)
            .route("/tasks/{id}/assign", Method::POST, Handler::AssignTask)
    }

    fn route(mut self, pattern: &'static str, method: Method, handler: Handler) -> Self {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.pattern.raw == pattern)
        {
            Some(entry) => entry.methods.push((method, handler)),
            None => self.entries.push(RouteEntry {
                pattern: RoutePattern::new(pattern),
                methods: vec![(method, handler)],
            }),
        }
        self
    }

    /// Route a request: strip the query string, match the path, check the
    /// method, then invoke the resolved handler
    pub async fn dispatch(
        &self,
        state: &AppState,
        method: &Method,
        path_and_query: &str,
        body: &[u8],
    ) -> Response {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };

        let Some((entry, params)) = self
            .entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
        else {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Route '{path}' not found") })),
            )
                .into_response();
        };

        let Some((_, handler)) = entry.methods.iter().find(|(m, _)| m == method) else {
            let allowed: Vec<&str> = entry.methods.iter().map(|(m, _)| m.as_str()).collect();
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({
                    "error": format!("Method '{method}' not allowed for '{path}'"),
                    "allowed_methods": allowed,
                })),
            )
                .into_response();
        };

        let query = parse_query(query);
        self.invoke(*handler, state, &params, &query, body).await
    }

    async fn invoke(
        &self,
        handler: Handler,
        state: &AppState,
        params: &PathParams,
        query: &QueryParams,
        body: &[u8],
    ) -> Response {
        let result = match handler {
            Handler::Health => return routes::health::health_check().await,
            Handler::ListTasks => routes::task::list_tasks(state, query).await,
            Handler::CreateTask => routes::task::create_task(state, body).await,
            Handler::UpdateTaskStatus => routes::task::update_status(state, params, body).await,
            Handler::AssignTask => routes::task::assign_task(state, params, body).await,
        };
        result.unwrap_or_else(IntoResponse::into_response)
    }
}

/// Decode `key=value` pairs; later duplicates win
fn parse_query(query: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    let Some(query) = query else {
        return params;
    };
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(percent_decode(key), percent_decode(value));
    }
    params
}

fn percent_decode(text: &str) -> String {
    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| text.to_string())
}

/// Assemble the axum application around the dispatch fallback
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch_request)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

async fn dispatch_request(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let body = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Unable to read request body" })),
            )
                .into_response()
        }
    };

    state
        .routes()
        .dispatch(&state, &method, &path_and_query, &body)
        .await
}
