use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::rejection::JsonRejection,
    extract::{OriginalUri, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Json, Router,
};
use hotel_core::{HotelApp, ServiceHandle, ServiceMethodKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    params::{FromRestParams, RestParams},
    HotelAxumError, HotelAxumState,
};

type QueryMap = Query<HashMap<String, String>>;

fn lookup<R, P>(
    app: &HotelApp<R, P>,
    name: &str,
    method: ServiceMethodKind,
) -> Result<ServiceHandle<R, P>, HotelAxumError>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    app.service(name)
        .map_err(|e| HotelAxumError::new(method, "Record", e))
}

fn rest_params<P: FromRestParams>(
    headers: &HeaderMap,
    query: HashMap<String, String>,
    method: &str,
    uri: &axum::http::Uri,
) -> P {
    P::from_rest_params(RestParams::from_parts("rest", headers, query, method, uri))
}

fn parse_body(method: ServiceMethodKind, label: &str, body: Result<Json<Value>, JsonRejection>) -> Result<Value, HotelAxumError> {
    body.map(|Json(v)| v).map_err(|rejection| {
        HotelAxumError::bad_request(
            method,
            label,
            format!("Failed to parse the request body as JSON: {}", rejection.body_text()),
        )
    })
}

fn id_of(value: &Value) -> Option<String> {
    value
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn not_allowed() -> Response {
    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

/// GET `?id=` → one record or `null`; GET → every record.
async fn get_handler<R, P>(
    svc: ServiceHandle<R, P>,
    query: HashMap<String, String>,
    params: P,
) -> Result<Response, HotelAxumError>
where
    R: Serialize + Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    let caps = svc.capabilities();
    let id = query.get("id").map(|s| s.trim()).filter(|s| !s.is_empty());

    match id {
        Some(id) => {
            if !caps.allows(ServiceMethodKind::Get) {
                return Ok(not_allowed());
            }
            let res = svc
                .get(id, params)
                .await
                .map_err(|e| HotelAxumError::new(ServiceMethodKind::Get, svc.label(), e))?;
            Ok(Json(res).into_response())
        }
        None => {
            if !caps.allows(ServiceMethodKind::Find) {
                return Ok(not_allowed());
            }
            let res = svc
                .find(params)
                .await
                .map_err(|e| HotelAxumError::new(ServiceMethodKind::Find, svc.label(), e))?;
            Ok(Json(res).into_response())
        }
    }
}

async fn post_handler<R, P>(
    svc: ServiceHandle<R, P>,
    body: Result<Json<Value>, JsonRejection>,
    params: P,
) -> Result<Response, HotelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    let method = ServiceMethodKind::Create;
    let fail = |e: anyhow::Error| HotelAxumError::new(method, svc.label(), e);

    let body = parse_body(method, svc.label(), body)?;
    let data: R = serde_json::from_value(body).map_err(|e| fail(e.into()))?;

    let res = svc.create(data, params).await.map_err(fail)?;
    Ok((StatusCode::CREATED, Json(res)).into_response())
}

/// PUT `{ id, ...fields }` replaces the record.
async fn put_handler<R, P>(
    svc: ServiceHandle<R, P>,
    body: Result<Json<Value>, JsonRejection>,
    params: P,
) -> Result<Response, HotelAxumError>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    let method = ServiceMethodKind::Update;
    let fail = |e: anyhow::Error| HotelAxumError::new(method, svc.label(), e);

    let mut body = parse_body(method, svc.label(), body)?;
    let Some(id) = id_of(&body) else {
        return Err(HotelAxumError::bad_request(method, svc.label(), "ID is required for updating"));
    };
    if let Some(obj) = body.as_object_mut() {
        obj.remove("id");
    }

    let data: R = serde_json::from_value(body).map_err(|e| fail(e.into()))?;

    let res = svc.update(Some(&id), data, params).await.map_err(fail)?;
    Ok(Json(res).into_response())
}

/// DELETE `{ id }`; `?id=` is accepted when the body carries none.
async fn delete_handler<R, P>(
    svc: ServiceHandle<R, P>,
    body: Bytes,
    query: HashMap<String, String>,
    params: P,
) -> Result<Response, HotelAxumError>
where
    R: Send + Sync + 'static,
    P: Send + Sync + Clone + 'static,
{
    let method = ServiceMethodKind::Remove;

    let from_body = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let value: Value = serde_json::from_slice(&body).map_err(|e| {
            HotelAxumError::bad_request(
                method,
                svc.label(),
                format!("Failed to parse the request body as JSON: {e}"),
            )
        })?;
        id_of(&value)
    };

    let id = from_body.or_else(|| {
        query
            .get("id")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    });

    let Some(id) = id else {
        return Err(HotelAxumError::bad_request(method, svc.label(), "ID is required for deletion"));
    };

    svc.remove(Some(&id), params)
        .await
        .map_err(|e| HotelAxumError::new(method, svc.label(), e))?;

    Ok(Json(json!({
        "message": format!("{} deleted successfully", svc.label()),
        "id": id,
    }))
    .into_response())
}

/// The `/api/<resource>` route for one service. Only the HTTP methods its
/// capabilities allow are mounted.
pub fn service_router<R, P>(service_name: Arc<String>, app: HotelApp<R, P>) -> Router<()>
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let caps = app
        .service(&service_name)
        .map(|svc| svc.capabilities())
        .unwrap_or_else(|_| hotel_core::ServiceCapabilities::standard_crud());

    let state = HotelAxumState::new(app);
    let mut route: MethodRouter<HotelAxumState<R, P>> = MethodRouter::new();

    if caps.allows(ServiceMethodKind::Find) || caps.allows(ServiceMethodKind::Get) {
        let service_name = Arc::clone(&service_name);
        route = route.get(
            move |State(state): State<HotelAxumState<R, P>>,
                  headers: HeaderMap,
                  Query(query): QueryMap,
                  OriginalUri(uri): OriginalUri| async move {
                let svc = lookup(&state.app, &service_name, ServiceMethodKind::Find)?;
                let params = rest_params::<P>(&headers, query.clone(), "GET", &uri);
                get_handler(svc, query, params).await
            },
        );
    }

    if caps.allows(ServiceMethodKind::Create) {
        let service_name = Arc::clone(&service_name);
        route = route.post(
            move |State(state): State<HotelAxumState<R, P>>,
                  headers: HeaderMap,
                  Query(query): QueryMap,
                  OriginalUri(uri): OriginalUri,
                  body: Result<Json<Value>, JsonRejection>| async move {
                let svc = lookup(&state.app, &service_name, ServiceMethodKind::Create)?;
                let params = rest_params::<P>(&headers, query, "POST", &uri);
                post_handler(svc, body, params).await
            },
        );
    }

    if caps.allows(ServiceMethodKind::Update) {
        let service_name = Arc::clone(&service_name);
        route = route.put(
            move |State(state): State<HotelAxumState<R, P>>,
                  headers: HeaderMap,
                  Query(query): QueryMap,
                  OriginalUri(uri): OriginalUri,
                  body: Result<Json<Value>, JsonRejection>| async move {
                let svc = lookup(&state.app, &service_name, ServiceMethodKind::Update)?;
                let params = rest_params::<P>(&headers, query, "PUT", &uri);
                put_handler(svc, body, params).await
            },
        );
    }

    if caps.allows(ServiceMethodKind::Remove) {
        let service_name = Arc::clone(&service_name);
        route = route.delete(
            move |State(state): State<HotelAxumState<R, P>>,
                  headers: HeaderMap,
                  Query(query): QueryMap,
                  OriginalUri(uri): OriginalUri,
                  body: Bytes| async move {
                let svc = lookup(&state.app, &service_name, ServiceMethodKind::Remove)?;
                let params = rest_params::<P>(&headers, query.clone(), "DELETE", &uri);
                delete_handler(svc, body, query, params).await
            },
        );
    }

    Router::new().route("/", route).with_state(state)
}
