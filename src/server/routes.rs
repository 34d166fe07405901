//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::{GeoCodeResult, JsonMap};
use crate::server::state::AppState;
use crate::store::{RealWorldLocations, SharedStorage};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/points", get(points_handler).post(add_point_handler))
        .route("/api/points/has", get(has_point_handler))
        .route("/api/points/:index", delete(remove_point_handler))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Technical description
    pub error: String,
    /// Text suitable for showing to a user
    pub message: String,
    /// Stable machine-readable code
    pub code: String,
}

type ApiFailure = (StatusCode, Json<ApiError>);

fn failure(err: Error) -> ApiFailure {
    let (status, code) = match &err {
        Error::UrlBuild(_) => (StatusCode::INTERNAL_SERVER_ERROR, "URL_BUILD_ERROR"),
        Error::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
        Error::NoData => (StatusCode::BAD_GATEWAY, "NO_DATA"),
        Error::NonJsonFormat => (StatusCode::BAD_GATEWAY, "NON_JSON_FORMAT"),
        Error::InvalidFormat => (StatusCode::BAD_GATEWAY, "INVALID_FORMAT"),
        Error::IndexOutOfRange { .. } => (StatusCode::NOT_FOUND, "INDEX_OUT_OF_RANGE"),
        Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
        Error::Storage(_) | Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    (
        status,
        Json(ApiError {
            error: err.to_string(),
            message: err.user_message(),
            code: code.to_string(),
        }),
    )
}

/// Run a store mutation on the blocking pool, since saving writes to disk
async fn mutate<T, F>(state: Arc<AppState>, change: F) -> Result<T, ApiFailure>
where
    F: FnOnce(&mut RealWorldLocations<SharedStorage>) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || change(&mut *state.points.blocking_write()))
        .await
        .map_err(|e| failure(Error::Server(e.to_string())))?
        .map_err(failure)
}

fn to_values(points: &[GeoCodeResult]) -> Vec<Value> {
    points.iter().map(|p| Value::Object(p.to_map())).collect()
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    /// Number of saved points
    pub points: usize,
    /// Changes since the server started
    pub revision: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let points = state.points.read().await.len();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        points,
        revision: state.revision(),
    })
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: String,
}

/// List of points in the saved-map shape
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: Vec<Value>,
    pub count: usize,
}

/// Geocode an address
///
/// GET /api/geocode?address=...
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<PointsResponse>, ApiFailure> {
    let results = state.geocoder.geocode(&query.address).await.map_err(failure)?;

    Ok(Json(PointsResponse {
        count: results.len(),
        points: to_values(&results),
    }))
}

/// List saved points
///
/// GET /api/points
async fn points_handler(State(state): State<Arc<AppState>>) -> Json<PointsResponse> {
    let store = state.points.read().await;

    Json(PointsResponse {
        count: store.len(),
        points: to_values(store.points()),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddedResponse {
    pub index: usize,
    pub point: Value,
}

/// Save a point
///
/// POST /api/points, body in the saved-map shape
async fn add_point_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JsonMap>,
) -> Result<(StatusCode, Json<AddedResponse>), ApiFailure> {
    let point = GeoCodeResult::from_map(&body).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "Point needs locationString, latLng and displayLatLng".to_string(),
                message: "That point could not be read".to_string(),
                code: "INVALID_POINT".to_string(),
            }),
        )
    })?;

    let value = Value::Object(point.to_map());
    let index = mutate(state, move |store| {
        store.append(point)?;
        Ok(store.len() - 1)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddedResponse {
            index,
            point: value,
        }),
    ))
}

/// Remove a saved point by position
///
/// DELETE /api/points/:index
async fn remove_point_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<StatusCode, ApiFailure> {
    mutate(state, move |store| store.remove_at(index)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HasResponse {
    pub has: bool,
}

/// Exact membership test on the primary location
///
/// GET /api/points/has?lat=..&lng=..
async fn has_point_handler(
    State(state): State<Arc<AppState>>,
    Query(coords): Query<Coordinates>,
) -> Result<Json<HasResponse>, ApiFailure> {
    coords.validate().map_err(failure)?;
    let store = state.points.read().await;
    Ok(Json(HasResponse {
        has: store.has(&coords),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{KeyValueStore, MemoryStore};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    fn create_test_state_with(config: Config) -> Arc<AppState> {
        let storage: SharedStorage = Arc::new(MemoryStore::new());
        Arc::new(AppState::new(config, storage).unwrap())
    }

    fn create_test_state() -> Arc<AppState> {
        create_test_state_with(Config::default())
    }

    fn point_body(name: &str, lat: f64, lng: f64) -> Value {
        json!({
            "locationString": name,
            "latLng": { "lat": lat, "lng": lng },
            "displayLatLng": { "lat": lat, "lng": lng },
            "adminArea1Type": "City",
            "adminArea1": "Westminster"
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_point(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/points")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let state = create_test_state();
        let (status, body) = send(create_router(state), get_request("/api/status")).await;

        assert_eq!(status, StatusCode::OK);
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert!(status.running);
        assert_eq!(status.points, 0);
        assert_eq!(status.revision, 0);
    }

    #[tokio::test]
    async fn test_add_list_and_remove() {
        let state = create_test_state();

        let (status, body) = send(
            create_router(state.clone()),
            post_point(&point_body("Union Station", 39.7527, -105.0001)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let added: AddedResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(added.index, 0);
        assert_eq!(added.point["locationString"], "Union Station");

        let (status, body) = send(create_router(state.clone()), get_request("/api/points")).await;
        assert_eq!(status, StatusCode::OK);
        let listed: PointsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.count, 1);
        assert_eq!(listed.points[0]["adminArea1"], "Westminster");

        let (status, _) = send(
            create_router(state.clone()),
            Request::builder()
                .method("DELETE")
                .uri("/api/points/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert!(state.points.read().await.is_empty());
        assert_eq!(state.revision(), 2);
    }

    #[tokio::test]
    async fn test_add_invalid_point() {
        let state = create_test_state();
        let body = json!({ "locationString": "half", "latLng": { "lat": 1.0, "lng": 2.0 } });

        let (status, body) = send(create_router(state.clone()), post_point(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_POINT");
        assert_eq!(state.revision(), 0);
    }

    /// Storage that reads fine but refuses every write
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> crate::error::Result<Option<Value>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: Value) -> crate::error::Result<()> {
            Err(Error::Storage("read only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_point_save_failure_keeps_list_unchanged() {
        let storage: SharedStorage = Arc::new(ReadOnlyStore);
        let state = Arc::new(AppState::new(Config::default(), storage).unwrap());

        let (status, body) = send(
            create_router(state.clone()),
            post_point(&point_body("Union Station", 39.7527, -105.0001)),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "STORAGE_ERROR");

        let (_, body) = send(create_router(state.clone()), get_request("/api/points")).await;
        let listed: PointsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.count, 0);
        assert_eq!(state.revision(), 0);
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let state = create_test_state();
        let (status, body) = send(
            create_router(state),
            Request::builder()
                .method("DELETE")
                .uri("/api/points/3")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INDEX_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_has_point() {
        let state = create_test_state();
        send(
            create_router(state.clone()),
            post_point(&point_body("Union Station", 39.7527, -105.0001)),
        )
        .await;

        let (_, body) = send(
            create_router(state.clone()),
            get_request("/api/points/has?lat=39.7527&lng=-105.0001"),
        )
        .await;
        let has: HasResponse = serde_json::from_slice(&body).unwrap();
        assert!(has.has);

        let (_, body) = send(
            create_router(state.clone()),
            get_request("/api/points/has?lat=39.7528&lng=-105.0001"),
        )
        .await;
        let has: HasResponse = serde_json::from_slice(&body).unwrap();
        assert!(!has.has);

        let (status, _) = send(
            create_router(state),
            get_request("/api/points/has?lat=91&lng=0"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_geocode_endpoint() {
        let provider = Router::new().route(
            "/geocoding/v1/address",
            get(|| async {
                json!({
                    "info": { "statuscode": 0 },
                    "results": [{
                        "providedLocation": { "location": "Union Station Denver" },
                        "locations": [{
                            "adminArea5": "Denver",
                            "adminArea5Type": "City",
                            "latLng": { "lat": 39.7527, "lng": -105.0001 },
                            "displayLatLng": { "lat": 39.7526, "lng": -105.0002 }
                        }]
                    }]
                })
                .to_string()
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, provider).await.unwrap();
        });

        let mut config = Config::default();
        config.geocode.base_url = format!("http://{}", addr);
        let state = create_test_state_with(config);

        let (status, body) = send(
            create_router(state),
            get_request("/api/geocode?address=Union%20Station%20Denver"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found: PointsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(found.count, 1);
        assert_eq!(found.points[0]["locationString"], "Union Station Denver");
        assert_eq!(found.points[0]["adminArea1"], "Denver");
    }

    #[tokio::test]
    async fn test_geocode_bad_base_url() {
        let mut config = Config::default();
        config.geocode.base_url = "not a url".to_string();
        let state = create_test_state_with(config);

        let (status, body) = send(
            create_router(state),
            get_request("/api/geocode?address=anywhere"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "URL_BUILD_ERROR");
        assert_eq!(err.message, "Failed to build a GeoCoding URL");
    }
}
