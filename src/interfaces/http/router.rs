//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AppointmentQueries, BookingService, OrderSlipService};
use crate::domain::BookingStore;
use crate::interfaces::http::common::ApiResponse;

use super::modules::request_id::request_id_middleware;
use super::modules::{appointments, audit, bookings, health, metrics, order_slips};

/// Unified router state. Each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub bookings: Arc<BookingService>,
    pub appointments: Arc<AppointmentQueries>,
    pub order_slips: Arc<OrderSlipService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookingStore>, validity_days: u32) -> Self {
        Self {
            bookings: Arc::new(BookingService::new(store.clone(), validity_days)),
            appointments: Arc::new(AppointmentQueries::new(store.clone())),
            order_slips: Arc::new(OrderSlipService::new(store.clone())),
            started_at: Arc::new(Instant::now()),
            store,
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            store: Arc::clone(&s.store),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for appointments::AppointmentState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            queries: Arc::clone(&s.appointments),
        }
    }
}

impl FromRef<AppState> for order_slips::OrderSlipState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            service: Arc::clone(&s.order_slips),
        }
    }
}

impl FromRef<AppState> for bookings::BookingState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            service: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<AppState> for audit::AuditState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            service: Arc::clone(&s.bookings),
        }
    }
}

/// Caller claim headers, documented as API key schemes
struct ClaimsAddon;

impl Modify for ClaimsAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_name",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-User-Name",
                    "Acting user, stamped on bookings and audit entries",
                ))),
            );
            components.add_security_scheme(
                "company",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-Company",
                    "Company every read and write is scoped to",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        appointments::list_available_appointments,
        order_slips::register_order_slip,
        order_slips::appoint_supplier,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::edit_booking,
        bookings::update_expiry,
        bookings::record_print,
        audit::list_audit_trail,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            appointments::AvailableAppointmentDto,
            order_slips::RegisterOrderSlipRequest,
            order_slips::AppointSupplierRequest,
            order_slips::OrderSlipDto,
            order_slips::AppointmentDto,
            bookings::BookingLineRequest,
            bookings::CreateBookingRequest,
            bookings::EditBookingRequest,
            bookings::UpdateExpiryRequest,
            bookings::BookingDto,
            bookings::ReservationDto,
            audit::AuditEntryDto,
        )
    ),
    modifiers(&ClaimsAddon),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Appointments", description = "Supplier appointments with quantity left to book"),
        (name = "Order Slips", description = "Order slip registration and supplier appointment"),
        (name = "Bookings", description = "Authority-to-load bookings: create, edit, expiry, print"),
        (name = "Audit", description = "Per-company audit trail"),
    ),
    info(
        title = "ATL Ledger API",
        version = "1.0.0",
        description = "Authority-to-load booking and order-slip quantity reservation"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(state: AppState, prometheus: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route(
            "/appointments",
            get(appointments::list_available_appointments),
        )
        .route("/order-slips", post(order_slips::register_order_slip))
        .route(
            "/order-slips/{order_slip_id}/appointments",
            post(order_slips::appoint_supplier),
        )
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/bookings/{booking_id}",
            get(bookings::get_booking).put(bookings::edit_booking),
        )
        .route("/bookings/{booking_id}/expiry", put(bookings::update_expiry))
        .route("/bookings/{booking_id}/print", post(bookings::record_print))
        .route("/audit-trail", get(audit::list_audit_trail));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::InMemoryBookingStore;
    use crate::interfaces::http::common::{COMPANY_HEADER, USER_HEADER};

    fn app(store: &InMemoryBookingStore) -> Router {
        create_api_router(AppState::new(Arc::new(store.clone()), 4), None)
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        company: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_HEADER, "jdoe")
            .header(COMPANY_HEADER, company);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// Register `OS-1` at load point 5 and appoint supplier 7 for 100.
    async fn seed(app: &Router) -> (i64, i64) {
        let (status, slip) = call(
            app,
            "POST",
            "/api/v1/order-slips",
            "Filpride",
            Some(json!({
                "order_slip_no": "OS-1",
                "customer_id": 1,
                "pick_up_point_id": 5,
                "depot": "Batangas",
                "delivered_price": "61.25",
                "freight": "1.50"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let slip_id = slip["data"]["id"].as_i64().unwrap();

        let (status, appointment) = call(
            app,
            "POST",
            &format!("/api/v1/order-slips/{}/appointments", slip_id),
            "Filpride",
            Some(json!({"supplier_id": 7, "purchase_order_no": "PO-1", "quantity": "100"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        (slip_id, appointment["data"]["id"].as_i64().unwrap())
    }

    fn booking_body(slip_id: i64, appointed_id: i64, quantity: &str) -> Value {
        json!({
            "order_slip_id": slip_id,
            "supplier_id": 7,
            "load_date": "2024-05-10",
            "upi_reference_no": "UPI-1",
            "lines": [{"appointed_id": appointed_id, "order_slip_id": slip_id, "quantity": quantity}]
        })
    }

    fn quantity(v: &Value) -> Decimal {
        v.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let store = InMemoryBookingStore::new();
        let (status, body) = call(&app(&store), "GET", "/health", "Filpride", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn requests_without_claims_are_unauthorized() {
        let store = InMemoryBookingStore::new();
        let req = Request::builder()
            .uri("/api/v1/bookings")
            .body(Body::empty())
            .unwrap();
        let resp = app(&store).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn booking_lifecycle_over_http() {
        let store = InMemoryBookingStore::new();
        let app = app(&store);
        let (slip_id, appointed_id) = seed(&app).await;

        let (_, listed) = call(
            &app,
            "GET",
            "/api/v1/appointments?supplier_id=7&load_point_id=5",
            "Filpride",
            None,
        )
        .await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0]["order_slip_no"], "OS-1");
        assert_eq!(quantity(&listed["data"][0]["remaining_quantity"]), Decimal::from(100));

        let (status, created) = call(
            &app,
            "POST",
            "/api/v1/bookings",
            "Filpride",
            Some(booking_body(slip_id, appointed_id, "60")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let booking = &created["data"];
        assert_eq!(booking["booking_no"], "ATL0000000001");
        assert_eq!(booking["valid_until"], "2024-05-14");
        assert_eq!(booking["depot"], "Batangas");
        let booking_id = booking["id"].as_i64().unwrap();

        let (_, listed) = call(
            &app,
            "GET",
            "/api/v1/appointments?supplier_id=7&load_point_id=5",
            "Filpride",
            None,
        )
        .await;
        assert_eq!(quantity(&listed["data"][0]["remaining_quantity"]), Decimal::from(40));

        let (_, for_edit) = call(
            &app,
            "GET",
            &format!(
                "/api/v1/appointments?supplier_id=7&load_point_id=5&booking_id={}",
                booking_id
            ),
            "Filpride",
            None,
        )
        .await;
        assert_eq!(quantity(&for_edit["data"][0]["remaining_quantity"]), Decimal::from(100));

        let mut edit = booking_body(slip_id, appointed_id, "100");
        edit.as_object_mut().unwrap().remove("order_slip_id");
        let (status, edited) = call(
            &app,
            "PUT",
            &format!("/api/v1/bookings/{}", booking_id),
            "Filpride",
            Some(edit),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quantity(&edited["data"]["total_quantity"]), Decimal::from(100));

        let (_, listed) = call(
            &app,
            "GET",
            "/api/v1/appointments?supplier_id=7&load_point_id=5",
            "Filpride",
            None,
        )
        .await;
        assert!(listed["data"].as_array().unwrap().is_empty());

        let (status, moved) = call(
            &app,
            "PUT",
            &format!("/api/v1/bookings/{}/expiry", booking_id),
            "Filpride",
            Some(json!({"valid_until": "2024-05-20"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(moved["data"]["valid_until"], "2024-05-20");

        let (status, printed) = call(
            &app,
            "POST",
            &format!("/api/v1/bookings/{}/print", booking_id),
            "Filpride",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(printed["data"]["is_printed"], true);

        let (_, trail) = call(&app, "GET", "/api/v1/audit-trail", "Filpride", None).await;
        let categories: Vec<_> = trail["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["category"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            categories,
            ["Create", "Update", "Create", "Edit", "Update", "Print"]
        );

        let (_, all) = call(&app, "GET", "/api/v1/bookings", "Filpride", None).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn other_company_cannot_see_or_edit_a_booking() {
        let store = InMemoryBookingStore::new();
        let app = app(&store);
        let (slip_id, appointed_id) = seed(&app).await;
        let (_, created) = call(
            &app,
            "POST",
            "/api/v1/bookings",
            "Filpride",
            Some(booking_body(slip_id, appointed_id, "10")),
        )
        .await;
        let booking_id = created["data"]["id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/v1/bookings/{}", booking_id),
            "Mobility",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/v1/bookings/{}/expiry", booking_id),
            "Mobility",
            Some(json!({"valid_until": "2024-06-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_line_selection_fails_validation() {
        let store = InMemoryBookingStore::new();
        let app = app(&store);
        let (slip_id, _) = seed(&app).await;

        let mut body = booking_body(slip_id, 1, "1");
        body["lines"] = json!([]);
        let (status, body) = call(&app, "POST", "/api/v1/bookings", "Filpride", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("select at least one appointment"));
    }

    #[tokio::test]
    async fn served_booking_edit_is_a_bad_request() {
        let store = InMemoryBookingStore::new();
        let app = app(&store);
        let (slip_id, appointed_id) = seed(&app).await;
        let (_, created) = call(
            &app,
            "POST",
            "/api/v1/bookings",
            "Filpride",
            Some(booking_body(slip_id, appointed_id, "10")),
        )
        .await;
        let booking_id = created["data"]["id"].as_i64().unwrap();
        let line_id = created["data"]["reservations"][0]["id"].as_i64().unwrap();
        store
            .serve_reservation(line_id as i32, Decimal::from(1))
            .await;

        let (status, body) = call(
            &app,
            "PUT",
            &format!("/api/v1/bookings/{}", booking_id),
            "Filpride",
            Some(booking_body(slip_id, appointed_id, "5")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("has already been served"));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let store = InMemoryBookingStore::new();
        let (status, doc) = call(
            &app(&store),
            "GET",
            "/api-docs/openapi.json",
            "Filpride",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/v1/bookings/{booking_id}/expiry"].is_object());
    }
}
