//! Web UI route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;

use super::templates;
use crate::api::AppState;
use crate::catalog::{Car, CatalogRepository, Filter};
use crate::error::Result;

pub const GREETING: &str = "Hello, world. You're at the polls index.";

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/cars/:id", get(car_detail))
        .route("/cars/:id/", get(car_detail))
}

/// Home page
async fn index() -> &'static str {
    GREETING
}

/// Car detail page: the car and every filter linked to it
async fn car_detail(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let car_id: i32 = match id.parse() {
        Ok(car_id) => car_id,
        Err(_) => return render_error(&format!("Car '{}' not found", id)),
    };

    match detail_context(state.catalog.as_ref(), car_id).await {
        Ok(context) => render_template("cars/detail.html", &context),
        Err(e) if e.is_not_found() => {
            tracing::debug!("Car detail miss: {}", e);
            render_error(&format!("Car '{}' not found", car_id))
        }
        Err(e) => e.into_response(),
    }
}

/// Build the `{car, filters}` context for the detail template
async fn detail_context(catalog: &dyn CatalogRepository, car_id: i32) -> Result<Context> {
    let car = catalog.get_car_by_id(car_id).await?;
    let filters = catalog.get_filters_for_car(&car).await?;

    let mut context = Context::new();
    context.insert("page_title", &format!("{} - {}", Car::VERBOSE_NAME, car));
    context.insert("filters_heading", Filter::VERBOSE_NAME_PLURAL);
    context.insert("car_labels", &labels(Car::FIELD_LABELS));
    context.insert("filter_labels", &labels(Filter::FIELD_LABELS));
    context.insert("car", &CarInfo::from(&car));
    context.insert(
        "filters",
        &filters.iter().map(FilterInfo::from).collect::<Vec<_>>(),
    );
    Ok(context)
}

fn labels(fields: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    fields.iter().copied().collect()
}

/// Helper to render a template
fn render_template(name: &str, context: &Context) -> Response {
    match templates::render(name, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Template error: {}", e)).into_response()
        }
    }
}

/// Helper to render an error page
fn render_error(message: &str) -> Response {
    let mut context = Context::new();
    context.insert("message", message);

    match templates::render("error.html", &context) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, message.to_string()).into_response(),
    }
}

/// Car info for templates
#[derive(serde::Serialize)]
struct CarInfo {
    id: i32,
    display: String,
    make: String,
    model: String,
    year: String,
    engine: &'static str,
    engine_label: &'static str,
    cylinders: &'static str,
    oil_quantity: f64,
    oil_specific: &'static str,
}

impl From<&Car> for CarInfo {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            display: car.to_string(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.clone(),
            engine: car.engine.value(),
            engine_label: car.engine.label(),
            cylinders: car.cylinders.label(),
            oil_quantity: car.oil_quantity,
            oil_specific: car.oil_specific.label(),
        }
    }
}

/// Filter info for templates
#[derive(serde::Serialize)]
struct FilterInfo {
    id: i32,
    display: String,
    code: String,
    primary: &'static str,
    typology: &'static str,
    typology_label: &'static str,
    quantity: u32,
}

impl From<&Filter> for FilterInfo {
    fn from(filter: &Filter) -> Self {
        Self {
            id: filter.id,
            display: filter.to_string(),
            code: filter.code.clone(),
            primary: filter.primary.value(),
            typology: filter.typology.value(),
            typology_label: filter.typology.label(),
            quantity: filter.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Cylinders, NewCar, NewFilter, SeaOrmCatalog, Typology};
    use crate::db;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn setup() -> (Arc<AppState>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let conn = db::init_database(&temp_dir.path().join("warehouse.db"))
            .await
            .unwrap();
        let catalog = SeaOrmCatalog::new(Arc::new(conn));
        (Arc::new(AppState::new(Arc::new(catalog))), temp_dir)
    }

    async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, String) {
        let app = create_router().with_state(state.clone());
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Filter F100 linked to a Fiat Panda; returns the car id
    async fn seed_panda(state: &AppState) -> i32 {
        let filter = state
            .catalog
            .create_filter(NewFilter::new("F100", Typology::Oil).with_quantity(5))
            .await
            .unwrap();
        let car = state
            .catalog
            .create_car(NewCar::new("Fiat", "Panda", "2015", Cylinders::Cc1200))
            .await
            .unwrap();
        state.catalog.link(car.id, filter.id).await.unwrap();
        car.id
    }

    #[tokio::test]
    async fn test_index_greeting() {
        let (state, _dir) = setup().await;
        let (status, body) = get(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, GREETING);
    }

    #[tokio::test]
    async fn test_detail_context_holds_car_and_filters() {
        let (state, _dir) = setup().await;
        let car_id = seed_panda(&state).await;

        let context = detail_context(state.catalog.as_ref(), car_id).await.unwrap();

        let car = context.get("car").unwrap();
        assert_eq!(car["id"], car_id);
        assert_eq!(car["display"], "Fiat Panda (Benzina, 2015)");

        let filters = context.get("filters").unwrap().as_array().unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0]["code"], "F100");
        assert_eq!(filters[0]["typology_label"], "Olio");
        assert_eq!(filters[0]["quantity"], 5);
    }

    #[tokio::test]
    async fn test_car_detail_page() {
        let (state, _dir) = setup().await;
        let car_id = seed_panda(&state).await;

        for uri in [format!("/cars/{}/", car_id), format!("/cars/{}", car_id)] {
            let (status, body) = get(&state, &uri).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("Fiat Panda (Benzina, 2015)"));
            assert!(body.contains("F100"));
            assert!(body.contains("Olio"));
        }
    }

    #[tokio::test]
    async fn test_car_detail_without_filters() {
        let (state, _dir) = setup().await;
        let car = state
            .catalog
            .create_car(NewCar::new("Renault", "Clio", "2012", Cylinders::Cc1500))
            .await
            .unwrap();

        let (status, body) = get(&state, &format!("/cars/{}/", car.id)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Nessun filtro associato."));
    }

    #[tokio::test]
    async fn test_car_detail_missing_car_is_not_found() {
        let (state, _dir) = setup().await;

        let (status, body) = get(&state, "/cars/999/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Pagina non trovata"));
        assert!(body.contains("999"));

        let (status, _) = get(&state, "/cars/panda/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_car_detail_escapes_user_text() {
        let (state, _dir) = setup().await;
        let car = state
            .catalog
            .create_car(NewCar::new("<b>Fiat</b>", "Panda", "2015", Cylinders::Cc1200))
            .await
            .unwrap();

        let (status, body) = get(&state, &format!("/cars/{}/", car.id)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<b>Fiat</b>"));
        assert!(body.contains("&lt;b&gt;Fiat&lt;&#x2F;b&gt;"));
    }
}
