#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the red light violations dashboard.
//!
//! Loads the violations CSV once at startup, aggregates it into an
//! immutable [`DashboardContext`], and serves chart specifications for
//! the frontend. Range-driven charts are exposed as named callbacks under
//! `/api/callbacks/{name}`; the density heat map is built once and served
//! from `/api/charts/density`. A pre-built frontend, if present, is
//! served from `/`.

pub mod config;
mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use red_light_analytics::context::DashboardContext;
use red_light_chart::build_density_map;
use red_light_chart_models::ChartSpec;
use red_light_source::{SourceError, load_records};
use thiserror::Error;

use crate::config::ServerConfig;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The dataset or its definition could not be loaded.
    #[error("Failed to load dataset: {0}")]
    Source(#[from] SourceError),

    /// `RED_LIGHT_SOURCE` names no bundled source.
    #[error("Unknown source '{id}'")]
    UnknownSource {
        /// The configured source id.
        id: String,
    },

    /// The HTTP server failed to bind or run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state. Built once, never mutated.
pub struct AppState {
    /// Aggregated views of the loaded dataset.
    pub context: DashboardContext,
    /// Density heat map over every loaded record.
    pub density: ChartSpec,
}

impl AppState {
    /// Builds the state for `context`, rendering the static charts.
    #[must_use]
    pub fn new(context: DashboardContext) -> Self {
        let density = build_density_map(context.points(), context.map_center());
        Self { context, density }
    }
}

/// Loads and aggregates the dataset named by `config`.
///
/// # Errors
///
/// Returns [`ServerError`] if the source definition cannot be resolved or
/// the CSV cannot be read.
pub fn load_context(config: &ServerConfig) -> Result<DashboardContext, ServerError> {
    let definition = config.source_definition()?;
    let path = config.data_path(&definition);
    let report = load_records(&path, &definition)?;

    Ok(DashboardContext::from_records(
        definition.name,
        definition.map_center,
        &report.records,
    ))
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/summary", web::get().to(handlers::summary))
            .route("/callbacks", web::get().to(handlers::callbacks))
            .route("/callbacks/{name}", web::get().to(handlers::invoke_callback))
            .route("/charts/density", web::get().to(handlers::density)),
    );
}

/// Starts the dashboard server.
///
/// Reads [`ServerConfig`] from the environment, loads the dataset, and
/// serves until shut down. A dataset that cannot be loaded is fatal: the
/// error is returned before anything is bound.
///
/// # Errors
///
/// Returns [`ServerError`] if the dataset fails to load or the HTTP server
/// fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    log::info!("Loading violations dataset...");
    let context = load_context(&config)?;

    let state = web::Data::new(AppState::new(context));

    let static_dir = config.static_dir.is_dir().then(|| config.static_dir.clone());
    match &static_dir {
        Some(dir) => log::info!("Serving frontend from {}", dir.display()),
        None => log::info!(
            "No frontend at {}, serving API only",
            config.static_dir.display()
        ),
    }

    let ServerConfig {
        bind_addr, port, ..
    } = config;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let mut app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }

        app
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::NaiveDate;
    use red_light_violation_models::{MapCenter, ViolationRecord};

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> web::Data<AppState> {
        let records = vec![
            ViolationRecord::new(ymd(2020, 1, 1), 41.91, -87.65, "HALSTED AND NORTH", 3),
            ViolationRecord::new(ymd(2020, 1, 1), 41.81, -87.74, "CICERO AND 47TH", 5),
            ViolationRecord::new(ymd(2020, 1, 2), 41.91, -87.65, "HALSTED AND NORTH", 4),
            ViolationRecord::new(ymd(2020, 1, 3), 41.78, -87.68, "WESTERN AND 63RD", 1),
        ];
        let center = MapCenter {
            lat: 41.8781,
            lon: -87.6298,
            zoom: 8.0,
        };
        web::Data::new(AppState::new(DashboardContext::from_records(
            "Test", center, &records,
        )))
    }

    macro_rules! app {
        () => {
            test::init_service(App::new().app_data(state()).configure(configure_api)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn summary_describes_dataset() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/summary").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["recordCount"], 4);
        assert_eq!(body["totalViolations"], 13);
        assert_eq!(body["firstDate"], "2020-01-01");
        assert_eq!(body["lastDate"], "2020-01-03");
    }

    #[actix_web::test]
    async fn lists_registered_callbacks() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/callbacks").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["violations-chart", "top-intersections-chart"]);
    }

    #[actix_web::test]
    async fn violations_chart_without_bounds_covers_dataset() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/callbacks/violations-chart")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["type"], "scatter");
        assert_eq!(
            body["data"][0]["x"],
            serde_json::json!(["2020-01-01", "2020-01-02", "2020-01-03"])
        );
        assert_eq!(body["data"][0]["y"], serde_json::json!([8, 4, 1]));
        assert_eq!(body["layout"]["showlegend"], false);
    }

    #[actix_web::test]
    async fn top_intersections_chart_respects_range() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/callbacks/top-intersections-chart?start_date=2020-01-02&end_date=2020-01-03T00:00:00")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["type"], "bar");
        assert_eq!(
            body["data"][0]["x"],
            serde_json::json!(["HALSTED AND NORTH", "WESTERN AND 63RD"])
        );
        assert_eq!(body["data"][0]["y"], serde_json::json!([4, 1]));
    }

    #[actix_web::test]
    async fn inverted_range_renders_empty_chart() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/callbacks/violations-chart?start_date=2020-01-03&end_date=2020-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["x"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn malformed_date_is_bad_request() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/callbacks/violations-chart?start_date=yesterday")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("yesterday"));
    }

    #[actix_web::test]
    async fn unknown_callback_is_not_found() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/callbacks/pie-chart")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn density_map_covers_every_record() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/charts/density")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["type"], "densitymapbox");
        assert_eq!(body["data"][0]["z"], serde_json::json!([3, 5, 4, 1]));
        assert_eq!(body["layout"]["mapbox"]["zoom"], 8.0);
    }

    #[::core::prelude::v1::test]
    fn missing_dataset_is_fatal() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "RED_LIGHT_DATA").then(|| "does/not/exist.csv".to_string())
        });
        let err = load_context(&config).unwrap_err();
        assert!(matches!(err, ServerError::Source(SourceError::Io(_))));
    }
}
