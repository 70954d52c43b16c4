//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use red_light_analytics::range::parse_date_param;
use red_light_chart::{ChartCallback, RangeRequest};
use red_light_server_models::{
    ApiCallbackInfo, ApiError, ApiHealth, ApiSummary, RangeQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/summary`
///
/// Describes the loaded dataset so the frontend can seed its date picker.
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    let ctx = &state.context;
    HttpResponse::Ok().json(ApiSummary::new(
        ctx.source_name(),
        ctx.record_count(),
        ctx.daily().total(),
        ctx.span(),
    ))
}

/// `GET /api/callbacks`
///
/// Lists the registered range-driven chart callbacks.
pub async fn callbacks() -> HttpResponse {
    let infos: Vec<ApiCallbackInfo> = ChartCallback::ALL
        .iter()
        .map(|cb| ApiCallbackInfo {
            name: cb.to_string(),
            description: cb.description().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(infos)
}

/// `GET /api/callbacks/{name}?start_date=...&end_date=...`
///
/// Invokes the named callback for the requested date range.
pub async fn invoke_callback(
    state: web::Data<AppState>,
    name: web::Path<String>,
    params: web::Query<RangeQueryParams>,
) -> HttpResponse {
    let Ok(callback) = name.parse::<ChartCallback>() else {
        return HttpResponse::NotFound().json(ApiError {
            error: format!("Unknown callback '{name}'"),
        });
    };

    let request = match parse_range(&params) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected {callback} request: {e}");
            return HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
            });
        }
    };

    HttpResponse::Ok().json(callback.invoke(&state.context, &request))
}

/// `GET /api/charts/density`
///
/// Returns the violation density heat map built at startup.
pub async fn density(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.density)
}

fn parse_range(
    params: &RangeQueryParams,
) -> Result<RangeRequest, red_light_analytics::AnalyticsError> {
    Ok(RangeRequest {
        start: parse_date_param(params.start_date.as_deref())?,
        end: parse_date_param(params.end_date.as_deref())?,
    })
}
