use crate::api::AppState;
use crate::domain::Domain;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Which cache a route serves; `None` for the resolver and system routes.
///
/// `/yelp` maps to food through the domain's aliases.
#[must_use]
pub fn route_domain(path: &str) -> Option<Domain> {
    path.strip_prefix('/')?.parse().ok()
}

const fn status_class(status: u16) -> &'static str {
    match status {
        500.. => "5xx",
        400..=499 => "4xx",
        _ => "2xx",
    }
}

/// Per-request span and latency histogram.
///
/// Lookup outcomes are counted by the cache policies as `cache_lookups_total`;
/// this layer only adds how long the whole request took, per route and domain.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = req.uri().path().to_string();
    let domain = route_domain(&route).map_or("none", Domain::as_str);

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        route = %route,
        domain,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status().as_u16();

        // Unknown paths share one label so scanners cannot grow the series set.
        let route_label = if response.status() == axum::http::StatusCode::NOT_FOUND {
            "unmatched".to_string()
        } else {
            route
        };

        metrics::histogram!(
            "http_request_duration_seconds",
            "route" => route_label,
            "domain" => domain,
            "status" => status_class(status)
        )
        .record(start.elapsed().as_secs_f64());

        info!(
            status_code = status,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_their_cache() {
        assert_eq!(route_domain("/weather"), Some(Domain::Weather));
        assert_eq!(route_domain("/yelp"), Some(Domain::Food));
        assert_eq!(route_domain("/trails"), Some(Domain::Trails));
        assert_eq!(route_domain("/location"), None);
        assert_eq!(route_domain("/health"), None);
        assert_eq!(route_domain(""), None);
    }

    #[test]
    fn statuses_collapse_to_classes() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(400), "4xx");
        assert_eq!(status_class(500), "5xx");
    }
}
