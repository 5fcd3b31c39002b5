//! HTTP surface of the relay
//!
//! `GET /data` fetches the configured company's annual income statements,
//! filters and sorts them according to the query string, and returns the
//! result as a JSON array. `GET /` is a liveness banner.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::client::FinancialModelingPrep;
use crate::error::{Error, ErrorKind};
use crate::pipeline::{self, FilterParams};
use crate::record::Record;
use crate::request::Request;
use crate::request::common::SortOrder;
use crate::rest;

/// Message returned for any upstream failure; the cause is only logged.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "failed to fetch upstream data";

/// Shared, read-only state handed to every request.
pub struct AppState<C: Request> {
    client: Arc<FinancialModelingPrep<C>>,
    symbol: Arc<str>,
}

impl<C: Request> AppState<C> {
    /// Relay `symbol` through `client`.
    pub fn new(client: FinancialModelingPrep<C>, symbol: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            symbol: Arc::from(symbol.into()),
        }
    }
}

impl<C: Request> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            symbol: Arc::clone(&self.symbol),
        }
    }
}

/// Raw query string of `GET /data`.
///
/// Values are kept as strings so that one malformed parameter is ignored
/// instead of rejecting the request. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq)]
pub struct DataQuery {
    /// Earliest year (integer)
    pub year_start: Option<String>,
    /// Latest year (integer)
    pub year_end: Option<String>,
    /// Minimum revenue (float)
    pub min_revenue: Option<String>,
    /// Maximum revenue (float)
    pub max_revenue: Option<String>,
    /// Minimum net income (float)
    pub min_net_income: Option<String>,
    /// Maximum net income (float)
    pub max_net_income: Option<String>,
    /// Field to sort by
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_order: Option<String>,
}

impl DataQuery {
    /// Collect the known parameters out of decoded query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "year_start" => &mut query.year_start,
                "year_end" => &mut query.year_end,
                "min_revenue" => &mut query.min_revenue,
                "max_revenue" => &mut query.max_revenue,
                "min_net_income" => &mut query.min_net_income,
                "max_net_income" => &mut query.max_net_income,
                "sort_by" => &mut query.sort_by,
                "sort_order" => &mut query.sort_order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

impl From<DataQuery> for FilterParams {
    fn from(query: DataQuery) -> Self {
        FilterParams {
            year_start: parse_param("year_start", query.year_start),
            year_end: parse_param("year_end", query.year_end),
            min_revenue: parse_param("min_revenue", query.min_revenue),
            max_revenue: parse_param("max_revenue", query.max_revenue),
            min_net_income: parse_param("min_net_income", query.min_net_income),
            max_net_income: parse_param("max_net_income", query.max_net_income),
            sort_by: query.sort_by.filter(|field| !field.is_empty()),
            sort_order: query.sort_order.map(SortOrder::from).unwrap_or_default(),
        }
    }
}

fn parse_param<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(param = name, value = %raw, "ignoring unparseable query parameter");
            None
        }
    }
}

/// Error wrapper that renders as `{"error": ...}` with status 500.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self.0.kind() {
            ErrorKind::Processing => {
                tracing::error!(error = %self.0, "failed to process upstream records");
                format!("failed to process upstream data: {}", self.0)
            }
            ErrorKind::Upstream | ErrorKind::Config => {
                tracing::warn!(error = %self.0, "upstream fetch failed");
                UPSTREAM_FAILURE_MESSAGE.to_string()
            }
        };

        let body = serde_json::json!({ "error": message });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn index() -> &'static str {
    "fmp-relay is running"
}

async fn get_data<C: Request + 'static>(
    State(state): State<AppState<C>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let params = FilterParams::from(DataQuery::from_pairs(pairs));

    let records = rest::income_statement(&*state.client, &*state.symbol)
        .records()
        .get()
        .await?;
    let fetched = records.len();

    let data = pipeline::process(records, &params)?;
    tracing::info!(
        symbol = %state.symbol,
        fetched,
        returned = data.len(),
        sort_by = params.sort_by.as_deref().unwrap_or("-"),
        sort_order = %params.sort_order,
        "served income statements"
    );
    Ok(Json(data))
}

/// Build the relay router.
pub fn router<C: Request + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/data", get(get_data::<C>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
