//! HTTP request handlers for the GranaApp engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_compound_projection, calculate_overtime_pay, format_minutes_as_hours_and_minutes,
    summarize_breakdowns, summarize_portfolio,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, AuditWarning, CalculationResult, OvertimeEntry, PortfolioSummary, Position,
    Projection, WarningSeverity,
};

use super::request::{OvertimeRequest, OvertimeSummaryRequest, PortfolioRequest, ProjectionRequest};
use super::response::{
    ApiError, ApiErrorResponse, EntryBreakdown, OvertimeResponse, OvertimeSummaryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/overtime/calculate", post(overtime_calculate_handler))
        .route("/overtime/summary", post(overtime_summary_handler))
        .route("/projection", post(projection_handler))
        .route("/portfolio/summary", post(portfolio_summary_handler))
        .with_state(state)
}

/// Handler for POST /overtime/calculate.
async fn overtime_calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime calculation request");

    let request = match unwrap_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = perform_overtime(&request, state.config());
    finish(&state, correlation_id, "overtime", started, outcome)
}

/// Handler for POST /overtime/summary.
async fn overtime_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime summary request");

    let request = match unwrap_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = perform_overtime_summary(&request.entries);
    finish(&state, correlation_id, "overtime_summary", started, outcome)
}

/// Handler for POST /projection.
async fn projection_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing projection request");

    let request = match unwrap_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let outcome = perform_projection(&request, state.config());
    finish(&state, correlation_id, "projection", started, outcome)
}

/// Handler for POST /portfolio/summary.
async fn portfolio_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<PortfolioRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing portfolio summary request");

    let request = match unwrap_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let positions: Vec<Position> = request.positions.into_iter().map(Into::into).collect();
    let started = Instant::now();
    let outcome = perform_portfolio_summary(&positions);
    finish(&state, correlation_id, "portfolio_summary", started, outcome)
}

/// Extracts the request body or builds the 400 response for a rejected body.
fn unwrap_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = ApiError::from_json_rejection(&rejection);
            warn!(
                correlation_id = %correlation_id,
                code = %error.code,
                error = %error.message,
                "Rejected request body"
            );
            Err(json_response(StatusCode::BAD_REQUEST, error))
        }
    }
}

/// Wraps a calculator outcome in the result envelope or an error response.
fn finish<T: Serialize>(
    state: &AppState,
    correlation_id: Uuid,
    calculator: &'static str,
    started: Instant,
    outcome: EngineResult<(T, Vec<AuditWarning>)>,
) -> Response {
    match outcome {
        Ok((result, warnings)) => {
            let duration_us = started.elapsed().as_micros() as u64;
            for warning in &warnings {
                warn!(
                    correlation_id = %correlation_id,
                    code = %warning.code,
                    "{}",
                    warning.message
                );
            }
            info!(
                correlation_id = %correlation_id,
                calculator,
                warnings = warnings.len(),
                duration_us,
                "Calculation completed successfully"
            );

            let envelope = CalculationResult::new(
                state.config().app().version.clone(),
                result,
                AuditTrace {
                    warnings,
                    duration_us,
                },
            );
            json_response(StatusCode::OK, envelope)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                calculator,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Whether the pay calculator has everything it needs to produce a non-zero breakdown.
fn is_complete_shift(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    hourly_rate: Option<Decimal>,
    overtime_percentage: Option<Decimal>,
) -> bool {
    start.is_some()
        && end.is_some()
        && hourly_rate.is_some_and(|rate| !rate.is_zero())
        && overtime_percentage.is_some()
}

/// Computes the overtime breakdown for a single shift.
fn perform_overtime(
    request: &OvertimeRequest,
    config: &ConfigLoader,
) -> EngineResult<(OvertimeResponse, Vec<AuditWarning>)> {
    let mut warnings = Vec::new();
    let (start, end) = request.shift_endpoints()?;
    let percentage = request.percentage(config)?;

    if is_complete_shift(start, end, request.hourly_rate, percentage) {
        if start.zip(end).is_some_and(|(start, end)| end <= start) {
            warnings.push(AuditWarning::new(
                "END_ADVANCED_ONE_DAY",
                "end time was not after start time and was moved to the next day",
                WarningSeverity::Low,
            ));
        }
        if request.hourly_rate.is_some_and(|rate| rate < Decimal::ZERO) {
            warnings.push(AuditWarning::new(
                "NEGATIVE_HOURLY_RATE",
                "hourly rate is negative; values will be negative",
                WarningSeverity::High,
            ));
        }
    } else {
        warnings.push(AuditWarning::new(
            "INCOMPLETE_INPUT",
            "shift times, a non-zero hourly rate and an overtime percentage are required",
            WarningSeverity::Medium,
        ));
    }

    let breakdown = calculate_overtime_pay(start, end, request.hourly_rate, percentage)?;

    let response = OvertimeResponse {
        formatted_total: format_minutes_as_hours_and_minutes(breakdown.total_minutes),
        formatted_night: format_minutes_as_hours_and_minutes(breakdown.night_minutes),
        breakdown,
    };
    Ok((response, warnings))
}

/// Recalculates stored entries and sums them.
fn perform_overtime_summary(
    entries: &[OvertimeEntry],
) -> EngineResult<(OvertimeSummaryResponse, Vec<AuditWarning>)> {
    let mut warnings = Vec::new();
    let mut breakdowns = Vec::with_capacity(entries.len());

    for entry in entries {
        if !is_complete_shift(
            entry.start_time,
            entry.end_time,
            entry.hourly_rate,
            entry.overtime_percentage,
        ) {
            warnings.push(AuditWarning::new(
                "INCOMPLETE_INPUT",
                format!("entry '{}' is incomplete and counts as zero", entry.id),
                WarningSeverity::Medium,
            ));
        }

        breakdowns.push(EntryBreakdown {
            id: entry.id.clone(),
            breakdown: entry.breakdown()?,
        });
    }

    let summary = summarize_breakdowns(breakdowns.iter().map(|entry| &entry.breakdown))?;
    Ok((
        OvertimeSummaryResponse {
            entries: breakdowns,
            summary,
        },
        warnings,
    ))
}

/// Builds the month-by-month projection.
fn perform_projection(
    request: &ProjectionRequest,
    config: &ConfigLoader,
) -> EngineResult<(Projection, Vec<AuditWarning>)> {
    let mut warnings = Vec::new();
    let months = request.months()?;
    let monthly_rate = request.monthly_rate(config)?;

    if request.initial_amount < Decimal::ZERO || request.monthly_contribution < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "NEGATIVE_AMOUNT_CLAMPED",
            "negative initial amount or contribution was treated as zero",
            WarningSeverity::Medium,
        ));
    }

    let projection = build_compound_projection(
        request.initial_amount,
        request.monthly_contribution,
        months,
        monthly_rate,
    )?;

    if projection.is_loss() {
        warnings.push(AuditWarning::new(
            "NEGATIVE_RETURN",
            "the projected total is below the amount invested",
            WarningSeverity::Low,
        ));
    }

    Ok((projection, warnings))
}

/// Aggregates portfolio positions.
fn perform_portfolio_summary(
    positions: &[Position],
) -> EngineResult<(PortfolioSummary, Vec<AuditWarning>)> {
    let warnings = positions
        .iter()
        .filter(|position| position.current_price.is_none())
        .map(|position| {
            AuditWarning::new(
                "MISSING_QUOTE",
                format!(
                    "{} has no current price and is valued at average cost",
                    position.ticker
                ),
                WarningSeverity::Low,
            )
        })
        .collect();

    Ok((summarize_portfolio(positions)?, warnings))
}
