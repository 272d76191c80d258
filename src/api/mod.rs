//! HTTP API for the GranaApp engine.
//!
//! JSON endpoints over the overtime, projection and portfolio calculators.
//! Every successful response is a [`CalculationResult`](crate::models::CalculationResult)
//! envelope; failures are an [`ApiError`] body with a matching status code.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    OvertimeRequest, OvertimeSummaryRequest, PortfolioRequest, PositionRequest, ProjectionRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, EntryBreakdown, OvertimeResponse, OvertimeSummaryResponse,
};
pub use state::AppState;
