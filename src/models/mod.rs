//! Data models shared by the calculators and the HTTP API.

mod amount;
mod calculation_result;
mod pay_breakdown;
mod portfolio;
mod projection;

pub use amount::{deserialize_amount, deserialize_optional_amount, parse_locale_decimal};
pub use calculation_result::{AuditTrace, AuditWarning, CalculationResult, WarningSeverity};
pub use pay_breakdown::{MINUTES_PER_HOUR, OvertimeEntry, OvertimeSummary, PayBreakdown};
pub use portfolio::{PortfolioSummary, Position};
pub use projection::{Projection, ProjectionRow};
