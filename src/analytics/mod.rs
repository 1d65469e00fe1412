//! Analytics - views derived from logged sets and daily stats
//!
//! Features:
//! - Today's sets, last session and progress toward the target set count
//! - Body-weight trend series for the chart
//!
//! Everything here is pure: "today" is passed in, nothing is persisted.

pub mod progress;
pub mod trend;

pub use progress::{ExerciseView, SessionAggregator};
pub use trend::{ChartPoint, ChartSeries, RECENT_DAYS, TrendProjector};
