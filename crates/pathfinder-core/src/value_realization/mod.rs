//! Value-realization timeline: cumulative cost curves and breakeven periods
//! for two offerings over the same horizon.

pub mod timeline;

pub use timeline::{build_timeline, Breakeven, PeriodPoint, TimelineInput, TimelineOutput};
