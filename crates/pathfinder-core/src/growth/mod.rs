//! Growth / what-if projection: a scenario's baseline growth compounded
//! with a boost scaled by investment, execution and competitive sliders.

pub mod projector;
pub mod scenarios;

pub use projector::{project_growth, GrowthInput, GrowthOutput, GrowthRow};
pub use scenarios::{GrowthScenario, ScenarioCatalog, SliderSettings};
