pub mod analysis_state;
pub mod food_analysis_report;

pub use analysis_state::*;
pub use food_analysis_report::*;
