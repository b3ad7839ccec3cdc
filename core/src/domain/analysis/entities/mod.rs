pub mod analysis_record;
pub mod partial_analysis;
pub mod quick_analysis;

pub use analysis_record::*;
pub use partial_analysis::*;
pub use quick_analysis::*;
