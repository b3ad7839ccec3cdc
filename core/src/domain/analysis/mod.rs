pub mod entities;
pub mod fallbacks;
pub mod headings;
pub mod parser;
pub mod policies;
pub mod ports;
pub mod prompts;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use parser::{parse_analysis_response, quick::parse_quick_response};
pub use ports::*;
pub use value_objects::*;
