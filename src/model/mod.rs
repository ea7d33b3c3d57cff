pub mod config;
pub mod flow;
pub mod step;

pub use config::*;
pub use flow::*;
pub use step::*;
