pub mod config;
pub mod markdown;
pub mod render;
pub mod types;

pub use config::*;
pub use markdown::*;
pub use render::*;
pub use types::*;
