pub mod detection;
pub mod health;
pub mod parse;
pub mod recipes;
pub mod request;
pub mod runtime;
