pub use builder::EngineBuilder;
pub use engine::Engine;
pub use quantification::Quantification;
use worker::Worker;

mod builder;
mod engine;
mod quantification;
mod worker;
