pub mod combinations;
pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod plan;
pub mod synthesizer;

pub use crate::domain::model::{CombineResult, Hero, SynthesizedDescriptor};
pub use crate::domain::ports::{ArchiveBuilder, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
