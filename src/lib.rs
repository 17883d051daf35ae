pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use adapters::ZipArchiveBuilder;
pub use crate::core::{
    combinations::generate,
    engine::{CombineEngine, PipelineStatus},
    parser::parse,
    pipeline::CombinePipeline,
    synthesizer::combine,
};
pub use domain::model::{Hero, SynthesizedDescriptor};
pub use utils::error::{CombineError, Result};
