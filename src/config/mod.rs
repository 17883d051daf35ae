pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_ARCHIVE_NAME: &str = "combinations.zip";
pub const DEFAULT_MAX_GROUP_SIZE: usize = 2;
pub const DEFAULT_CONCURRENT_READS: usize = 8;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hero-combiner")]
#[command(about = "Combine hero descriptor files into every possible team and zip the results")]
pub struct CliConfig {
    /// Hero descriptor files to combine
    pub files: Vec<String>,

    /// Largest number of heroes in one combination
    #[arg(short = 'k', long, default_value_t = DEFAULT_MAX_GROUP_SIZE)]
    pub max_group_size: usize,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_ARCHIVE_NAME)]
    pub archive_name: String,

    /// How many input files are read at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENT_READS)]
    pub concurrent_reads: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Show the combination plan without reading or writing files")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.files
    }

    fn max_group_size(&self) -> usize {
        self.max_group_size
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn archive_name(&self) -> &str {
        &self.archive_name
    }

    fn concurrent_reads(&self) -> usize {
        self.concurrent_reads
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_request(self.files.len(), self.max_group_size)?;
        for file in &self.files {
            validation::validate_path("files", file)?;
        }
        validation::validate_output(&self.output_path, &self.archive_name, self.concurrent_reads)
    }
}
