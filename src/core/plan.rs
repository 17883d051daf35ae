use crate::core::combinations::{combination_count, group_size_breakdown};
use crate::domain::ports::ConfigProvider;
use std::fmt;

/// `{output_path}/{archive_name}`, where a run writes its archive.
pub fn archive_path<C: ConfigProvider>(config: &C) -> String {
    format!(
        "{}/{}",
        config.output_path().trim_end_matches('/'),
        config.archive_name()
    )
}

/// What a run would produce, computed from the configuration alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinePlan {
    pub input_files: Vec<String>,
    pub max_group_size: usize,
    pub breakdown: Vec<(usize, u64)>,
    pub total_descriptors: u64,
    pub archive_path: String,
}

impl CombinePlan {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let n = config.input_files().len();
        let max_group_size = config.max_group_size();
        Self {
            input_files: config.input_files().to_vec(),
            max_group_size,
            breakdown: group_size_breakdown(n, max_group_size),
            total_descriptors: combination_count(n, max_group_size),
            archive_path: archive_path(config),
        }
    }
}

impl fmt::Display for CombinePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📋 Combination Plan:")?;
        writeln!(f, "  Hero files: {}", self.input_files.len())?;
        for file in &self.input_files {
            writeln!(f, "    - {}", file)?;
        }
        writeln!(f, "  Max group size: {}", self.max_group_size)?;
        for (group_size, count) in &self.breakdown {
            writeln!(f, "    groups of {}: {}", group_size, count)?;
        }
        writeln!(f, "  Descriptors: {}", self.total_descriptors)?;
        write!(f, "  Archive: {}", self.archive_path)
    }
}
