use crate::domain::model::{CombineResult, Hero};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_files(&self) -> &[String];
    fn max_group_size(&self) -> usize;
    fn output_path(&self) -> &str;
    fn archive_name(&self) -> &str;
    fn concurrent_reads(&self) -> usize;
}

/// Collects named text entries and packs them into one binary container.
pub trait ArchiveBuilder {
    fn add_entry(&mut self, name: &str, content: &str) -> Result<()>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Hero>>;
    async fn transform(&self, heroes: Vec<Hero>) -> Result<CombineResult>;
    async fn load(&self, result: CombineResult) -> Result<String>;
}
