use crate::adapters::ZipArchiveBuilder;
use crate::core::combinations::{self, generate};
use crate::core::plan::archive_path;
use crate::core::{parser, synthesizer};
use crate::domain::model::{CombineResult, Hero};
use crate::domain::ports::{ArchiveBuilder, ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_request;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::marker::PhantomData;

/// Reads hero files, builds every combination and packs them into one archive.
pub struct CombinePipeline<S: Storage, C: ConfigProvider, A = ZipArchiveBuilder> {
    storage: S,
    config: C,
    archive: PhantomData<fn() -> A>,
}

impl<S: Storage, C: ConfigProvider> CombinePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_archive(storage, config)
    }
}

impl<S: Storage, C: ConfigProvider, A> CombinePipeline<S, C, A> {
    /// Same pipeline packing its output with a different archive format.
    pub fn with_archive(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            archive: PhantomData,
        }
    }

    async fn read_hero(&self, path: &str) -> Result<Hero> {
        let bytes = self.storage.read_file(path).await?;
        let hero = parser::parse(&String::from_utf8_lossy(&bytes));

        tracing::debug!(
            "Parsed {} ({} bytes, {} of 4 fields)",
            path,
            bytes.len(),
            hero.field_count()
        );
        if hero.primary_name.is_none() {
            tracing::warn!("⚠️ {} has no hero name, it will be rendered empty", path);
        }
        if hero.skills_block.is_none() {
            tracing::warn!("⚠️ {} has no skills block", path);
        }

        Ok(hero)
    }
}

#[async_trait::async_trait]
impl<S, C, A> Pipeline for CombinePipeline<S, C, A>
where
    S: Storage,
    C: ConfigProvider,
    A: ArchiveBuilder + Default + Send,
{
    async fn extract(&self) -> Result<Vec<Hero>> {
        let files = self.config.input_files();
        let concurrency = self.config.concurrent_reads().max(1);

        tracing::debug!(
            "Reading {} hero files ({} at a time)",
            files.len(),
            concurrency
        );

        // 平行讀取，但結果保持輸入順序；全部完成後才進入組合階段
        let reads: Vec<_> = files.iter().map(|path| self.read_hero(path)).collect();
        let heroes: Vec<Hero> = stream::iter(reads)
            .buffered(concurrency)
            .try_collect()
            .await?;

        Ok(heroes)
    }

    async fn transform(&self, heroes: Vec<Hero>) -> Result<CombineResult> {
        let max_group_size = self.config.max_group_size();
        validate_request(heroes.len(), max_group_size)?;

        for (group_size, count) in combinations::group_size_breakdown(heroes.len(), max_group_size)
        {
            tracing::debug!("Group size {}: {} combinations", group_size, count);
        }

        let descriptors = generate(&heroes, max_group_size, synthesizer::combine);

        Ok(CombineResult {
            hero_count: heroes.len(),
            descriptors,
        })
    }

    async fn load(&self, result: CombineResult) -> Result<String> {
        let output_path = archive_path(&self.config);

        let archive_data = {
            let mut archive = A::default();
            for descriptor in &result.descriptors {
                archive.add_entry(&descriptor.file_name, &descriptor.content)?;
            }
            tracing::debug!("Packing {} archive entries", archive.len());
            archive.finish()?
        };

        tracing::debug!("Writing archive ({} bytes) to {}", archive_data.len(), output_path);
        self.storage.write_file(&output_path, &archive_data).await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CombineError;
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, content: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), content.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CombineError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        files: Vec<String>,
        max_group_size: usize,
    }

    impl MockConfig {
        fn new(files: &[&str], max_group_size: usize) -> Self {
            Self {
                files: files.iter().map(|f| f.to_string()).collect(),
                max_group_size,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_files(&self) -> &[String] {
            &self.files
        }

        fn max_group_size(&self) -> usize {
            self.max_group_size
        }

        fn output_path(&self) -> &str {
            "test_output/"
        }

        fn archive_name(&self) -> &str {
            "combinations.zip"
        }

        fn concurrent_reads(&self) -> usize {
            2
        }
    }

    fn hero_file(name: &str) -> String {
        format!(
            "# schema\n{name}:\n  colouredName: &7{name}\n  skills:\n    - {name}Strike\n"
        )
    }

    async fn storage_with(names: &[&str]) -> MockStorage {
        let storage = MockStorage::default();
        for name in names {
            storage.put(&format!("{name}.yml"), &hero_file(name)).await;
        }
        storage
    }

    #[tokio::test]
    async fn test_extract_keeps_input_order() {
        let storage = storage_with(&["Xena", "Yuri", "Zed"]).await;
        let config = MockConfig::new(&["Zed.yml", "Xena.yml", "Yuri.yml"], 2);
        let pipeline = CombinePipeline::new(storage, config);

        let heroes = pipeline.extract().await.unwrap();

        let names: Vec<_> = heroes
            .iter()
            .map(|h| h.primary_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["Zed", "Xena", "Yuri"]);
        assert_eq!(heroes[0].skills_block.as_deref(), Some("    - ZedStrike"));
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let storage = storage_with(&["Xena"]).await;
        let config = MockConfig::new(&["Xena.yml", "Ghost.yml"], 2);
        let pipeline = CombinePipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, CombineError::IoError(_)));
    }

    #[tokio::test]
    async fn test_extract_tolerates_invalid_utf8() {
        let storage = MockStorage::default();
        {
            let mut files = storage.files.lock().await;
            files.insert("bad.yml".to_string(), b"Bad\xff:\n  skills:\n  - x".to_vec());
        }
        let config = MockConfig::new(&["bad.yml"], 2);
        let pipeline = CombinePipeline::new(storage, config);

        let heroes = pipeline.extract().await.unwrap();
        assert_eq!(heroes.len(), 1);
        assert_eq!(heroes[0].primary_name.as_deref(), Some("Bad\u{FFFD}"));
    }

    #[tokio::test]
    async fn test_transform_counts_and_order() {
        let storage = storage_with(&["Xena", "Yuri", "Zed"]).await;
        let config = MockConfig::new(&["Xena.yml", "Yuri.yml", "Zed.yml"], 3);
        let pipeline = CombinePipeline::new(storage, config);

        let heroes = pipeline.extract().await.unwrap();
        let result = pipeline.transform(heroes).await.unwrap();

        let names: Vec<_> = result
            .descriptors
            .iter()
            .map(|d| d.file_name.as_str())
            .collect();
        assert_eq!(result.hero_count, 3);
        assert_eq!(
            names,
            vec![
                "XenaAndYuri.yml",
                "XenaAndZed.yml",
                "YuriAndZed.yml",
                "XenaAndYuriAndZed.yml",
            ]
        );
    }

    #[tokio::test]
    async fn test_transform_rejects_invalid_request() {
        let pipeline = CombinePipeline::new(MockStorage::default(), MockConfig::new(&[], 2));
        let err = pipeline.transform(vec![Hero::default()]).await.unwrap_err();
        assert!(matches!(err, CombineError::TooFewInputs { count: 1 }));

        let pipeline = CombinePipeline::new(MockStorage::default(), MockConfig::new(&[], 1));
        let err = pipeline
            .transform(vec![Hero::default(), Hero::default()])
            .await
            .unwrap_err();
        assert!(matches!(err, CombineError::InvalidMaxGroupSize { value: 1 }));
    }

    #[tokio::test]
    async fn test_load_writes_archive() {
        let storage = storage_with(&["Xena", "Yuri"]).await;
        let config = MockConfig::new(&["Xena.yml", "Yuri.yml"], 2);
        let pipeline = CombinePipeline::new(storage.clone(), config);

        let heroes = pipeline.extract().await.unwrap();
        let result = pipeline.transform(heroes).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "test_output/combinations.zip");

        let zip_data = storage.get_file(&output_path).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 1);

        let mut content = String::new();
        archive
            .by_name("XenaAndYuri.yml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(
            content,
            "# schema\nXenaAndYuri: \n  colouredName: &7Xena + &7Yuri\n  \
description: A combination of &7Xena, and &7Yuri\n  skills: \n    - XenaStrike\n    - YuriStrike\n"
        );
    }

    /// Plain-text archive: one `== name ==` header line before each entry.
    #[derive(Default)]
    struct ListingArchive {
        body: String,
        entries: usize,
    }

    impl ArchiveBuilder for ListingArchive {
        fn add_entry(&mut self, name: &str, content: &str) -> Result<()> {
            self.body.push_str(&format!("== {name} ==\n{content}"));
            self.entries += 1;
            Ok(())
        }

        fn len(&self) -> usize {
            self.entries
        }

        fn finish(self) -> Result<Vec<u8>> {
            Ok(self.body.into_bytes())
        }
    }

    #[tokio::test]
    async fn test_load_with_custom_archive() {
        let storage = storage_with(&["Xena", "Yuri", "Zed"]).await;
        let config = MockConfig::new(&["Xena.yml", "Yuri.yml", "Zed.yml"], 2);
        let pipeline: CombinePipeline<_, _, ListingArchive> =
            CombinePipeline::with_archive(storage.clone(), config);

        let heroes = pipeline.extract().await.unwrap();
        let result = pipeline.transform(heroes).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "test_output/combinations.zip");
        let listing = String::from_utf8(storage.get_file(&output_path).await.unwrap()).unwrap();
        let headers: Vec<_> = listing
            .lines()
            .filter(|line| line.starts_with("== "))
            .collect();
        assert_eq!(
            headers,
            vec![
                "== XenaAndYuri.yml ==",
                "== XenaAndZed.yml ==",
                "== YuriAndZed.yml ==",
            ]
        );
        assert!(listing.contains("  colouredName: &7Yuri + &7Zed\n"));
    }
}
