use crate::domain::ports::Pipeline;
use crate::utils::error::{CombineError, Result};
use crate::utils::monitor::SystemMonitor;
use tokio::sync::watch;

/// Where the engine is in its single batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    Running,
    Failed { message: String },
}

pub struct CombineEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    status: watch::Sender<PipelineStatus>,
}

impl<P: Pipeline> CombineEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        let (status, _) = watch::channel(PipelineStatus::Idle);
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            status,
        }
    }

    pub fn status(&self) -> PipelineStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status change of this engine.
    pub fn subscribe(&self) -> watch::Receiver<PipelineStatus> {
        self.status.subscribe()
    }

    /// Runs extract, transform and load once. A second call while a run is in
    /// flight fails with `PipelineBusy` and leaves the running one untouched.
    pub async fn run(&self) -> Result<String> {
        let started = self.status.send_if_modified(|status| {
            if *status == PipelineStatus::Running {
                false
            } else {
                *status = PipelineStatus::Running;
                true
            }
        });
        if !started {
            return Err(CombineError::PipelineBusy);
        }

        let outcome = self.execute().await;

        let next = match &outcome {
            Ok(_) => PipelineStatus::Idle,
            Err(e) => PipelineStatus::Failed {
                message: e.to_string(),
            },
        };
        self.status.send_replace(next);

        outcome
    }

    async fn execute(&self) -> Result<String> {
        tracing::info!("🚀 Starting combination run");
        self.monitor.record("Start");

        tracing::info!("📥 Reading hero files...");
        let heroes = self.pipeline.extract().await?;
        tracing::info!("Parsed {} heroes", heroes.len());
        self.monitor.record("Extract");

        tracing::info!("🔄 Generating combinations...");
        let result = self.pipeline.transform(heroes).await?;
        tracing::info!(
            "Generated {} descriptors from {} heroes",
            result.descriptors.len(),
            result.hero_count
        );
        self.monitor.record("Transform");

        tracing::info!("📦 Packing archive...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Archive saved to: {}", output_path);
        self.monitor.record("Load");
        self.monitor.log_summary();

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CombineResult, Hero, SynthesizedDescriptor};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct MockPipeline {
        heroes: usize,
        fail_load: bool,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<Vec<Hero>> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(vec![Hero::default(); self.heroes])
        }

        async fn transform(&self, heroes: Vec<Hero>) -> Result<CombineResult> {
            Ok(CombineResult {
                hero_count: heroes.len(),
                descriptors: vec![SynthesizedDescriptor {
                    file_name: "And.yml".to_string(),
                    content: String::new(),
                }],
            })
        }

        async fn load(&self, _result: CombineResult) -> Result<String> {
            if self.fail_load {
                return Err(CombineError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only output",
                )));
            }
            Ok("out/combinations.zip".to_string())
        }
    }

    #[tokio::test]
    async fn test_successful_run_returns_to_idle() {
        let engine = CombineEngine::new(MockPipeline {
            heroes: 2,
            fail_load: false,
            gate: None,
        });
        assert_eq!(engine.status(), PipelineStatus::Idle);

        let path = engine.run().await.unwrap();

        assert_eq!(path, "out/combinations.zip");
        assert_eq!(engine.status(), PipelineStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_run_reports_failure() {
        let engine = CombineEngine::new(MockPipeline {
            heroes: 2,
            fail_load: true,
            gate: None,
        });

        assert!(engine.run().await.is_err());

        match engine.status() {
            PipelineStatus::Failed { message } => assert!(message.contains("read-only output")),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_run_is_rejected() {
        let gate = Arc::new(Notify::new());
        let engine = CombineEngine::new(MockPipeline {
            heroes: 2,
            fail_load: false,
            gate: Some(gate.clone()),
        });
        let mut status = engine.subscribe();

        let (first, second) = tokio::join!(engine.run(), async {
            status.changed().await.unwrap();
            assert_eq!(*status.borrow_and_update(), PipelineStatus::Running);
            let busy = engine.run().await;
            gate.notify_one();
            busy
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(CombineError::PipelineBusy)));
        assert_eq!(engine.status(), PipelineStatus::Idle);
    }
}
