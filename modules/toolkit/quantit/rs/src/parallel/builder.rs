use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rayon::ThreadPool;
use thread_local::ThreadLocal;

use crate::config::Config;
use crate::error::Result;
use crate::parallel::Engine;
use crate::pipeline::Pipeline;
use crate::reference::Reference;

pub struct EngineBuilder {
    references: Vec<Reference>,
    config: Config,
    shard_size: usize,
    thread_pool: Option<ThreadPool>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            references: Vec::new(),
            config: Config::default(),
            shard_size: 1024,
            thread_pool: None,
        }
    }
}

impl EngineBuilder {
    pub fn add_references(mut self, references: impl IntoIterator<Item = Reference>) -> Self {
        self.references.extend(references);
        self
    }

    pub fn set_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Number of reads processed by a single task. Zero is treated as 1.
    pub fn set_shard_size(mut self, shard_size: usize) -> Self {
        self.shard_size = shard_size.max(1);
        self
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    pub fn build(self) -> Result<Engine> {
        let pipeline = Pipeline::new(self.config, self.references)?;
        Ok(Engine::new(
            self.thread_pool,
            pipeline,
            self.shard_size,
            ThreadLocal::new(),
            Arc::new(AtomicBool::new(false)),
        ))
    }
}
