use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use derive_more::Constructor;
use eyre::eyre;
use rayon::ThreadPool;
use thread_local::ThreadLocal;

use editscope_core_rs::parallelism;

use crate::parallel::{EngineBuilder, Quantification, Worker};
use crate::pipeline::Pipeline;
use crate::table::AggregateTable;

/// Parallel quantification of read sets.
///
/// Reads are split into disjoint shards processed on the rayon thread pool. Each thread keeps its own aligner and
/// partial table, and the partial tables are merged once all shards are done.
#[derive(Constructor)]
pub struct Engine {
    thread_pool: Option<ThreadPool>,
    pipeline: Pipeline,
    shard_size: usize,
    workers: ThreadLocal<RefCell<Worker>>,
    cancelled: Arc<AtomicBool>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Flag checked between reads. Raising it stops the current run, which then reports the partial table.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn run<R>(&mut self, reads: &[R]) -> eyre::Result<Quantification>
    where
        R: AsRef<[u8]> + Sync,
    {
        match self.thread_pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._run(reads));
                self.thread_pool = Some(pool);
                result
            }
            None => self._run(reads),
        }
    }

    fn _run<R>(&mut self, reads: &[R]) -> eyre::Result<Quantification>
    where
        R: AsRef<[u8]> + Sync,
    {
        let launched_at = std::time::Instant::now();
        log::info!(
            "Quantifying {} reads against {} reference(s) using {} thread(s)",
            reads.len(),
            self.pipeline.references().len(),
            rayon::current_num_threads()
        );

        // Soft-reset all workers
        for worker in self.workers.iter_mut() {
            worker.get_mut().reset();
        }

        let has_failed = AtomicBool::new(false);
        let shards = parallelism::shards(reads.len(), self.shard_size);
        {
            let (pipeline, workers, cancelled, has_failed) =
                (&self.pipeline, &self.workers, &*self.cancelled, &has_failed);
            rayon::scope(|s| {
                for shard in &shards {
                    // Terminate the loop if an error has occurred in any of the threads
                    if has_failed.load(Ordering::Relaxed) || cancelled.load(Ordering::Relaxed) {
                        return;
                    }

                    let shard = shard.clone();
                    s.spawn(move |_| {
                        if has_failed.load(Ordering::Relaxed) {
                            return;
                        }

                        // Get the state of the worker (or create a new one if it does not exist)
                        let worker =
                            match workers.get_or_try(|| Worker::new(pipeline).map(RefCell::new)) {
                                Ok(worker) => worker,
                                Err(err) => {
                                    has_failed.store(true, Ordering::Relaxed);
                                    log::error!("Quantification worker setup failed: {:?}", err);
                                    return;
                                }
                            };

                        let result = worker
                            .borrow_mut()
                            .process(pipeline, reads, shard, cancelled);
                        if let Err(err) = result {
                            has_failed.store(true, Ordering::Relaxed);
                            log::error!("Quantification failed: {:?}", err);
                        }
                    });
                }
            });
        }

        if has_failed.into_inner() {
            return Err(eyre!("Quantification internal error. See log for details."));
        }

        // Collapse partial tables
        let mut table = AggregateTable::new(self.pipeline.references());
        let mut failed = 0;
        for worker in self.workers.iter_mut() {
            let worker = worker.get_mut();
            table.merge(worker.aggregator().table())?;
            failed += worker.failed();
        }

        let cancelled = self.cancelled.swap(false, Ordering::Relaxed);
        if cancelled {
            log::warn!("Quantification was cancelled, the table is incomplete");
        } else {
            for reference in table.references() {
                if *reference.counters().total() == 0 {
                    log::warn!("Reference {} wasn't selected for any read", reference.name());
                }
            }
        }

        let time_s = launched_at.elapsed().as_secs_f64();
        log::info!(
            "Quantified {} reads in {:.3}s: {} excluded",
            table.totals().total(),
            time_s,
            failed
        );
        Ok(Quantification::new(table, failed, cancelled, time_s))
    }
}
