use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use editscope_alignment_rs::pairwise::global::Aligner;
use editscope_alignment_rs::Sequence;

use crate::aggregator::Aggregator;
use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use crate::Score;

/// Thread-local state: a reusable aligner and a partial aggregate table.
pub struct Worker {
    aligner: Aligner<Score>,
    aggregator: Aggregator,
    failed: u64,
}

impl Worker {
    pub fn new(pipeline: &Pipeline) -> Result<Self> {
        Ok(Self {
            aligner: pipeline.aligner()?,
            aggregator: Aggregator::new(pipeline.references()),
            failed: 0,
        })
    }

    pub fn reset(&mut self) {
        self.aggregator.reset();
        self.failed = 0;
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Process a shard of raw reads. Stops early if `cancelled` is raised; the read in flight is always completed.
    ///
    /// Reads that can't be parsed or aligned are excluded and counted as failed.
    /// Errors are returned only for inconsistent outcomes, which indicate a bug rather than a bad read.
    pub fn process<R: AsRef<[u8]>>(
        &mut self,
        pipeline: &Pipeline,
        reads: &[R],
        shard: Range<usize>,
        cancelled: &AtomicBool,
    ) -> Result<()> {
        let launched_at = std::time::Instant::now();
        let (start, end) = (shard.start, shard.end);

        for (ind, read) in reads[shard].iter().enumerate() {
            if cancelled.load(Ordering::Relaxed) {
                log::debug!("Shard [{start}, {end}) was cancelled after {ind} reads");
                return Ok(());
            }

            let outcome = Sequence::from_bytes(read.as_ref())
                .map_err(Error::from)
                .and_then(|read| pipeline.process(&mut self.aligner, &read));
            match outcome {
                Ok(outcome) => self.aggregator.accumulate(&outcome)?,
                Err(err) => {
                    log::warn!("Read {} was excluded from the quantification: {}", start + ind, err);
                    self.failed += 1;
                }
            }
        }

        log::debug!(
            "Processed shard [{start}, {end}) in {:.3}s",
            launched_at.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
