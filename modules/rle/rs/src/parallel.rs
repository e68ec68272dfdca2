use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::{ThreadPool, ThreadPoolBuilder};

use rlekit_core_rs::num::RunLength;
use rlekit_core_rs::parallelism;

use super::codec::encode_with;
use super::encoding::Encoding;
use super::error::{Error, Result};
use super::identical::{Equal, Identical};
use super::merge::merge_with;
use super::partition::{partition, Chunk};

#[derive(Default)]
pub struct ParallelEncoderBuilder {
    workers: Option<isize>,
    chunks: Option<usize>,
    thread_pool: Option<ThreadPool>,
}

impl ParallelEncoderBuilder {
    /// Number of worker threads, see [`parallelism::resolve`] for the accepted values.
    /// Ignored when a thread pool is supplied.
    pub fn with_workers(mut self, workers: isize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Number of chunks to split every sequence into. Defaults to the number of worker threads.
    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = Some(chunks);
        self
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    pub fn build(self) -> Result<ParallelEncoder> {
        let pool = match self.thread_pool {
            Some(pool) => pool,
            None => ThreadPoolBuilder::new()
                .num_threads(parallelism::resolve(self.workers)?)
                .thread_name(|ind| format!("rlekit-encoder-{ind}"))
                .build()?,
        };

        let chunks = match self.chunks {
            Some(0) => return Err(Error::InvalidChunkCount),
            Some(chunks) => chunks,
            None => pool.current_num_threads(),
        };

        Ok(ParallelEncoder { pool, chunks })
    }
}

/// Run-length encoder that splits a sequence into chunks, encodes them concurrently and stitches
/// the partial encodings back together. The output is identical to [`encode_with`].
pub struct ParallelEncoder {
    pool: ThreadPool,
    chunks: usize,
}

impl ParallelEncoder {
    pub fn builder() -> ParallelEncoderBuilder {
        ParallelEncoderBuilder::default()
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn encode<V>(&self, seq: &[V]) -> Result<Encoding<V>>
    where
        V: PartialEq + Clone + Send + Sync,
    {
        self.encode_with(seq, Equal)
    }

    pub fn encode_with<V, L, I>(&self, seq: &[V], identical: I) -> Result<Encoding<V, L>>
    where
        V: Clone + Send + Sync,
        L: RunLength,
        I: Identical<V> + Sync,
    {
        if seq.is_empty() {
            return Err(Error::EmptyInput);
        }

        let chunks = partition(seq.len(), self.chunks)?;
        log::debug!(
            "Encoding {} elements as {} chunks on {} workers",
            seq.len(),
            chunks.len(),
            self.workers()
        );

        let partials: Vec<Encoding<V, L>> = self.dispatch(seq, &chunks, &identical)?;

        // Concatenate in chunk order, runs split by chunk boundaries are fused afterwards
        let runs = partials.iter().map(Encoding::len).sum();
        let (mut values, mut counts) = (Vec::with_capacity(runs), Vec::with_capacity(runs));
        for partial in partials {
            let (v, c) = partial.dissolve();
            values.extend(v);
            counts.extend(c);
        }

        merge_with(values, counts, identical)
    }

    /// Encodes every chunk in a separate task. Partial encodings are returned in chunk order.
    fn dispatch<V, L, I>(
        &self,
        seq: &[V],
        chunks: &[Chunk],
        identical: &I,
    ) -> Result<Vec<Encoding<V, L>>>
    where
        V: Clone + Send + Sync,
        L: RunLength,
        I: Identical<V> + Sync,
    {
        let mut slots: Vec<Option<Result<Encoding<V, L>>>> =
            chunks.iter().map(|_| None).collect();
        let has_failed = AtomicBool::new(false);

        self.pool.scope(|s| {
            for (ind, (slot, chunk)) in slots.iter_mut().zip(chunks).enumerate() {
                // Don't schedule anything else once a chunk has failed
                if has_failed.load(Ordering::Relaxed) {
                    return;
                }

                let has_failed = &has_failed;
                s.spawn(move |_| {
                    if has_failed.load(Ordering::Relaxed) {
                        return;
                    }

                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        encode_with(&seq[chunk.clone()], |a: &V, b: &V| {
                            identical.identical(a, b)
                        })
                    }))
                    .unwrap_or_else(|payload| {
                        Err(Error::WorkerPanic {
                            message: panic_message(payload),
                        })
                    });

                    match &result {
                        Ok(partial) => log::trace!(
                            "Chunk #{} [{}, {}) encoded as {} runs",
                            ind,
                            chunk.start,
                            chunk.end,
                            partial.len()
                        ),
                        Err(err) => {
                            has_failed.store(true, Ordering::Relaxed);
                            log::error!(
                                "Chunk #{} [{}, {}) failed: {}",
                                ind,
                                chunk.start,
                                chunk.end,
                                err
                            );
                        }
                    }
                    *slot = Some(result);
                });
            }
        });

        // Restore the chunk order, the lowest failed chunk among those that ran is reported
        let mut partials = Vec::with_capacity(slots.len());
        for (chunk, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(partial)) => partials.push(partial),
                Some(Err(err)) => {
                    return Err(Error::WorkerFailure {
                        chunk,
                        source: Box::new(err),
                    })
                }
                // Skipped after a failure, a later slot holds the error
                None => {}
            }
        }
        debug_assert_eq!(partials.len(), chunks.len());

        Ok(partials)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "unknown panic payload".to_string(),
        },
    }
}

/// Parallel run-length encoding on a pool built for this call.
///
/// `workers` follows [`parallelism::resolve`] (default: every logical core), `chunks` defaults
/// to the number of workers. The result is the same as [`encode`](super::encode) for any
/// configuration.
pub fn parallel_encode<V>(
    seq: &[V],
    workers: Option<isize>,
    chunks: Option<usize>,
) -> Result<Encoding<V>>
where
    V: PartialEq + Clone + Send + Sync,
{
    ParallelEncoderBuilder {
        workers,
        chunks,
        thread_pool: None,
    }
    .build()?
    .encode(seq)
}
