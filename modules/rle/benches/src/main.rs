use std::time::Instant;

use eyre::{ensure, Result};
use rayon::ThreadPoolBuilder;

use rlekit_core_rs::parallelism;
use rlekit_rle_rs as rle;

const THREADS: Option<isize> = None;
const LENGTH: usize = 50_000_000;
const CHUNKS: &[usize] = &[1, 2, 4, 8, 16, 64, 256];

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Long runs interleaved with stretches of single-element runs.
fn synthetic(length: usize) -> Vec<u16> {
    let mut state: u32 = 0x9e37_79b9;
    let mut seq = Vec::with_capacity(length);
    while seq.len() < length {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;

        let value = (state % 7) as u16;
        let run = match state % 4 {
            0 => 1,
            1 => 16,
            _ => (state >> 8) as usize % 4096,
        };
        seq.extend(std::iter::repeat(value).take(run.min(length - seq.len()).max(1)));
    }
    seq.truncate(length);
    seq
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seq = synthetic(LENGTH);

    let start = Instant::now();
    let expected = rle::encode(&seq)?;
    log::info!(
        "sequential: {} elements -> {} runs in {:?}",
        seq.len(),
        expected.len(),
        start.elapsed()
    );

    let threads = parallelism::resolve(THREADS)?;
    for chunks in CHUNKS {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        let encoder = rle::ParallelEncoder::builder()
            .set_thread_pool(pool)
            .with_chunks(*chunks)
            .build()?;

        let start = Instant::now();
        let encoding = encoder.encode(&seq)?;
        let elapsed = start.elapsed();

        ensure!(
            encoding == expected,
            "Parallel encoding with {} chunks differs from the sequential one",
            chunks
        );
        log::info!("parallel: {threads} threads, {chunks} chunks in {elapsed:?}");
    }

    Ok(())
}
