use std::io;
use std::num::NonZeroUsize;
use std::thread::available_parallelism;

/// Worker count used when the caller doesn't ask for one: every logical core.
pub const ALL_CORES: isize = -1;

fn clamp(workers: isize, cores: NonZeroUsize) -> usize {
    let cores = cores.get();
    if workers > 0 {
        workers.unsigned_abs().min(cores)
    } else if workers == 0 {
        1
    } else {
        // -1 is every core, -2 all but one, and so on
        cores.saturating_sub(workers.unsigned_abs() - 1).max(1)
    }
}

/// Number of worker threads to spin up for the requested `workers`.
///
/// `None` means [`ALL_CORES`]. Positive values are capped at the number of logical cores, zero
/// means a single thread and negative values count back from the number of cores. The result is
/// never below 1.
pub fn resolve(workers: Option<isize>) -> io::Result<usize> {
    let cores = available_parallelism()?;
    Ok(clamp(workers.unwrap_or(ALL_CORES), cores))
}
