use derive_more::{Display, Error};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum Error {
    /// Encoding requires at least one element.
    #[display("Sequence passed has zero length")]
    EmptyInput,

    /// `values` and `counts` describe a different number of runs.
    #[display("Values and counts must have the same length, got {values} and {counts}")]
    LengthMismatch { values: usize, counts: usize },

    /// A count that doesn't denote a non-negative integer, rendered with `Debug`.
    #[display("Count {count} at position {index} is not a non-negative integer")]
    NonIntegerCount { index: usize, count: String },

    /// A chunk task failed. The remaining chunks were abandoned and no partial result is merged.
    #[display("Worker encoding chunk #{chunk} failed")]
    WorkerFailure { chunk: usize, source: Box<Error> },

    /// A chunk task panicked, usually inside a custom `Identical` rule.
    #[display("Worker panicked: {message}")]
    WorkerPanic { message: String },

    /// A run is longer than the count type can hold.
    #[display("Run length can't fit in {target}")]
    CountOverflow { target: &'static str },

    /// Zero chunks were requested.
    #[display("Number of chunks must be positive")]
    InvalidChunkCount,

    /// The rayon pool couldn't be created. The cause is the error source.
    #[display("Failed to build the worker pool")]
    ThreadPool(rayon::ThreadPoolBuildError),

    /// The number of logical cores couldn't be queried.
    #[display("Failed to detect available parallelism")]
    Parallelism(std::io::Error),
}

impl Error {
    pub(crate) fn overflow<L>() -> Self {
        Error::CountOverflow {
            target: std::any::type_name::<L>(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Parallelism(err)
    }
}
