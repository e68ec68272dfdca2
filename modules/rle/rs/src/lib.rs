pub use codec::{decode, encode, encode_with, Count};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use identical::{Equal, Identical};
pub use merge::{merge, merge_with};
pub use parallel::{parallel_encode, ParallelEncoder, ParallelEncoderBuilder};
pub use partition::{partition, Chunk};

mod codec;
mod encoding;
mod error;
mod identical;
mod merge;
mod parallel;
mod partition;
