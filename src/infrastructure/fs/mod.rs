//! File System Implementations
//!
//! Local documents written on behalf of provider calls.

mod scratch;

pub use scratch::ScratchFiles;
