pub mod config;

pub mod bucket;
mod error;
mod report;
mod sample;
mod tally;
mod target;

pub use bucket::{Bucket, validate_buckets};
pub use error::*;
pub use report::*;
pub use sample::*;
pub use tally::*;
pub use target::*;
