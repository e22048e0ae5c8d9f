#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod strategies;
pub use strategies::*;

pub mod cache;
pub use cache::ScoreTable;

pub mod dispatch;
pub use dispatch::{entropy, EntropyContext, EntropyDispatcher, Execution};

pub mod util;
