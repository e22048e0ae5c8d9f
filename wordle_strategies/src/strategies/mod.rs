//! Strategies for use with `wordle_agents`.
//!
//! Each strategy consists of a single struct, and everything you need to
//! configure the strategy should exist as a method.

mod random;
pub use random::{DiverseRandom, Random};

mod frequency;
pub use frequency::Frequency;

mod entropy;
pub use entropy::Entropy;

mod explore;
pub use explore::ExploreExploit;
