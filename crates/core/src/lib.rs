//! Game-outcome engine: initial card dealing and end-of-game scoring for
//! trading-card games. Keep this crate free of IO and platform concerns.

pub mod catalog;
pub mod deal;
pub mod deck;
pub mod pipeline;
pub mod rng;
pub mod scoresheet;

pub use catalog::*;
pub use deal::*;
pub use deck::*;
pub use pipeline::*;
pub use rng::*;
pub use scoresheet::*;
