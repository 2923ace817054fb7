//! The rulesets shipped with the game: card catalogs plus the scoring
//! behaviors behind their rule cards.

mod haggle;
mod pizzaz;
mod remixed;
pub mod load;

pub use load::*;
