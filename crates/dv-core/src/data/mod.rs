//! Static game data: the stock monster and item catalogs

mod bestiary;
mod items;

pub use bestiary::{bestiary, ids};
pub use items::item_kinds;
