pub mod box_item;
pub mod box_list;
pub mod rarity;
pub mod stats;

pub use box_item::*;
pub use box_list::*;
pub use rarity::*;
pub use stats::*;
