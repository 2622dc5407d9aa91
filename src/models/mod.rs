pub mod card_row;
pub mod scryfall;

pub use card_row::*;
pub use scryfall::*;
