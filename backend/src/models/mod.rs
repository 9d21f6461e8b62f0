pub mod channel;
pub mod selection;
pub mod table;

pub use channel::*;
pub use selection::*;
pub use table::*;
