pub mod channels;
pub mod error_bars;
pub mod figure;
