pub mod price;
pub mod signal;

pub use price::PriceSnapshot;
pub use signal::*;
