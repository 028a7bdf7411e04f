pub mod board;
pub mod layers;
pub mod residents;
pub mod schedule;
pub mod settings;
pub mod slot;

pub use board::*;
pub use layers::*;
pub use residents::*;
pub use schedule::*;
pub use settings::*;
pub use slot::*;
