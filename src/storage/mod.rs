pub mod cereal;
pub mod compartments;
pub mod console;
pub mod deliveries;

pub use cereal::Cereal;
pub use compartments::{CompartmentedStorage, StorageError};
pub use console::Console;
