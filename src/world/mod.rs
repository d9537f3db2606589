pub mod scene;

pub use scene::{Scene, SpawnError};
