pub mod loader;

pub use loader::{ApplicationLoader, ApplicationLoaderError, ApplicationRecord};
