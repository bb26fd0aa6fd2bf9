pub mod instance;
pub mod location;

pub use instance::InstanceError;
pub use location::ErrorLocation;
