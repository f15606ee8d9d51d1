pub mod mock;
pub mod remote;
pub mod types;

pub use mock::MockProvider;
pub use remote::RemoteMapboxProvider;
