mod credentials;
mod snapshot;

pub use credentials::CredentialsError;
pub use credentials::CredentialsManager;
pub use snapshot::SnapshotManager;
