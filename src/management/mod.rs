mod snapshot;
mod token;

pub use snapshot::SnapshotManager;
pub use snapshot::build_snapshot;
pub use token::TokenManager;
