pub mod colours;
pub(crate) mod drawing;
pub(crate) mod fonts;
pub mod snapshot;

pub use snapshot::SnapshotWriter;
