mod entry;
mod manifest;
mod remote;

pub use entry::{EntryKind, FsEntry};
pub use manifest::{IgnoredEntry, IgnoredKind, Manifest, ManifestEntry};
pub use remote::{NodeKind, RawContentEntry, RemoteNode};
