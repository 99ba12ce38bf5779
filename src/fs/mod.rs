mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use async_trait::async_trait;
use std::io;
use std::path::Path;

use crate::models::FsEntry;

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Entries of `dir` in enumeration order.
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;

    /// Full content of `file`, decoded as UTF-8 with invalid sequences
    /// replaced.
    async fn read_to_string(&self, file: &Path) -> io::Result<String>;
}
