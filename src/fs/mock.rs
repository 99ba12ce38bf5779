use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::models::FsEntry;

use super::FileSystem;

#[derive(Clone, Debug)]
enum Response {
    Entries(Vec<FsEntry>),
    Content(String),
    Err(String),
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    responses: HashMap<PathBuf, Response>,
    calls: Vec<PathBuf>,
}

impl MockFileSystem {
    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, entries: Vec<FsEntry>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.responses.insert(dir.into(), Response::Entries(entries));
    }

    pub fn set_file(&self, file: impl Into<PathBuf>, content: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .responses
            .insert(file.into(), Response::Content(content.into()));
    }

    pub fn set_error(&self, path: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .responses
            .insert(path.into(), Response::Err(message.into()));
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    fn respond(&self, path: &Path) -> io::Result<Response> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(path.to_path_buf());

        match inner.responses.get(path) {
            Some(Response::Err(message)) => Err(io::Error::other(message.clone())),
            Some(response) => Ok(response.clone()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no mock response for {}", path.display()),
            )),
        }
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        match self.respond(dir)? {
            Response::Entries(entries) => Ok(entries),
            _ => Err(io::Error::other(format!("{} is not a directory", dir.display()))),
        }
    }

    async fn read_to_string(&self, file: &Path) -> io::Result<String> {
        match self.respond(file)? {
            Response::Content(content) => Ok(content),
            _ => Err(io::Error::other(format!("{} is not a file", file.display()))),
        }
    }
}
