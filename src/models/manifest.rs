use serde::{Deserialize, Serialize};

/// An accepted file and its text content.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub content: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoredKind {
    File,
    Directory,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IgnoredEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: IgnoredKind,
}

/// Complete output of one walk.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub files: Vec<ManifestEntry>,
    pub ignored: Vec<IgnoredEntry>,
}
