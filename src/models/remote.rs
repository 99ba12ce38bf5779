use serde::{Deserialize, Serialize};

/// One entry of a repository listing as the contents API returns it.
/// Fields beyond these three are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct RawContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    File,
    /// `children` stays `None` until a listing for this directory has been
    /// grafted onto it.
    Dir {
        #[serde(skip_serializing_if = "Option::is_none")]
        children: Option<Vec<RemoteNode>>,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RemoteNode {
    pub id: String,
    pub label: String,
    pub name: String,
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl RemoteNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name.into(), path.into(), NodeKind::File)
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name.into(), path.into(), NodeKind::Dir { children: None })
    }

    fn new(name: String, path: String, kind: NodeKind) -> Self {
        Self {
            id: path.clone(),
            label: name.clone(),
            name,
            path,
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir { .. })
    }

    pub fn children(&self) -> &[RemoteNode] {
        match &self.kind {
            NodeKind::Dir {
                children: Some(children),
            } => children,
            _ => &[],
        }
    }

    pub fn with_children(mut self, nodes: Vec<RemoteNode>) -> Self {
        if let NodeKind::Dir { children } = &mut self.kind {
            *children = Some(nodes);
        }
        self
    }
}

impl From<RawContentEntry> for RemoteNode {
    /// Anything that is not `dir` (files, symlinks, submodules) is a leaf.
    fn from(raw: RawContentEntry) -> Self {
        if raw.kind == "dir" {
            Self::dir(raw.name, raw.path)
        } else {
            Self::file(raw.name, raw.path)
        }
    }
}
