use std::collections::BTreeSet;

use crate::models::{NodeKind, RemoteNode};

pub type SelectionSet = BTreeSet<String>;

/// Apply one checkbox change and return the new selection.
///
/// Checking a node also selects every materialized directory below it.
/// Unchecking removes only that node; descendants stay selected.
pub fn toggle(
    node_id: &str,
    checked: bool,
    tree: &[RemoteNode],
    selection: &SelectionSet,
) -> SelectionSet {
    let mut next = selection.clone();
    if checked {
        next.insert(node_id.to_owned());
        next.extend(descendant_dirs(tree, node_id));
    } else {
        next.remove(node_id);
    }
    next
}

/// Ids of every directory anywhere in `tree` whose path lies strictly
/// below `parent_path`.
pub fn descendant_dirs(tree: &[RemoteNode], parent_path: &str) -> Vec<String> {
    let prefix = format!("{parent_path}/");
    let mut found = Vec::new();
    let mut stack: Vec<&RemoteNode> = tree.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.is_dir() && node.path.starts_with(&prefix) {
            found.push(node.id.clone());
        }
        stack.extend(node.children().iter().rev());
    }

    found
}

/// Attach `children` to the materialized directory with id `dir_id`,
/// replacing any earlier listing. Returns false if no such directory exists.
pub fn graft(tree: &mut [RemoteNode], dir_id: &str, children: Vec<RemoteNode>) -> bool {
    let mut stack: Vec<&mut RemoteNode> = tree.iter_mut().collect();

    while let Some(node) = stack.pop() {
        if node.id == dir_id {
            if let NodeKind::Dir { children: slot } = &mut node.kind {
                *slot = Some(children);
                return true;
            }
            return false;
        }
        if let NodeKind::Dir {
            children: Some(nested),
        } = &mut node.kind
        {
            stack.extend(nested.iter_mut());
        }
    }

    false
}
