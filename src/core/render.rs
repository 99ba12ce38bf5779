use std::io::{self, Write};

use crate::core::SelectionSet;
use crate::models::RemoteNode;

/// Draw `nodes` as an ASCII checklist, one line per materialized node.
pub fn write_checklist<W: Write>(
    writer: &mut W,
    nodes: &[RemoteNode],
    selection: &SelectionSet,
) -> io::Result<()> {
    write_checklist_inner(writer, nodes, selection, &[])
}

fn write_checklist_inner<W: Write>(
    writer: &mut W,
    nodes: &[RemoteNode],
    selection: &SelectionSet,
    ancestor_has_more: &[bool],
) -> io::Result<()> {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == nodes.len();

        for &has_more in ancestor_has_more {
            if has_more {
                writer.write_all(b"|   ")?;
            } else {
                writer.write_all(b"    ")?;
            }
        }

        if is_last {
            writer.write_all(b"`-- ")?;
        } else {
            writer.write_all(b"|-- ")?;
        }

        if selection.contains(&node.id) {
            writer.write_all(b"[x] ")?;
        } else {
            writer.write_all(b"[ ] ")?;
        }

        writer.write_all(node.label.as_bytes())?;
        if node.is_dir() {
            writer.write_all(b"/")?;
        }
        writer.write_all(b"\n")?;

        let children = node.children();
        if !children.is_empty() {
            let mut next_ancestor_has_more = ancestor_has_more.to_vec();
            next_ancestor_has_more.push(!is_last);
            write_checklist_inner(writer, children, selection, &next_ancestor_has_more)?;
        }
    }

    Ok(())
}
