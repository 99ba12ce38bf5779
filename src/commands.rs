use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::{ExploreArgs, ManifestArgs};
use crate::core::{
    SelectionSet, WalkOptions, graft, toggle, walk_dir, write_checklist, write_manifest,
};
use crate::fs::FileSystem;
use crate::models::RemoteNode;
use crate::remote::{RemoteTreeFetcher, Transport};

/// Walk `args.root` and write the manifest. Relative paths resolve against
/// `cwd`, which is also what recorded paths are relative to.
pub async fn run_manifest<F: FileSystem>(fs: &F, args: &ManifestArgs, cwd: &Path) -> Result<()> {
    let root = cwd.join(&args.root);
    let output = cwd.join(&args.output);

    let manifest = walk_dir(fs, &root, &WalkOptions::relative_to(cwd)).await?;
    write_manifest(&manifest, &output).await?;
    Ok(())
}

/// Fetch, expand and toggle, then print the checklist and selection.
pub async fn run_explore<T: Transport, W: Write>(
    fetcher: &RemoteTreeFetcher<T>,
    args: &ExploreArgs,
    out: &mut W,
) -> Result<()> {
    let token = args.token.as_deref();

    let mut tree = fetcher
        .fetch_children(&args.repo, token)
        .await
        .with_context(|| format!("error fetching repository data for {}", args.repo))?;
    info!(repo = %args.repo, entries = tree.len(), "fetched repository root");

    for dir in &args.expand {
        let dir = dir.trim_matches('/');
        let children = fetcher
            .fetch_dir(&args.repo, dir, token)
            .await
            .with_context(|| format!("error fetching directory {dir}"))?;
        if !graft(&mut tree, dir, children) {
            bail!("cannot expand {dir}: no such directory in the fetched tree");
        }
    }

    let mut selection = SelectionSet::new();
    for id in &args.check {
        selection = toggle(id, true, &tree, &selection);
    }
    for id in &args.uncheck {
        selection = toggle(id, false, &tree, &selection);
    }
    for id in args.check.iter().chain(&args.uncheck) {
        if !contains_id(&tree, id) {
            warn!(%id, "toggled id is not in the fetched tree");
        }
    }

    write_checklist(out, &tree, &selection)?;
    if !selection.is_empty() {
        writeln!(out, "\nSelected items:")?;
        writeln!(out, "{}", serde_json::to_string_pretty(&selection)?)?;
    }
    Ok(())
}

fn contains_id(tree: &[RemoteNode], id: &str) -> bool {
    let mut stack: Vec<_> = tree.iter().collect();
    while let Some(node) = stack.pop() {
        if node.id == id {
            return true;
        }
        stack.extend(node.children());
    }
    false
}
