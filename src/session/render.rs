//! `ls` output: a tree drawn with box guides, fetching as it descends.

use std::io::Write;

use super::SessionError;
use crate::mirror::{Mirror, NodeId};
use crate::remote::ListingClient;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const GAP: &str = "    ";

/// Writes the children of `node`; with `recursive`, every container met on
/// the way is populated before its own children are drawn.
pub(super) fn render_listing<C: ListingClient>(
    mirror: &mut Mirror<C>,
    node: NodeId,
    recursive: bool,
    out: &mut dyn Write,
) -> Result<(), SessionError> {
    mirror.populate(node)?;

    let mut stack: Vec<(NodeId, String, bool)> = Vec::new();
    push_children(mirror, node, String::new(), &mut stack);

    while let Some((id, prefix, last)) = stack.pop() {
        let child = mirror.node(id);
        let suffix = if child.is_container() { "/" } else { "" };
        let branch = if last { LAST_BRANCH } else { BRANCH };
        writeln!(out, "{}{}{}{}", prefix, branch, child.name(), suffix)?;

        if recursive && child.is_container() {
            mirror.populate(id)?;
            let nested = format!("{}{}", prefix, if last { GAP } else { PIPE });
            push_children(mirror, id, nested, &mut stack);
        }
    }
    Ok(())
}

fn push_children<C: ListingClient>(
    mirror: &Mirror<C>,
    node: NodeId,
    prefix: String,
    stack: &mut Vec<(NodeId, String, bool)>,
) {
    let children = mirror.children(node);
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate().rev() {
        stack.push((*child, prefix.clone(), i == last));
    }
}
