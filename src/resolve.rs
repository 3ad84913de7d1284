//! Path expressions against the lazy mirror.
//!
//! Grammar: empty (stay), `-` (previous directory), leading `/` (session
//! root), `~` or `~/` (mirror root), otherwise relative to the current
//! directory. Components are child names, `..` or `.`; an empty component
//! (`a//b`) is rejected before anything is looked up or fetched.
//!
//! Resolution is all-or-nothing: on error the caller keeps its current
//! directory. Containers passed through are populated on the way, and those
//! fetches stay in the mirror even when a later component fails.

use crate::mirror::{Mirror, NodeId};
use crate::remote::{ListingClient, RemoteError};

pub const SEPARATOR: char = '/';

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("malformed path (empty path segment)")]
    MalformedPath,

    #[error("no such directory: {0}")]
    NotFound(String),

    #[error("invalid back-reference (already at the top of the drive)")]
    Backreference,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ResolveError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::Remote(err) if err.is_fatal())
    }
}

/// Navigation state a path expression is resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionContext {
    pub current: NodeId,
    pub previous: NodeId,
    pub root: NodeId,
}

impl SessionContext {
    pub fn at(root: NodeId) -> Self {
        Self {
            current: root,
            previous: root,
            root,
        }
    }
}

pub fn resolve<C: ListingClient>(
    mirror: &mut Mirror<C>,
    ctx: &SessionContext,
    expression: &str,
) -> Result<NodeId, ResolveError> {
    if expression.is_empty() {
        return Ok(ctx.current);
    }
    if expression == "-" {
        return Ok(ctx.previous);
    }

    let (start, rest) = if let Some(rest) = expression.strip_prefix(SEPARATOR) {
        (ctx.root, rest)
    } else if expression == "~" {
        (mirror.root(), "")
    } else if let Some(rest) = expression.strip_prefix("~/") {
        (mirror.root(), rest)
    } else {
        (ctx.current, expression)
    };

    let rest = rest.trim_end_matches(SEPARATOR);
    if rest.is_empty() {
        return Ok(start);
    }

    let components: Vec<&str> = rest.split(SEPARATOR).collect();
    if components.iter().any(|c| c.is_empty()) {
        return Err(ResolveError::MalformedPath);
    }

    let mut node = start;
    for component in components {
        mirror.populate(node)?;
        node = match component {
            ".." => mirror.parent(node).ok_or(ResolveError::Backreference)?,
            "." => node,
            name => match mirror.child(node, name) {
                Some(child) if mirror.node(child).is_container() => child,
                _ => return Err(ResolveError::NotFound(name.to_string())),
            },
        };
    }
    mirror.populate(node)?;

    tracing::debug!(expression, target = mirror.path(node), "resolved path");
    Ok(node)
}

#[cfg(test)]
#[path = "tests/resolve/resolve_tests.rs"]
mod tests;
