//! Partitioning declarations into standard, third-party and local groups

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::decl::ImportDecl;
use crate::request::Options;
use crate::stdlib;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Std,
    ThirdParty,
    Local,
    /// Trailing comments with no import after them
    Detached,
}

impl GroupKind {
    /// Bucket number shown in trace output
    pub fn index(self) -> usize {
        match self {
            Self::Std => 0,
            Self::ThirdParty => 1,
            Self::Local => 2,
            Self::Detached => 3,
        }
    }

    pub const fn default_order() -> [GroupKind; 3] {
        [Self::Std, Self::ThirdParty, Self::Local]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Std => "std",
            Self::ThirdParty => "third_party",
            Self::Local => "local",
            Self::Detached => "detached",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "std" | "standard" => Ok(Self::Std),
            "third_party" | "third-party" | "third" => Ok(Self::ThirdParty),
            "local" => Ok(Self::Local),
            other => Err(format!(
                "unknown import group '{other}', expected std, third_party or local"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportGroup {
    pub kind: GroupKind,
    /// Declarations in emission order. Detached comment blocks among them
    /// are separators and never move.
    pub decls: Vec<ImportDecl>,
}

impl ImportGroup {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            decls: Vec::new(),
        }
    }

    /// Stable sort by real path between separators. Detached groups keep
    /// their order.
    pub fn sort(&mut self) {
        if self.decls.len() < 2 || self.kind == GroupKind::Detached {
            return;
        }
        for run in self.decls.split_mut(ImportDecl::is_detached) {
            run.sort_by_key(ImportDecl::real_path);
        }
    }

    /// Separators keep a blank line on each side inside the group
    pub fn render(&self) -> String {
        let last = self.decls.len().saturating_sub(1);
        let mut out = String::new();
        for (idx, decl) in self.decls.iter().enumerate() {
            let separator = decl.is_detached();
            if separator && idx > 0 {
                out.push('\n');
            }
            out.push_str(&decl.render());
            if separator && idx < last {
                out.push('\n');
            }
        }
        out
    }
}

impl Serialize for ImportGroup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ImportGroup", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("index", &self.kind.index())?;
        state.serialize_field("decls", &self.decls)?;
        state.end()
    }
}

/// Classify an import path.
///
/// A path equal to or nested under a local module prefix is local, the
/// longest matching prefix winning; then the standard library; otherwise
/// third party.
pub fn classify(path: &str, local_modules: &[String]) -> GroupKind {
    let local = local_modules
        .iter()
        .filter(|m| !m.is_empty())
        .filter(|m| {
            path == m.as_str()
                || path
                    .strip_prefix(m.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by_key(|m| m.len());
    if local.is_some() {
        return GroupKind::Local;
    }
    if stdlib::is_std(path) {
        return GroupKind::Std;
    }
    GroupKind::ThirdParty
}

/// Effective group order: configured kinds without duplicates, then any
/// missing default kinds.
pub fn resolve_order(configured: &[GroupKind]) -> Vec<GroupKind> {
    let mut order = Vec::with_capacity(3);
    for kind in configured.iter().chain(GroupKind::default_order().iter()) {
        if *kind != GroupKind::Detached && !order.contains(kind) {
            order.push(*kind);
        }
    }
    order
}

/// Distribute declarations into groups in emission order.
///
/// A detached comment block stays a separator in front of the declaration
/// that followed it, inside that declaration's group; a block at the very
/// end becomes a `Detached` group. Empty groups are dropped.
pub fn group_decls(decls: Vec<ImportDecl>, options: &Options) -> Vec<ImportGroup> {
    let order = resolve_order(&options.group_order);
    let mut groups: Vec<ImportGroup> = order.iter().map(|k| ImportGroup::new(*k)).collect();
    let mut pending: Vec<ImportDecl> = Vec::new();

    for decl in decls {
        if decl.is_detached() {
            pending.push(decl);
            continue;
        }

        let kind = if options.group {
            classify(&decl.real_path(), &options.local_modules)
        } else {
            order[0]
        };
        if let Some(group) = groups.iter_mut().find(|g| g.kind == kind) {
            group.decls.append(&mut pending);
            group.decls.push(decl);
        }
    }

    if !pending.is_empty() {
        let mut detached = ImportGroup::new(GroupKind::Detached);
        detached.decls.push(ImportDecl {
            path: String::new(),
            docs: pending.into_iter().flat_map(|d| d.docs).collect(),
        });
        groups.push(detached);
    }

    groups.retain(|g| !g.decls.is_empty());
    groups
}
