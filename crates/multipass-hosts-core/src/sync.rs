//! One synchronisation run: resolve aliases, render the block, merge it into
//! the hosts text, then print and/or write according to a [`WritePolicy`].

use std::io::Write;

use serde::Serialize;
use tracing::{debug, info};

use crate::block::{merge, render};
use crate::domain::{AliasMap, Entity, Result};
use crate::hosts_file::HostsStore;
use crate::resolve::{dangling_targets, resolve};

/// What the caller allows this run to do with the result.
///
/// `write_blocked` is decided outside the core (e.g. System Integrity
/// Protection on macOS). When set, the new text is printed and never written,
/// whatever `print` and `update` say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WritePolicy {
    pub print: bool,
    pub update: bool,
    pub write_blocked: bool,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            print: false,
            update: true,
            write_blocked: false,
        }
    }
}

/// The computed result of a run, before anything is printed or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    /// The rendered block.
    pub block: String,
    /// Full hosts text with the block merged in.
    pub hosts: String,
    /// Whether `hosts` differs from the text it was merged into.
    pub changed: bool,
    /// Number of lines in the block (entities with an address).
    pub lines: usize,
    /// Alias targets with no matching entity.
    pub dangling: Vec<String>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// New text written to the store.
    Written,
    /// Update requested but the text was already current.
    Unchanged,
    /// Update not requested.
    Skipped,
    /// Writing disallowed by the environment; text printed instead.
    Blocked,
}

/// Resolve, render and merge. Pure.
pub fn plan(entities: &[Entity], aliases: &AliasMap, current: &str) -> SyncPlan {
    let expanded = resolve(entities, aliases);
    let block = render(&expanded);
    let hosts = merge(current, &block);

    SyncPlan {
        lines: expanded.iter().filter(|e| e.primary_address().is_some()).count(),
        changed: hosts != current,
        dangling: dangling_targets(entities, aliases)
            .into_iter()
            .map(str::to_string)
            .collect(),
        block,
        hosts,
    }
}

/// Carry out `plan` under `policy`: print to `out` and/or write to `store`.
pub fn apply<S, W>(
    plan: &SyncPlan,
    policy: WritePolicy,
    store: &S,
    out: &mut W,
) -> Result<SyncOutcome>
where
    S: HostsStore + ?Sized,
    W: Write,
{
    if policy.print || policy.write_blocked {
        writeln!(out, "{}", plan.hosts)?;
    }

    if policy.write_blocked {
        return Ok(SyncOutcome::Blocked);
    }
    if !policy.update {
        return Ok(SyncOutcome::Skipped);
    }
    if !plan.changed {
        info!(location = %store.location(), "hosts file already up to date");
        return Ok(SyncOutcome::Unchanged);
    }

    store.write(&plan.hosts)?;
    info!(location = %store.location(), lines = plan.lines, "hosts file updated");
    Ok(SyncOutcome::Written)
}

/// Read the store, plan against its text, and apply.
pub fn sync<S, W>(
    entities: &[Entity],
    aliases: &AliasMap,
    policy: WritePolicy,
    store: &S,
    out: &mut W,
) -> Result<SyncOutcome>
where
    S: HostsStore + ?Sized,
    W: Write,
{
    let current = store.read()?;
    let sync_plan = plan(entities, aliases, &current);
    for target in &sync_plan.dangling {
        debug!(target = %target, "alias target not found, skipping");
    }
    apply(&sync_plan, policy, store, out)
}
