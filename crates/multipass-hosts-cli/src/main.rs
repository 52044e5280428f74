//! multipass-hosts - keep the hosts file in step with Multipass
//!
//! Lists instances with `multipass list`, expands the aliases configured in
//! `~/.multipass-hosts.json`, and rewrites the `#multipass-hosts` block of
//! the hosts file. Everything outside that block is left alone.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use multipass_client::{
    integrity_protection_enabled, to_entities, InstanceSource, MultipassCli, MULTIPASS_BINARY,
};
use multipass_hosts_core::{
    default_config_path, default_hosts_path, init_tracing, sync, AliasConfig, FsHostsStore,
    HostsStore, SyncOutcome, WritePolicy,
};
use tracing::{debug, info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "multipass-hosts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Write Multipass instance addresses into the hosts file", long_about = None)]
struct Cli {
    /// Print the resulting hosts file to stdout
    #[arg(long)]
    print: bool,

    /// Update the hosts file (use --update=false to skip writing)
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    update: bool,

    /// Hosts file to update
    #[arg(long, env = "MULTIPASS_HOSTS_FILE", default_value_os_t = default_hosts_path())]
    hosts_file: PathBuf,

    /// Alias config (default: ~/.multipass-hosts.json)
    #[arg(long, env = "MULTIPASS_HOSTS_CONFIG")]
    config: Option<PathBuf>,

    /// Multipass binary name or path
    #[arg(long, env = "MULTIPASS_BIN", default_value = MULTIPASS_BINARY)]
    multipass: String,

    /// Seconds to wait for external commands
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn policy(&self, write_blocked: bool) -> WritePolicy {
        WritePolicy {
            print: self.print,
            update: self.update,
            write_blocked,
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => default_config_path().context("read config"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let outcome = run(&cli).await?;
    debug!(?outcome, "done");
    Ok(())
}

async fn run(cli: &Cli) -> Result<SyncOutcome> {
    let timeout = Duration::from_secs(cli.timeout);

    let source = MultipassCli::new(&cli.multipass).with_timeout(timeout);
    let instances = source
        .list_instances()
        .await
        .context("failed to list multipass instances")?;
    let entities = to_entities(instances);

    let config = AliasConfig::load(&cli.config_path()?)?;

    let store = FsHostsStore::new(&cli.hosts_file);

    let write_blocked = integrity_protection_enabled(timeout)
        .await
        .context("failed to run csrutil")?;
    if write_blocked {
        warn!(
            location = %store.location(),
            "System Integrity Protection is enabled, unable to update hosts file"
        );
    }

    let mut stdout = std::io::stdout().lock();
    let outcome = sync(
        &entities,
        &config.aliases,
        cli.policy(write_blocked),
        &store,
        &mut stdout,
    )?;
    if outcome == SyncOutcome::Skipped {
        info!("hosts file not updated (--update=false)");
    }
    Ok(outcome)
}
