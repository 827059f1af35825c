//! Command-line front end.
//!
//! Every command runs against a [`Directory`] populated from manifests, and
//! renders its output as a `String` so harnesses can call [`execute`]
//! without spawning the binary.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use supports_core::config::Config;
use supports_core::{Directory, FeatureValue, Operator, Query};
use supports_manifest::{ApplyReport, Manifest};

/// Where `--debug` sends tracing output.
pub const DEBUG_LOG_PATH: &str = "/tmp/supports-debug.log";

/// First line written to the debug log.
pub fn debug_log_banner() -> String {
    format!("supports debug log started; tail -f {DEBUG_LOG_PATH}")
}

#[derive(Debug, Parser)]
#[command(name = "supports", about = "Query feature-support declarations")]
pub struct Cli {
    /// Write debug logs to /tmp/supports-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// Declaration manifest to load (repeatable). Defaults to the
    /// `[manifest] paths` entry of the config file.
    #[arg(long = "manifest", short = 'm', global = true)]
    pub manifests: Vec<PathBuf>,

    /// Config file to use instead of ~/.config/supports/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered types.
    Types,
    /// List items of a type that declare at least one feature.
    Items { kind: String },
    /// Print every feature an item declares, as JSON.
    Show { kind: String, item: String },
    /// Print whether an item declares a feature.
    Has {
        kind: String,
        item: String,
        feature: String,
    },
    /// Print the value an item declares for a feature, or `null`.
    Get {
        kind: String,
        item: String,
        feature: String,
    },
    /// Print the items matching a query, one per line.
    Query(QueryArgs),
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
    pub kind: String,

    /// Feature names. One name is a single-feature query; several are
    /// combined with the operator.
    pub features: Vec<String>,

    /// `feature=value` pair (repeatable). The value is parsed as JSON, falling
    /// back to a plain string.
    #[arg(long = "filter", short = 'f', conflicts_with_all = ["features", "json"])]
    pub filters: Vec<String>,

    /// Raw JSON query: a string, an array of strings, or an object.
    #[arg(long, conflicts_with = "features")]
    pub json: Option<String>,

    /// and | or | not (case-insensitive). Defaults to the config value.
    #[arg(long = "op", short = 'o')]
    pub op: Option<String>,
}

/// Load the config named by `--config`, or the user config file.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Populate `directory` from the command-line manifests, or the configured
/// ones when none were given.
pub fn load_manifests(
    cli: &Cli,
    config: &Config,
    directory: &Directory,
) -> anyhow::Result<ApplyReport> {
    let paths = if cli.manifests.is_empty() {
        &config.manifest.paths
    } else {
        &cli.manifests
    };
    let mut report = ApplyReport::default();
    for path in paths {
        let manifest = Manifest::load(path)
            .with_context(|| format!("loading manifest {}", path.display()))?;
        report += manifest.apply(directory);
    }
    Ok(report)
}

/// Run `cli.command` against `directory` and render its output.
pub fn execute(cli: &Cli, config: &Config, directory: &Directory) -> anyhow::Result<String> {
    let out = match &cli.command {
        Command::Types => lines(directory.registered_types()),
        Command::Items { kind } => lines(lookup(directory, kind)?.keys()),
        Command::Show { kind, item } => {
            serde_json::to_string_pretty(&lookup(directory, kind)?.all(item))?
        }
        Command::Has {
            kind,
            item,
            feature,
        } => lookup(directory, kind)?.has(item, feature).to_string(),
        Command::Get {
            kind,
            item,
            feature,
        } => lookup(directory, kind)?
            .get(item, feature)
            .map(|value| value.to_json())
            .unwrap_or(serde_json::Value::Null)
            .to_string(),
        Command::Query(args) => {
            let op = args
                .op
                .as_deref()
                .map(Operator::from)
                .unwrap_or(config.query.default_operator);
            let registry = lookup(directory, &args.kind)?;
            let items = match &args.json {
                Some(raw) => {
                    let value: serde_json::Value =
                        serde_json::from_str(raw).context("--json is not valid JSON")?;
                    registry.select_json(&value, op)?
                }
                None => registry.select(&build_query(args)?, op),
            };
            lines(items)
        }
    };
    Ok(out)
}

/// Look up a type without creating it, so a typo is reported instead of
/// silently answering from an empty registry.
fn lookup(
    directory: &Directory,
    kind: &str,
) -> anyhow::Result<std::sync::Arc<supports_core::Registry>> {
    anyhow::ensure!(directory.contains(kind), "unknown type: {kind}");
    Ok(directory.instance(kind))
}

fn build_query(args: &QueryArgs) -> anyhow::Result<Query> {
    if !args.filters.is_empty() {
        let filter = args
            .filters
            .iter()
            .map(|pair| parse_filter(pair))
            .collect::<anyhow::Result<_>>()?;
        return Ok(Query::ByFilter(filter));
    }
    match args.features.as_slice() {
        [] => anyhow::bail!("query needs a feature name, --filter, or --json"),
        [single] => Ok(Query::ByName(single.clone())),
        many => Ok(Query::ByNames(many.to_vec())),
    }
}

fn parse_filter(pair: &str) -> anyhow::Result<(String, FeatureValue)> {
    let (feature, raw) = pair
        .split_once('=')
        .with_context(|| format!("filter {pair:?} is not feature=value"))?;
    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    Ok((feature.to_string(), FeatureValue::from_declared(value)))
}

fn lines(items: Vec<String>) -> String {
    items.join("\n")
}
