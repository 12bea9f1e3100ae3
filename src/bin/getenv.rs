//! getenv CLI: check how the current environment resolves.

use std::any::Any;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use getenv_rs::lookup;
use getenv_rs::telemetry::{TracingConfig, init_tracing};
use getenv_rs::value::{parse_bool, parse_duration, parse_float64, parse_int, parse_int64, split_list};
use getenv_rs::{Registry, Resolved};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "getenv", about = "Resolve typed environment variables")]
struct Cli {
    /// Log each variable as it resolves
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register variables and resolve them in one batch
    Check {
        /// Variables as NAME:KIND[=DEFAULT], e.g. PORT:int=8000
        #[arg(required = true)]
        specs: Vec<VarSpec>,
        /// Reject variables that are empty with an empty default
        #[arg(long)]
        strict: bool,
        /// Level names and ranks for log-level variables
        #[arg(long, default_value = "TRACE=0,DEBUG=1,INFO=2,WARN=3,ERROR=4")]
        levels: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read a single variable immediately, without registering it
    Lookup {
        name: String,
        #[arg(long, value_enum, default_value_t = LookupKind::String)]
        kind: LookupKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Bool,
    Int,
    Int64,
    Float64,
    String,
    Duration,
    TcpAddr,
    StringSlice,
    LogLevel,
    Secret,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LookupKind {
    String,
    Bool,
    Int,
    Duration,
}

#[derive(Debug, Clone)]
struct VarSpec {
    name: String,
    kind: Kind,
    default: Option<String>,
}

impl FromStr for VarSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected NAME:KIND[=DEFAULT], got {s:?}"))?;
        let (kind, default) = match rest.split_once('=') {
            Some((kind, default)) => (kind, Some(default.to_string())),
            None => (rest, None),
        };
        if name.is_empty() {
            return Err(format!("missing variable name in {s:?}"));
        }
        Ok(Self {
            name: name.to_string(),
            kind: Kind::from_str(kind, true)?,
            default,
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    strict: bool,
    values: &'a BTreeMap<String, Resolved>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(TracingConfig {
        default_filter: if cli.verbose { "getenv_rs=trace" } else { "warn" }.to_string(),
        compact: true,
    })?;

    match cli.command {
        Command::Check {
            specs,
            strict,
            levels,
            json,
        } => cmd_check(&specs, strict, &levels, json),
        Command::Lookup { name, kind } => cmd_lookup(&name, kind),
    }
}

fn cmd_check(specs: &[VarSpec], strict: bool, levels: &str, json: bool) -> anyhow::Result<()> {
    let levels = parse_levels(levels)?;
    let mut registry = if strict {
        Registry::strict()
    } else {
        Registry::new()
    };

    // The registry only references handles weakly; keep them alive here.
    let mut handles: Vec<Box<dyn Any>> = Vec::with_capacity(specs.len());
    for spec in specs {
        let handle = register(&mut registry, spec, &levels)
            .with_context(|| format!("bad default for {}", spec.name))?;
        handles.push(handle);
    }

    registry.parse()?;
    let values = registry.snapshot();

    if json {
        let report = Report {
            strict,
            values: &values,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let width = values.keys().map(String::len).max().unwrap_or(0).max(4);
    println!("{:<width$}  VALUE", "NAME");
    println!("{}", "-".repeat(width + 40));
    for (name, value) in &values {
        println!("{name:<width$}  {value}");
    }
    Ok(())
}

fn register(
    registry: &mut Registry,
    spec: &VarSpec,
    levels: &[(String, isize)],
) -> anyhow::Result<Box<dyn Any>> {
    let name = spec.name.clone();
    let default = spec.default.as_deref();

    let handle: Box<dyn Any> = match spec.kind {
        Kind::Bool => {
            let v = default.map(parse_bool).transpose()?.unwrap_or_default();
            Box::new(registry.bool(name, v))
        }
        Kind::Int => {
            let v = default.map(parse_int).transpose()?.unwrap_or_default();
            Box::new(registry.int(name, v))
        }
        Kind::Int64 => {
            let v = default.map(parse_int64).transpose()?.unwrap_or_default();
            Box::new(registry.int64(name, v))
        }
        Kind::Float64 => {
            let v = default.map(parse_float64).transpose()?.unwrap_or_default();
            Box::new(registry.float64(name, v))
        }
        Kind::String => Box::new(registry.string(name, default.unwrap_or_default())),
        Kind::Duration => {
            let v = default
                .map(parse_duration)
                .transpose()?
                .unwrap_or(Duration::ZERO);
            Box::new(registry.duration(name, v))
        }
        Kind::TcpAddr => Box::new(registry.tcp_addr(name, default.unwrap_or_default())),
        Kind::StringSlice => {
            Box::new(registry.string_slice(name, split_list(default.unwrap_or_default())))
        }
        Kind::LogLevel => {
            let rank = match default {
                Some(raw) => level_rank(levels, raw)?,
                None => levels.iter().map(|(_, rank)| *rank).min().unwrap_or_default(),
            };
            Box::new(registry.log_level(name, levels.iter().map(|(k, v)| (k, *v)), rank))
        }
        Kind::Secret => Box::new(registry.secret(name, default.unwrap_or_default())),
    };
    Ok(handle)
}

fn parse_levels(raw: &str) -> anyhow::Result<Vec<(String, isize)>> {
    split_list(raw)
        .into_iter()
        .map(|pair| -> anyhow::Result<(String, isize)> {
            let (name, rank) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected LEVEL=RANK, got {pair:?}"))?;
            Ok((name.trim().to_string(), parse_int(rank.trim())?))
        })
        .collect()
}

fn level_rank(levels: &[(String, isize)], raw: &str) -> anyhow::Result<isize> {
    if let Ok(rank) = parse_int(raw) {
        return Ok(rank);
    }
    levels
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw.trim()))
        .map(|(_, rank)| *rank)
        .ok_or_else(|| anyhow!("unknown log level {raw:?}"))
}

fn cmd_lookup(name: &str, kind: LookupKind) -> anyhow::Result<()> {
    match kind {
        LookupKind::String => println!("{}", lookup::get_string_or_error(name)?),
        LookupKind::Bool => println!("{}", lookup::get_bool_or_error(name)?),
        LookupKind::Int => println!("{}", lookup::get_int_or_error(name)?),
        LookupKind::Duration => println!("{:?}", lookup::get_duration_or_error(name)?),
    }
    Ok(())
}
