/// Version injected at compile time via CLOUDHYDRATE_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CLOUDHYDRATE_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cloudhydrate::catalog::{self, EntryKind};
use cloudhydrate::config::Config;
use cloudhydrate::model::{Advisory, Hydrator};
use cloudhydrate::payload::{self, Format};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Hydrate cloud API payloads into typed models
#[derive(Parser, Debug)]
#[command(name = "cloudhydrate", version, about, long_about = None)]
struct Args {
    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the known models and polymorphic families
    Models,
    /// Show the attribute map of a model or the subtypes of a family
    Schema {
        /// Model or family name
        name: String,
    },
    /// Hydrate a payload and print the plain rendering
    Hydrate {
        /// Model or family name (defaults to the last one used)
        #[arg(short, long)]
        model: Option<String>,
        /// Payload file; stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Dot path to the items inside a response envelope
        #[arg(short, long, default_value = "")]
        path: String,
        /// Render with wire keys instead of local attribute names
        #[arg(long)]
        wire: bool,
        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<Format>,
        /// Fail when an array attribute receives a non-sequence value
        #[arg(long)]
        reject_non_sequence_arrays: bool,
    },
    /// Show which concrete model a family payload resolves to
    Resolve {
        /// Family name
        family: String,
        /// Payload file; stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Dot path to the items inside a response envelope
        #[arg(short, long, default_value = "")]
        path: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_path.display(), e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cloudhydrate {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cloudhydrate").join("cloudhydrate.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cloudhydrate").join("cloudhydrate.log");
    }
    PathBuf::from("cloudhydrate.log")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let mut config = Config::load();

    match args.command {
        Command::Models => list_models(),
        Command::Schema { name } => show_schema(&name),
        Command::Hydrate {
            model,
            file,
            path,
            wire,
            output,
            reject_non_sequence_arrays,
        } => {
            let name = config.effective_model(model.as_deref()).context(
                "No model given and none used before. Pass --model <NAME> (see `cloudhydrate models`)",
            )?;
            let entry = catalog::get_entry(&name)
                .with_context(|| format!("Unknown model: {name}"))?;

            let raw = payload::load(file.as_deref(), None)?;
            let selected = payload::select(&raw, &path);

            let mut advisories: Vec<Advisory> = Vec::new();
            let options = config.effective_options(reject_non_sequence_arrays);
            let mut cx = Hydrator::new(&mut advisories).with_options(options);

            let mut rendered = Vec::new();
            for item in payload::items(selected) {
                let model = entry.hydrate(item, &mut cx)?;
                let plain = if wire {
                    model.to_plain_wire()
                } else {
                    model.to_plain_hash()
                };
                rendered.push(Value::Object(plain));
            }
            tracing::info!("Hydrated {} {} item(s)", rendered.len(), entry.name);

            let out = match (selected, rendered.len()) {
                (Value::Array(_), _) => Value::Array(rendered),
                (_, 1) => rendered.remove(0),
                _ => Value::Array(rendered),
            };
            let format = config.effective_output(output);
            print!("{}", with_newline(payload::render(&out, format, config.pretty)?));

            report_advisories(&advisories);

            if config.last_model.as_deref() != Some(entry.name) {
                if let Err(e) = config.set_last_model(entry.name) {
                    tracing::warn!("Failed to save config: {}", e);
                }
            }
            Ok(())
        }
        Command::Resolve { family, file, path } => {
            let raw = payload::load(file.as_deref(), None)?;
            let selected = payload::select(&raw, &path);
            for item in payload::items(selected) {
                println!("{}", catalog::resolve_by_name(&family, item)?);
            }
            Ok(())
        }
    }
}

fn list_models() -> Result<()> {
    for entry in catalog::get_catalog().values() {
        match &entry.kind {
            EntryKind::Model { attributes } => {
                println!("{:<40} model   ({} attributes)", entry.name, attributes.len())
            }
            EntryKind::Family { subtypes, .. } => {
                println!("{:<40} family  ({} subtypes)", entry.name, subtypes.len())
            }
        }
    }
    Ok(())
}

fn show_schema(name: &str) -> Result<()> {
    let entry = catalog::get_entry(name).with_context(|| format!("Unknown model: {name}"))?;
    match &entry.kind {
        EntryKind::Model { attributes } => {
            println!("{}", entry.name);
            for attr in attributes.iter() {
                println!("  {:<32} {:<32} {}", attr.local, attr.wire, attr.type_desc());
            }
        }
        EntryKind::Family {
            discriminator,
            subtypes,
            base,
        } => {
            println!("{} (discriminator: {})", entry.name, discriminator);
            for (value, model) in subtypes {
                println!("  {:<32} -> {}", value, model);
            }
            println!("  {:<32} -> {}", "<other>", base);
        }
    }
    Ok(())
}

fn report_advisories(advisories: &[Advisory]) {
    if advisories.is_empty() {
        return;
    }
    eprintln!("{} advisory notice(s):", advisories.len());
    for advisory in advisories {
        eprintln!("  {advisory}");
    }
}

fn with_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
