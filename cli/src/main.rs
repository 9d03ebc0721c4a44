use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use warnkit_core::{
    get_warnings, group_warnings, parse_warnings, warn, HelpUrlConfig, Warning, WarningFilter,
    WarningInit, WarningKind, WarningReport, WarningSpec,
};

#[derive(Parser)]
#[command(name = "warnkit")]
#[command(about = "Compose structured warnings and report on registered ones")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Knowledge-base root for help URLs (defaults to $WARNKIT_KB_ROOT)
    #[arg(long, global = true)]
    kb_root: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single warning and print it
    Compose {
        /// Warning kind
        #[arg(value_enum)]
        kind: KindArg,

        /// Literal message (fields are then stored as data only)
        #[arg(short, long)]
        message: Option<String>,

        /// Name of the affected feature
        #[arg(long)]
        feature_name: Option<String>,

        /// Type of the affected feature
        #[arg(long)]
        feature_type: Option<String>,

        /// Feature to use instead (deprecation only)
        #[arg(long)]
        alternative_feature_name: Option<String>,

        /// URL with more information
        #[arg(long)]
        about_url: Option<String>,

        /// Extra data as KEY=VALUE; VALUE is parsed as JSON, else kept as a string
        #[arg(long = "data", value_parser = parse_data_pair)]
        data: Vec<(String, Value)>,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Register warnings from a JSON file and report on them
    Report {
        /// JSON array of warning specs
        input: PathBuf,

        /// Only report warnings of this kind
        #[arg(long, value_enum, conflicts_with = "contains")]
        kind: Option<KindArg>,

        /// Only report warnings whose message contains this text
        #[arg(long)]
        contains: Option<String>,

        /// Group warnings by kind instead of listing them
        #[arg(long, conflicts_with_all = ["kind", "contains"])]
        group: bool,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum KindArg {
    Base,
    PendingDeprecation,
    Deprecation,
    Stability,
}

impl From<KindArg> for WarningKind {
    fn from(val: KindArg) -> Self {
        match val {
            KindArg::Base => WarningKind::Base,
            KindArg::PendingDeprecation => WarningKind::PendingDeprecation,
            KindArg::Deprecation => WarningKind::Deprecation,
            KindArg::Stability => WarningKind::Stability,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Text,
    Pretty,
    Compact,
}

fn parse_data_pair(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for reports
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = cli
        .kb_root
        .map(HelpUrlConfig::new)
        .unwrap_or_else(HelpUrlConfig::from_env);
    tracing::debug!(kb_root = %config.kb_root, "help URL root");

    match cli.command {
        Commands::Compose {
            kind,
            message,
            feature_name,
            feature_type,
            alternative_feature_name,
            about_url,
            data,
            output,
            format,
        } => {
            let mut init = WarningInit {
                feature_name,
                feature_type,
                alternative_feature_name,
                about_url,
                ..WarningInit::default()
            };
            init.extra.extend(data);

            let warning = WarningSpec {
                kind: kind.into(),
                message,
                init,
            }
            .try_into_warning()
            .context("Failed to compose warning")?;

            write_warnings(&[Arc::new(warning)], &config, output.as_ref(), format)?;
        }
        Commands::Report {
            input,
            kind,
            contains,
            group,
            output,
            format,
        } => {
            let content = fs::read_to_string(&input)
                .with_context(|| format!("Failed to open input file: {}", input.display()))?;
            let warnings = parse_warnings(&content)
                .map_err(|e| anyhow::Error::from(e).context("Failed to load warnings"))?;

            tracing::debug!(count = warnings.len(), input = %input.display(), "loaded warnings");
            for warning in warnings {
                warn(warning);
            }

            if group {
                write_groups(&config, output.as_ref(), format)?;
            } else {
                let filter = match (kind, contains) {
                    (Some(kind), _) => Some(WarningFilter::Kind(kind.into())),
                    (None, Some(needle)) => Some(WarningFilter::Message(needle)),
                    (None, None) => None,
                };
                let selected = get_warnings(filter.as_ref());
                write_warnings(&selected, &config, output.as_ref(), format)?;
            }
        }
    }

    Ok(())
}

fn open_writer(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    })
}

fn write_warnings(
    warnings: &[Arc<Warning>],
    config: &HelpUrlConfig,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer = open_writer(path)?;

    match format {
        OutputFormat::Text => {
            for warning in warnings {
                writeln!(writer, "{warning}").context("Failed to write warning")?;
                writeln!(writer, "  help: {}", warning.help_url_with(config))
                    .context("Failed to write warning")?;
            }
        }
        OutputFormat::Pretty | OutputFormat::Compact => {
            let reports: Vec<WarningReport> =
                warnings.iter().map(|w| w.to_report(config)).collect();
            write_json(&mut writer, &reports, format)?;
        }
    }

    writer.flush().context("Failed to flush output")?;
    Ok(())
}

fn write_groups(config: &HelpUrlConfig, path: Option<&PathBuf>, format: OutputFormat) -> Result<()> {
    let groups = group_warnings();
    let mut writer = open_writer(path)?;

    match format {
        OutputFormat::Text => {
            for (name, members) in &groups {
                writeln!(writer, "{name}: {}", members.len()).context("Failed to write group")?;
            }
        }
        OutputFormat::Pretty | OutputFormat::Compact => {
            let reports: BTreeMap<&str, Vec<WarningReport>> = groups
                .iter()
                .map(|(name, members)| (*name, members.iter().map(|w| w.to_report(config)).collect()))
                .collect();
            write_json(&mut writer, &reports, format)?;
        }
    }

    writer.flush().context("Failed to flush output")?;
    Ok(())
}

fn write_json<T: serde::Serialize>(
    writer: &mut Box<dyn Write>,
    val: &T,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Compact => {
            serde_json::to_writer(&mut *writer, val).context("Failed to write JSON")?;
        }
        _ => {
            serde_json::to_writer_pretty(&mut *writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;

    Ok(())
}
