use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use argsift::args::{Session, StorageMode};
use argsift::config::Config;
use argsift::logging::init_tracing;

/// Show how argsift classifies an argument list.
#[derive(Debug, Parser)]
#[command(name = "argsift", version)]
struct Cli {
    /// Config file (default: the user config directory's argsift/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured storage mode
    #[arg(long, value_enum)]
    storage: Option<StorageArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Program name followed by the arguments to classify
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StorageArg {
    Static,
    Dynamic,
}

impl From<StorageArg> for StorageMode {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::Static => StorageMode::Static,
            StorageArg::Dynamic => StorageMode::Dynamic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    program: Option<&'a str>,
    positionals: Vec<&'a str>,
    flags: Vec<&'a str>,
    params: Vec<ParamReport<'a>>,
    response_files: Vec<String>,
    diagnostics: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ParamReport<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> Report<'a> {
    fn from_session(session: &'a Session) -> Self {
        Self {
            program: session.program_name(),
            positionals: session.positionals().collect(),
            flags: session.flags().collect(),
            params: session
                .params()
                .map(|(name, value)| ParamReport { name, value })
                .collect(),
            response_files: session
                .response_files()
                .map(|p| p.display().to_string())
                .collect(),
            diagnostics: session.diagnostics().iter().map(|d| d.to_string()).collect(),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("program: {}\n", self.program.unwrap_or("<none>")));
        for (i, arg) in self.positionals.iter().enumerate() {
            out.push_str(&format!("positional[{}]: {}\n", i, arg));
        }
        for flag in &self.flags {
            out.push_str(&format!("flag: {}\n", flag));
        }
        for param in &self.params {
            out.push_str(&format!("param: {} = {}\n", param.name, param.value));
        }
        for path in &self.response_files {
            out.push_str(&format!("response file: {}\n", path));
        }
        for diagnostic in &self.diagnostics {
            out.push_str(&format!("warning: {}\n", diagnostic));
        }
        out
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading default config")?,
    };
    if let Some(storage) = cli.storage {
        config.storage = storage.into();
    }
    Ok(config)
}

fn render(cli: &Cli, config: &Config) -> anyhow::Result<String> {
    let mut session = Session::builder().config(config).build();
    session.parse(cli.args.iter().cloned());

    let report = Report::from_session(&session);
    match cli.format {
        Format::Text => Ok(report.to_text()),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(?config, "Using config");

    print!("{}", render(&cli, &config)?);
    Ok(())
}
