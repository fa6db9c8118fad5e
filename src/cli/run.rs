//! Command dispatch.
//!
//! Each command returns a [`CommandOutput`] that the reporter prints; no
//! command prints on its own.

use std::{io, path::PathBuf};

use anyhow::{Context, Result, bail};

use super::args::{Arguments, Command, CommonArgs, ConfigAction};
use crate::config::{
    Config, ConfigError, ConfigSource, fetch_config, load_config, save_config,
};
use crate::core::{analyze_tree, manifest::load_manifest, types::SourceFile};
use crate::generate::{self, GenerateOptions, GenerateSummary};

#[derive(Debug)]
pub enum CommandOutput {
    Generate(GenerateSummary),
    Clean(Vec<PathBuf>),
    Scan {
        files: Vec<SourceFile>,
        json: bool,
    },
    ConfigUpdated {
        source: ConfigSource,
        changed: bool,
    },
    ConfigList {
        source: ConfigSource,
        config: Config,
    },
}

pub fn run(Arguments { command, common }: Arguments) -> Result<CommandOutput> {
    let source = config_source(&common);
    match command {
        Some(Command::Generate(args)) => {
            let config = load_config(&source).config;
            let options = GenerateOptions {
                output: args.output,
                runtime_import: args.runtime,
                ..GenerateOptions::new(&common.root)
            };
            let summary = generate::generate(&options, &config)?;
            Ok(CommandOutput::Generate(summary))
        }
        Some(Command::Clean) => Ok(CommandOutput::Clean(generate::clean(&common.root)?)),
        Some(Command::Scan(args)) => {
            let config = load_config(&source).config;
            let manifest = load_manifest(&common.root)?;
            let files = analyze_tree(&common.root, &manifest.module, &config)?;
            Ok(CommandOutput::Scan {
                files,
                json: args.json,
            })
        }
        Some(Command::Config { action }) => run_config(action, source),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

fn config_source(common: &CommonArgs) -> ConfigSource {
    match &common.config {
        Some(value) => ConfigSource::parse(value),
        None => ConfigSource::default_in(&common.root),
    }
}

fn run_config(action: ConfigAction, source: ConfigSource) -> Result<CommandOutput> {
    match action {
        ConfigAction::List => {
            let config = load_config(&source).config;
            Ok(CommandOutput::ConfigList { source, config })
        }
        ConfigAction::Add {
            import_path,
            aliases,
        } => {
            let mut config = current_config(&source)?;
            config.add(&import_path, &aliases);
            save_config(&config, &source)
                .with_context(|| format!("Failed to write config: {}", source))?;
            Ok(CommandOutput::ConfigUpdated {
                source,
                changed: true,
            })
        }
        ConfigAction::Remove {
            import_path,
            aliases,
        } => {
            let mut config = current_config(&source)?;
            let changed = config.remove(&import_path, &aliases);
            if changed {
                save_config(&config, &source)
                    .with_context(|| format!("Failed to write config: {}", source))?;
            }
            Ok(CommandOutput::ConfigUpdated { source, changed })
        }
    }
}

/// Configuration to edit: a missing file starts empty, any other failure
/// is reported instead of being overwritten.
fn current_config(source: &ConfigSource) -> Result<Config> {
    match fetch_config(source) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(err) => Err(err).with_context(|| format!("Failed to load config: {}", source)),
    }
}
