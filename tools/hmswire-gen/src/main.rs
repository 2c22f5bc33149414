// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use hmswire::idl::{self, ast::Document, SchemaSet};
use hmswire_gen::dump::{SchemaDump, StructDump};
use hmswire_gen::{GenConfig, RustBackend};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hmswire-gen")]
#[command(about = "Generate Rust bindings from Thrift interface definitions")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit Rust structs implementing ThriftStruct
    Rust {
        /// Input IDL file
        #[arg(value_name = "IDL")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Code generator config (TOML, [codegen] table)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Extra derive for every struct (repeatable)
        #[arg(long, value_name = "TRAIT")]
        derive: Vec<String>,

        /// Do not emit Rust enums
        #[arg(long)]
        no_enums: bool,
    },

    /// Parse and resolve an IDL file, print a summary
    Check {
        /// Input IDL file
        #[arg(value_name = "IDL")]
        input: PathBuf,
    },

    /// Print the resolved schemas as JSON
    Dump {
        /// Input IDL file
        #[arg(value_name = "IDL")]
        input: PathBuf,

        /// Only this struct
        #[arg(long = "struct", value_name = "NAME")]
        only: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rust {
            input,
            output,
            config,
            derive,
            no_enums,
        } => cmd_rust(&input, output.as_deref(), config.as_deref(), derive, no_enums),
        Commands::Check { input } => cmd_check(&input),
        Commands::Dump { input, only } => cmd_dump(&input, only.as_deref()),
    }
}

fn load(input: &Path) -> anyhow::Result<(Document, SchemaSet)> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let doc = idl::parse(&source).with_context(|| format!("Failed to parse {}", input.display()))?;
    let set = idl::SchemaGenerator::generate(&doc)
        .with_context(|| format!("Failed to resolve {}", input.display()))?;
    debug!(
        structs = set.len(),
        enums = set.enums().len(),
        "loaded {}",
        input.display()
    );
    Ok((doc, set))
}

fn cmd_rust(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    derives: Vec<String>,
    no_enums: bool,
) -> anyhow::Result<()> {
    let mut gen_config = match config {
        Some(path) => GenConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GenConfig::default(),
    };
    for derive in derives {
        gen_config = gen_config.with_derive(derive);
    }
    if no_enums {
        gen_config.emit_enums = false;
    }
    gen_config.validate()?;

    let (doc, set) = load(input)?;
    let source_name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let code = RustBackend::new(gen_config)
        .with_source(source_name)
        .emit(&doc, &set);

    match output {
        Some(path) => {
            std::fs::write(path, &code)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} structs to {}", set.len(), path.display());
        }
        None => print!("{code}"),
    }
    Ok(())
}

fn cmd_check(input: &Path) -> anyhow::Result<()> {
    let (_, set) = load(input)?;
    let methods: usize = set.services().iter().map(|s| s.methods.len()).sum();
    println!(
        "[OK] {}: {} structs, {} enums, {} services ({} methods)",
        input.display(),
        set.len(),
        set.enums().len(),
        set.services().len(),
        methods
    );
    Ok(())
}

fn cmd_dump(input: &Path, only: Option<&str>) -> anyhow::Result<()> {
    let (_, set) = load(input)?;
    let json = match only {
        Some(name) => {
            let Some(schema) = set.get(name) else {
                bail!("No struct named `{name}` in {}", input.display());
            };
            serde_json::to_string_pretty(&StructDump::from_schema(schema))?
        }
        None => serde_json::to_string_pretty(&SchemaDump::from_set(&set))?,
    };
    println!("{json}");
    Ok(())
}
