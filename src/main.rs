use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use twigbars::lexer::Tokenizer;
use twigbars::{parser, tree, ComponentHeader, Error, TranspileOptions, Transpiler};

#[derive(Parser)]
#[command(name = "twigbars")]
#[command(version, about = "Transpile Handlebars component templates into Twig", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile a Handlebars template (or JSON node tree) to Twig
    Transpile {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Treat the input as a JSON node tree instead of Handlebars source
        #[arg(long)]
        json_tree: bool,

        /// TOML file with transpile options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Component title; wraps the output in a docblock header
        #[arg(long)]
        title: Option<String>,

        /// Header `@see` URL
        #[arg(long, requires = "title")]
        see: Option<String>,

        /// Header `@version`
        #[arg(long = "component-version", requires = "title")]
        component_version: Option<String>,

        /// Header `@date`
        #[arg(long, requires = "title")]
        date: Option<String>,

        /// Header `@author`
        #[arg(long, requires = "title")]
        author: Option<String>,
    },

    /// Parse a Handlebars template and print the node tree as JSON (debug)
    Parse {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Lex a Handlebars template and print its tokens (debug)
    Lex {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Transpile {
            input,
            json_tree,
            config,
            output,
            title,
            see,
            component_version,
            date,
            author,
        } => {
            let header = title.map(|title| ComponentHeader {
                title,
                see,
                version: component_version,
                date,
                author,
            });
            transpile_command(&input, json_tree, config.as_deref(), output.as_deref(), header)
        }
        Commands::Parse { input } => parse_command(&input),
        Commands::Lex { input } => lex_command(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "twigbars=debug" } else { "twigbars=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("reading stdin")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

/// Adds a `line:col` location to parse errors.
fn locate(err: Error, source: &str, input: &Path) -> anyhow::Error {
    if let Error::Parse { offset, .. } = &err {
        let before = &source[..(*offset).min(source.len())];
        let line = before.matches('\n').count() + 1;
        let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        let location = format!("{}:{}:{}", input.display(), line, col);
        return anyhow::Error::new(err).context(location);
    }
    anyhow::Error::new(err)
}

fn transpile_command(
    input: &Path,
    json_tree: bool,
    config: Option<&Path>,
    output: Option<&Path>,
    header: Option<ComponentHeader>,
) -> Result<()> {
    let options = match config {
        Some(path) => TranspileOptions::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TranspileOptions::default(),
    };

    let source = read_input(input)?;
    let nodes = if json_tree {
        tree::nodes_from_json(&source)?
    } else {
        parser::Parser::new(&source)
            .and_then(|p| p.with_max_depth(options.max_depth).parse())
            .map_err(|e| locate(e, &source, input))?
    };
    tracing::debug!(nodes = nodes.len(), "parsed template");

    let body = Transpiler::new(options).render(&nodes)?;
    let rendered = match header {
        Some(header) => twigbars::component_document(&header, &body),
        None => body,
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote twig template");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn parse_command(input: &Path) -> Result<()> {
    let source = read_input(input)?;
    let nodes = parser::parse(&source).map_err(|e| locate(e, &source, input))?;
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

fn lex_command(input: &Path) -> Result<()> {
    let source = read_input(input)?;
    let lexemes = Tokenizer::new(&source)
        .tokenize()
        .map_err(|e| locate(e, &source, input))?;
    for lexeme in lexemes {
        println!("{:>6}  {:?}", lexeme.offset, lexeme.token);
    }
    Ok(())
}
