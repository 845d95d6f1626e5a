use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use command::domain::{ComparePayload, ListPayload, SearchPayload, ShowPayload};
use command::CommandRequest;
use config::CatalogConfig;
use materials_draft::DraftInput;
use materials_protocol::{serialize_json, serialize_json_pretty};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

pub mod browse;
pub mod catalog;
pub mod command;
pub mod config;
mod render;

use catalog::Catalog;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serialize_json_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "materials")]
#[command(about = "Browse, search and compare engineering materials", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./materials.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset path or http(s) URL (overrides config and MATERIALS_DATASET)
    #[arg(long, global = true)]
    dataset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse materials, optionally filtered by type and search query
    List(ListArgs),

    /// List material types with counts
    Types(JsonFlag),

    /// Show one material card
    Show(ShowArgs),

    /// Fuzzy search over name, short name, type and designation
    Search(SearchArgs),

    /// Compare up to the configured number of materials side by side
    Compare(CompareArgs),

    /// Build a contribution-ready record from a form file
    Draft(DraftArgs),

    /// Show catalog and dataset information
    Info(JsonFlag),

    /// Execute a JSON Command API request
    Command(CommandArgs),
}

#[derive(Args)]
struct JsonFlag {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ListArgs {
    /// Only materials of this type
    #[arg(long = "type")]
    material_type: Option<String>,

    /// Fuzzy search query
    #[arg(long)]
    query: Option<String>,

    /// Number of extra pages to reveal
    #[arg(long, default_value_t = 0)]
    more: usize,

    /// Viewport width used to pick the page size
    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    id: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    query: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CompareArgs {
    /// Material ids, in selection order
    #[arg(conflicts_with_all = ["link", "pick"])]
    ids: Vec<String>,

    /// Restore from a deep link such as /compare?compare=1,2
    #[arg(long)]
    link: Option<String>,

    /// List picker candidates matching this filter instead of comparing
    #[arg(long)]
    pick: Option<String>,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DraftArgs {
    /// Form JSON file, or `-` for stdin
    #[arg(long)]
    form: PathBuf,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

impl Commands {
    fn json_output(&self) -> bool {
        match self {
            Commands::List(args) => args.json,
            Commands::Types(args) | Commands::Info(args) => args.json,
            Commands::Show(args) => args.json,
            Commands::Search(args) => args.json,
            Commands::Compare(args) => args.json,
            Commands::Draft(args) => args.json,
            Commands::Command(_) => true,
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    if cli.command.json_output() {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let workdir = env::current_dir().context("Failed to resolve working directory")?;
    let config = CatalogConfig::resolve(cli.config.as_deref(), &workdir, cli.dataset.as_deref())?;
    let mut catalog = Catalog::open(config).await?;

    match cli.command {
        Commands::List(args) => run_list(&mut catalog, args)?,
        Commands::Types(args) => {
            let out = catalog.types();
            if args.json {
                print_json(&out)?;
            } else {
                print_stdout(&render::types(&out))?;
            }
        }
        Commands::Show(args) => {
            let out = catalog.show(ShowPayload { id: args.id })?;
            if args.json {
                print_json(&out.material)?;
            } else {
                print_stdout(out.summary.trim_end())?;
            }
        }
        Commands::Search(args) => {
            let out = catalog.search(SearchPayload { query: args.query });
            if args.json {
                print_json(&out)?;
            } else {
                print_stdout(&render::search(&out))?;
            }
        }
        Commands::Compare(args) => run_compare(&catalog, args)?,
        Commands::Draft(args) => run_draft(&catalog, args)?,
        Commands::Info(args) => {
            let out = catalog.info();
            if args.json {
                print_json(&out)?;
            } else {
                print_stdout(&render::info(&out))?;
            }
        }
        Commands::Command(args) => run_command(&mut catalog, args)?,
    }

    Ok(())
}

fn run_list(catalog: &mut Catalog, args: ListArgs) -> Result<()> {
    let out = catalog.list(ListPayload {
        material_type: args.material_type,
        query: args.query,
        more: args.more,
        width: args.width,
    });
    if args.json {
        print_json(&out)
    } else {
        print_stdout(&render::list(&out))
    }
}

fn run_compare(catalog: &Catalog, args: CompareArgs) -> Result<()> {
    if let Some(filter) = &args.pick {
        let candidates = materials_compare::picker_candidates(catalog.store().materials(), filter);
        if args.json {
            return print_json(&candidates);
        }
        let lines: Vec<String> = candidates.into_iter().map(render::material_line).collect();
        return print_stdout(&lines.join("\n"));
    }

    if args.ids.is_empty() && args.link.is_none() {
        bail!("Nothing to compare: pass material ids or --link");
    }

    let out = catalog.compare(ComparePayload {
        ids: args.ids,
        link: args.link,
    })?;
    if args.json {
        print_json(&out)
    } else {
        print_stdout(&render::compare(&out))
    }
}

fn run_draft(catalog: &Catalog, args: DraftArgs) -> Result<()> {
    let raw = if args.form.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read form from stdin")?;
        buffer
    } else {
        fs::read_to_string(&args.form)
            .with_context(|| format!("Failed to read form {}", args.form.display()))?
    };
    let input: DraftInput = serde_json::from_str(&raw).context("Invalid form JSON")?;
    let out = catalog.draft(input)?;

    if args.json {
        return print_json(&out);
    }
    print_stdout(&out.json)?;
    eprintln!();
    eprintln!("How to submit your material:");
    for (index, step) in out.instructions.iter().enumerate() {
        eprintln!("{}. {step}", index + 1);
    }
    Ok(())
}

fn run_command(catalog: &mut Catalog, args: CommandArgs) -> Result<()> {
    let raw = read_request(&args)?;
    let request: CommandRequest =
        serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")?;

    let response = command::execute(catalog, request);

    let output = if args.pretty {
        serialize_json_pretty(&response)?
    } else {
        serialize_json(&response)?
    };
    print_stdout(&output)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_request(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}
