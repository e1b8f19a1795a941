// ABOUTME: Main entry point for the quickslides program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quickslides::store::{load_or_default, DocumentStore};
use quickslides::{share, utils};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slides of a document with their offsets and variants
    List(ListArgs),

    /// Print the slide that owns a text offset
    Locate(LocateArgs),

    /// Print the selection that focuses a slide
    Select(SelectArgs),

    /// Render a document into a standalone HTML deck
    Html(HtmlArgs),

    /// Watch a document and re-render it on every change
    Watch(WatchArgs),

    /// Print a share URL carrying the document
    Share(ShareArgs),

    /// Decode a share URL or token back into a document
    Unshare(UnshareArgs),

    /// Copy a file into the document store
    Import(InputArgs),

    /// Write the stored document to a file
    Export(ExportArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Path to the document; the stored document is used when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LocateArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Byte offset into the document
    #[arg(long)]
    offset: usize,
}

#[derive(Args)]
struct SelectArgs {
    #[command(flatten)]
    source: InputArgs,

    /// 1-based slide number
    #[arg(long)]
    slide: usize,
}

#[derive(Args)]
struct HtmlArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Render only this 1-based slide
    #[arg(long)]
    slide: Option<usize>,
}

#[derive(Args)]
struct WatchArgs {
    /// Path to the document file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Serve a live preview over HTTP
    #[arg(long)]
    serve: bool,

    /// Port for the preview server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args)]
struct ShareArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Base URL of the presenter
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,
}

#[derive(Args)]
struct UnshareArgs {
    /// A share URL or a bare token
    link: String,

    /// Write the decoded document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Store the decoded document, replacing the current one
    #[arg(long)]
    save: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Output path; defaults to a timestamped file in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn read_document(source: &InputArgs, config: &quickslides::Config) -> anyhow::Result<String> {
    match &source.input {
        Some(path) => Ok(utils::import_document(path)?),
        None => {
            let store = quickslides::FileStore::new(&config.store_dir);
            Ok(load_or_default(&store, quickslides::DEFAULT_DOCUMENT)?)
        }
    }
}

fn run(command: Commands, config: &quickslides::Config) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => {
            let document = read_document(&args.source, config)?;
            let slides = quickslides::segment(&document);
            if args.json {
                let listing: Vec<serde_json::Value> = slides
                    .iter()
                    .map(|span| {
                        serde_json::json!({
                            "start": span.start,
                            "end": span.end,
                            "text": span.text,
                            "content": quickslides::classify(&span.text),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for (index, span) in slides.iter().enumerate() {
                    let variant = quickslides::classify(&span.text);
                    let first_line = span.text.lines().next().unwrap_or_default();
                    println!(
                        "{:>3}  {:>6}..{:<6}  {:<12}  {}",
                        index + 1,
                        span.start,
                        span.end,
                        variant.name(),
                        first_line
                    );
                }
            }
            Ok(())
        }
        Commands::Locate(args) => {
            let document = read_document(&args.source, config)?;
            let slides = quickslides::segment(&document);
            if slides.is_empty() {
                anyhow::bail!("Document has no slides");
            }
            let index = quickslides::offset_to_slide_index(args.offset, &slides);
            println!("{}", index + 1);
            Ok(())
        }
        Commands::Select(args) => {
            let document = read_document(&args.source, config)?;
            let index = args.slide.saturating_sub(1);
            let selection = quickslides::slide_index_to_selection(index, &document)
                .context("Document has no slides")?;
            println!("{}", serde_json::to_string(&selection)?);
            Ok(())
        }
        Commands::Html(args) => {
            let document = read_document(&args.source, config)?;
            let renderer = quickslides::ComrakRenderer::default();
            let html_content = match args.slide {
                Some(number) => {
                    quickslides::generate_slide_page(&document, Some(number), &renderer)
                }
                None => quickslides::generate_deck(&document, &renderer),
            };
            quickslides::write_html_to_file(&html_content, &args.output)?;
            println!("HTML generated successfully: {:?}", args.output);
            Ok(())
        }
        Commands::Watch(args) => {
            let watch_config = quickslides::WatchConfig {
                document_path: args.input,
                html_output: args.output,
                debounce_ms: config.debounce_ms,
                serve: args.serve,
                port: args.port.unwrap_or(config.port),
            };
            Ok(quickslides::watch_document(watch_config)?)
        }
        Commands::Share(args) => {
            let document = read_document(&args.source, config)?;
            let url = share::share_url(&args.base_url, &document)?;
            println!("{}", url);
            Ok(())
        }
        Commands::Unshare(args) => {
            let token = if args.link.contains("://") {
                share::token_from_url(&args.link)?.context("URL carries no shared document")?
            } else {
                args.link.clone()
            };
            let document = share::decode(&token)?;
            if args.save {
                let store = quickslides::FileStore::new(&config.store_dir);
                store.save(&document)?;
                println!("Stored shared document in {:?}", store.path());
            }
            match &args.output {
                Some(path) => utils::export_document(&document, path)?,
                None if !args.save => print!("{}", document),
                None => {}
            }
            Ok(())
        }
        Commands::Import(args) => {
            let path = args.input.context("--input is required for import")?;
            let document = utils::import_document(&path)?;
            let store = quickslides::FileStore::new(&config.store_dir);
            store.save(&document)?;
            println!(
                "Imported {} slides into {:?}",
                quickslides::segment::slide_count(&document),
                store.path()
            );
            Ok(())
        }
        Commands::Export(args) => {
            let store = quickslides::FileStore::new(&config.store_dir);
            let document = load_or_default(&store, quickslides::DEFAULT_DOCUMENT)?;
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(utils::export_file_name(&chrono::Local::now())));
            utils::export_document(&document, &path)?;
            println!("Exported document to {:?}", path);
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = quickslides::Config::from_env();

    let result = match cli.command {
        Some(command) => run(command, &config),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
