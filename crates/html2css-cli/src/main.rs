mod error;
mod source;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use html2css_codegen::{
    css, Breakpoint, CompilerOutput, MediaPolicy, Placeholder, RenderOptions, RuleMapping, SortOrder,
};
use html2css_extract::{ExtractOptions, Extraction, Scanner};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::source::{Document, Location, StyleSources};

#[derive(Parser)]
#[command(name = "html2css")]
#[command(about = "html2css: scaffold a CSS stylesheet from HTML markup")]
#[command(version)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write <stem>.css and one file per breakpoint next to the first input
    Build {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Write output files here instead
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print the base stylesheet and media blocks to stdout
    Print {
        #[command(flatten)]
        generate: GenerateArgs,
    },

    /// List the selectors found in the inputs, without any stylesheet
    Selectors {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the rules of a CSS file sorted by selector
    Sort {
        /// Input .css file
        path: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// HTML files or http(s) URLs
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Leave a tag out of the output (repeatable, or comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Tag exclusion preset
    #[arg(long, value_enum, default_value_t = ExcludePreset::None)]
    exclude_preset: ExcludePreset,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// External stylesheet: a URL, a path, or `none` to disable every source
    #[arg(long)]
    css: Option<String>,

    /// Fetch the hosted template stylesheet when --css is not given
    #[arg(long)]
    default_style: bool,

    /// Ignore <link rel="stylesheet"> targets in the HTML
    #[arg(long)]
    no_links: bool,

    /// Emit a mobile @media block
    #[arg(long)]
    mobile: bool,

    /// Emit a tablet @media block
    #[arg(long)]
    tablet: bool,

    /// Emit a tv @media block
    #[arg(long)]
    tv: bool,

    /// Body of selectors without declarations [comment, empty]
    #[arg(long, default_value = "comment")]
    placeholder: Placeholder,

    /// Selector order [grouped, alphabetical]
    #[arg(long, default_value = "grouped")]
    order: SortOrder,

    /// How @media blocks are filled [auto, filtered, stub]
    #[arg(long, default_value = "auto")]
    media_policy: MediaPolicy,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExcludePreset {
    None,
    Structural,
    Legacy,
}

impl InputArgs {
    fn extract_options(&self) -> ExtractOptions {
        let mut options = match self.exclude_preset {
            ExcludePreset::None => ExtractOptions::all_tags(),
            ExcludePreset::Structural => ExtractOptions::structural(),
            ExcludePreset::Legacy => ExtractOptions::legacy(),
        };
        options.exclude(&self.exclude);
        options
    }
}

impl GenerateArgs {
    fn render_options(&self) -> RenderOptions {
        let requested = [
            (Breakpoint::Mobile, self.mobile),
            (Breakpoint::Tablet, self.tablet),
            (Breakpoint::Tv, self.tv),
        ];
        RenderOptions {
            placeholder: self.placeholder,
            order: self.order,
            media_policy: self.media_policy,
            ..RenderOptions::default()
        }
        .with_breakpoints(requested.into_iter().filter(|(_, on)| *on).map(|(bp, _)| bp))
    }

    fn style_sources(&self) -> StyleSources {
        StyleSources {
            explicit: self.css.clone(),
            default_style: self.default_style,
            follow_links: !self.no_links,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build { generate, out_dir } => cmd_build(&generate, out_dir.as_deref()),
        Command::Print { generate } => cmd_print(&generate),
        Command::Selectors { input } => cmd_selectors(&input),
        Command::Sort { path } => cmd_sort(&path),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(e: CliError) -> ! {
    eprintln!("{e}");
    std::process::exit(1);
}

fn load_documents(inputs: &[String]) -> Vec<Document> {
    inputs
        .iter()
        .map(|input| Document::load(input).unwrap_or_else(|e| fail(e)))
        .collect()
}

fn extract(documents: &[Document], args: &InputArgs) -> Extraction {
    let options = args.extract_options();
    Scanner::extract_documents(documents.iter().map(|d| d.html.as_str()), &options)
}

fn generate(args: &GenerateArgs) -> (Vec<Document>, CompilerOutput) {
    let documents = load_documents(&args.input.inputs);
    let extraction = extract(&documents, &args.input);
    let external_css = args.style_sources().collect(&documents);
    let output = html2css_codegen::compile(&extraction, &external_css, &args.render_options());
    (documents, output)
}

fn write_output(path: &Path, css: &str) {
    if let Err(source) = std::fs::write(path, css) {
        fail(CliError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    tracing::info!(path = %path.display(), bytes = css.len(), "wrote stylesheet");
}

fn cmd_build(args: &GenerateArgs, out_dir: Option<&Path>) {
    let (documents, output) = generate(args);

    // Named after the first input
    let first = &documents[0].location;
    let stem = first.stem();
    let dir = out_dir.map(Path::to_path_buf).unwrap_or_else(|| first.output_dir());
    if let Err(source) = std::fs::create_dir_all(&dir) {
        fail(CliError::Write { path: dir, source });
    }

    let base_path = dir.join(format!("{stem}.css"));
    write_output(&base_path, &output.base);
    eprintln!("CSS file has been generated at {}", base_path.display());

    for media in &output.media {
        let path = dir.join(format!("{stem}{}.css", media.breakpoint.file_suffix()));
        write_output(&path, &media.css);
        eprintln!(
            "{} CSS file has been generated at {}",
            label(media.breakpoint),
            path.display()
        );
    }
}

fn cmd_print(args: &GenerateArgs) {
    let (_, output) = generate(args);

    let chunks: Vec<&str> = std::iter::once(output.base.as_str())
        .chain(output.media.iter().map(|m| m.css.as_str()))
        .filter(|chunk| !chunk.is_empty())
        .collect();
    print!("{}", chunks.join("\n"));
}

fn cmd_selectors(args: &InputArgs) {
    let documents = load_documents(&args.inputs);
    let extraction = extract(&documents, args);

    let mut mapping = RuleMapping::new();
    for selector in extraction.selectors.rendered() {
        mapping.seed(selector);
    }
    for selector in css::ordered_keys(&mapping, SortOrder::Grouped) {
        println!("{selector}");
    }
}

fn cmd_sort(path: &str) {
    let css = Location::Path(PathBuf::from(path))
        .read()
        .unwrap_or_else(|e| fail(e));
    println!("{}", html2css_stylesheet::alphabetize(&css));
}

fn label(breakpoint: Breakpoint) -> &'static str {
    match breakpoint {
        Breakpoint::Mobile => "Mobile",
        Breakpoint::Tablet => "Tablet",
        Breakpoint::Tv => "TV",
    }
}
