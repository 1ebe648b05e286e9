use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use slack_markdown_config::{Config, read_users_file};
use slack_markdown_engine::{
    ConversionError, ConvertOptions, Converter, NameTable, OutputStyle, SECTION_SEPARATOR,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Convert exported chat messages (a single message object or an array of
/// them) into Markdown.
#[derive(Debug, Parser)]
#[command(name = "slack-markdown", version)]
struct Args {
    /// Message JSON file
    #[arg(value_name = "INPUT", conflicts_with = "input_flag")]
    input: Option<PathBuf>,

    /// Message JSON file (alternative to the positional argument)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input_flag: Option<PathBuf>,

    /// Write the Markdown here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file [default: ~/.config/slack-markdown/config.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON object of user id to display name, overriding configured names
    #[arg(short, long, value_name = "FILE")]
    users: Option<PathBuf>,

    /// Output style: tagged or markdown
    #[arg(long, value_name = "STYLE")]
    style: Option<OutputStyle>,

    /// Annotate thread replies and parents
    #[arg(long)]
    thread_info: bool,

    /// Fail with PARTIAL_CONVERSION when a section could not be rendered
    #[arg(long)]
    report_partial: bool,

    /// Log conversion details to standard error
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().or(self.input_flag.as_deref())
    }

    /// Flags given on the command line win over the configured options.
    fn options(&self, configured: ConvertOptions) -> ConvertOptions {
        ConvertOptions {
            style: self.style.unwrap_or(configured.style),
            include_thread_info: self.thread_info || configured.include_thread_info,
            report_partial: self.report_partial || configured.report_partial,
        }
    }
}

/// Text ready for output plus the diagnostics gathered while producing it.
#[derive(Debug, Default, PartialEq)]
struct Rendered {
    markdown: String,
    warnings: Vec<String>,
    converted: usize,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(args: &Args) -> Result<()> {
    let Some(input_path) = args.input_path() else {
        bail!("No input file provided\nUsage: slack-markdown <INPUT> [-o <OUTPUT>]");
    };

    let config = load_config(args.config.as_deref())?;
    let names = name_table(&config, args.users.as_deref())?;
    let converter = Converter::new(args.options(config.options())).with_names(&names);

    let raw = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file {}", input_path.display()))?;
    let input = parse_input(&raw)
        .with_context(|| format!("Failed to parse JSON in {}", input_path.display()))?;
    log::debug!("Loaded {}", input_path.display());

    let rendered = render(&input, &converter)?;
    for warning in &rendered.warnings {
        eprintln!("{warning}");
    }

    match &args.output {
        Some(output_path) => {
            fs::write(output_path, &rendered.markdown).with_context(|| {
                format!("Failed to write output file {}", output_path.display())
            })?;
            println!(
                "Wrote {} message(s) to {}",
                rendered.converted,
                output_path.display()
            );
        }
        None => println!("{}", rendered.markdown),
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} not found", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn name_table(config: &Config, users_path: Option<&Path>) -> Result<NameTable> {
    let mut names = config.name_table()?;
    if let Some(path) = users_path {
        names.extend(read_users_file(path)?);
    }
    Ok(names)
}

fn parse_input(raw: &str) -> Result<Value, ConversionError> {
    serde_json::from_str(raw).map_err(|err| {
        log::debug!("Input is not JSON: {err}");
        ConversionError::invalid_json(raw)
    })
}

fn render(input: &Value, converter: &Converter) -> Result<Rendered, ConversionError> {
    match input {
        Value::Array(messages) => Ok(render_batch(messages, converter)),
        message => render_single(message, converter),
    }
}

fn render_single(message: &Value, converter: &Converter) -> Result<Rendered, ConversionError> {
    match converter.convert_value(message).into_result() {
        Ok(markdown) => Ok(Rendered {
            markdown,
            warnings: Vec::new(),
            converted: 1,
        }),
        Err((error, Some(partial))) => Ok(Rendered {
            markdown: partial,
            warnings: vec![format!("Warning: {}", error.message)],
            converted: 1,
        }),
        Err((error, None)) => Err(error),
    }
}

fn render_batch(messages: &[Value], converter: &Converter) -> Rendered {
    let mut sections = Vec::with_capacity(messages.len());
    let mut warnings = Vec::new();

    for (index, message) in messages.iter().enumerate() {
        match converter.convert_value(message).into_result() {
            Ok(markdown) => sections.push(markdown),
            Err((error, _)) => warnings.push(format!("メッセージ {}: {}", index + 1, error.message)),
        }
    }

    Rendered {
        converted: sections.len(),
        markdown: sections.join(SECTION_SEPARATOR),
        warnings,
    }
}
