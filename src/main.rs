//! Mathvox CLI - LaTeX-to-speech and braille converter
//!
//! Usage: mathvox [EXPRESSION] [OPTIONS]
//!
//! Input sources, first match wins: --file batch, a literal expression
//! argument, piped stdin. With no input and an interactive terminal the
//! help text is shown instead.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;

use mathvox::assets::locator::ResolvedDir;
use mathvox::{
    resolve_data_dir, Config, ConfigWarning, Converter, DataSource, EmbeddedAssets, LatexEngine,
    LocaleStore, RuleSpeechEngine, SpeechOptions,
};
use mathvox::assets::AssetSource;

/// Mathvox - LaTeX-to-speech and braille converter
#[derive(Parser, Debug)]
#[command(name = "mathvox")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "With no input and an interactive terminal, mathvox shows this help.")]
struct Cli {
    /// LaTeX expression to convert
    expression: Option<String>,

    /// Read a batch of expressions from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Append output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Locale for speech rules (en, de, fr)
    #[arg(short, long)]
    locale: Option<String>,

    /// Speech rule domain (clearspeak, mathspeak)
    #[arg(short, long)]
    domain: Option<String>,

    /// Phrasing style within the domain
    #[arg(short, long)]
    style: Option<String>,

    /// Output modality (speech, braille)
    #[arg(short, long)]
    modality: Option<String>,

    /// Delimiter splitting batch files into expressions (\n, \t supported)
    #[arg(long, default_value = "\\n")]
    delimiter: String,

    /// Write each result as soon as it is produced
    #[arg(long)]
    stream: bool,

    /// Disable the conversion result cache
    #[arg(long)]
    no_cache: bool,

    /// Config file override
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Where this run's expressions come from
#[derive(Debug, PartialEq, Eq)]
enum InputMode {
    File(PathBuf),
    Expression(String),
    Stdin,
    Interactive,
}

fn select_input(cli: &Cli, stdin_is_terminal: bool) -> InputMode {
    if let Some(file) = &cli.file {
        InputMode::File(file.clone())
    } else if let Some(expression) = &cli.expression {
        InputMode::Expression(expression.clone())
    } else if !stdin_is_terminal {
        InputMode::Stdin
    } else {
        InputMode::Interactive
    }
}

/// Output sink: stdout, or a file opened in append mode
enum Sink {
    Stdout(io::Stdout),
    File(fs::File),
}

impl Sink {
    fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("cannot open output file {}", path.display()))?;
                Ok(Sink::File(file))
            }
            None => Ok(Sink::Stdout(io::stdout())),
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => writeln!(out, "{line}"),
            Sink::File(file) => writeln!(file, "{line}"),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(file) => file.flush(),
        }
    }
}

#[derive(Debug, Default)]
struct RunStats {
    converted: usize,
    failed: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, warnings) = Config::load_or_default(cli.config.as_deref())?;
    report_config_warnings(&warnings);

    // CLI flags win over env and file configuration.
    if let Some(locale) = &cli.locale {
        config.speech.locale = locale.clone();
    }
    if let Some(domain) = &cli.domain {
        config.speech.domain = domain.clone();
    }
    if let Some(style) = &cli.style {
        config.speech.style = style.clone();
    }
    if let Some(modality) = &cli.modality {
        config.speech.modality = modality.clone();
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }
    let config = config.validated()?;

    let options = SpeechOptions {
        locale: config.speech.locale.clone(),
        domain: config.speech.domain.clone(),
        style: config.speech.style.clone(),
        modality: config.speech.modality.clone(),
    };

    let input = select_input(&cli, io::stdin().is_terminal());
    if input == InputMode::Interactive {
        Cli::command().print_help()?;
        return Ok(());
    }

    // One data source for the whole process: a resolved directory, or the
    // embedded assets when no directory strategy matched.
    let resolution = resolve_data_dir(config.data.dir.clone());
    let source = match &resolution {
        Some(resolved) => DataSource::Dir(resolved.path.clone()),
        None if EmbeddedAssets.available() => DataSource::Embedded(EmbeddedAssets),
        None => bail!("no locale data available: set MATHVOX_MATHMAPS_DIR to a mathmaps directory"),
    };
    if cli.verbose > 0 {
        report_resolution(resolution.as_ref());
    }

    // Math engine first, then the speech engine; the speech engine's setup
    // (inside Converter::new) must run once before any conversion.
    let math = LatexEngine::new();
    let speech = RuleSpeechEngine::new(LocaleStore::new(source));
    let mut converter = Converter::new(math, speech, options, config.cache.enabled)?;

    let mut sink = Sink::open(cli.output.as_deref())?;
    let stats = match input {
        InputMode::File(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("cannot read input file {}", path.display()))?;
            let delimiter = unescape_delimiter(&cli.delimiter);
            let expressions = content.split(delimiter.as_str()).map(str::to_string);
            convert_all(&mut converter, expressions, &mut sink, &cli)?
        }
        InputMode::Expression(expression) => {
            convert_all(&mut converter, std::iter::once(expression), &mut sink, &cli)?
        }
        InputMode::Stdin => {
            let stdin = io::stdin();
            let lines = stdin.lock().lines().map_while(|line| line.ok());
            convert_all(&mut converter, lines, &mut sink, &cli)?
        }
        InputMode::Interactive => unreachable!("handled above"),
    };

    if cli.verbose > 0 {
        eprintln!(
            "✓ Converted {} expressions ({} cache hits, {} failed)",
            stats.converted,
            converter.cache().hits(),
            stats.failed
        );
    }

    Ok(())
}

/// Convert every expression in input order, isolating per-expression
/// failures. Fatal errors (configuration, malformed data) abort the run.
fn convert_all<M, S>(
    converter: &mut Converter<M, S>,
    expressions: impl Iterator<Item = String>,
    sink: &mut Sink,
    cli: &Cli,
) -> Result<RunStats>
where
    M: mathvox::MathEngine,
    S: mathvox::SpeechEngine,
{
    let mut stats = RunStats::default();
    let mut collected: Vec<String> = Vec::new();

    for expression in expressions {
        let expression = expression.trim();
        if expression.is_empty() {
            continue;
        }

        if cli.verbose > 1 {
            if let Ok(mathml) = converter.to_mathml(expression) {
                eprintln!("  {expression} → {mathml}");
            }
        }

        match converter.convert(expression) {
            Ok(speech) => {
                stats.converted += 1;
                if cli.stream {
                    sink.write_line(&speech)?;
                    sink.flush()?;
                } else {
                    collected.push(speech);
                }
            }
            Err(e) if !e.is_fatal() => {
                stats.failed += 1;
                eprintln!("✗ {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !cli.stream {
        for line in &collected {
            sink.write_line(line)?;
        }
        sink.flush()?;
    }

    Ok(stats)
}

fn report_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{line}", warning.file.display()),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => eprintln!(
                "⚠ unknown config key '{}' in {location} (did you mean '{suggestion}'?)",
                warning.key
            ),
            None => eprintln!("⚠ unknown config key '{}' in {location}", warning.key),
        }
    }
}

fn report_resolution(resolution: Option<&ResolvedDir>) {
    match resolution {
        Some(resolved) => eprintln!(
            "✓ Locale data: {} ({})",
            resolved.path.display(),
            resolved.strategy
        ),
        None => eprintln!("✓ Locale data: embedded assets"),
    }
}

/// Turn the CLI's escaped delimiter into the real separator.
fn unescape_delimiter(raw: &str) -> String {
    raw.replace("\\n", "\n").replace("\\t", "\t")
}
