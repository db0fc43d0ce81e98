use anyhow::{bail, Result};
use clap::Parser;
use simple_logger::SimpleLogger;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use weft_bin::css3::builder::StylesheetBuilder;
use weft_bin::css3::tokenizer::{TokenType, Tokenizer};
use weft_bin::css3::walker::Walker;
use weft_bin::css3::Css3;
use weft_bin::shared::byte_stream::{ByteStream, Character, Encoding, Location, Stream};
use weft_bin::shared::config::ParserConfig;
use weft_bin::shared::errors::CssError;
use weft_bin::snippet;

#[derive(Debug, Parser)]
#[command(name = "Weft CSS3 parser", version = "0.1.0")]
struct Args {
    /// The stylesheet to parse, or a directory with stylesheets
    path: PathBuf,
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
    /// Just print the tokens
    #[arg(long)]
    tokens: bool,
    /// Print the syntax tree instead of the serialized stylesheet
    #[arg(long)]
    ast: bool,
    /// Stop at the first error and show where it occurred
    #[arg(long)]
    strict: bool,
    /// Don't display the result
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug || cfg!(feature = "debug_parser") {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let files = stylesheets(&args.path)?;
    if files.is_empty() {
        bail!("no stylesheets found in {}", args.path.display());
    }

    let mut failed = 0;
    for file in &files {
        if let Err(err) = process(file, &args) {
            log::error!("{}: {}", file.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} stylesheets failed", failed, files.len());
    }

    Ok(())
}

/// Returns the given file, or all `.css` files below the given directory
fn stylesheets(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "css") {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn process(file: &Path, args: &Args) -> Result<()> {
    let mut stream = ByteStream::new(Encoding::UNKNOWN, None);
    stream.read_from_file(File::open(file)?)?;

    let css = Character::slice_to_string(&stream.get_slice(0, usize::MAX));
    log::info!(
        "parsing {} ({} characters, {:?})",
        file.display(),
        css.chars().count(),
        stream.encoding()
    );

    if args.tokens {
        print_tokens(&mut stream);
        return Ok(());
    }

    let config = ParserConfig {
        source: Some(file.display().to_string()),
        ignore_errors: !args.strict,
        ..Default::default()
    };

    if args.ast {
        let node = Css3::parse_ast(&mut stream, config).map_err(|err| report(&css, err))?;
        if !args.quiet {
            Walker::new(&node).walk_stdout();
        }
        return Ok(());
    }

    let mut builder = StylesheetBuilder::new(config.source.clone());
    Css3::parse_stream(&mut stream, config, &mut builder).map_err(|err| report(&css, err))?;

    let sheet = builder.finish();
    if !args.quiet {
        println!("{}", sheet.css_text());
    }

    Ok(())
}

fn report(css: &str, err: CssError) -> anyhow::Error {
    if let Some(location) = err.location {
        println!();
        print!("{}", snippet::render(css, location));
        println!();
    }

    anyhow::Error::new(err)
}

fn print_tokens(stream: &mut ByteStream) {
    let mut tokenizer = Tokenizer::new(stream, Location::default());
    loop {
        let token = tokenizer.consume();
        println!("{:?}", token);

        if token.token_type == TokenType::Eof {
            break;
        }
    }
}
