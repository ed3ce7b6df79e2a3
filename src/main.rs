//! cimple - highlight, search and rewrite Cimple source files from the terminal

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use cimple_edit::config::Config;
use cimple_edit::document::{cursor_position, Document};
use cimple_edit::error::{EditorError, Result};
use cimple_edit::overview::{overview, overview_text};
use cimple_edit::render::{render_ansi, render_markup, AnsiOptions};
use cimple_edit::search::{find_all, try_compile, FindSession, SearchDirection, SearchOptions};
use cimple_edit::syntax::cimple::{is_cimple_path, EXTENSIONS};
use cimple_edit::syntax::HighlightCache;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// What to do with the file
#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    html: bool,
    overview: bool,
    no_color: bool,
    find: Option<String>,
    replace: Option<String>,
    dry_run: bool,
    /// Find toggles; `None` keeps the config file's setting
    case_sensitive: Option<bool>,
    regex: Option<bool>,
    whole_word: Option<bool>,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };
    let path = args
        .file
        .clone()
        .ok_or_else(|| EditorError::Message("No input file (try --help)".to_string()))?;

    if !is_cimple_path(&path) {
        warn!(
            path = %path.display(),
            expected = ?EXTENSIONS,
            "not a Cimple source file, highlighting may be off"
        );
    }

    let config = Config::load()?;
    let mut doc = Document::from_file(&path)?;

    if let Some(query) = &args.find {
        return search(&args, &config, &mut doc, query);
    }

    if args.html {
        println!("{}", render_markup(doc.text()));
    } else if args.overview {
        let bars = overview(doc.text(), config.overview_max_lines, config.overview_max_width);
        print!("{}", overview_text(&bars));
    } else if !config.highlight {
        print!("{}", doc.text());
    } else {
        let mut cache = HighlightCache::new();
        let lines = cache.highlight_document(doc.text());
        let options = AnsiOptions {
            color: config.color && !args.no_color,
            tab_width: config.tab_width,
        };
        render_ansi(&mut io::stdout().lock(), &lines, options)?;
    }

    Ok(())
}

fn search(args: &Args, config: &Config, doc: &mut Document, query: &str) -> Result<()> {
    let options = find_options(args, config);

    // Surface the rejection reason instead of silently finding nothing
    let pattern = try_compile(query, options)?;

    let mut session = FindSession::new(options);
    session.set_query(query);

    if let Some(replacement) = &args.replace {
        session.set_replacement(replacement.as_str());
        let count = session.replace_all(doc);
        if args.dry_run {
            print!("{}", doc.text());
        } else if doc.is_dirty() {
            doc.save()?;
        }
        eprintln!("Replaced {} occurrences", count);
        return Ok(());
    }

    let text = doc.text();
    for m in find_all(text, &pattern) {
        let (line, col) = cursor_position(text, m.start);
        println!("{}:{}: {}", line, col, &text[m.range()]);
    }
    session.find(text, (0, 0), SearchDirection::Forward);
    println!("{}", session.indicator());
    Ok(())
}

/// Config find options with the command-line toggles applied on top
fn find_options(args: &Args, config: &Config) -> SearchOptions {
    let mut options = config.find;
    if let Some(on) = args.case_sensitive {
        options.case_sensitive = on;
    }
    if let Some(on) = args.regex {
        options.use_regex = on;
    }
    if let Some(on) = args.whole_word {
        options.whole_word = on;
    }
    options
}

/// Parse command-line arguments; `None` means help or version was printed
fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut args = Args::default();

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--html" => args.html = true,
            "--overview" => args.overview = true,
            "--no-color" => args.no_color = true,
            "--dry-run" => args.dry_run = true,
            "-c" | "--case-sensitive" => args.case_sensitive = Some(true),
            "--no-case-sensitive" => args.case_sensitive = Some(false),
            "-r" | "--regex" => args.regex = Some(true),
            "--no-regex" => args.regex = Some(false),
            "-w" | "--whole-word" => args.whole_word = Some(true),
            "--no-whole-word" => args.whole_word = Some(false),
            "--find" => args.find = Some(required_value(&mut argv, "--find")?),
            "--replace" => args.replace = Some(required_value(&mut argv, "--replace")?),
            other if other.starts_with('-') => {
                return Err(EditorError::Message(format!("Unknown option: {}", other)));
            }
            _ => args.file = Some(PathBuf::from(arg)),
        }
    }

    if args.replace.is_some() && args.find.is_none() {
        return Err(EditorError::Message("--replace requires --find".to_string()));
    }
    Ok(Some(args))
}

fn required_value(argv: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    argv.next()
        .ok_or_else(|| EditorError::Message(format!("{} needs a value", flag)))
}

fn print_usage() {
    println!("cimple {} - Cimple source highlighter and search tool", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: cimple [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version information");
    println!("      --html             Print highlighted markup instead of terminal colors");
    println!("      --overview         Print the file overview");
    println!("      --no-color         Disable terminal colors");
    println!("      --find PATTERN     List matches of PATTERN");
    println!("      --replace TEXT     Replace every match of --find with TEXT");
    println!("      --dry-run          With --replace, print the result instead of saving");
    println!("  -c, --case-sensitive   Match case exactly");
    println!("  -r, --regex            Treat PATTERN as a regular expression");
    println!("  -w, --whole-word       Only match whole words");
    println!("      --no-case-sensitive, --no-regex, --no-whole-word");
    println!("                         Turn off a toggle enabled in the config file");
    println!();
    println!("Settings are read from ~/.cimple.toml; RUST_LOG controls diagnostics");
}

fn print_version() {
    println!("cimple {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<Option<Args>> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_find_flags() {
        let args = parse(&["-r", "--find", "de+f", "-w", "main.cimple"]).unwrap().unwrap();
        assert_eq!(args.regex, Some(true));
        assert_eq!(args.whole_word, Some(true));
        assert_eq!(args.case_sensitive, None);
        assert_eq!(args.find.as_deref(), Some("de+f"));
        assert_eq!(args.file, Some(PathBuf::from("main.cimple")));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.find = SearchOptions::regex().with_whole_word(true);

        let args = parse(&["--no-regex", "-c", "f.cimple"]).unwrap().unwrap();
        let options = find_options(&args, &config);
        assert!(!options.use_regex);
        assert!(options.case_sensitive);
        // Untouched toggles keep the config value
        assert!(options.whole_word);

        let args = parse(&["--no-whole-word", "f.cimple"]).unwrap().unwrap();
        assert!(!find_options(&args, &config).whole_word);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--find"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--replace", "x", "f"]).is_err());
    }
}
