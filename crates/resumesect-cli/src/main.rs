//! resumesect — extract experience, education and skills sections from résumé text.

use std::path::PathBuf;

use anyhow::Context;
use resumesect_core::ParserConfig;
use resumesect_extract::SectionParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("resumesect — résumé section extraction");
    println!();
    println!("Usage: resumesect <text-file> [--config <config.json>]");
    println!("       resumesect help");
    println!();
    println!("Prints the parsed sections and skills as JSON on stdout.");
    println!("Settings can be overridden with RESUMESECT_* environment variables.");
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut input: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("--config needs a path");
                    std::process::exit(1);
                };
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            other if input.is_none() && !other.starts_with('-') => {
                input = Some(PathBuf::from(other));
            }
            other => {
                eprintln!("Unknown argument: {}. Use 'resumesect help' for usage.", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(input) = input else {
        print_help();
        std::process::exit(1);
    };

    let config = ParserConfig::from_env(config_path.as_deref())
        .context("invalid configuration")?;
    let embedder = resumesect_infer::create_embedder(&config);
    let parser = SectionParser::new(config).context("failed to load section tables")?;

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    info!("Parsing {} ({} bytes)", input.display(), text.len());

    let parsed = parser.parse(&text, embedder.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    Ok(())
}
