//! SiteGate CLI
//!
//! CLI tool for classifying URLs and inspecting platform registries.

use std::path::Path;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};

use sg_core::{reclassify_all, Category, Classifier, Registry};

mod bench;
mod files;

#[derive(Parser)]
#[command(name = "sg-cli")]
#[command(about = "SiteGate site classification tools")]
struct Cli {
    /// Registry JSON file replacing the built-in tables
    #[arg(long, global = true)]
    registry: Option<String>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify URLs
    Classify {
        /// URLs to classify
        urls: Vec<String>,

        /// File with one URL per line
        #[arg(short, long)]
        input: Option<String>,

        /// Emit one JSON object per URL
        #[arg(long)]
        json: bool,
    },

    /// Check whether URLs are profile pages on a known platform
    Profile {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Print indexing recommendations
    Recommend {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// List registered platforms
    Platforms {
        /// Only list one category (e.g. social_media)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Write the active registry as JSON
    DumpRegistry {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Load and lint a registry JSON file
    ValidateRegistry {
        #[arg(short, long)]
        input: String,
    },

    /// Re-run classification over stored records (JSON Lines)
    Reclassify {
        #[arg(short, long)]
        input: String,

        /// Only print records whose classification moved
        #[arg(long)]
        changed_only: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Time classification over a URL list
    Bench {
        /// File with one URL per line (built-in mix if omitted)
        #[arg(short, long)]
        input: Option<String>,

        #[arg(long, default_value_t = 1000)]
        iterations: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let mut logger = Builder::from_env(Env::default().default_filter_or(default_filter));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let loaded = files::load_registry(cli.registry.as_deref())?;
    let registry = loaded.as_ref().unwrap_or_else(|| Registry::builtin());
    let classifier = Classifier::new(registry);

    match cli.command {
        Commands::Classify { urls, input, json } => cmd_classify(&classifier, &urls, input.as_deref(), json),
        Commands::Profile { urls } => cmd_profile(&classifier, &urls),
        Commands::Recommend { urls } => cmd_recommend(&classifier, &urls),
        Commands::Platforms { category } => cmd_platforms(registry, category.as_deref()),
        Commands::DumpRegistry { output } => cmd_dump_registry(registry, output.as_deref()),
        Commands::ValidateRegistry { input } => cmd_validate_registry(&input),
        Commands::Reclassify {
            input,
            changed_only,
            json,
        } => cmd_reclassify(&classifier, &input, changed_only, json),
        Commands::Bench { input, iterations } => {
            let urls = match input {
                Some(path) => files::collect_urls(&[], Some(path.as_str()))?,
                None => Vec::new(),
            };
            bench::run(&classifier, bench::BenchOptions { urls, iterations })
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize: {}", e))
}

fn cmd_classify(classifier: &Classifier<'_>, urls: &[String], input: Option<&str>, json: bool) -> Result<(), String> {
    let urls = files::collect_urls(urls, input)?;

    for url in &urls {
        let result = classifier.classify(url);
        if json {
            println!("{}", to_json(&serde_json::json!({ "url": url, "result": result }))?);
            continue;
        }

        println!("{}", url);
        println!("  Type:        {}", result.platform_type);
        println!("  Purpose:     {}", result.indexing_purpose);
        println!("  Confidence:  {:.2}", result.confidence);
        println!("  Modifier:    {:.2}", result.score_modifier);
        if let Some(name) = &result.platform_name {
            println!("  Platform:    {}", name);
        }
        println!("  Links:       {}", if result.should_extract_links { "extract" } else { "ignore" });
        println!("  Reasons:     {}", result.reasons.join(", "));
    }

    Ok(())
}

fn cmd_profile(classifier: &Classifier<'_>, urls: &[String]) -> Result<(), String> {
    for url in urls {
        let found = classifier.is_profile_url(url);
        match &found.platform {
            Some(platform) => println!("{}  profile on {} ({})", url, platform.domain, platform.category),
            None => println!("{}  not a profile", url),
        }
    }
    Ok(())
}

fn cmd_recommend(classifier: &Classifier<'_>, urls: &[String]) -> Result<(), String> {
    for url in urls {
        let rec = classifier.get_indexing_recommendation(url);
        println!(
            "{}  index={} extract_links={}  {}",
            url, rec.should_index, rec.should_extract_links, rec.reason
        );
    }
    Ok(())
}

fn cmd_platforms(registry: &Registry, category: Option<&str>) -> Result<(), String> {
    let categories: Vec<Category> = match category {
        Some(name) => {
            let category = Category::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}' (expected one of: {})", name, known.join(", "))
            })?;
            vec![category]
        }
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        let platforms: Vec<_> = registry.platforms_in(category).collect();
        if platforms.is_empty() {
            continue;
        }
        println!("{} ({}):", category, platforms.len());
        for platform in platforms {
            println!("  {:<24} {}", platform.domain, platform.profile_patterns.join(" "));
        }
    }

    if category.is_none() {
        println!("indie ({}):", registry.indie_entries().len());
        for entry in registry.indie_entries() {
            println!("  {:<24} x{:.2} {}", entry.domain, entry.score_modifier, entry.reason);
        }
    }

    Ok(())
}

fn cmd_dump_registry(registry: &Registry, output: Option<&str>) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&registry.to_config())
        .map_err(|e| format!("Failed to serialize registry: {}", e))?;

    match output {
        Some(path) => {
            files::write_text(Path::new(path), &json)?;
            println!("Wrote registry to '{}'", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_validate_registry(input: &str) -> Result<(), String> {
    let registry = files::load_registry(Some(input))?
        .ok_or_else(|| format!("No registry loaded from '{}'", input))?;

    let findings = registry.validate();

    println!("Registry '{}'", input);
    println!("  Platforms:   {}", registry.platforms().count());
    println!("  Indie hosts: {}", registry.indie_entries().len());

    if findings.is_empty() {
        println!("  Lint:        clean");
        return Ok(());
    }

    println!("  Lint:        {} finding(s)", findings.len());
    for finding in &findings {
        println!("    - {}", finding);
    }
    Err(format!("Registry '{}' has {} lint finding(s)", input, findings.len()))
}

fn cmd_reclassify(classifier: &Classifier<'_>, input: &str, changed_only: bool, json: bool) -> Result<(), String> {
    let records = files::read_records(input)?;
    let (summary, results) = reclassify_all(classifier, &records);

    let shown = results.iter().filter(|r| r.changed || !changed_only);

    if json {
        for outcome in shown {
            println!("{}", to_json(outcome)?);
        }
        println!("{}", to_json(&serde_json::json!({ "summary": summary }))?);
        return Ok(());
    }

    for outcome in shown {
        let marker = if outcome.changed { "*" } else { " " };
        println!("{} {}  {}", marker, outcome.url, outcome.transition());
    }

    println!();
    println!("Records:     {}", summary.total);
    println!("Changed:     {}", summary.changed);
    for (transition, count) in &summary.by_transition {
        println!("  {:>6}  {}", count, transition);
    }

    Ok(())
}
