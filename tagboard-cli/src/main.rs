use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tagboard_core::config::Settings;
use tagboard_core::hashtag::{extract_hashtags, validate_hashtags_with};
use tagboard_core::highlight::{highlight_hashtags, Segment};
use tagboard_core::ingest::ingest_posts;
use tagboard_core::stats::{
    analyze_hashtag_trends, calculate_hashtag_stats, filter_posts_by_hashtag,
    get_co_occurring_hashtags, get_hashtag_suggestions, get_popular_hashtags,
    recent_popular_hashtags, search_hashtags,
};
use tagboard_types::{HashtagCount, Post, RawPost};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tagboard hashtag tools
///
/// Extracts and validates hashtags from text, and computes hashtag
/// statistics over a JSON export of board posts.
#[derive(Parser, Debug)]
#[command(name = "tagboard")]
#[command(about = "Hashtag extraction and statistics for Tagboard posts", long_about = None)]
struct Args {
    /// Settings file (defaults to settings.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts export, a JSON array of post records
    #[arg(short, long)]
    posts: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract normalized hashtags from text
    Extract { text: String },
    /// Validate a list of hashtags as given
    Validate { hashtags: Vec<String> },
    /// Show where hashtags occur in text
    Highlight { text: String },
    /// Usage count and contributing posts for every hashtag
    Stats,
    /// Most used hashtags
    Popular {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only consider the most recent posts (see stats.recent_window)
        #[arg(long)]
        recent: bool,
    },
    /// Posts with a hashtag containing QUERY
    Filter { query: String },
    /// Aggregate hashtag usage summary
    Trends,
    /// Hashtags used together with TAG
    Related { tag: String },
    /// Autocomplete suggestions for a partial hashtag
    Suggest {
        query: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Distinct hashtag spellings containing QUERY
    Search { query: String },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagboard_cli=info,tagboard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::new().context("Failed to load settings")?,
    };

    run(&args, &settings)
}

fn run(args: &Args, settings: &Settings) -> Result<()> {
    match &args.command {
        Command::Extract { text } => {
            let hashtags = extract_hashtags(text);
            if args.json {
                return print_json(&hashtags);
            }
            for tag in hashtags {
                println!("#{}", tag);
            }
        }
        Command::Validate { hashtags } => {
            let validation = validate_hashtags_with(hashtags, &settings.hashtag_limits());
            if args.json {
                return print_json(&validation);
            }
            if validation.is_valid {
                println!("valid");
            }
            for error in &validation.errors {
                println!("error: {}", error);
            }
        }
        Command::Highlight { text } => {
            let segments = highlight_hashtags(text);
            if args.json {
                return print_json(&segments);
            }
            let rendered: String = segments
                .iter()
                .map(|segment| match segment {
                    Segment::Text(text) => text.to_string(),
                    Segment::Hashtag { marked, .. } => format!("[{}]", marked),
                })
                .collect();
            println!("{}", rendered);
        }
        Command::Stats => {
            let posts = load_posts(args, settings)?;
            let stats = calculate_hashtag_stats(&posts);
            if args.json {
                return print_json(&stats);
            }
            for stat in &stats {
                println!("#{}: {} ({})", stat.hashtag, stat.count, stat.posts.join(", "));
            }
        }
        Command::Popular { limit, recent } => {
            let posts = load_posts(args, settings)?;
            let limit = limit.unwrap_or(settings.stats.popular_limit);
            let popular = if *recent {
                recent_popular_hashtags(&posts, settings.stats.recent_window, limit)
            } else {
                get_popular_hashtags(&posts, limit)
            };
            print_counts(args, &popular)?;
        }
        Command::Filter { query } => {
            let posts = load_posts(args, settings)?;
            let matching = filter_posts_by_hashtag(&posts, query);
            if args.json {
                return print_json(&matching);
            }
            for post in matching {
                println!("{} [{}] {}", post.id, post.hashtags.join(" "), post.text);
            }
        }
        Command::Trends => {
            let posts = load_posts(args, settings)?;
            let trends = analyze_hashtag_trends(&posts);
            if args.json {
                return print_json(&trends);
            }
            println!("Total hashtags: {}", trends.total_hashtags);
            println!("Unique hashtags: {}", trends.unique_hashtags);
            println!("Average per post: {:.2}", trends.average_hashtags_per_post);
            println!(
                "Most popular: {}",
                trends.most_popular.as_deref().unwrap_or("-")
            );
            println!("Used once: {}", trends.least_used.join(", "));
        }
        Command::Related { tag } => {
            let posts = load_posts(args, settings)?;
            print_counts(args, &get_co_occurring_hashtags(&posts, tag))?;
        }
        Command::Suggest { query, limit } => {
            let posts = load_posts(args, settings)?;
            let limit = limit.unwrap_or(settings.stats.suggestion_limit);
            let query = query.as_deref().unwrap_or_default();
            print_counts(args, &get_hashtag_suggestions(&posts, query, limit))?;
        }
        Command::Search { query } => {
            let posts = load_posts(args, settings)?;
            let found = search_hashtags(&posts, query);
            if args.json {
                return print_json(&found);
            }
            for tag in found {
                println!("#{}", tag);
            }
        }
    }

    Ok(())
}

/// Read a JSON posts export and convert records for the statistics engine
fn load_posts(args: &Args, settings: &Settings) -> Result<Vec<Post>> {
    let path = args
        .posts
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.data.posts_path));
    let records = read_records(&path)?;
    tracing::info!("Loaded {} posts from {}", records.len(), path.display());
    Ok(ingest_posts(records))
}

fn read_records(path: &Path) -> Result<Vec<RawPost>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read posts file: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse posts file: {}", path.display()))
}

fn print_counts(args: &Args, counts: &[HashtagCount]) -> Result<()> {
    if args.json {
        return print_json(&counts);
    }
    for (i, entry) in counts.iter().enumerate() {
        println!("{}. #{}: {}", i + 1, entry.hashtag, entry.count);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
