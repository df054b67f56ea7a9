//! Migration script to convert legacy category posts to hashtag lists
//!
//! This script reads a JSON export of post records, fills the hashtag list of
//! every record that only has a `categoryId`, and writes the records back out.
//! The category field is kept so older clients keep working.
//!
//! Run with: cargo run --bin migrate-categories -- --input posts.json [--dry-run]
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tagboard_core::legacy::{
    dry_run_migration, migrate_posts, migration_status, DEFAULT_BATCH_SIZE,
};
use tagboard_types::{MigrationResult, MigrationStatus, RawPost};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for category migration
#[derive(Parser, Debug)]
#[command(name = "migrate-categories")]
#[command(about = "Convert legacy categoryId posts to hashtag lists")]
struct Args {
    /// JSON export of post records
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write migrated records (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Records converted per batch
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Dry run - show what would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migrate_categories=info,tagboard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    println!("🔍 Starting category migration...");
    if args.dry_run {
        println!("⚠️  DRY RUN MODE - No changes will be written");
    }

    let mut records = read_records(&args.input)?;
    println!("✅ Loaded {} records from {}", records.len(), args.input.display());

    let status = migration_status(&records);
    print_status(&status);

    // Check if migration is needed
    if status.migration_complete {
        println!("ℹ️  Migration appears to have already been run.");
        println!("   No records with only a category remain.");
        return Ok(());
    }

    if args.dry_run {
        for preview in dry_run_migration(&records) {
            println!(
                "  📝 Post {}: {:?} -> {:?}",
                preview.id, preview.category_id, preview.converted_hashtags
            );
        }
        return Ok(());
    }

    let result = migrate_posts(&mut records, args.batch_size, |progress| {
        println!(
            "   Progress: {}/{} posts migrated ({}%)",
            progress.current, progress.total, progress.percentage
        );
    });

    let output = args.output.as_deref().unwrap_or(&args.input);
    write_records(output, &records)?;
    print_results(&result, output);

    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<RawPost>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse records: {}", path.display()))
}

fn write_records(path: &Path, records: &[RawPost]) -> Result<()> {
    let data = serde_json::to_string_pretty(records).context("Failed to serialize records")?;
    std::fs::write(path, data)
        .with_context(|| format!("Failed to write records: {}", path.display()))
}

fn print_status(status: &MigrationStatus) {
    println!("📊 Migration status:");
    println!("   Total posts: {}", status.total_posts);
    println!("   Legacy posts: {}", status.legacy_posts);
    println!("   Migrated posts: {}", status.migrated_posts);
}

/// Print migration results and any records that could not be converted
fn print_results(result: &MigrationResult, output: &Path) {
    println!("\n✨ Migration complete!");
    println!("   Records processed: {}", result.total_processed);
    println!("   Succeeded: {}", result.success_count);
    println!("   Failed: {}", result.error_count);
    for failure in &result.errors {
        println!("   ❌ {}: {}", failure.id, failure.error);
    }
    println!("   Written to: {}", output.display());
}
