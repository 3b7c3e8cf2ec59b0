use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use pulse::clustering::ClusterParams;
use pulse::config::{Config, StoreBackend};
use pulse::db::models::Coordinates;
use pulse::db::SubmissionStore;
use pulse::sentiment::{NoiseSource, RandNoise};
use pulse::topics::{KeywordExtractor, TopicExtractor};

/// Pulse: anonymous, location-tagged moments.
///
/// Post short pulses tied to a place, then see how the area feels and what
/// it's talking about right now.
#[derive(Parser)]
#[command(name = "pulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Post a pulse at a location
    Submit {
        /// What's happening (up to 280 characters)
        text: String,

        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
    },

    /// Show sentiment and topics for a text without storing it
    Analyze {
        text: String,
    },

    /// Add the demo collection of pulses around lower Manhattan
    Seed,

    /// Run a clustering pass and show the current topic clusters
    Clusters {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show area statistics (mood, sentiment breakdown, trending topics)
    Stats {
        /// Print JSON instead of a panel
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent pulses
    Feed {
        /// How many pulses to show
        #[arg(long, default_value_t = pulse::stats::DEFAULT_FEED_LIMIT)]
        limit: usize,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Export pulses and clusters as GeoJSON for a map renderer
    Export {
        /// Output path
        #[arg(long, default_value = "output/pulse-map.geojson")]
        out: String,
    },

    /// Re-cluster on a timer, optionally simulating new pulses
    Watch {
        /// Seconds between passes (default: 5)
        #[arg(long, default_value = "5")]
        interval: u64,

        /// Stop after this many passes
        #[arg(long)]
        ticks: Option<u64>,

        /// Append one generated pulse before each pass
        #[arg(long)]
        simulate: bool,
    },

    /// Show store status (location, size, pulse count, newest pulse)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pulse=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let noise = create_noise(&config);
    let extractor = KeywordExtractor::default();
    let params = ClusterParams::default();

    match cli.command {
        Commands::Init => {
            init_store(&config).await?;
        }

        Commands::Submit { text, lat, lng } => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let location = match (lat, lng) {
                (Some(latitude), Some(longitude)) => Some(Coordinates {
                    latitude,
                    longitude,
                }),
                _ => None,
            };

            let submission = pulse::pipeline::intake::submit(
                store.as_ref(),
                &text,
                location,
                Utc::now(),
                noise.as_ref(),
                &extractor,
            )
            .await?;

            pulse::output::terminal::display_analysis(
                &submission.text,
                &submission.sentiment,
                &submission.topics,
            );
            println!("\n{}", format!("Pulse {} shared.", submission.id).bold());
        }

        Commands::Analyze { text } => {
            let sentiment = pulse::sentiment::analyze_sentiment(&text, noise.as_ref());
            let topics = extractor.extract(&text);
            pulse::output::terminal::display_analysis(&text, &sentiment, &topics);
        }

        Commands::Seed => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let mut rng = create_rng(&config);
            let pulses =
                pulse::mock::mock_submissions(&mut rng, Utc::now(), noise.as_ref(), &extractor);

            // Demo ids are fixed, so re-seeding only adds what's missing
            let existing: HashSet<String> =
                store.all().await?.into_iter().map(|s| s.id).collect();
            let mut added = 0;
            for p in pulses.iter().filter(|p| !existing.contains(&p.id)) {
                store.append(p).await?;
                added += 1;
            }
            info!(added, skipped = pulses.len() - added, "Seeded demo pulses");
            println!("Added {added} demo pulses.");
            println!("Next: run `pulse clusters` or `pulse stats`.");
        }

        Commands::Clusters { json } => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let clusters = pulse::pipeline::recluster::run(store.as_ref(), &params, Utc::now()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&clusters)?);
            } else {
                pulse::output::terminal::display_clusters(&clusters);
            }
        }

        Commands::Stats { json } => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let now = Utc::now();
            let submissions = store.all().await?;
            let clusters = pulse::clustering::build_clusters(&submissions, now, &params);
            let stats = pulse::stats::compute_stats(&submissions, &clusters, now, &params);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                pulse::output::terminal::display_stats(&stats);
            }
        }

        Commands::Feed { limit, json } => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let recent = store.recent(limit).await?;
            let entries = pulse::stats::feed_entries(&recent, Utc::now(), limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                pulse::output::terminal::display_feed(&entries);
            }
        }

        Commands::Export { out } => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let submissions = store.all().await?;
            let clusters = pulse::clustering::build_clusters(&submissions, Utc::now(), &params);

            let path = pulse::output::geojson::write_geojson(&submissions, &clusters, &out)?;
            println!(
                "{}",
                format!(
                    "Map export saved to: {path} ({} pulses, {} clusters)",
                    submissions.len(),
                    clusters.len()
                )
                .bold()
            );
        }

        Commands::Watch {
            interval,
            ticks,
            simulate,
        } => {
            let store = open_store(&config, noise.as_ref(), &extractor)?;
            let mut rng = create_rng(&config);
            let options = pulse::pipeline::watch::WatchOptions {
                interval: Duration::from_secs(interval.max(1)),
                ticks,
                simulate,
            };

            println!("Watching for pulses (Ctrl-C to stop)...");
            let passes = pulse::pipeline::watch::run(
                store.as_ref(),
                &params,
                &options,
                noise.as_ref(),
                &extractor,
                &mut rng,
                |pass, clusters| {
                    println!("{}", format!("--- pass {pass} ---").dimmed());
                    pulse::output::terminal::display_clusters(clusters);
                },
            )
            .await?;

            println!("\n{}", format!("Watch finished after {passes} passes.").bold());
        }

        Commands::Status => {
            let store = open_store(&config, noise.as_ref(), &extractor);
            match store {
                Ok(store) => pulse::status::show(store.as_ref(), &config).await?,
                Err(e) => {
                    warn!(error = %e, "Store unavailable");
                    println!("Store: unavailable ({e})");
                }
            }
        }
    }

    Ok(())
}

/// Build the sentiment noise source, seeded when PULSE_SEED is set.
fn create_noise(config: &Config) -> Box<dyn NoiseSource> {
    match config.seed {
        Some(seed) => Box::new(RandNoise::seeded(seed)),
        None => Box::new(RandNoise::from_os()),
    }
}

/// Generator for mock locations and timestamps. Offset from the noise seed
/// so the two streams differ.
fn create_rng(config: &Config) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    }
}

/// Create the store if needed and report what was set up.
async fn init_store(config: &Config) -> Result<()> {
    match config.store_backend {
        StoreBackend::Memory => {
            println!("PULSE_STORE=memory: nothing to initialize.");
            println!("Pulses live for a single command and start from the demo set.");
            Ok(())
        }
        StoreBackend::Sqlite => {
            #[cfg(feature = "sqlite")]
            {
                info!("Initializing Pulse database...");
                let store = pulse::db::initialize_sqlite(&config.db_path)?;
                let table_count = store.table_count().await?;
                println!("Database initialized at: {}", config.db_path);
                println!("Tables created: {table_count}");
                println!("\nPulse is ready. Try: pulse seed");
                return Ok(());
            }
            #[cfg(not(feature = "sqlite"))]
            anyhow::bail!(
                "PULSE_STORE is sqlite but the 'sqlite' feature is not compiled in.\n\
                 Rebuild with default features, or set PULSE_STORE=memory."
            );
        }
    }
}

/// Select the store backend based on configuration.
///
/// The memory store starts from the demo collection so every command has
/// something to show.
fn open_store(
    config: &Config,
    noise: &dyn NoiseSource,
    extractor: &dyn TopicExtractor,
) -> Result<Arc<dyn SubmissionStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            let mut rng = create_rng(config);
            let pulses = pulse::mock::mock_submissions(&mut rng, Utc::now(), noise, extractor);
            Ok(Arc::new(pulse::db::MemoryStore::with_submissions(pulses)))
        }
        StoreBackend::Sqlite => {
            #[cfg(feature = "sqlite")]
            {
                return Ok(Arc::new(pulse::db::open_sqlite(&config.db_path)?));
            }
            #[cfg(not(feature = "sqlite"))]
            anyhow::bail!(
                "PULSE_STORE is sqlite but the 'sqlite' feature is not compiled in.\n\
                 Rebuild with default features, or set PULSE_STORE=memory."
            );
        }
    }
}
