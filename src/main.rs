use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadscout::app::{ActiveTab, AppContext};
use leadscout::config::Config;
use leadscout::errors::AppError;
use leadscout::models::{FilterCriteria, LeadStatus, SearchCriteria};
use leadscout::theme::{marker_color, quality_color, Theme};

/// Headless client for the lead-generation backend: search, filter, save
/// and export leads from the terminal.
#[derive(Parser)]
#[command(name = "leadscout", version, about)]
struct Cli {
    /// Use the dark-theme marker tokens in output.
    #[arg(long, global = true)]
    dark: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the selectable business categories.
    Types,
    /// Search for businesses and print the qualified subset.
    Search {
        /// Business category tag (e.g. "restaurant", "saas").
        #[arg(long)]
        business_type: String,
        /// Free-text category override; takes precedence when non-blank.
        #[arg(long)]
        custom: Option<String>,
        /// Location query (city, state or zip).
        #[arg(long)]
        location: String,
        /// Search radius in kilometers (1-50).
        #[arg(long, default_value_t = 10)]
        radius: u32,
        /// Minimum quality score override (0-100).
        #[arg(long)]
        min_score: Option<u8>,
        /// Restrict to one lead status (hot, warm, cold, unqualified).
        #[arg(long)]
        lead_status: Option<LeadStatus>,
        /// Require a phone or email on every shown lead.
        #[arg(long)]
        require_contact: Option<bool>,
    },
    /// Manage saved leads.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
    /// Export leads to a CSV file.
    Export {
        /// Business category tag to export.
        #[arg(long)]
        business_type: String,
        /// Minimum quality score override (0-100).
        #[arg(long)]
        min_score: Option<u8>,
        /// Directory the CSV file is written into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Check backend liveness.
    Health,
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List saved leads.
    List,
    /// Save a business from the last search by its identifier.
    Add {
        /// The business identifier.
        business_id: String,
    },
    /// Remove a saved lead by its favorite identifier.
    Remove {
        /// The server-assigned favorite identifier.
        favorite_id: String,
    },
}

/// Applies CLI filter overrides on top of the configured defaults.
fn filter_overrides(
    base: FilterCriteria,
    min_score: Option<u8>,
    lead_status: Option<LeadStatus>,
    require_contact: Option<bool>,
) -> FilterCriteria {
    FilterCriteria {
        min_quality_score: min_score.unwrap_or(base.min_quality_score),
        lead_status: lead_status.or(base.lead_status),
        has_contact: require_contact.unwrap_or(base.has_contact),
    }
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), AppError> {
    match command {
        Command::Types => {
            let types = ctx.client().business_types().await?;
            for t in types {
                println!("{:<12} {}", t.value, t.label);
            }
        }
        Command::Search {
            business_type,
            custom,
            location,
            radius,
            min_score,
            lead_status,
            require_contact,
        } => {
            let defaults = ctx.config().default_filters;
            ctx.set_filter(filter_overrides(
                defaults,
                min_score,
                lead_status,
                require_contact,
            ));

            let mut criteria = SearchCriteria {
                business_type,
                location,
                radius,
            };
            if let Some(custom) = custom.as_deref() {
                criteria = criteria.with_custom_type(custom);
            }

            let outcome = ctx.search(&criteria).await?;
            if outcome.is_empty() {
                // Empty results always get a distinct notice; they are not
                // an error.
                println!("No leads found. Try a wider radius or a different business type.");
                return Ok(());
            }

            let theme = ctx.theme();
            let snapshot = ctx.store().snapshot();
            for lead in &snapshot.qualified {
                let contact = lead
                    .phone
                    .as_deref()
                    .or(lead.email.as_deref())
                    .unwrap_or("-");
                println!(
                    "{} {:<28} {:>3}/100 ({:<12}) {:<24} {}",
                    marker_color(lead.lead_status, theme),
                    lead.name,
                    lead.quality_score,
                    format!("{}", lead.lead_status),
                    contact,
                    lead.address
                );
            }

            let tally = ctx.qualified_tally();
            println!(
                "\nFound: {}  Qualified: {}  (hot {}, warm {}, cold {})",
                outcome.fetched, outcome.qualified, tally.hot, tally.warm, tally.cold
            );
            if let Some(location) = snapshot.location {
                println!("Centered at {:.4}, {:.4}", location.lat, location.lon);
            }
        }
        Command::Favorites { action } => {
            ctx.set_active_tab(ActiveTab::Favorites);
            match action {
                FavoritesCommand::List => {
                    ctx.favorites().refresh().await?;
                }
                FavoritesCommand::Add { business_id } => {
                    ctx.favorites().add_by_id(&business_id).await?;
                    println!("Added to favorites.");
                }
                FavoritesCommand::Remove { favorite_id } => {
                    ctx.favorites().remove(&favorite_id).await?;
                    println!("Removed from favorites.");
                }
            }
            let saved = ctx.favorites().snapshot();
            if saved.is_empty() {
                println!("No saved leads.");
            } else {
                println!("Saved leads ({}):", saved.len());
                for fav in saved {
                    println!(
                        "{:<12} {:<28} {} {}",
                        fav.favorite_id,
                        fav.business.name,
                        quality_color(fav.business.quality_score),
                        fav.business.address
                    );
                }
            }
        }
        Command::Export {
            business_type,
            min_score,
            out_dir,
        } => {
            let defaults = ctx.config().default_filters;
            ctx.set_filter(filter_overrides(defaults, min_score, None, None));
            let path = ctx.export_csv(&business_type, &out_dir).await?;
            println!("Exported to {}", path.display());
        }
        Command::Health => {
            let health = ctx.client().health().await?;
            println!(
                "{}: {}",
                health.status,
                health.message.as_deref().unwrap_or("ok")
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    let ctx = AppContext::new(config).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    if cli.dark {
        ctx.set_theme(Theme::Dark);
    }

    // A failed call is reported and ends this invocation nonzero; it never
    // panics the process.
    if let Err(e) = run(&ctx, cli.command).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
