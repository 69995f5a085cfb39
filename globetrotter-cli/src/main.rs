use clap::{Parser, Subcommand};
use globetrotter_core::{
    Config, Country, CountrySource, EMPTY_MESSAGE, FavoritesStore, FavoritesView, FileFavorites,
    GlobetrotterError, Viewport, load_countries_file,
};
use std::path::PathBuf;
use time::OffsetDateTime;

#[derive(Parser)]
#[command(name = "globetrotter-cli")]
#[command(about = "Browse countries and manage favorites from the terminal")]
struct Cli {
    /// Read countries from a local JSON file instead of the API
    #[arg(long, global = true)]
    countries_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all known countries
    Countries {
        /// Only show countries in this region
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Add or remove a country (by its three-letter code) from favorites
    Toggle {
        code: String,
    },
    /// Show one page of favorite countries
    Favorites {
        /// Window width used to size the page
        #[arg(short, long, default_value = "1024")]
        width: u32,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Re-download the country list
    Refresh,
    /// Show the cached country list, or remove it
    Cache {
        /// Delete the cached list so the next command downloads it again
        #[arg(long)]
        clear: bool,
    },
}

async fn load_countries(cli: &Cli, config: &Config) -> Result<Vec<Country>, GlobetrotterError> {
    match &cli.countries_file {
        Some(path) => load_countries_file(path),
        None => CountrySource::new(config)?.load_countries(false).await,
    }
}

fn cache_summary(info: Option<(OffsetDateTime, usize)>) -> String {
    match info {
        Some((cached_at, count)) => format!(
            "Countries: {} cached, last updated: {}",
            count,
            cached_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "Unknown".to_string())
        ),
        None => "No country cache found".to_string(),
    }
}

fn print_country(country: &Country, is_favorite: bool) {
    println!(
        "  {} {} {:<32} Capital: {:<20} Region: {:<10} Population: {}",
        if is_favorite { "*" } else { " " },
        country.id(),
        country.display_name(),
        country.capital_display(),
        country.region,
        country.population_display()
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut favorites = FileFavorites::open(&config.favorites_path)?;
    log::debug!("Using favorites file {}", favorites.path().display());

    match &cli.command {
        Commands::Countries { region } => {
            let countries = load_countries(&cli, &config).await?;
            let mut shown = 0;
            for country in countries.iter().filter(|c| {
                region
                    .as_ref()
                    .is_none_or(|r| c.region.eq_ignore_ascii_case(r))
            }) {
                print_country(country, favorites.contains(country.id()));
                shown += 1;
            }
            println!("{} countries", shown);
        }
        Commands::Toggle { code } => {
            let code = code.to_uppercase();
            let countries = load_countries(&cli, &config).await?;
            let Some(country) = countries.iter().find(|c| c.id() == code) else {
                eprintln!("Unknown country code '{}'", code);
                std::process::exit(1);
            };

            if favorites.toggle(&code)? {
                println!("Added {} to favorites", country.display_name());
            } else {
                println!("Removed {} from favorites", country.display_name());
            }
        }
        Commands::Favorites { width, page } => {
            let countries = load_countries(&cli, &config).await?;

            let viewport = Viewport::new(*width);
            let mut view = FavoritesView::new(viewport.width());
            view.start(&viewport);
            view.set_countries(countries);
            view.set_favorites(favorites.ids());
            view.set_page(*page);

            if view.is_empty() {
                println!("{}", EMPTY_MESSAGE);
                return Ok(());
            }

            if view.current_page() != *page {
                log::warn!("Page {} does not exist, showing page {}", page, view.current_page());
            }
            for country in view.current_items() {
                print_country(country, true);
            }
            if view.shows_pagination() {
                println!(
                    "{} ({} per page at width {})",
                    view.page_label(),
                    view.items_per_page(),
                    width
                );
            }
        }
        Commands::Refresh => {
            if cli.countries_file.is_some() {
                eprintln!("--countries-file cannot be combined with refresh");
                std::process::exit(1);
            }
            let source = CountrySource::new(&config)?;
            let countries = source.load_countries(true).await?;
            println!("Fetched {} countries", countries.len());
            println!("{}", cache_summary(source.get_cache_info()));
        }
        Commands::Cache { clear } => {
            let source = CountrySource::new(&config)?;
            if *clear {
                source.clear_cache()?;
                println!("Country cache cleared");
            } else {
                println!("{}", cache_summary(source.get_cache_info()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_cache_summary() {
        let info = Some((datetime!(2024-03-01 12:30:00 UTC), 250));
        assert_eq!(
            cache_summary(info),
            "Countries: 250 cached, last updated: 2024-03-01T12:30:00Z"
        );
        assert_eq!(cache_summary(None), "No country cache found");
    }
}
