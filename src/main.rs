//! # Cartel CLI
//!
//! Command-line interface for rendering posters.
//!
//! ## Usage
//!
//! ```bash
//! # Render the event design onto a template
//! cartel render --design event --template poster.jpg --out out.png \
//!     --when "most Tuesdays" --where "Powerleague Wembley" --event-url "https://example.com/join"
//!
//! # Half-size render with placement guides
//! cartel render --design event --template poster.jpg --out out.png --size 50 --guides
//!
//! # Start the HTTP front end
//! cartel serve --listen 0.0.0.0:8080 --templates ./poster-templates
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use cartel::{
    builder::Poster,
    designs::{EventPoster, OfferVoucher, VenueMapPoster},
    error::CartelError,
    format::ImgFormat,
    server::{self, ServerConfig},
};

/// Cartel - poster rendering utility
#[derive(Parser, Debug)]
#[command(name = "cartel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a poster design to an image file
    Render {
        /// Design to render: event, map or voucher
        #[arg(long, default_value = "event")]
        design: String,

        /// Template image to draw on
        #[arg(long)]
        template: PathBuf,

        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Output size as a percentage of the template
        #[arg(long, default_value = "100")]
        size: u32,

        /// Draw placement guides around areas
        #[arg(long)]
        guides: bool,

        /// With --guides, also print each area's dimensions
        #[arg(long)]
        dimensions: bool,

        /// Output format: png, jpeg, gif or bmp (defaults to jpeg)
        #[arg(long, default_value = "png")]
        format: String,

        /// Event frequency (event/map designs)
        #[arg(long, default_value = "")]
        when: String,

        /// Venue (event/map designs)
        #[arg(long = "where", default_value = "")]
        venue: String,

        /// Sign-up URL (event/map designs)
        #[arg(long, default_value = "https://example.com/join")]
        event_url: String,

        /// Map centre address (map design)
        #[arg(long)]
        address: Option<String>,

        /// Map centre as "lat,lng" (map design, wins over --address)
        #[arg(long)]
        lat_long: Option<String>,

        /// Map type: road, satellite or hybrid (map design)
        #[arg(long)]
        map_type: Option<String>,

        /// Offer text (voucher design)
        #[arg(long, default_value = "")]
        special_offer: String,

        /// Customer name (voucher design)
        #[arg(long, default_value = "")]
        offer_for: String,

        /// Customer birthday, YYYY-MM-DD (voucher design)
        #[arg(long)]
        birthday: Option<String>,
    },

    /// Start the HTTP front end
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory holding the design template images
        #[arg(long, default_value = "poster-templates")]
        templates: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CartelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            design,
            template,
            out,
            size,
            guides,
            dimensions,
            format,
            when,
            venue,
            event_url,
            address,
            lat_long,
            map_type,
            special_offer,
            offer_for,
            birthday,
        } => {
            let poster = Poster::from_template(template)?
                .percent_size(size)
                .show_guides(guides)
                .show_dimensions(dimensions);

            let raster = match design.as_str() {
                "event" | "text" => {
                    poster.render(&EventPoster::new(when, venue, event_url))?
                }
                "map" => {
                    let mut design = VenueMapPoster::new(when, venue, event_url);
                    if let Some(map_type) = map_type.as_deref() {
                        design.venue_map = design.venue_map.clone().map_type(map_type.parse()?);
                    }
                    if let Some(lat_long) = lat_long.as_deref() {
                        let (lat, lng) = parse_lat_long(lat_long)?;
                        design.venue_map = design.venue_map.clone().centre(lat, lng);
                    } else if let Some(address) = address {
                        design.venue_map = design.venue_map.clone().centre_address(address);
                    }
                    poster.render(&design)?
                }
                "voucher" => {
                    let birthday = birthday
                        .as_deref()
                        .map(|b| {
                            NaiveDate::parse_from_str(b, "%Y-%m-%d").map_err(|e| {
                                CartelError::InvalidConfiguration(format!(
                                    "bad birthday '{b}': {e}"
                                ))
                            })
                        })
                        .transpose()?
                        .unwrap_or_default();
                    let voucher = OfferVoucher::new(special_offer, offer_for, birthday);
                    println!("Voucher code: {}", voucher.voucher_code());
                    poster.render(&voucher)?
                }
                other => {
                    return Err(CartelError::InvalidConfiguration(format!(
                        "unknown design '{other}' (expected event, map or voucher)"
                    )));
                }
            };

            let format = ImgFormat::from_name(&format);
            std::fs::write(&out, format.encode(&raster)?)?;
            println!("Wrote {}x{} poster to {}", raster.width(), raster.height(), out.display());
            Ok(())
        }

        Commands::Serve { listen, templates } => {
            let config = ServerConfig {
                listen_addr: listen,
                template_dir: templates,
            };
            tokio::runtime::Runtime::new()?.block_on(server::serve(config))
        }
    }
}

/// Parse a `"lat,lng"` pair.
fn parse_lat_long(s: &str) -> Result<(f64, f64), CartelError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(CartelError::InvalidConfiguration(format!(
            "lat-long '{s}' must be 'lat,lng'"
        )));
    }
    let parse = |v: &str| {
        v.parse::<f64>().map_err(|_| {
            CartelError::InvalidConfiguration(format!("'{v}' is not a valid coordinate"))
        })
    };
    Ok((parse(parts[0])?, parse(parts[1])?))
}
