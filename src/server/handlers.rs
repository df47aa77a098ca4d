//! Request handlers: translate query parameters into a design, render it
//! on the blocking pool, and stream the encoded poster back.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::builder::Poster;
use crate::designs::{EventPoster, OfferVoucher, VenueMapPoster};
use crate::error::CartelError;
use crate::format::{ImgFormat, build_filename};
use crate::server::AppState;

/// Query parameters accepted by `GET /poster`: `design`, `when`,
/// `where`, `eventId`, `address`, `lat-long`, `map-type`,
/// `special-offer`, `offer-for`, `birthday`, `size`, `show-guides`,
/// `type`.
#[derive(Debug, Deserialize)]
pub struct PosterQuery {
    #[serde(default)]
    design: Option<String>,
    #[serde(default)]
    when: Option<String>,
    #[serde(default, rename = "where")]
    location: Option<String>,
    #[serde(default, rename = "eventId")]
    event_id: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, rename = "lat-long")]
    lat_long: Option<String>,
    #[serde(default, rename = "map-type")]
    map_type: Option<String>,
    #[serde(default, rename = "special-offer")]
    special_offer: Option<String>,
    #[serde(default, rename = "offer-for")]
    offer_for: Option<String>,
    #[serde(default)]
    birthday: Option<String>,
    #[serde(default)]
    size: Option<u32>,
    #[serde(default, rename = "show-guides")]
    show_guides: Option<bool>,
    #[serde(default, rename = "type")]
    output_type: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn poster(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PosterQuery>,
) -> Response {
    let template_dir = state.config.template_dir.clone();

    let result = tokio::task::spawn_blocking(move || render_poster(&template_dir, &query)).await;

    match result {
        Ok(Ok((bytes, format, stem))) => {
            let filename = build_filename(&stem, format, true);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.mime_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Ok(Err(e)) => error_response(e),
        Err(e) => error_response(CartelError::Service(format!("render task failed: {e}"))),
    }
}

/// Build the requested design and run the full render pipeline.
/// Runs on the blocking pool: template IO, the map fetch and the draw are
/// all synchronous.
fn render_poster(
    template_dir: &std::path::Path,
    query: &PosterQuery,
) -> Result<(Vec<u8>, ImgFormat, String), CartelError> {
    let format = ImgFormat::from_name(query.output_type.as_deref().unwrap_or(""));
    let size = query.size.unwrap_or(100);
    let guides = query.show_guides.unwrap_or(false);

    let when = query.when.clone().unwrap_or_default();
    let venue = query.location.clone().unwrap_or_default();
    let signup_link = format!(
        "https://toepoke.co.uk/{}.aspx",
        query.event_id.clone().unwrap_or_default()
    );

    let design_name = query.design.as_deref().unwrap_or("event");
    let (raster, stem) = match design_name {
        "event" | "text" => {
            let design = EventPoster::new(when, venue, signup_link);
            let poster = configured_poster(template_dir, "text-example-template.jpg", size, guides)?;
            (poster.render(&design)?, "football-poster")
        }
        "map" => {
            let mut design = VenueMapPoster::new(when, venue, signup_link);
            if let Some(map_type) = query.map_type.as_deref() {
                design.venue_map = design.venue_map.clone().map_type(map_type.parse()?);
            }
            // Lat/long is used in preference to the address (better accuracy)
            if let Some(lat_long) = query.lat_long.as_deref().filter(|s| !s.is_empty()) {
                let (lat, lng) = parse_lat_long(lat_long)?;
                design.venue_map = design.venue_map.clone().centre(lat, lng);
            } else if let Some(address) = query.address.as_deref().filter(|s| !s.is_empty()) {
                design.venue_map = design.venue_map.clone().centre_address(address);
            }
            let poster = configured_poster(template_dir, "map-example-template.jpg", size, guides)?;
            (poster.render(&design)?, "football-poster")
        }
        "voucher" => {
            let birthday = query
                .birthday
                .as_deref()
                .map(|b| {
                    NaiveDate::parse_from_str(b, "%Y-%m-%d").map_err(|e| {
                        CartelError::InvalidConfiguration(format!("bad birthday '{b}': {e}"))
                    })
                })
                .transpose()?
                .unwrap_or_default();
            let design = OfferVoucher::new(
                query.special_offer.clone().unwrap_or_default(),
                query.offer_for.clone().unwrap_or_default(),
                birthday,
            );
            let poster =
                configured_poster(template_dir, "voucher-example-template.jpg", size, guides)?;
            (poster.render(&design)?, "your-voucher")
        }
        other => {
            return Err(CartelError::InvalidConfiguration(format!(
                "unknown design '{other}' (expected event, map or voucher)"
            )));
        }
    };

    Ok((format.encode(&raster)?, format, stem.to_string()))
}

fn configured_poster(
    template_dir: &std::path::Path,
    template: &str,
    size: u32,
    guides: bool,
) -> Result<Poster, CartelError> {
    Ok(Poster::from_template(template_dir.join(template))?
        .percent_size(size)
        .show_guides(guides)
        .show_dimensions(guides))
}

/// Parse a `"lat,lng"` pair.
fn parse_lat_long(s: &str) -> Result<(f64, f64), CartelError> {
    let mut parts = s.split(',').map(str::trim);
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CartelError::InvalidConfiguration(format!(
            "lat-long '{s}' must be 'lat,lng'"
        )));
    };
    let lat: f64 = lat.parse().map_err(|_| {
        CartelError::InvalidConfiguration(format!("'{lat}' is not a valid latitude"))
    })?;
    let lng: f64 = lng.parse().map_err(|_| {
        CartelError::InvalidConfiguration(format!("'{lng}' is not a valid longitude"))
    })?;
    Ok((lat, lng))
}

fn error_response(err: CartelError) -> Response {
    let status = match &err {
        CartelError::InvalidConfiguration(_) | CartelError::UnsupportedFormat(_) => {
            StatusCode::BAD_REQUEST
        }
        CartelError::Service(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(json!({ "error": err.to_string() }))).into_response()
}
