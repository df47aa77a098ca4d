//! Map asset: fetches a static map from a remote tile service and blits
//! it onto the template, exactly like an image asset whose source happens
//! to live behind an HTTP endpoint.

pub mod location;
pub mod marker;

pub use location::Location;
pub use marker::{MapMarker, MarkerSize};

use std::str::FromStr;

use image::RgbaImage;
use reqwest::Url;

use crate::canvas::Canvas;
use crate::error::CartelError;
use crate::geometry::Position;
use crate::typeface::StyleContext;

/// Default endpoint queried for rendered maps.
pub const STATIC_MAPS_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// The kinds of rendered map the tile service supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MapType {
    #[default]
    Road,
    Satellite,
    Hybrid,
}

impl MapType {
    /// Wire-level name the tile service expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Satellite => "satellite",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for MapType {
    type Err = CartelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "road" => Ok(Self::Road),
            "satellite" => Ok(Self::Satellite),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(CartelError::UnsupportedFormat(format!(
                "'{other}' is not a known map type"
            ))),
        }
    }
}

/// A remotely-rendered map placed on the poster.
///
/// ```
/// use cartel::assets::map::{Map, MapType};
///
/// let venue_map = Map::new()
///     .id("#venueMap")
///     .top_left(1715, 850)
///     .zoom(18)
///     .output_size(640, 640)
///     .map_type(MapType::Road)
///     .centre_address("Wembley, HA9 0WS");
/// ```
#[derive(Debug, Clone)]
pub struct Map {
    pub position: Position,
    endpoint: String,
    location: Location,
    map_type: MapType,
    zoom: i32,
    output_width: u32,
    output_height: u32,
    markers: Vec<MapMarker>,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            position: Position::default(),
            endpoint: STATIC_MAPS_URL.to_string(),
            location: Location::default(),
            map_type: MapType::Road,
            zoom: 16,
            output_width: 640,
            output_height: 640,
            markers: Vec::new(),
        }
    }
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a diagnostic id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.position.id = id.into();
        self
    }

    /// Where on the template the map should be drawn.
    pub fn top_left(mut self, x: i32, y: i32) -> Self {
        self.position.x = x;
        self.position.y = y;
        self
    }

    /// Centre the map on coordinates, clearing any address.
    pub fn centre(mut self, lat: f64, lng: f64) -> Self {
        self.location.set_lat_lng(lat, lng);
        self
    }

    /// Centre the map on an address search, clearing any coordinates.
    pub fn centre_address(mut self, address: impl Into<String>) -> Self {
        self.location.set_address(address);
        self
    }

    pub fn map_type(mut self, map_type: MapType) -> Self {
        self.map_type = map_type;
        self
    }

    pub fn zoom(mut self, zoom: i32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Pixel dimensions of the fetched map image.
    pub fn output_size(mut self, width: u32, height: u32) -> Self {
        self.output_width = width;
        self.output_height = height;
        self
    }

    /// Add a marker. Markers are sent in the order they were added.
    pub fn marker(mut self, marker: MapMarker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Point the asset at a different tile endpoint (tests, proxies).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The caller-configured markers; the implicit centre marker is
    /// appended only while encoding the request.
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// The map never uses the path/bytes/raster sources, so the image
    /// asset's source-exclusivity rule does not apply here.
    pub fn validate(&self) -> Result<(), CartelError> {
        Ok(())
    }

    /// Build the request that instructs the tile service how to draw the
    /// map: centre, zoom, output size, map type, and one marker parameter
    /// per configured marker plus one at the map's own centre.
    pub fn request_url(&self) -> Result<Url, CartelError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| CartelError::Service(format!("bad map endpoint: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("center", &self.location.to_param());
            query.append_pair("zoom", &self.zoom.to_string());
            query.append_pair(
                "size",
                &format!("{}x{}", self.output_width, self.output_height),
            );
            query.append_pair("maptype", self.map_type.as_str());
            query.append_pair("sensor", "false");

            let centre_marker = MapMarker::at(self.location.clone());
            for m in self.markers.iter().chain(std::iter::once(&centre_marker)) {
                query.append_pair("markers", &m.to_param());
            }
        }

        Ok(url)
    }

    /// Fetch the rendered map: one synchronous blocking call, no retry,
    /// transport-default timeout. A failed response or undecodable body is
    /// a service error.
    pub fn fetch(&self) -> Result<RgbaImage, CartelError> {
        let url = self.request_url()?;

        let client = reqwest::blocking::Client::builder()
            .user_agent("cartel/0.1")
            .build()
            .map_err(|e| CartelError::Service(format!("HTTP client error: {e}")))?;

        let response = client
            .get(url.clone())
            .send()
            .map_err(|e| CartelError::Service(format!("failed to fetch map from {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(CartelError::Service(format!(
                "map service returned HTTP {} for {url}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| CartelError::Service(format!("failed to read map response: {e}")))?;

        let image = image::load_from_memory(&bytes)
            .map_err(|e| CartelError::Service(format!("failed to decode map image: {e}")))?;

        Ok(image.to_rgba8())
    }

    pub fn render(&self, canvas: &mut Canvas, _style: &StyleContext) -> Result<(), CartelError> {
        let map = self.fetch()?;
        canvas.blit(&map, self.position.x as i64, self.position.y as i64);
        Ok(())
    }

    /// Point-based assets draw no guides.
    pub fn draw_guides(&self, _canvas: &mut Canvas, _show_dimensions: bool) {}
}
