//! Event poster with an embedded venue map and a QR code that links to
//! the sign-up page.

use crate::assets::map::{Map, MapType};
use crate::assets::{Caption, QrCode};
use crate::builder::{Design, Poster};
use crate::error::CartelError;
use crate::typeface::Typeface;

/// Poster with a map of the venue, a QR code for joining, and the game
/// details as captions. The map is public so callers can re-centre it,
/// change its type or add markers before rendering.
#[derive(Debug, Clone)]
pub struct VenueMapPoster {
    pub frequency: String,
    pub venue: String,
    pub signup_link: String,
    pub venue_map: Map,
}

impl VenueMapPoster {
    pub fn new(
        frequency: impl Into<String>,
        venue: impl Into<String>,
        signup_link: impl Into<String>,
    ) -> Self {
        Self {
            frequency: frequency.into(),
            venue: venue.into(),
            signup_link: signup_link.into(),
            venue_map: Map::new()
                .id("#venueMap")
                .top_left(1715, 850)
                .zoom(18)
                .output_size(640, 640)
                .map_type(MapType::Road),
        }
    }
}

impl Design for VenueMapPoster {
    fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
        // Handwritten-style annotation on the polaroid frame
        let map_caption_face = Typeface::named("Bradley Hand ITC")
            .size(35.0)
            .bold(true)
            .italic(true)
            .color_hex("#000000")?;

        let detail_face = Typeface::new().size(50.0).color_hex("#252525")?;
        let link_face = detail_face.clone().underline(true).color_hex("#cc0000")?;

        poster.add(
            Caption::new(&self.venue)
                .id("#where")
                .rect(200, 1000, 1400, 300)
                .typeface(detail_face.clone()),
        );
        poster.add(
            Caption::new(&self.frequency)
                .id("#when")
                .rect(200, 1500, 1400, 300)
                .typeface(detail_face.clone()),
        );
        poster.add(
            Caption::new("Join the game with the QR code, or at the website below:")
                .id("#how")
                .rect(200, 2000, 1400, 300)
                .typeface(detail_face),
        );
        poster.add(
            Caption::new(&self.signup_link)
                .id("#howLink")
                .rect(200, 2200, 1400, 300)
                .typeface(link_face),
        );

        poster.add(self.venue_map.clone());

        poster.add(
            Caption::new(&self.venue)
                .id("#mapCaption")
                .rect(1715, 1520, 650, 120)
                .typeface(map_caption_face),
        );

        poster.add(
            QrCode::new(&self.signup_link)
                .id("#qrCode")
                .top_left(1704, 1800)
                .scale(20)
                .version(4)
                .encoding(crate::assets::Encoding::Byte),
        );

        Ok(())
    }
}
