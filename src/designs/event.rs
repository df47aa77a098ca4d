//! Text-only event poster: when, where, and how to sign up.

use crate::assets::Caption;
use crate::builder::{Design, Poster};
use crate::error::CartelError;
use crate::geometry::Area;
use crate::render::text::Align;
use crate::typeface::Typeface;

/// Poster advertising a recurring event: how often it runs, where, and a
/// sign-up link. Seven stacked captions share one base rectangle, each row
/// shifting the Y origin.
#[derive(Debug, Clone)]
pub struct EventPoster {
    pub frequency: String,
    pub venue: String,
    pub signup_link: String,
    /// First caption row; the other rows reuse its x/width/height and only
    /// move the Y origin. Tuned for an A4-ish print template.
    pub base: Area,
}

impl EventPoster {
    pub fn new(
        frequency: impl Into<String>,
        venue: impl Into<String>,
        signup_link: impl Into<String>,
    ) -> Self {
        Self {
            frequency: frequency.into(),
            venue: venue.into(),
            signup_link: signup_link.into(),
            base: Area::at(0, 1200, 2480, 125),
        }
    }

    fn row(&self, offset_y: i32) -> Area {
        Area::at(
            self.base.x,
            self.base.y + offset_y,
            self.base.width,
            self.base.height,
        )
    }
}

impl Design for EventPoster {
    fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
        let title_face = Typeface::new().size(75.0).color_hex("#000000")?;
        let text_face = Typeface::new().size(75.0).color_hex("#8f87ca")?.bold(true);
        let url_face = text_face.clone().underline(true);

        let rows: [(&str, String, &Typeface, i32); 7] = [
            ("#whenTitle", "WHEN?".into(), &title_face, 0),
            (
                "#whenText",
                format!("We play {}.", self.frequency),
                &text_face,
                150,
            ),
            ("#whereTitle", "WHERE?".into(), &title_face, 400),
            ("#whereText", self.venue.clone(), &text_face, 550),
            ("#howTitle", "HOW?".into(), &title_face, 800),
            ("#howText", "Sign-up at:".into(), &text_face, 950),
            ("#howUrl", self.signup_link.clone(), &url_face, 1100),
        ];

        for (id, text, face, offset) in rows {
            let rect = self.row(offset);
            poster.add(
                Caption::new(text)
                    .id(id)
                    .rect(rect.x, rect.y, rect.width, rect.height)
                    .typeface((*face).clone())
                    .h_align(Align::Center),
            );
        }

        Ok(())
    }
}
