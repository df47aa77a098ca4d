//! # Cartel - Poster Composition Library
//!
//! Cartel takes an existing designed image (a "template") and draws
//! details dynamically onto the surface: text captions, embedded images,
//! QR codes and remotely-fetched maps. Start with a pretty template
//! carrying your branding, register the dynamic bits for one user, and
//! hand them back a finished poster.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cartel::{
//!     assets::{Caption, QrCode},
//!     builder::{Design, Poster},
//!     error::CartelError,
//!     format::ImgFormat,
//! };
//!
//! struct Invite {
//!     url: String,
//! }
//!
//! impl Design for Invite {
//!     fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
//!         poster.add(Caption::new("You're invited!").top_left(40, 40));
//!         poster.add(QrCode::new(&self.url).top_left(40, 120).scale(8).version(4));
//!         Ok(())
//!     }
//! }
//!
//! let poster = Poster::from_template("invite-template.png")?
//!     .percent_size(50);
//! let raster = poster.render(&Invite { url: "HTTPS://EXAMPLE.COM/X1".into() })?;
//! let png = ImgFormat::Png.encode(&raster)?;
//! # Ok::<(), CartelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`builder`] | The poster pipeline: validate → render → guides → resize |
//! | [`assets`] | Drawable elements: captions, images, QR codes, maps |
//! | [`geometry`] | Position and Area placement primitives |
//! | [`typeface`] | Font, color and decoration descriptors |
//! | [`canvas`] | The shared drawing surface |
//! | [`format`] | Output encoding, MIME types and filenames |
//! | [`designs`] | Shipped example designs |
//! | [`server`] | HTTP front end |
//! | [`error`] | Error types |
//!
//! Within one render the canvas is mutated strictly in asset registration
//! order — later assets draw over earlier ones — and any validation or
//! render failure aborts the whole render with no partial output.

pub mod assets;
pub mod builder;
pub mod canvas;
pub mod designs;
pub mod error;
pub mod format;
pub mod geometry;
pub mod render;
pub mod server;
pub mod typeface;

// Re-exports for convenience
pub use builder::{Design, Poster};
pub use error::CartelError;
pub use format::ImgFormat;
