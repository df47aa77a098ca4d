//! Personal offer voucher: a greeting, a birthday message, the offer
//! itself, and a short QR voucher code for the point of sale.

use chrono::{Local, NaiveDate};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::assets::{Caption, Encoding, QrCode};
use crate::builder::{Design, Poster};
use crate::error::CartelError;
use crate::typeface::Typeface;

/// Voucher showing an imaginary special offer to a customer.
///
/// The voucher code is generated once per voucher; store it alongside the
/// customer so the offer can be verified when the code is scanned at the
/// point of sale.
#[derive(Debug, Clone)]
pub struct OfferVoucher {
    pub special_offer: String,
    pub offer_for: String,
    pub birthday: NaiveDate,
    code: String,
}

impl OfferVoucher {
    pub fn new(
        special_offer: impl Into<String>,
        offer_for: impl Into<String>,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            special_offer: special_offer.into(),
            offer_for: offer_for.into(),
            birthday,
            code: generate_code(),
        }
    }

    /// The short code embedded in the QR symbol.
    pub fn voucher_code(&self) -> &str {
        &self.code
    }

    fn birthday_message(&self) -> String {
        let days = (Local::now().date_naive() - self.birthday).num_days().max(0);
        let years = (days + 364) / 365;
        format!(
            "On {} it's your pitch birthday.  You've been playing football with us for {} years!",
            self.birthday.format("%b %d"),
            years
        )
    }
}

/// Six random uppercase alphanumeric characters — short enough to type at
/// a till, random enough that customers can't mint their own offers.
fn generate_code() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}

impl Design for OfferVoucher {
    fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
        poster.set_default_typeface(
            Typeface::named("Bradley Hand ITC")
                .size(11.0)
                .color_hex("#a56bdb")?,
        );

        poster.add(
            Caption::new(format!("Hi {},", self.offer_for))
                .id("#hello")
                .top_left(5, 65),
        );
        poster.add(
            Caption::new(self.birthday_message())
                .id("#birthday")
                .rect(5, 90, 350, 100),
        );
        poster.add(
            Caption::new(&self.special_offer)
                .id("#offer")
                .rect(5, 135, 350, 100),
        );
        poster.add(
            QrCode::new(&self.code)
                .id("#qrCode")
                .top_left(350, 75)
                .scale(2)
                .version(4)
                .encoding(Encoding::Alphanumeric),
        );

        Ok(())
    }
}
