//! A point on a map: either a free-text address or a latitude/longitude
//! pair. The two are mutually exclusive — setting one clears the other.

/// Where a map is centred or a marker placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location from an address search string,
    /// e.g. `"Wembley, Middlesex HA9 0WS"`.
    pub fn address(address: impl Into<String>) -> Self {
        let mut loc = Self::default();
        loc.set_address(address);
        loc
    }

    /// Location from latitude/longitude coordinates.
    pub fn lat_lng(lat: f64, lng: f64) -> Self {
        let mut loc = Self::default();
        loc.set_lat_lng(lat, lng);
        loc
    }

    /// Switch to address-based positioning, clearing any coordinates.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.latitude = None;
        self.longitude = None;
    }

    /// Switch to coordinate-based positioning, clearing any address.
    pub fn set_lat_lng(&mut self, lat: f64, lng: f64) {
        self.address.clear();
        self.latitude = Some(lat);
        self.longitude = Some(lng);
    }

    /// True when both coordinates are present; the wire request then uses
    /// them in preference to the address.
    pub fn use_lat_lng(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.use_lat_lng() && self.address.is_empty()
    }

    /// Wire-level value: `lat,lng` or the raw address (the URL builder
    /// percent-encodes it).
    pub fn to_param(&self) -> String {
        if self.use_lat_lng() {
            // use_lat_lng guarantees both are present
            format!("{},{}", self.latitude.unwrap(), self.longitude.unwrap())
        } else {
            self.address.clone()
        }
    }
}
