//! Markers drawn on a fetched map: color, optional label, size class and
//! a location of their own.

use super::location::Location;

/// Size class of a marker on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerSize {
    #[default]
    Normal,
    Tiny,
    Mid,
    Small,
}

impl MarkerSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Tiny => "tiny",
            Self::Mid => "mid",
            Self::Small => "small",
        }
    }
}

/// A single map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    color: String,
    label: String,
    size: MarkerSize,
    location: Location,
}

impl Default for MapMarker {
    fn default() -> Self {
        Self {
            color: "#ffffcc".into(),
            label: String::new(),
            size: MarkerSize::Normal,
            location: Location::default(),
        }
    }
}

impl MapMarker {
    /// Marker at the given location with default styling.
    pub fn at(location: Location) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Named or hex color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Single-character label shown on the marker.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn size(mut self, size: MarkerSize) -> Self {
        self.size = size;
        self
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Wire-level value of one `markers` request parameter:
    /// `color:{c}|label:{l}|size:{s}|{location}`, label omitted when empty.
    pub fn to_param(&self) -> String {
        let mut param = format!("color:{}", self.color);
        if !self.label.is_empty() {
            param.push_str(&format!("|label:{}", self.label));
        }
        param.push_str(&format!("|size:{}", self.size.as_str()));
        param.push('|');
        param.push_str(&self.location.to_param());
        param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_with_label() {
        let m = MapMarker::at(Location::lat_lng(51.5, -0.28))
            .color("red")
            .label("A")
            .size(MarkerSize::Mid);
        assert_eq!(m.to_param(), "color:red|label:A|size:mid|51.5,-0.28");
    }

    #[test]
    fn param_omits_empty_label() {
        let m = MapMarker::at(Location::address("Wembley"));
        assert_eq!(m.to_param(), "color:#ffffcc|size:normal|Wembley");
    }

    #[test]
    fn marker_uses_its_own_location() {
        let m = MapMarker::at(Location::address("the pub"));
        assert!(m.to_param().ends_with("|the pub"));
    }
}
