use serde::{Deserialize, Serialize};

pub const APP_ID: &str = "com.communityatlas.CommunityAtlas";
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
/// `data_source` value naming the list compiled into the binary.
pub const BUNDLED_DATA_SOURCE: &str = "bundled";
pub const DEFAULT_DATA_SOURCE: &str = BUNDLED_DATA_SOURCE;
pub const DEFAULT_SUBMISSION_URL: &str = "https://github.com/ethcommunities/directory/issues/new";
pub const DEFAULT_TILE_URL: &str = "https://a.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png";

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Camera center and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
}

impl MapView {
    pub const fn new(lat: f64, lng: f64, zoom: f64) -> Self {
        Self {
            center: Coordinate::new(lat, lng),
            zoom,
        }
    }
}

/// Whole-world view used at startup and for regions without a predefined view.
pub const WORLD_VIEW: MapView = MapView::new(0.0, 0.0, 2.0);

/// One directory entry. Optional fields stay `None` when absent from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
}

impl Community {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            city: None,
            website: None,
            twitter: None,
            description: None,
            chain: None,
            coordinates: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn with_coordinates(mut self, coordinates: Coordinate) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Key used for marker identity. Not unique when two same-named
    /// communities share a country.
    pub fn marker_key(&self) -> String {
        format!("{}-{}", self.name, self.country)
    }

    /// "City, Country" or just the country.
    pub fn location_label(&self) -> String {
        match self.city.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(city) => format!("{}, {}", city, self.country),
            None => self.country.clone(),
        }
    }
}

/// Single entry of a Nominatim search response. Coordinates arrive as strings.
#[derive(Debug, Deserialize, Clone)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl NominatimPlace {
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lng = self.lon.trim().parse::<f64>().ok()?;
        let coordinate = Coordinate::new(lat, lng);
        coordinate.is_valid().then_some(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_stay_absent() {
        let community: Community =
            serde_json::from_str(r#"{"name":"ETH Uruguay","country":"Uruguay"}"#).unwrap();
        assert_eq!(community.city, None);
        assert_eq!(community.chain, None);
        assert_eq!(community.coordinates, None);
        assert_eq!(community.marker_key(), "ETH Uruguay-Uruguay");
    }

    #[test]
    fn explicit_coordinates_are_read() {
        let json = r#"{"name":"a","country":"Peru","city":"Lima",
            "coordinates":{"lat":-12.04,"lng":-77.04}}"#;
        let community: Community = serde_json::from_str(json).unwrap();
        assert_eq!(community.coordinates, Some(Coordinate::new(-12.04, -77.04)));
        assert_eq!(community.location_label(), "Lima, Peru");
    }

    #[test]
    fn nominatim_place_rejects_garbage() {
        let place = NominatimPlace {
            lat: "abc".into(),
            lon: "1.0".into(),
            display_name: String::new(),
        };
        assert_eq!(place.coordinate(), None);

        let place = NominatimPlace {
            lat: " -34.9011 ".into(),
            lon: "-56.1645".into(),
            display_name: String::new(),
        };
        assert_eq!(place.coordinate(), Some(Coordinate::new(-34.9011, -56.1645)));
    }
}
