//! "Add Community" form handling.
//!
//! Submissions leave the app as a prefilled new-issue link. The issue body is
//! one `Label: value` line per field, and `parse_issue_body` reads such a body
//! back into a `Community` when maintainers fold submissions into the list.

use tracing::info;

use crate::data::{Community, Coordinate};
use crate::error::{Error, Result};
use crate::geocoding::Geocoder;

pub const GEOCODE_MISS_MESSAGE: &str = "Could not find coordinates for this location";
pub const GEOCODE_NEEDS_CITY_MESSAGE: &str = "Please enter both city and country";

/// Raw form contents. Blank strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityDraft {
    pub name: String,
    pub country: String,
    pub city: String,
    pub chain: String,
    pub website: String,
    pub twitter: String,
    pub description: String,
    pub lat: String,
    pub lng: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl CommunityDraft {
    /// Manual coordinates. Both blank is `None`; one blank or unparsable is an error.
    pub fn coordinates(&self) -> Result<Option<Coordinate>> {
        let (lat, lng) = (self.lat.trim(), self.lng.trim());
        if lat.is_empty() && lng.is_empty() {
            return Ok(None);
        }
        let invalid = || Error::InvalidCoordinates(format!("{}, {}", lat, lng));
        let coordinate = Coordinate::new(
            lat.parse().map_err(|_| invalid())?,
            lng.parse().map_err(|_| invalid())?,
        );
        if !coordinate.is_valid() {
            return Err(invalid());
        }
        Ok(Some(coordinate))
    }

    pub fn set_coordinates(&mut self, coordinate: Coordinate) {
        self.lat = coordinate.lat.to_string();
        self.lng = coordinate.lng.to_string();
    }

    pub fn to_community(&self) -> Result<Community> {
        let name = optional(&self.name).ok_or(Error::MissingField("name"))?;
        let country = optional(&self.country).ok_or(Error::MissingField("country"))?;
        Ok(Community {
            name,
            country,
            city: optional(&self.city),
            website: optional(&self.website),
            twitter: optional(&self.twitter),
            description: optional(&self.description),
            chain: optional(&self.chain),
            coordinates: self.coordinates()?,
        })
    }

    /// Looks up city + country and writes the result into the coordinate fields.
    pub async fn fill_coordinates(&mut self, geocoder: &Geocoder) -> Result<Coordinate> {
        let city = optional(&self.city).ok_or(Error::MissingField("city"))?;
        let country = optional(&self.country).ok_or(Error::MissingField("country"))?;
        let coordinate = geocoder
            .resolve(Some(&city), &country)
            .await
            .ok_or_else(|| Error::NotFound(format!("{}, {}", city, country)))?;
        self.set_coordinates(coordinate);
        Ok(coordinate)
    }

    /// New-issue URL carrying the draft, after the required fields are checked.
    pub fn submission_link(&self, base_url: &str) -> Result<String> {
        let community = self.to_community()?;
        info!("Submitting community draft: {:?}", community);
        Ok(submission_link(base_url, &community))
    }
}

pub fn submission_link(base_url: &str, community: &Community) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}title={}&body={}",
        base_url,
        separator,
        urlencoding::encode(&format!("Add community: {}", community.name)),
        urlencoding::encode(&issue_body(community))
    )
}

pub fn issue_body(community: &Community) -> String {
    let mut lines = vec![
        format!("Name: {}", community.name),
        format!("Country: {}", community.country),
    ];
    let optional_fields = [
        ("City", &community.city),
        ("Chain", &community.chain),
        ("Website", &community.website),
        ("Twitter", &community.twitter),
        ("Description", &community.description),
    ];
    for (label, value) in optional_fields {
        if let Some(value) = value {
            lines.push(format!("{}: {}", label, value));
        }
    }
    if let Some(c) = community.coordinates {
        lines.push(format!("Coordinates: {}, {}", c.lat, c.lng));
    }
    lines.join("\n")
}

/// Reads a `Label: value` issue body. Unknown labels are ignored and empty
/// values count as absent.
pub fn parse_issue_body(body: &str) -> Result<Community> {
    let mut draft = CommunityDraft::default();
    for line in body.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match label.trim().to_ascii_lowercase().as_str() {
            "name" => draft.name = value,
            "country" => draft.country = value,
            "city" => draft.city = value,
            "chain" => draft.chain = value,
            "website" => draft.website = value,
            "twitter" => draft.twitter = value,
            "description" => draft.description = value,
            "coordinates" => {
                if let Some((lat, lng)) = value.split_once(',') {
                    draft.lat = lat.trim().to_string();
                    draft.lng = lng.trim().to_string();
                } else if !value.is_empty() {
                    return Err(Error::InvalidCoordinates(value));
                }
            }
            _ => {}
        }
    }
    draft.to_community()
}
