//! Marker placement for the map.
//!
//! Each community resolves to a base coordinate (explicit coordinates, then
//! the city table, then the country table). Communities sharing a base
//! coordinate are fanned out so their markers do not sit on top of each other.

use std::collections::HashMap;

use tracing::warn;

use crate::coordinates::{city_coordinates, country_coordinates};
use crate::data::{Community, Coordinate};

/// Diagonal directions cycled by index, as (lat sign, lng sign).
const DIAGONALS: [(f64, f64); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Explicit,
    City,
    Country,
}

pub fn resolve_location(community: &Community) -> Option<(Coordinate, LocationSource)> {
    if let Some(coordinates) = community.coordinates.filter(Coordinate::is_valid) {
        return Some((coordinates, LocationSource::Explicit));
    }
    if let Some(coordinates) = community.city.as_deref().and_then(city_coordinates) {
        return Some((coordinates, LocationSource::City));
    }
    country_coordinates(&community.country).map(|c| (c, LocationSource::Country))
}

/// Position of the `index`-th marker sharing `base`. Index 0 stays on the base;
/// later ones move `index * step` degrees along a diagonal picked by index.
pub fn offset_position(base: Coordinate, index: usize, step: f64) -> Coordinate {
    if index == 0 {
        return base;
    }
    let (lat_sign, lng_sign) = DIAGONALS[index % DIAGONALS.len()];
    let distance = index as f64 * step;
    Coordinate::new(
        (base.lat + lat_sign * distance).clamp(-90.0, 90.0),
        wrap_longitude(base.lng + lng_sign * distance),
    )
}

/// Folds a longitude back into [-180, 180).
fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupLink {
    pub label: &'static str,
    pub url: String,
}

/// Text shown when a marker is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub title: String,
    pub location: String,
    pub description: Option<String>,
    pub chain: Option<String>,
    pub links: Vec<PopupLink>,
}

impl MarkerPopup {
    pub fn for_community(community: &Community) -> Self {
        let mut links = Vec::new();
        if let Some(url) = non_blank(&community.website) {
            links.push(PopupLink {
                label: "Website",
                url,
            });
        }
        if let Some(url) = non_blank(&community.twitter) {
            links.push(PopupLink {
                label: "Twitter",
                url,
            });
        }
        Self {
            title: community.name.clone(),
            location: community.location_label(),
            description: non_blank(&community.description),
            chain: non_blank(&community.chain),
            links,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker<'a> {
    /// Position of the community in the sequence given to `MarkerLayout::build`.
    pub index: usize,
    pub key: String,
    pub community: &'a Community,
    pub position: Coordinate,
    pub source: LocationSource,
}

impl PlacedMarker<'_> {
    pub fn popup(&self) -> MarkerPopup {
        MarkerPopup::for_community(self.community)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerLayout<'a> {
    markers: Vec<PlacedMarker<'a>>,
    skipped: usize,
}

impl<'a> MarkerLayout<'a> {
    /// Lays out one marker per community. Communities without any resolvable
    /// location are skipped with a warning.
    pub fn build(communities: impl IntoIterator<Item = &'a Community>, step: f64) -> Self {
        let mut shared: HashMap<(u64, u64), usize> = HashMap::new();
        let mut markers = Vec::new();
        let mut skipped = 0;

        for (index, community) in communities.into_iter().enumerate() {
            let Some((base, source)) = resolve_location(community) else {
                warn!(
                    "No coordinates for {} ({}), skipping marker",
                    community.name, community.country
                );
                skipped += 1;
                continue;
            };
            let slot = shared
                .entry((base.lat.to_bits(), base.lng.to_bits()))
                .or_insert(0);
            let position = offset_position(base, *slot, step);
            *slot += 1;

            markers.push(PlacedMarker {
                index,
                key: community.marker_key(),
                community,
                position,
                source,
            });
        }

        Self { markers, skipped }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedMarker<'a>> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Adjusted marker position of the community at `index`. Entries are not
    /// unique by value, so the index picks the marker; `community` must match it.
    pub fn position_of(&self, index: usize, community: &Community) -> Option<Coordinate> {
        self.markers
            .iter()
            .find(|marker| marker.index == index && marker.community == community)
            .map(|marker| marker.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_prefers_explicit_then_city_then_country() {
        let explicit = Community::new("a", "Uruguay")
            .with_city("Montevideo")
            .with_coordinates(Coordinate::new(1.0, 2.0));
        assert_eq!(
            resolve_location(&explicit),
            Some((Coordinate::new(1.0, 2.0), LocationSource::Explicit))
        );

        let city = Community::new("b", "Uruguay").with_city("Montevideo");
        assert_eq!(resolve_location(&city).map(|r| r.1), Some(LocationSource::City));

        let country = Community::new("c", "Uruguay").with_city("Punta del Este");
        assert_eq!(
            resolve_location(&country),
            Some((Coordinate::new(-32.5228, -55.7658), LocationSource::Country))
        );

        assert_eq!(resolve_location(&Community::new("d", "Atlantis")), None);
    }

    #[test]
    fn invalid_explicit_coordinates_are_ignored() {
        let community =
            Community::new("a", "Peru").with_coordinates(Coordinate::new(120.0, 0.0));
        assert_eq!(resolve_location(&community).map(|r| r.1), Some(LocationSource::Country));
    }

    #[test]
    fn offsets_are_deterministic_and_distinct() {
        let base = Coordinate::new(10.0, 10.0);
        let positions: Vec<Coordinate> = (0..8).map(|i| offset_position(base, i, 0.5)).collect();
        assert_eq!(positions[0], base);
        assert_eq!(positions[1], Coordinate::new(10.5, 9.5));
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(offset_position(base, 3, 0.5), offset_position(base, 3, 0.5));
    }

    #[test]
    fn shared_country_markers_do_not_overlap() {
        let list = vec![
            Community::new("ETH Uruguay", "Uruguay"),
            Community::new("Cabal Uruguay", "Uruguay"),
        ];
        let layout = MarkerLayout::build(&list, 0.3);
        assert_eq!(layout.len(), 2);
        let first = layout.position_of(0, &list[0]).unwrap();
        let second = layout.position_of(1, &list[1]).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn identical_entries_keep_their_own_markers() {
        let list = vec![
            Community::new("ETH NZ", "New Zealand"),
            Community::new("ETH NZ", "New Zealand"),
        ];
        let layout = MarkerLayout::build(&list, 0.3);
        let placed: Vec<Coordinate> = layout.iter().map(|m| m.position).collect();
        assert_eq!(layout.position_of(0, &list[0]), Some(placed[0]));
        assert_eq!(layout.position_of(1, &list[1]), Some(placed[1]));
        assert_ne!(placed[0], placed[1]);
        assert_eq!(layout.position_of(2, &list[0]), None);
    }

    #[test]
    fn offsets_wrap_across_the_antimeridian() {
        let base = country_coordinates("New Zealand").unwrap();
        for index in 0..40 {
            let position = offset_position(base, index, 0.3);
            assert!(position.is_valid(), "index {} gave {:?}", index, position);
        }
        let east = offset_position(Coordinate::new(0.0, 179.5), 1, 1.0);
        assert_eq!(east, Coordinate::new(1.0, 178.5));
        let west = offset_position(Coordinate::new(0.0, 179.5), 2, 1.0);
        assert_eq!(west, Coordinate::new(-2.0, -178.5));
    }

    #[test]
    fn unresolvable_communities_are_skipped() {
        let list = vec![
            Community::new("ETH Atlantis", "Atlantis"),
            Community::new("ETH Peru", "Peru"),
        ];
        let layout = MarkerLayout::build(&list, 0.3);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.skipped(), 1);
        assert_eq!(layout.iter().next().unwrap().key, "ETH Peru-Peru");
    }

    #[test]
    fn popup_drops_blank_links() {
        let mut community = Community::new("ETH Lima", "Peru").with_city("Lima");
        community.website = Some("https://ethlima.org".into());
        community.twitter = Some("  ".into());
        let popup = MarkerPopup::for_community(&community);
        assert_eq!(popup.location, "Lima, Peru");
        assert_eq!(popup.links.len(), 1);
        assert_eq!(popup.links[0].label, "Website");
    }
}
