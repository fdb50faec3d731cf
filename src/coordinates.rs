//! Static country and city coordinate tables.

use crate::data::Coordinate;

/// Representative point per country, in the order search results list them.
pub const COUNTRY_COORDINATES: &[(&str, (f64, f64))] = &[
    // North America
    ("USA", (39.8283, -98.5795)),
    ("Canada", (56.1304, -106.3468)),
    ("Mexico", (23.6345, -102.5528)),
    ("El Salvador", (13.7942, -88.8965)),
    ("Honduras", (15.2000, -86.2419)),
    // South America
    ("Argentina", (-38.4161, -63.6167)),
    ("Brazil", (-14.2350, -51.9253)),
    ("Peru", (-9.1900, -75.0152)),
    ("Bolivia", (-16.2902, -63.5887)),
    ("Uruguay", (-32.5228, -55.7658)),
    ("Chile", (-35.6751, -71.5430)),
    ("Colombia", (4.5709, -74.2973)),
    ("Venezuela", (6.4238, -66.5897)),
    // Europe
    ("Bulgaria", (42.7339, 25.4858)),
    ("Czech Republic", (49.8175, 15.4730)),
    ("England", (52.3555, -1.1743)),
    ("Estonia", (58.5953, 25.0136)),
    ("Ireland", (53.1424, -7.6921)),
    ("Italy", (41.8719, 12.5674)),
    ("Netherlands", (52.1326, 5.2913)),
    ("Poland", (51.9194, 19.1451)),
    ("Romania", (45.9432, 24.9668)),
    ("Serbia", (44.0165, 21.0059)),
    ("Turkey", (38.9637, 35.2433)),
    ("France", (46.2276, 2.2137)),
    ("Germany", (51.1657, 10.4515)),
    ("Spain", (40.4637, -3.7492)),
    ("Portugal", (39.3999, -8.2245)),
    ("Switzerland", (46.8182, 8.2275)),
    ("Austria", (47.5162, 14.5501)),
    ("Belgium", (50.5039, 4.4699)),
    ("Greece", (39.0742, 21.8243)),
    ("Hungary", (47.1625, 19.5033)),
    ("Ukraine", (48.3794, 31.1656)),
    ("Sweden", (60.1282, 18.6435)),
    ("Norway", (60.4720, 8.4689)),
    ("Finland", (61.9241, 25.7482)),
    ("Denmark", (56.2639, 9.5018)),
    // Asia
    ("China", (35.8617, 104.1954)),
    ("Japan", (36.2048, 138.2529)),
    ("Taiwan", (23.5937, 120.9221)),
    ("UAE", (23.4241, 53.8478)),
    ("Saudi Arabia", (23.8859, 45.0792)),
    ("India", (20.5937, 78.9629)),
    ("Singapore", (1.3521, 103.8198)),
    ("South Korea", (35.9078, 127.7669)),
    ("Hong Kong", (22.3193, 114.1694)),
    ("Thailand", (15.8700, 100.9925)),
    ("Malaysia", (4.2105, 101.9758)),
    ("Indonesia", (-0.7893, 113.9213)),
    ("Philippines", (12.8797, 121.7740)),
    ("Vietnam", (14.0583, 108.2772)),
    ("Israel", (31.0461, 34.8516)),
    ("Pakistan", (30.3753, 69.3451)),
    ("Bangladesh", (23.6850, 90.3563)),
    // Africa
    ("Nigeria", (9.0820, 8.6753)),
    ("Ethiopia", (9.1450, 40.4897)),
    ("Kenya", (-0.0236, 37.9062)),
    ("South Africa", (-30.5595, 22.9375)),
    ("Egypt", (26.8206, 30.8025)),
    // Oceania
    ("Australia", (-25.2744, 133.7751)),
    ("New Zealand", (-40.9006, 174.8860)),
];

pub const CITY_COORDINATES: &[(&str, (f64, f64))] = &[
    ("Montevideo", (-34.9011, -56.1645)),
    ("Buenos Aires", (-34.6037, -58.3816)),
    ("Córdoba", (-31.4201, -64.1888)),
    ("Rosario", (-32.9468, -60.6393)),
    ("São Paulo", (-23.5505, -46.6333)),
    ("Rio de Janeiro", (-22.9068, -43.1729)),
    ("Salvador", (-12.9714, -38.5014)),
    ("Mexico City", (19.4326, -99.1332)),
    ("Guadalajara", (20.6597, -103.3496)),
    ("Monterrey", (25.6866, -100.3161)),
    ("New York", (40.7128, -74.0060)),
    ("San Francisco", (37.7749, -122.4194)),
    ("Miami", (25.7617, -80.1918)),
    ("Austin", (30.2672, -97.7431)),
    ("Denver", (39.7392, -104.9903)),
    ("Toronto", (43.6532, -79.3832)),
    ("Vancouver", (49.2827, -123.1207)),
    ("Montreal", (45.5017, -73.5673)),
    ("London", (51.5074, -0.1278)),
    ("Manchester", (53.4808, -2.2426)),
    ("Edinburgh", (55.9533, -3.1883)),
    ("Berlin", (52.5200, 13.4050)),
    ("Munich", (48.1351, 11.5820)),
    ("Hamburg", (53.5511, 9.9937)),
    ("Paris", (48.8566, 2.3522)),
    ("Lyon", (45.7640, 4.8357)),
    ("Marseille", (43.2965, 5.3698)),
    ("Madrid", (40.4168, -3.7038)),
    ("Barcelona", (41.3851, 2.1734)),
    ("Valencia", (39.4699, -0.3763)),
    ("Bangalore", (12.9716, 77.5946)),
    ("Mumbai", (19.0760, 72.8777)),
    ("Dubai", (25.2048, 55.2708)),
    ("Sydney", (-33.8688, 151.2093)),
    ("Melbourne", (-37.8136, 144.9631)),
    ("Brisbane", (-27.4705, 153.0260)),
    ("Auckland", (-36.8509, 174.7645)),
    ("Wellington", (-41.2866, 174.7756)),
    ("Cape Town", (-33.9249, 18.4241)),
    ("Johannesburg", (-26.2041, 28.0473)),
    ("Nairobi", (-1.2921, 36.8219)),
    ("Lagos", (6.5244, 3.3792)),
    ("Cairo", (30.0444, 31.2357)),
];

fn lookup(table: &[(&str, (f64, f64))], name: &str) -> Option<Coordinate> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, (lat, lng))| Coordinate::new(*lat, *lng))
}

/// Representative coordinate for a country name (exact match).
pub fn country_coordinates(country: &str) -> Option<Coordinate> {
    lookup(COUNTRY_COORDINATES, country)
}

pub fn city_coordinates(city: &str) -> Option<Coordinate> {
    lookup(CITY_COORDINATES, city)
}

/// Every country in the table, in table order.
pub fn known_countries() -> impl Iterator<Item = &'static str> {
    COUNTRY_COORDINATES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookups_are_exact() {
        assert_eq!(
            country_coordinates("Uruguay"),
            Some(Coordinate::new(-32.5228, -55.7658))
        );
        assert_eq!(country_coordinates("uruguay"), None);
        assert_eq!(city_coordinates("Lagos"), Some(Coordinate::new(6.5244, 3.3792)));
        assert_eq!(city_coordinates("Atlantis"), None);
    }

    #[test]
    fn tables_have_unique_valid_entries() {
        for table in [COUNTRY_COORDINATES, CITY_COORDINATES] {
            let mut seen = HashSet::new();
            for (name, (lat, lng)) in table {
                assert!(seen.insert(*name), "duplicate entry {name}");
                assert!(Coordinate::new(*lat, *lng).is_valid(), "bad coordinate for {name}");
            }
        }
    }
}
