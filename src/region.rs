//! Country to region classification.

use std::fmt;
use std::str::FromStr;

use crate::data::{MapView, WORLD_VIEW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Asia,
    Africa,
    Oceania,
    Other,
}

/// The six named regions in display order. `Other` is deliberately absent.
pub const REGIONS: [Region; 6] = [
    Region::NorthAmerica,
    Region::SouthAmerica,
    Region::Europe,
    Region::Asia,
    Region::Africa,
    Region::Oceania,
];

const REGION_MAPPING: &[(&str, Region)] = &[
    ("USA", Region::NorthAmerica),
    ("Canada", Region::NorthAmerica),
    ("Mexico", Region::NorthAmerica),
    ("El Salvador", Region::NorthAmerica),
    ("Honduras", Region::NorthAmerica),
    ("Argentina", Region::SouthAmerica),
    ("Brazil", Region::SouthAmerica),
    ("Peru", Region::SouthAmerica),
    ("Bolivia", Region::SouthAmerica),
    ("Uruguay", Region::SouthAmerica),
    ("Chile", Region::SouthAmerica),
    ("Colombia", Region::SouthAmerica),
    ("Venezuela", Region::SouthAmerica),
    ("Bulgaria", Region::Europe),
    ("Czech Republic", Region::Europe),
    ("England", Region::Europe),
    ("Estonia", Region::Europe),
    ("Ireland", Region::Europe),
    ("Italy", Region::Europe),
    ("Netherlands", Region::Europe),
    ("Poland", Region::Europe),
    ("Romania", Region::Europe),
    ("Serbia", Region::Europe),
    ("Turkey", Region::Europe),
    ("France", Region::Europe),
    ("Germany", Region::Europe),
    ("Spain", Region::Europe),
    ("Portugal", Region::Europe),
    ("Switzerland", Region::Europe),
    ("Austria", Region::Europe),
    ("Belgium", Region::Europe),
    ("Greece", Region::Europe),
    ("Hungary", Region::Europe),
    ("Ukraine", Region::Europe),
    ("Sweden", Region::Europe),
    ("Norway", Region::Europe),
    ("Finland", Region::Europe),
    ("Denmark", Region::Europe),
    ("China", Region::Asia),
    ("Japan", Region::Asia),
    ("Taiwan", Region::Asia),
    ("UAE", Region::Asia),
    ("Saudi Arabia", Region::Asia),
    ("India", Region::Asia),
    ("Singapore", Region::Asia),
    ("South Korea", Region::Asia),
    ("Hong Kong", Region::Asia),
    ("Thailand", Region::Asia),
    ("Malaysia", Region::Asia),
    ("Indonesia", Region::Asia),
    ("Philippines", Region::Asia),
    ("Vietnam", Region::Asia),
    ("Israel", Region::Asia),
    ("Pakistan", Region::Asia),
    ("Bangladesh", Region::Asia),
    ("Nigeria", Region::Africa),
    ("Ethiopia", Region::Africa),
    ("Kenya", Region::Africa),
    ("South Africa", Region::Africa),
    ("Egypt", Region::Africa),
    ("Australia", Region::Oceania),
    ("New Zealand", Region::Oceania),
];

/// Region for a country name. Total: unmapped names land in `Other`.
pub fn classify(country: &str) -> Region {
    REGION_MAPPING
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, region)| *region)
        .unwrap_or(Region::Other)
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Africa => "Africa",
            Region::Oceania => "Oceania",
            Region::Other => "Other",
        }
    }

    /// Predefined camera view for the region.
    pub fn view(&self) -> MapView {
        match self {
            Region::NorthAmerica => MapView::new(48.1667, -100.1667, 3.0),
            Region::SouthAmerica => MapView::new(-15.7833, -47.8667, 3.0),
            Region::Europe => MapView::new(48.8566, 2.3522, 4.0),
            Region::Asia => MapView::new(34.0479, 100.6197, 3.0),
            Region::Africa => MapView::new(9.1450, 18.4277, 3.0),
            Region::Oceania => MapView::new(-25.2744, 133.7751, 4.0),
            Region::Other => WORLD_VIEW,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGIONS
            .iter()
            .chain(std::iter::once(&Region::Other))
            .find(|region| region.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or(())
    }
}
