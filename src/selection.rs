//! The single "what is focused" value and its reducer.
//!
//! Region, country, community and chain are mutually exclusive axes. Holding
//! them in one enum means every intent replaces the whole value, so there is
//! no state with two meaningful selections at once. A selected community
//! implies its country and region; those are derived, never stored.

use crate::data::Community;
use crate::region::{classify, Region};
use crate::search::SearchResult;

/// A community and its position in the loaded list. Entries are not unique
/// by value, so the position is what ties a selection to its marker.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCommunity {
    pub index: usize,
    pub community: Community,
}

impl SelectedCommunity {
    pub fn new(index: usize, community: Community) -> Self {
        Self { index, community }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Region(Region),
    Country(String),
    Community(SelectedCommunity),
    Chain(String),
}

/// Selection-change requests emitted by the sidebar and search dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionIntent {
    SelectRegion(Region),
    SelectCountry(String),
    SelectCommunity(SelectedCommunity),
    SelectChain(String),
    ClearSelection,
}

impl Selection {
    pub fn region(&self) -> Option<Region> {
        match self {
            Selection::Region(region) => Some(*region),
            Selection::Country(country) => Some(classify(country)),
            Selection::Community(selected) => Some(classify(&selected.community.country)),
            Selection::None | Selection::Chain(_) => None,
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            Selection::Country(country) => Some(country),
            Selection::Community(selected) => Some(&selected.community.country),
            _ => None,
        }
    }

    pub fn community(&self) -> Option<&Community> {
        match self {
            Selection::Community(selected) => Some(&selected.community),
            _ => None,
        }
    }

    /// List position of the selected community.
    pub fn community_index(&self) -> Option<usize> {
        match self {
            Selection::Community(selected) => Some(selected.index),
            _ => None,
        }
    }

    /// Active chain filter for grouping and markers.
    pub fn chain(&self) -> Option<&str> {
        match self {
            Selection::Chain(chain) => Some(chain),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// Applies an intent. Every intent replaces the previous value outright.
pub fn reduce(_current: &Selection, intent: SelectionIntent) -> Selection {
    match intent {
        SelectionIntent::SelectRegion(region) => Selection::Region(region),
        SelectionIntent::SelectCountry(country) => Selection::Country(country),
        SelectionIntent::SelectCommunity(community) => Selection::Community(community),
        SelectionIntent::SelectChain(chain) => Selection::Chain(chain),
        SelectionIntent::ClearSelection => Selection::None,
    }
}

impl From<&SearchResult<'_>> for SelectionIntent {
    fn from(result: &SearchResult<'_>) -> Self {
        match result {
            SearchResult::Chain(chain) => SelectionIntent::SelectChain((*chain).to_string()),
            SearchResult::Community(index, community) => SelectionIntent::SelectCommunity(
                SelectedCommunity::new(*index, (*community).clone()),
            ),
            SearchResult::Country(country) => {
                SelectionIntent::SelectCountry((*country).to_string())
            }
        }
    }
}
