//! Free-text search across chains, communities and known countries.

use crate::coordinates::known_countries;
use crate::data::Community;
use crate::directory::distinct_chains;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<'a> {
    Chain(&'a str),
    /// A matching community and its index in the searched list.
    Community(usize, &'a Community),
    Country(&'static str),
}

impl SearchResult<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchResult::Chain(_) => "Chain",
            SearchResult::Community(..) => "Community",
            SearchResult::Country(_) => "Country",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SearchResult::Chain(chain) => chain,
            SearchResult::Community(_, community) => &community.name,
            SearchResult::Country(country) => country,
        }
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive substring search. Results come back as all chains, then
/// all communities, then all countries, each bucket in source order.
pub fn search<'a>(query: &str, communities: &'a [Community]) -> Vec<SearchResult<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let chains = distinct_chains(communities)
        .into_iter()
        .filter(|chain| contains(chain, &needle))
        .map(SearchResult::Chain);

    let matches = communities
        .iter()
        .enumerate()
        .filter(|(_, community)| {
            contains(&community.name, &needle)
                || contains(&community.country, &needle)
                || community.city.as_deref().is_some_and(|c| contains(c, &needle))
                || community.chain.as_deref().is_some_and(|c| contains(c, &needle))
        })
        .map(|(index, community)| SearchResult::Community(index, community));

    let countries = known_countries()
        .filter(|country| contains(country, &needle))
        .map(SearchResult::Country);

    chains.chain(matches).chain(countries).collect()
}
