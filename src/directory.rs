//! Region -> country -> community grouping of the loaded list.

use crate::data::Community;
use crate::region::{classify, Region, REGIONS};

#[derive(Debug, Clone, PartialEq)]
pub struct CountryGroup<'a> {
    pub country: &'a str,
    pub communities: Vec<&'a Community>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup<'a> {
    pub region: Region,
    pub countries: Vec<CountryGroup<'a>>,
}

impl<'a> RegionGroup<'a> {
    pub fn community_count(&self) -> usize {
        self.countries.iter().map(|c| c.communities.len()).sum()
    }

    pub fn country(&self, name: &str) -> Option<&CountryGroup<'a>> {
        self.countries.iter().find(|c| c.country == name)
    }
}

/// One line of the per-region metrics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMetric {
    pub region: Region,
    pub count: usize,
    /// Share of all grouped communities, in percent.
    pub share: f64,
}

/// Derived tree, rebuilt from the flat list whenever the list or the chain
/// filter changes. Only regions holding at least one community are present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommunityGroups<'a> {
    regions: Vec<RegionGroup<'a>>,
}

impl<'a> CommunityGroups<'a> {
    pub fn region(&self, region: Region) -> Option<&RegionGroup<'a>> {
        self.regions.iter().find(|group| group.region == region)
    }

    /// Non-empty regions in canonical order, `Other` last.
    pub fn iter(&self) -> impl Iterator<Item = &RegionGroup<'a>> {
        self.regions.iter()
    }

    pub fn has_communities(&self, region: Region) -> bool {
        self.region(region).is_some()
    }

    pub fn len(&self) -> usize {
        self.regions.iter().map(RegionGroup::community_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Community count per region, largest first. Ties keep canonical order.
    pub fn region_counts(&self) -> Vec<(Region, usize)> {
        let mut counts: Vec<(Region, usize)> = self
            .regions
            .iter()
            .map(|group| (group.region, group.community_count()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// `region_counts` with each region's share of the total.
    pub fn region_metrics(&self) -> Vec<RegionMetric> {
        let total = self.len();
        self.region_counts()
            .into_iter()
            .map(|(region, count)| RegionMetric {
                region,
                count,
                share: count as f64 * 100.0 / total as f64,
            })
            .collect()
    }
}

/// Position of `community` in `communities`, matched by identity rather than
/// value since entries may repeat.
pub fn index_of(communities: &[Community], community: &Community) -> Option<usize> {
    communities.iter().position(|c| std::ptr::eq(c, community))
}

/// Communities whose chain equals `chain`, or all of them when it is `None`.
pub fn filter_by_chain<'a, 'c>(
    communities: &'a [Community],
    chain: Option<&'c str>,
) -> impl Iterator<Item = &'a Community> + 'c
where
    'a: 'c,
{
    communities
        .iter()
        .filter(move |community| chain.map_or(true, |c| community.chain.as_deref() == Some(c)))
}

/// Filters by chain when one is given, then folds the result into the tree.
/// Countries and communities keep source order.
pub fn group<'a>(communities: &'a [Community], chain: Option<&str>) -> CommunityGroups<'a> {
    let mut buckets: Vec<RegionGroup<'a>> = Vec::new();

    for community in filter_by_chain(communities, chain) {
        let region = classify(&community.country);
        let index = match buckets.iter().position(|g| g.region == region) {
            Some(index) => index,
            None => {
                buckets.push(RegionGroup {
                    region,
                    countries: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        let countries = &mut buckets[index].countries;
        match countries.iter_mut().find(|c| c.country == community.country) {
            Some(bucket) => bucket.communities.push(community),
            None => countries.push(CountryGroup {
                country: &community.country,
                communities: vec![community],
            }),
        }
    }

    buckets.sort_by_key(|group| canonical_rank(group.region));
    CommunityGroups { regions: buckets }
}

fn canonical_rank(region: Region) -> usize {
    REGIONS
        .iter()
        .position(|r| *r == region)
        .unwrap_or(REGIONS.len())
}

/// Distinct chain tags in first-seen order.
pub fn distinct_chains(communities: &[Community]) -> Vec<&str> {
    let mut chains: Vec<&str> = Vec::new();
    for chain in communities.iter().filter_map(|c| c.chain.as_deref()) {
        if !chains.contains(&chain) {
            chains.push(chain);
        }
    }
    chains
}
