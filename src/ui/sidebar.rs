use gtk::prelude::*;
use gtk::{Label, ListBox, ScrolledWindow};

use community_atlas::data::Community;
use community_atlas::directory::{self, CommunityGroups};
use community_atlas::region::{Region, REGIONS};
use community_atlas::selection::{SelectedCommunity, Selection, SelectionIntent};

use super::Dispatch;

const INDENT: i32 = 16;

/// Region -> country -> community navigation list.
#[derive(Clone)]
pub struct Sidebar {
    scrolled: ScrolledWindow,
    list: ListBox,
}

impl Sidebar {
    pub fn new() -> Self {
        let list = ListBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .build();
        list.add_css_class("navigation-sidebar");

        let scrolled = ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .width_request(260)
            .vexpand(true)
            .child(&list)
            .build();

        Self { scrolled, list }
    }

    pub fn widget(&self) -> &ScrolledWindow {
        &self.scrolled
    }

    /// Rebuilds every row from the current list and selection.
    pub fn render(&self, communities: &[Community], selection: &Selection, dispatch: &Dispatch) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }

        let groups = directory::group(communities, selection.chain());

        self.append(
            &format!("All communities ({})", groups.len()),
            0,
            selection.is_none(),
            SelectionIntent::ClearSelection,
            dispatch,
        );
        if let Some(chain) = selection.chain() {
            self.append(
                &format!("Chain: {} (clear)", chain),
                0,
                true,
                SelectionIntent::ClearSelection,
                dispatch,
            );
        }

        self.append_heading("Regions");
        let other = groups
            .has_communities(Region::Other)
            .then_some(Region::Other);
        for region in REGIONS.into_iter().chain(other) {
            self.append_region(region, communities, &groups, selection, dispatch);
        }

        self.append_metrics(&groups);

        let chains = directory::distinct_chains(communities);
        if !chains.is_empty() {
            self.append_heading("Chains");
            for chain in chains {
                self.append(
                    chain,
                    0,
                    selection.chain() == Some(chain),
                    SelectionIntent::SelectChain(chain.to_string()),
                    dispatch,
                );
            }
        }
    }

    fn append_region(
        &self,
        region: Region,
        communities: &[Community],
        groups: &CommunityGroups<'_>,
        selection: &Selection,
        dispatch: &Dispatch,
    ) {
        let group = groups.region(region);
        let count = group.map_or(0, |g| g.community_count());
        let expanded = selection.region() == Some(region);

        let button = self.append(
            &format!("{} ({})", region, count),
            0,
            expanded,
            SelectionIntent::SelectRegion(region),
            dispatch,
        );
        button.set_sensitive(count > 0);

        let Some(group) = group.filter(|_| expanded) else {
            return;
        };
        for country in &group.countries {
            let open = selection.country() == Some(country.country);
            self.append(
                &format!("{} ({})", country.country, country.communities.len()),
                INDENT,
                open,
                SelectionIntent::SelectCountry(country.country.to_string()),
                dispatch,
            );
            if !open {
                continue;
            }
            for community in &country.communities {
                let Some(index) = directory::index_of(communities, community) else {
                    continue;
                };
                self.append(
                    &community.name,
                    INDENT * 2,
                    selection.community_index() == Some(index),
                    SelectionIntent::SelectCommunity(SelectedCommunity::new(
                        index,
                        (*community).clone(),
                    )),
                    dispatch,
                );
            }
        }
    }

    /// Communities per region, largest first.
    fn append_metrics(&self, groups: &CommunityGroups<'_>) {
        if groups.is_empty() {
            return;
        }
        self.append_heading("Metrics");
        for metric in groups.region_metrics() {
            let row = gtk::Box::builder()
                .orientation(gtk::Orientation::Horizontal)
                .spacing(12)
                .margin_start(8)
                .margin_end(8)
                .build();
            let name = Label::builder()
                .label(metric.region.label())
                .xalign(0.0)
                .hexpand(true)
                .build();
            let value = Label::builder()
                .label(format!("{} ({:.0}%)", metric.count, metric.share))
                .build();
            value.add_css_class("dim-label");
            value.add_css_class("numeric");
            row.append(&name);
            row.append(&value);
            self.list.append(&row);
        }
    }

    fn append_heading(&self, text: &str) {
        let label = Label::builder()
            .label(text)
            .xalign(0.0)
            .margin_top(12)
            .margin_start(6)
            .build();
        label.add_css_class("heading");
        label.add_css_class("dim-label");
        self.list.append(&label);
        if let Some(row) = self.list.last_child() {
            row.set_sensitive(false);
        }
    }

    fn append(
        &self,
        text: &str,
        indent: i32,
        active: bool,
        intent: SelectionIntent,
        dispatch: &Dispatch,
    ) -> gtk::Button {
        let label = Label::builder()
            .label(text)
            .xalign(0.0)
            .ellipsize(gtk::pango::EllipsizeMode::End)
            .build();
        let button = gtk::Button::builder()
            .child(&label)
            .margin_start(indent)
            .build();
        button.add_css_class("flat");
        button.add_css_class("sidebar-item");
        if active {
            button.add_css_class("sidebar-active");
        }

        let dispatch = dispatch.clone();
        button.connect_clicked(move |_| dispatch(intent.clone()));

        self.list.append(&button);
        button
    }
}
