use std::cell::RefCell;
use std::rc::Rc;

use gtk::prelude::*;
use gtk::{Label, ListBox, Orientation, Popover, SearchEntry};

use community_atlas::search::search;
use community_atlas::selection::SelectionIntent;

use super::{AppState, Dispatch};

const MAX_RESULTS: usize = 12;

/// Header search entry with a dropdown of tagged results.
#[derive(Clone)]
pub struct SearchBar {
    entry: SearchEntry,
    popover: Popover,
    results: ListBox,
}

impl SearchBar {
    pub fn new() -> Self {
        let entry = SearchEntry::builder()
            .placeholder_text("Search communities, countries, chains...")
            .width_chars(36)
            .build();

        let results = ListBox::builder()
            .selection_mode(gtk::SelectionMode::None)
            .build();
        results.add_css_class("boxed-list");

        let popover = Popover::builder()
            .autohide(false)
            .has_arrow(false)
            .child(&results)
            .build();
        popover.add_css_class("map-popover");
        popover.set_parent(&entry);

        Self {
            entry,
            popover,
            results,
        }
    }

    pub fn widget(&self) -> &SearchEntry {
        &self.entry
    }

    pub fn connect(&self, state: Rc<RefCell<AppState>>, dispatch: Dispatch) {
        let bar = self.clone();
        self.entry.connect_search_changed(move |entry| {
            let query = entry.text();
            let found: Vec<(String, &'static str, SelectionIntent)> = {
                let state = state.borrow();
                search(&query, &state.communities)
                    .iter()
                    .take(MAX_RESULTS)
                    .map(|result| {
                        (
                            result.title().to_string(),
                            result.kind(),
                            SelectionIntent::from(result),
                        )
                    })
                    .collect()
            };
            bar.show_results(found, &dispatch);
        });

        let popover = self.popover.clone();
        self.entry.connect_stop_search(move |entry| {
            entry.set_text("");
            popover.popdown();
        });
    }

    fn show_results(
        &self,
        found: Vec<(String, &'static str, SelectionIntent)>,
        dispatch: &Dispatch,
    ) {
        while let Some(child) = self.results.first_child() {
            self.results.remove(&child);
        }
        if found.is_empty() {
            self.popover.popdown();
            return;
        }

        for (title, kind, intent) in found {
            let row = gtk::Box::builder()
                .orientation(Orientation::Horizontal)
                .spacing(12)
                .build();
            let title = Label::builder()
                .label(&title)
                .xalign(0.0)
                .hexpand(true)
                .ellipsize(gtk::pango::EllipsizeMode::End)
                .build();
            let kind = Label::builder().label(kind).build();
            kind.add_css_class("dim-label");
            kind.add_css_class("caption");
            row.append(&title);
            row.append(&kind);

            let button = gtk::Button::builder().child(&row).build();
            button.add_css_class("flat");

            let dispatch = dispatch.clone();
            let entry = self.entry.clone();
            let popover = self.popover.clone();
            button.connect_clicked(move |_| {
                popover.popdown();
                entry.set_text("");
                dispatch(intent.clone());
            });
            self.results.append(&button);
        }
        self.popover.popup();
    }
}
