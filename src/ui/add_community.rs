use gtk::prelude::*;
use gtk::{glib, Label, ListBox, Orientation};
use libadwaita::prelude::*;
use libadwaita::{EntryRow, HeaderBar, ToolbarView};
use tracing::{info, warn};

use community_atlas::error::Error;
use community_atlas::geocoding::Geocoder;
use community_atlas::submission::{CommunityDraft, GEOCODE_MISS_MESSAGE, GEOCODE_NEEDS_CITY_MESSAGE};

#[derive(Clone)]
struct Form {
    name: EntryRow,
    country: EntryRow,
    city: EntryRow,
    chain: EntryRow,
    website: EntryRow,
    twitter: EntryRow,
    description: EntryRow,
    lat: EntryRow,
    lng: EntryRow,
    status: Label,
}

impl Form {
    fn new() -> Self {
        let row = |title: &str| EntryRow::builder().title(title).build();
        let status = Label::builder().xalign(0.0).wrap(true).visible(false).build();
        status.add_css_class("error");
        Self {
            name: row("Name *"),
            country: row("Country *"),
            city: row("City"),
            chain: row("Chain"),
            website: row("Website"),
            twitter: row("Twitter"),
            description: row("Description"),
            lat: row("Latitude"),
            lng: row("Longitude"),
            status,
        }
    }

    fn details(&self) -> ListBox {
        let list = boxed_list();
        for row in [
            &self.name,
            &self.country,
            &self.city,
            &self.chain,
            &self.website,
            &self.twitter,
            &self.description,
        ] {
            list.append(row);
        }
        list
    }

    fn location(&self) -> ListBox {
        let list = boxed_list();
        list.append(&self.lat);
        list.append(&self.lng);
        list
    }

    fn draft(&self) -> CommunityDraft {
        CommunityDraft {
            name: self.name.text().to_string(),
            country: self.country.text().to_string(),
            city: self.city.text().to_string(),
            chain: self.chain.text().to_string(),
            website: self.website.text().to_string(),
            twitter: self.twitter.text().to_string(),
            description: self.description.text().to_string(),
            lat: self.lat.text().to_string(),
            lng: self.lng.text().to_string(),
        }
    }

    fn show_error(&self, message: &str) {
        self.status.set_label(message);
        self.status.set_visible(true);
    }

    fn clear_error(&self) {
        self.status.set_visible(false);
    }
}

fn boxed_list() -> ListBox {
    let list = ListBox::builder()
        .selection_mode(gtk::SelectionMode::None)
        .build();
    list.add_css_class("boxed-list");
    list
}

/// Opens the modal "Add Community" window.
pub fn present(parent: &impl IsA<gtk::Window>, geocoder: Geocoder, submission_url: String) {
    let form = Form::new();

    let geocode_button = gtk::Button::builder()
        .label("Find coordinates")
        .halign(gtk::Align::Start)
        .build();
    let submit_button = gtk::Button::builder().label("Submit").build();
    submit_button.add_css_class("suggested-action");

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(12)
        .margin_top(12)
        .margin_bottom(12)
        .margin_start(12)
        .margin_end(12)
        .build();
    content.append(&form.details());
    content.append(&form.location());
    content.append(&geocode_button);
    content.append(&form.status);

    let scrolled = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .propagate_natural_height(true)
        .child(&content)
        .build();

    let header = HeaderBar::new();
    header.pack_end(&submit_button);

    let toolbar_view = ToolbarView::new();
    toolbar_view.add_top_bar(&header);
    toolbar_view.set_content(Some(&scrolled));

    let window = libadwaita::Window::builder()
        .title("Add Community")
        .modal(true)
        .transient_for(parent)
        .default_width(420)
        .default_height(640)
        .content(&toolbar_view)
        .build();

    let geocode_form = form.clone();
    geocode_button.connect_clicked(move |button| {
        let form = geocode_form.clone();
        let geocoder = geocoder.clone();
        let button = button.clone();
        form.clear_error();
        button.set_sensitive(false);
        glib::spawn_future_local(async move {
            let mut draft = form.draft();
            match draft.fill_coordinates(&geocoder).await {
                Ok(coordinate) => {
                    info!("Found coordinates {:?} for {}", coordinate, draft.city);
                    form.lat.set_text(&draft.lat);
                    form.lng.set_text(&draft.lng);
                }
                Err(Error::MissingField(_)) => form.show_error(GEOCODE_NEEDS_CITY_MESSAGE),
                Err(_) => form.show_error(GEOCODE_MISS_MESSAGE),
            }
            button.set_sensitive(true);
        });
    });

    let submit_window = window.clone();
    submit_button.connect_clicked(move |_| {
        form.clear_error();
        let link = match form.draft().submission_link(&submission_url) {
            Ok(link) => link,
            Err(e) => {
                form.show_error(&e.to_string());
                return;
            }
        };
        if let Err(e) = open::that(&link) {
            warn!("Failed to open submission link: {}", e);
            form.show_error("Could not open the submission page");
            return;
        }
        submit_window.close();
    });

    window.present();
}
