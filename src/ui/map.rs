use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk::prelude::*;
use gtk::{glib, Label, Orientation, Popover};
use libshumate::prelude::*;
use tracing::{debug, warn};

use community_atlas::config::MapConfig;
use community_atlas::data::Coordinate;
use community_atlas::markers::MarkerPopup;
use community_atlas::surface::{FlyOptions, MapSurface};

/// Quiet period after the last zoom-level change before a zoom counts as ended.
const ZOOM_SETTLE: Duration = Duration::from_millis(250);

/// libshumate map with one marker layer.
#[derive(Clone)]
pub struct ShumateSurface {
    widget: libshumate::SimpleMap,
    map: libshumate::Map,
    viewport: libshumate::Viewport,
    layer: libshumate::MarkerLayer,
}

impl ShumateSurface {
    pub fn new(config: &MapConfig) -> Option<Self> {
        let widget = libshumate::SimpleMap::new();
        let source = libshumate::RasterRenderer::from_url(&config.tile_url);
        widget.set_map_source(Some(&source));

        let map = widget.map()?;
        let viewport = map.viewport()?;

        let layer = libshumate::MarkerLayer::new(&viewport);
        map.add_layer(&layer);

        viewport.set_min_zoom_level(config.min_zoom);
        viewport.set_max_zoom_level(config.max_zoom);

        widget.set_vexpand(true);
        widget.set_hexpand(true);

        Some(Self {
            widget,
            map,
            viewport,
            layer,
        })
    }

    pub fn widget(&self) -> &libshumate::SimpleMap {
        &self.widget
    }
}

impl MapSurface for ShumateSurface {
    type Marker = libshumate::Marker;

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.viewport.set_zoom_level(zoom);
        self.map.center_on(center.lat, center.lng);
    }

    fn fly_to(&mut self, center: Coordinate, zoom: f64, opts: FlyOptions) {
        let duration_ms = u32::try_from(opts.duration.as_millis()).unwrap_or(u32::MAX);
        self.map
            .go_to_full_with_duration(center.lat, center.lng, zoom, duration_ms);
    }

    fn pan_to(&mut self, center: Coordinate) {
        self.map.go_to(center.lat, center.lng);
    }

    fn add_marker(&mut self, position: Coordinate, popup: &MarkerPopup) -> Self::Marker {
        let marker = libshumate::Marker::new();
        marker.set_child(Some(&marker_button(popup)));
        marker.set_location(position.lat, position.lng);
        self.layer.add_marker(&marker);
        marker
    }

    fn remove_marker(&mut self, marker: Self::Marker) {
        self.layer.remove_marker(&marker);
    }

    fn zoom(&self) -> f64 {
        self.viewport.zoom_level()
    }

    fn on_zoom_end(&mut self, callback: Box<dyn Fn()>) {
        let callback: Rc<dyn Fn()> = Rc::from(callback);
        let pending: Rc<RefCell<Option<glib::SourceId>>> = Rc::new(RefCell::new(None));

        self.viewport
            .connect_notify_local(Some("zoom-level"), move |viewport, _| {
                if let Some(source) = pending.borrow_mut().take() {
                    source.remove();
                }
                let zoom = viewport.zoom_level();
                let callback = callback.clone();
                let pending_inner = pending.clone();
                let source = glib::timeout_add_local_once(ZOOM_SETTLE, move || {
                    pending_inner.borrow_mut().take();
                    debug!("Zoom ended at {:.2}", zoom);
                    callback();
                });
                *pending.borrow_mut() = Some(source);
            });
    }
}

/// Marker button with the community popover attached.
fn marker_button(popup: &MarkerPopup) -> gtk::Button {
    let button = gtk::Button::builder()
        .label(&popup.title)
        .tooltip_text(&popup.location)
        .build();
    button.add_css_class("map-marker");

    let popover = Popover::builder().build();
    popover.add_css_class("map-popover");
    popover.set_child(Some(&popup_content(popup)));
    popover.set_parent(&button);

    button.connect_clicked(move |_| {
        popover.popup();
    });

    button
}

fn popup_content(popup: &MarkerPopup) -> gtk::Box {
    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(6)
        .margin_top(10)
        .margin_bottom(10)
        .margin_start(10)
        .margin_end(10)
        .width_request(220)
        .build();

    let title = Label::builder().label(&popup.title).xalign(0.0).wrap(true).build();
    title.add_css_class("title-3");
    content.append(&title);

    let location = Label::builder().label(&popup.location).xalign(0.0).build();
    location.add_css_class("dim-label");
    location.add_css_class("caption");
    content.append(&location);

    if let Some(description) = &popup.description {
        let label = Label::builder()
            .label(description)
            .xalign(0.0)
            .wrap(true)
            .max_width_chars(40)
            .build();
        content.append(&label);
    }

    if let Some(chain) = &popup.chain {
        let badge = Label::builder().label(chain).halign(gtk::Align::Start).build();
        badge.add_css_class("chain-badge");
        content.append(&badge);
    }

    if !popup.links.is_empty() {
        let links = gtk::Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(6)
            .build();
        for link in &popup.links {
            let button = gtk::Button::builder().label(link.label).build();
            button.add_css_class("pill");
            let url = link.url.clone();
            button.connect_clicked(move |_| {
                if let Err(e) = open::that(&url) {
                    warn!("Failed to open {}: {}", url, e);
                }
            });
            links.append(&button);
        }
        content.append(&links);
    }

    content
}
