mod add_community;
mod map;
mod search;
mod sidebar;

use std::cell::RefCell;
use std::rc::Rc;

use gtk::prelude::*;
use gtk::{glib, Orientation};
use libadwaita::prelude::*;
use libadwaita::{
    Application, ApplicationWindow, ColorScheme, HeaderBar, StyleManager, ToolbarView,
};
use tracing::{debug, error, warn};

use community_atlas::data::{Community, WORLD_VIEW};
use community_atlas::directory::filter_by_chain;
use community_atlas::markers::MarkerLayout;
use community_atlas::selection::{self, Selection, SelectionIntent};
use community_atlas::store::{self, DataSource};
use community_atlas::surface::{MapSurface, MarkerSet};
use community_atlas::{Config, ViewController};

use map::ShumateSurface;
use search::SearchBar;
use sidebar::Sidebar;

/// Selection-change sink handed to the sidebar and search dropdown.
pub type Dispatch = Rc<dyn Fn(SelectionIntent)>;

pub struct AppState {
    pub config: Config,
    pub communities: Vec<Community>,
    pub selection: Selection,
    pub controller: ViewController,
    pub markers: MarkerSet<libshumate::Marker>,
}

/// Window-level controller. Owns the state and the widgets it drives.
#[derive(Clone)]
struct Atlas {
    state: Rc<RefCell<AppState>>,
    surface: ShumateSurface,
    sidebar: Sidebar,
}

impl Atlas {
    fn dispatcher(&self) -> Dispatch {
        let atlas = self.clone();
        Rc::new(move |intent| atlas.dispatch(intent))
    }

    fn dispatch(&self, intent: SelectionIntent) {
        let mut surface = self.surface.clone();
        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;

            let previous_chain = state.selection.chain().map(str::to_string);
            state.selection = selection::reduce(&state.selection, intent);
            debug!(selection = ?state.selection, "selection changed");

            let layout = MarkerLayout::build(
                filter_by_chain(&state.communities, state.selection.chain()),
                state.config.map.marker_step,
            );
            if previous_chain.as_deref() != state.selection.chain() {
                state.markers.replace(&mut surface, &layout);
            }
            state.controller.focus(&state.selection, &layout, &mut surface);
        }
        self.render_sidebar();
    }

    fn set_communities(&self, communities: Vec<Community>) {
        let mut surface = self.surface.clone();
        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            state.communities = communities;

            let layout = MarkerLayout::build(
                filter_by_chain(&state.communities, state.selection.chain()),
                state.config.map.marker_step,
            );
            state.markers.replace(&mut surface, &layout);
        }
        self.render_sidebar();
    }

    fn render_sidebar(&self) {
        let state = self.state.borrow();
        self.sidebar
            .render(&state.communities, &state.selection, &self.dispatcher());
    }
}

pub fn build_ui(app: &Application, config: Config) {
    let style_manager = StyleManager::default();
    style_manager.set_color_scheme(ColorScheme::PreferDark);

    let Some(mut surface) = ShumateSurface::new(&config.map) else {
        error!("Map widget has no viewport");
        return;
    };
    surface.show(WORLD_VIEW);

    let source = config.data_source().unwrap_or_else(|e| {
        warn!("{}, using the bundled list", e);
        DataSource::Bundled
    });
    let geocoder = config.geocoder();
    let submission_url = config.submission_url.clone();

    let state = Rc::new(RefCell::new(AppState {
        controller: ViewController::new(config.camera_settings()),
        config,
        communities: Vec::new(),
        selection: Selection::None,
        markers: MarkerSet::new(),
    }));

    let zoom_state = state.clone();
    surface.on_zoom_end(Box::new(move || {
        if let Ok(mut state) = zoom_state.try_borrow_mut() {
            state.controller.on_zoom_end();
        }
    }));

    let sidebar = Sidebar::new();
    let atlas = Atlas {
        state: state.clone(),
        surface: surface.clone(),
        sidebar: sidebar.clone(),
    };
    atlas.render_sidebar();

    let search_bar = SearchBar::new();
    search_bar.connect(state, atlas.dispatcher());

    let add_button = gtk::Button::builder()
        .icon_name("list-add-symbolic")
        .tooltip_text("Add Community")
        .build();

    let header_bar = HeaderBar::builder().build();
    header_bar.set_title_widget(Some(search_bar.widget()));
    header_bar.pack_end(&add_button);

    let paned = gtk::Paned::builder()
        .orientation(Orientation::Horizontal)
        .wide_handle(true)
        .build();
    paned.set_start_child(Some(sidebar.widget()));
    paned.set_resize_start_child(false);
    paned.set_shrink_start_child(false);
    paned.set_end_child(Some(surface.widget()));
    paned.set_resize_end_child(true);
    paned.set_shrink_end_child(false);
    paned.set_position(280);

    let toolbar_view = ToolbarView::builder().build();
    toolbar_view.add_top_bar(&header_bar);
    toolbar_view.set_content(Some(&paned));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Community Atlas")
        .default_width(1100)
        .default_height(720)
        .build();

    let dialog_parent = window.clone();
    add_button.connect_clicked(move |_| {
        add_community::present(&dialog_parent, geocoder.clone(), submission_url.clone());
    });

    let css_provider = gtk::CssProvider::new();
    css_provider.load_from_data(
        ".map-marker {
            background-color: alpha(@accent_bg_color, 0.75);
            border-radius: 16px;
            padding: 4px 10px;
            font-size: 11px;
            font-weight: bold;
            min-height: 0;
            min-width: 0;
            box-shadow: 0 2px 6px alpha(black, 0.4);
        }
        .map-marker:hover {
            background-color: alpha(@accent_bg_color, 0.95);
            box-shadow: 0 3px 8px alpha(black, 0.5);
        }
        .map-popover > contents {
            background-color: alpha(@card_bg_color, 0.95);
            border-radius: 12px;
            box-shadow: 0 4px 16px alpha(black, 0.6);
        }
        .chain-badge {
            background-color: alpha(@accent_bg_color, 0.25);
            color: @accent_fg_color;
            border-radius: 6px;
            padding: 3px 8px;
            font-size: 10px;
            font-weight: 600;
            text-transform: uppercase;
        }
        .sidebar-item {
            padding: 4px 8px;
        }
        .sidebar-active {
            background-color: alpha(@accent_bg_color, 0.2);
            font-weight: 600;
        }",
    );

    gtk::style_context_add_provider_for_display(
        &gtk::prelude::WidgetExt::display(&window),
        &css_provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );

    window.set_content(Some(&toolbar_view));
    window.present();

    glib::spawn_future_local(async move {
        let communities = store::load_communities(&source).await;
        atlas.set_communities(communities);
    });
}
