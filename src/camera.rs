//! Selection-driven camera control.
//!
//! `transition` is a pure function from (memory, selection) to the next camera
//! command and memory, so the fly-versus-pan rules can be exercised without a
//! real map. `ViewController` threads the memory between calls and folds in
//! zoom-end notifications from the surface.

use std::time::Duration;

use tracing::debug;

use crate::coordinates::country_coordinates;
use crate::data::Coordinate;
use crate::markers::MarkerLayout;
use crate::selection::{SelectedCommunity, Selection};
use crate::surface::MapSurface;

/// Zoom levels closer than this count as unchanged.
const ZOOM_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Zoom level used when focusing a country or one of its communities.
    pub country_zoom: f64,
    pub country_fly: Duration,
    pub region_fly: Duration,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            country_zoom: 5.0,
            country_fly: Duration::from_millis(1000),
            region_fly: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraCommand {
    /// Animated large jump, used for context switches.
    Fly {
        center: Coordinate,
        zoom: f64,
        duration: Duration,
    },
    /// Animated small move at the current zoom.
    Pan { center: Coordinate },
}

impl CameraCommand {
    pub fn center(&self) -> Coordinate {
        match self {
            CameraCommand::Fly { center, .. } | CameraCommand::Pan { center } => *center,
        }
    }

    pub fn is_fly(&self) -> bool {
        matches!(self, CameraCommand::Fly { .. })
    }
}

/// What the controller remembers between selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusMemory {
    pub last_country: Option<String>,
    pub initial_move_done: bool,
    /// The user zoomed or panned by hand since the last command.
    pub manual_override: bool,
    /// A fly is in flight; its zoom-end is not a manual interaction.
    pub settling: bool,
}

impl FocusMemory {
    fn centred_on(&self, country: &str) -> bool {
        self.initial_move_done && self.last_country.as_deref() == Some(country)
    }

    fn after_fly(country: Option<&str>) -> Self {
        Self {
            last_country: country.map(str::to_string),
            initial_move_done: country.is_some(),
            manual_override: false,
            settling: true,
        }
    }
}

/// Computes the camera command for a new selection and the memory to carry on.
pub fn transition(
    memory: &FocusMemory,
    selection: &Selection,
    layout: &MarkerLayout<'_>,
    settings: &CameraSettings,
) -> (Option<CameraCommand>, FocusMemory) {
    match selection {
        Selection::None | Selection::Chain(_) => (None, memory.clone()),
        Selection::Region(region) => {
            let view = region.view();
            let command = CameraCommand::Fly {
                center: view.center,
                zoom: view.zoom,
                duration: settings.region_fly,
            };
            (Some(command), FocusMemory::after_fly(None))
        }
        Selection::Country(country) => {
            let Some(center) = country_coordinates(country) else {
                debug!("No coordinates for country {}, camera stays put", country);
                return (None, memory.clone());
            };
            if memory.centred_on(country) {
                return (None, memory.clone());
            }
            let command = CameraCommand::Fly {
                center,
                zoom: settings.country_zoom,
                duration: settings.country_fly,
            };
            (Some(command), FocusMemory::after_fly(Some(country.as_str())))
        }
        Selection::Community(selected) => focus_community(memory, selected, layout, settings),
    }
}

fn focus_community(
    memory: &FocusMemory,
    selected: &SelectedCommunity,
    layout: &MarkerLayout<'_>,
    settings: &CameraSettings,
) -> (Option<CameraCommand>, FocusMemory) {
    let community = &selected.community;
    let marker = layout.position_of(selected.index, community);
    let Some(country_center) = country_coordinates(&community.country).or(marker) else {
        debug!("No coordinates for community {}, camera stays put", community.name);
        return (None, memory.clone());
    };

    if !memory.centred_on(&community.country) {
        let command = CameraCommand::Fly {
            center: country_center,
            zoom: settings.country_zoom,
            duration: settings.country_fly,
        };
        return (Some(command), FocusMemory::after_fly(Some(community.country.as_str())));
    }

    let target = marker.unwrap_or(country_center);
    if memory.manual_override {
        // Camera position is unknown after a manual zoom; re-anchor with a fly.
        let command = CameraCommand::Fly {
            center: target,
            zoom: settings.country_zoom,
            duration: settings.country_fly,
        };
        return (Some(command), FocusMemory::after_fly(Some(community.country.as_str())));
    }

    let next = FocusMemory {
        manual_override: false,
        ..memory.clone()
    };
    (Some(CameraCommand::Pan { center: target }), next)
}

/// Stateful wrapper around `transition` used by the window.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    memory: FocusMemory,
    settings: CameraSettings,
}

impl ViewController {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            memory: FocusMemory::default(),
            settings,
        }
    }

    pub fn memory(&self) -> &FocusMemory {
        &self.memory
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn on_selection(
        &mut self,
        selection: &Selection,
        layout: &MarkerLayout<'_>,
    ) -> Option<CameraCommand> {
        let (command, memory) = transition(&self.memory, selection, layout, &self.settings);
        if let Some(command) = &command {
            debug!(?command, "camera command");
        }
        self.memory = memory;
        command
    }

    /// Like `on_selection`, then applies the command to `surface`. A fly that
    /// keeps the surface's current zoom emits no zoom-end, so it is not left
    /// settling.
    pub fn focus<S: MapSurface + ?Sized>(
        &mut self,
        selection: &Selection,
        layout: &MarkerLayout<'_>,
        surface: &mut S,
    ) -> Option<CameraCommand> {
        let current_zoom = surface.zoom();
        let command = self.on_selection(selection, layout)?;
        if let CameraCommand::Fly { zoom, .. } = &command {
            if (zoom - current_zoom).abs() < ZOOM_EPSILON {
                self.memory.settling = false;
            }
        }
        command.apply(surface);
        Some(command)
    }

    /// Called when the map reports the end of a zoom. The first zoom-end after
    /// a fly belongs to that fly; any other one is a manual interaction.
    pub fn on_zoom_end(&mut self) {
        if self.memory.settling {
            self.memory.settling = false;
        } else {
            self.memory.manual_override = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Community;
    use crate::markers::MarkerPopup;
    use crate::region::Region;
    use crate::surface::FlyOptions;

    /// Surface that only tracks its zoom level.
    struct ZoomOnly(f64);

    impl MapSurface for ZoomOnly {
        type Marker = ();

        fn set_view(&mut self, _center: Coordinate, zoom: f64) {
            self.0 = zoom;
        }
        fn fly_to(&mut self, _center: Coordinate, zoom: f64, _opts: FlyOptions) {
            self.0 = zoom;
        }
        fn pan_to(&mut self, _center: Coordinate) {}
        fn add_marker(&mut self, _position: Coordinate, _popup: &MarkerPopup) {}
        fn remove_marker(&mut self, _marker: ()) {}
        fn on_zoom_end(&mut self, _callback: Box<dyn Fn()>) {}
        fn zoom(&self) -> f64 {
            self.0
        }
    }

    fn pick(list: &[Community], index: usize) -> Selection {
        Selection::Community(SelectedCommunity::new(index, list[index].clone()))
    }

    fn layout_for(list: &[Community]) -> MarkerLayout<'_> {
        MarkerLayout::build(list, 0.3)
    }

    #[test]
    fn first_country_focus_flies() {
        let list = vec![Community::new("ETH Peru", "Peru")];
        let (command, memory) = transition(
            &FocusMemory::default(),
            &Selection::Country("Peru".into()),
            &layout_for(&list),
            &CameraSettings::default(),
        );
        let command = command.unwrap();
        assert!(command.is_fly());
        assert_eq!(command.center(), country_coordinates("Peru").unwrap());
        assert_eq!(memory.last_country.as_deref(), Some("Peru"));
        assert!(memory.initial_move_done);
    }

    #[test]
    fn repeated_country_focus_issues_nothing() {
        let list = vec![Community::new("ETH Peru", "Peru")];
        let layout = layout_for(&list);
        let settings = CameraSettings::default();
        let selection = Selection::Country("Peru".into());
        let (_, memory) = transition(&FocusMemory::default(), &selection, &layout, &settings);
        let (command, _) = transition(&memory, &selection, &layout, &settings);
        assert_eq!(command, None);
    }

    #[test]
    fn region_focus_resets_memory() {
        let memory = FocusMemory {
            last_country: Some("Peru".into()),
            initial_move_done: true,
            manual_override: true,
            settling: false,
        };
        let (command, next) = transition(
            &memory,
            &Selection::Region(Region::Asia),
            &MarkerLayout::default(),
            &CameraSettings::default(),
        );
        assert_eq!(
            command,
            Some(CameraCommand::Fly {
                center: Region::Asia.view().center,
                zoom: 3.0,
                duration: Duration::from_millis(1500),
            })
        );
        assert_eq!(next.last_country, None);
        assert!(!next.initial_move_done);
        assert!(!next.manual_override);
    }

    #[test]
    fn idle_and_chain_leave_camera_alone() {
        let memory = FocusMemory {
            last_country: Some("Peru".into()),
            initial_move_done: true,
            ..FocusMemory::default()
        };
        for selection in [Selection::None, Selection::Chain("Base".into())] {
            let (command, next) = transition(
                &memory,
                &selection,
                &MarkerLayout::default(),
                &CameraSettings::default(),
            );
            assert_eq!(command, None);
            assert_eq!(next, memory);
        }
    }

    #[test]
    fn same_country_community_pans_to_adjusted_marker() {
        let list = vec![
            Community::new("ETH Uruguay", "Uruguay"),
            Community::new("Cabal Uruguay", "Uruguay"),
        ];
        let layout = layout_for(&list);
        let settings = CameraSettings::default();
        let (_, memory) = transition(
            &FocusMemory::default(),
            &Selection::Country("Uruguay".into()),
            &layout,
            &settings,
        );
        let (command, _) = transition(
            &memory,
            &Selection::Community(SelectedCommunity::new(1, list[1].clone())),
            &layout,
            &settings,
        );
        assert_eq!(
            command,
            Some(CameraCommand::Pan {
                center: layout.position_of(1, &list[1]).unwrap()
            })
        );
    }

    #[test]
    fn unknown_country_without_marker_is_ignored() {
        let list = vec![Community::new("ETH Atlantis", "Atlantis")];
        let memory = FocusMemory::default();
        let (command, next) = transition(
            &memory,
            &Selection::Community(SelectedCommunity::new(0, list[0].clone())),
            &layout_for(&list),
            &CameraSettings::default(),
        );
        assert_eq!(command, None);
        assert_eq!(next, memory);
    }

    #[test]
    fn explicit_coordinates_stand_in_for_unknown_country() {
        let list = vec![Community::new("ETH Atlantis", "Atlantis")
            .with_coordinates(Coordinate::new(31.0, -24.0))];
        let (command, _) = transition(
            &FocusMemory::default(),
            &Selection::Community(SelectedCommunity::new(0, list[0].clone())),
            &layout_for(&list),
            &CameraSettings::default(),
        );
        assert_eq!(command.map(|c| c.center()), Some(Coordinate::new(31.0, -24.0)));
    }

    #[test]
    fn zoom_end_after_fly_is_not_manual() {
        let list = vec![Community::new("ETH Peru", "Peru")];
        let layout = layout_for(&list);
        let mut controller = ViewController::new(CameraSettings::default());
        controller.on_selection(&Selection::Country("Peru".into()), &layout);
        assert!(controller.memory().settling);

        controller.on_zoom_end();
        assert!(!controller.memory().manual_override);

        controller.on_zoom_end();
        assert!(controller.memory().manual_override);
    }

    #[test]
    fn manual_zoom_turns_next_pan_into_fly() {
        let list = vec![Community::new("ETH Peru", "Peru")];
        let layout = layout_for(&list);
        let mut controller = ViewController::new(CameraSettings::default());
        controller.on_selection(&Selection::Country("Peru".into()), &layout);
        controller.on_zoom_end();
        controller.on_zoom_end();

        let command = controller
            .on_selection(&pick(&list, 0), &layout)
            .unwrap();
        assert!(command.is_fly());
        assert!(!controller.memory().manual_override);

        let command = controller
            .on_selection(&pick(&list, 0), &layout)
            .unwrap();
        assert!(!command.is_fly());
    }

    #[test]
    fn fly_at_unchanged_zoom_does_not_absorb_next_manual_zoom() {
        let list = vec![
            Community::new("ETH Peru", "Peru"),
            Community::new("ETH Chile", "Chile"),
        ];
        let layout = layout_for(&list);
        let mut surface = ZoomOnly(2.0);
        let mut controller = ViewController::new(CameraSettings::default());

        controller.focus(&Selection::Country("Peru".into()), &layout, &mut surface);
        assert!(controller.memory().settling);
        controller.on_zoom_end();

        // Country to country at the same zoom: no zoom-end will follow.
        let command = controller
            .focus(&Selection::Country("Chile".into()), &layout, &mut surface)
            .unwrap();
        assert!(command.is_fly());
        assert!(!controller.memory().settling);

        controller.on_zoom_end();
        assert!(controller.memory().manual_override);

        let command = controller.focus(&pick(&list, 1), &layout, &mut surface).unwrap();
        assert!(command.is_fly());
    }
}
