//! The map capability set the controller drives.

use std::time::Duration;

use crate::camera::CameraCommand;
use crate::data::{Coordinate, MapView};
use crate::markers::{MarkerLayout, MarkerPopup};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyOptions {
    pub duration: Duration,
}

/// Anything that can show a tiled map, move its camera and hold markers.
pub trait MapSurface {
    type Marker;

    fn set_view(&mut self, center: Coordinate, zoom: f64);
    fn fly_to(&mut self, center: Coordinate, zoom: f64, opts: FlyOptions);
    fn pan_to(&mut self, center: Coordinate);
    fn add_marker(&mut self, position: Coordinate, popup: &MarkerPopup) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    fn on_zoom_end(&mut self, callback: Box<dyn Fn()>);
    /// Zoom level currently shown.
    fn zoom(&self) -> f64;

    fn show(&mut self, view: MapView) {
        self.set_view(view.center, view.zoom);
    }
}

impl CameraCommand {
    pub fn apply<S: MapSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            CameraCommand::Fly {
                center,
                zoom,
                duration,
            } => surface.fly_to(
                *center,
                *zoom,
                FlyOptions {
                    duration: *duration,
                },
            ),
            CameraCommand::Pan { center } => surface.pan_to(*center),
        }
    }
}

/// Markers currently on a surface, keyed by marker key.
#[derive(Debug)]
pub struct MarkerSet<H> {
    placed: Vec<(String, H)>,
}

impl<H> Default for MarkerSet<H> {
    fn default() -> Self {
        Self { placed: Vec::new() }
    }
}

impl<H> MarkerSet<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.placed.iter().map(|(key, _)| key.as_str())
    }

    /// Replaces every marker on `surface` with the markers of `layout`.
    pub fn replace<S>(&mut self, surface: &mut S, layout: &MarkerLayout<'_>)
    where
        S: MapSurface<Marker = H> + ?Sized,
    {
        self.clear(surface);
        for marker in layout.iter() {
            let handle = surface.add_marker(marker.position, &marker.popup());
            self.placed.push((marker.key.clone(), handle));
        }
    }

    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Marker = H> + ?Sized,
    {
        for (_, handle) in self.placed.drain(..) {
            surface.remove_marker(handle);
        }
    }
}
