//! Community Atlas: a map-based directory of Ethereum communities.
//!
//! Everything here is toolkit-free. The GTK front-end in `main.rs` drives
//! these modules through the [`surface::MapSurface`] trait.

pub mod camera;
pub mod config;
pub mod coordinates;
pub mod data;
pub mod directory;
pub mod error;
pub mod geocoding;
pub mod logging;
pub mod markers;
pub mod region;
pub mod search;
pub mod selection;
pub mod store;
pub mod submission;
pub mod surface;

pub use camera::{CameraCommand, CameraSettings, FocusMemory, ViewController};
pub use config::Config;
pub use data::{Community, Coordinate, MapView};
pub use error::{Error, Result};
pub use geocoding::Geocoder;
pub use markers::MarkerLayout;
pub use region::Region;
pub use selection::{Selection, SelectionIntent};
pub use surface::{MapSurface, MarkerSet};
