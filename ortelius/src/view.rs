//! Access to the map view state: center, zoom and zoom change notifications.
//!
//! Coordinates cross the API boundary as [`LonLat`] pairs in a caller-chosen
//! reference system (default [`Crs::WGS84`]) and are converted to and from
//! the engine's native projection at that boundary. A coordinate pair is
//! never passed across reference systems without an explicit conversion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::crs::{Crs, LonLat};
use crate::engine::{EnginePoint, MapEngine};

/// Options of the [`set_center`] and [`get_center`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterOptions {
    /// Reference system of the coordinate pair on the caller's side of the
    /// boundary. `None` disables the conversion entirely, so the raw values
    /// are used in the engine's native projection.
    pub crs: Option<Crs>,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            crs: Some(Crs::WGS84),
        }
    }
}

/// Moves the center of the map to the given coordinates, optionally changing
/// the zoom level at the same time.
///
/// The coordinates are converted from `opts.crs` into the engine's native
/// projection before being applied, unless the conversion is explicitly
/// disabled.
pub fn set_center<E: MapEngine>(
    map: &mut E,
    lonlat: LonLat,
    zoom: Option<u32>,
    opts: &CenterOptions,
) {
    let mut point = E::Point::new(lonlat.lon, lonlat.lat);
    if let Some(crs) = &opts.crs {
        point = point.transform(crs, &map.crs());
    }

    map.set_center(Some(point), zoom);
}

/// Returns the current center of the map, converted into `opts.crs` unless
/// the conversion is explicitly disabled.
pub fn get_center<E: MapEngine>(map: &E, opts: &CenterOptions) -> LonLat {
    let mut center = map.center();
    if let Some(crs) = &opts.crs {
        center = center.transform(&map.crs(), crs);
    }

    LonLat::new(center.x(), center.y())
}

/// The number of zoom levels the current base layer can display.
pub fn get_max_zoom_level<E: MapEngine>(map: &E) -> u32 {
    map.num_zoom_levels()
}

/// Zoom levels available for a zoom picker UI.
///
/// The sequence starts at 1 and excludes both level 0 and the maximum level
/// itself: with 5 zoom levels the result is `[1, 2, 3, 4]`. Downstream UIs
/// rely on these exact bounds.
pub fn get_zoom_levels<E: MapEngine>(map: &E) -> Vec<u32> {
    (1..map.num_zoom_levels()).collect()
}

/// Sets the zoom level of the map without moving its center.
pub fn set_zoom<E: MapEngine>(map: &mut E, zoom: u32) {
    map.set_center(None, Some(zoom));
}

/// The current zoom level of the map.
pub fn get_zoom<E: MapEngine>(map: &E) -> u32 {
    map.zoom()
}

/// Handle to a zoom change subscription created by [`on_zoom_change`].
///
/// Dropping the handle without calling [`ZoomSubscription::unsubscribe`]
/// leaves the callback registered for the lifetime of the map.
#[derive(Debug)]
pub struct ZoomSubscription {
    active: Arc<AtomicBool>,
}

impl ZoomSubscription {
    /// Stops the callback from being invoked on further zoom changes.
    ///
    /// The engine's event registry is append-only, so the underlying entry
    /// is not removed; it is deactivated and ignores all further events.
    pub fn unsubscribe(self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Invokes `callback` with the new zoom level after every zoom change of the
/// map, until the returned subscription is cancelled.
pub fn on_zoom_change<E: MapEngine>(
    map: &mut E,
    mut callback: impl FnMut(u32) + 'static,
) -> ZoomSubscription {
    let active = Arc::new(AtomicBool::new(true));
    let flag = active.clone();

    map.on_zoom_end(Box::new(move |zoom| {
        if flag.load(Ordering::SeqCst) {
            callback(zoom);
        }
    }));

    ZoomSubscription { active }
}
