//! One-shot acquisition of the device location.
//!
//! Each [`get_position`] call drives its own geolocation control through the
//! engine's event mechanism and exposes the outcome as a future. The control
//! fires exactly one of three terminal events (see
//! [`LocationEvent`](crate::engine::LocationEvent)), which settles the
//! future; the settlement guard makes a second event a no-op even if an
//! engine violates the mutual exclusivity of its terminal events.

use std::future::Future;

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};

use crate::crs::{Crs, LonLat};
use crate::engine::{EnginePoint, GeolocateControl, LocationEvent, MapEngine};
use crate::error::OrteliusError;

/// Options of a geolocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionOptions {
    /// Whether the control keeps tracking the device location after the
    /// first fix, instead of a single one-shot query.
    pub bind: bool,
    /// Reference system the resolved coordinates are reported in.
    pub transform_to: Crs,
    /// Options forwarded to the platform geolocation service.
    pub geolocation: DeviceOptions,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            bind: true,
            transform_to: Crs::WGS84,
            geolocation: DeviceOptions::default(),
        }
    }
}

/// Options of the platform geolocation service, forwarded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceOptions {
    /// Maximum age of a cached fix the service may return, in milliseconds.
    pub maximum_age: u64,
    /// Time the service is given to produce a fix, in milliseconds.
    pub timeout: u64,
    /// Whether the service should prefer the most accurate source available.
    pub enable_high_accuracy: bool,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            maximum_age: 0,
            timeout: 10_000,
            enable_high_accuracy: true,
        }
    }
}

/// Requests the current device location through the map's geolocation
/// capability.
///
/// A fresh geolocation control is created, attached to the map and queried;
/// the returned future settles when the control fires a terminal event.
/// Concurrent requests on the same map are independent, each owning its own
/// control.
///
/// The resolved coordinates are converted from the engine's native
/// projection into `opts.transform_to` (default [`Crs::WGS84`]).
///
/// No timeout is enforced here beyond the device option forwarded to the
/// platform service. If the engine never fires a terminal event the future
/// stays pending indefinitely; callers that need a hard bound must apply
/// their own timeout around the future.
pub fn get_position<E: MapEngine>(
    map: &mut E,
    opts: PositionOptions,
) -> impl Future<Output = Result<LonLat, OrteliusError>> {
    let (sender, receiver) = oneshot::channel();

    let control = map.new_geolocate_control(&opts);
    let native_crs = map.crs();
    let transform_to = opts.transform_to;

    // Taking the sender out of the Option settles the request exactly once,
    // whatever the engine fires afterwards.
    let mut settlement = Some(sender);
    control.on_location(Box::new(move |event| {
        let Some(sender) = settlement.take() else {
            log::warn!("Location event fired after the request was settled, ignoring");
            return;
        };

        let result = match event {
            LocationEvent::Uncapable => Err(OrteliusError::GeolocationUnsupported),
            LocationEvent::Failed(error) => Err(OrteliusError::GeolocationFailed {
                code: error.as_ref().map(|e| e.code),
                message: error.map(|e| e.message),
            }),
            LocationEvent::Updated(point) => {
                // The reported point is in the engine's native projection;
                // the converted point is the authoritative source of the
                // resolved coordinates.
                let point = point.transform(&native_crs, &transform_to);
                Ok(LonLat::new(point.x(), point.y()))
            }
        };

        log::debug!("Geolocation request settled: {result:?}");
        if sender.send(result).is_err() {
            log::debug!("Geolocation result discarded: the caller dropped the future");
        }
    }));

    map.add_geolocate(&control);
    control.activate();
    control.request_current_location();
    log::debug!("Geolocation request started");

    async move {
        match receiver.await {
            Ok(result) => result,
            // The engine destroyed the control without firing a terminal
            // event.
            Err(oneshot::Canceled) => Err(OrteliusError::GeolocationFailed {
                code: None,
                message: None,
            }),
        }
    }
}
