//! Ortelius is a declarative configuration layer for interactive map
//! widgets. It translates plain configuration objects describing base
//! layers, vector layers and controls into live map state, and exposes a
//! small imperative surface for the view state (center, zoom) plus one
//! asynchronous capability: device geolocation.
//!
//! The crate renders nothing itself. All work is delegated to a map engine
//! implementing the [`MapEngine`] trait, which is passed explicitly into
//! every operation; see the [`engine`] module for the full contract.
//!
//! # Quick start
//!
//! ```no_run
//! use ortelius::config::MapConfig;
//! use ortelius::position::PositionOptions;
//! use ortelius::view::CenterOptions;
//! use ortelius::{lonlat, MapEngine, OrteliusError};
//!
//! async fn setup(map: &mut impl MapEngine) -> Result<(), OrteliusError> {
//!     let config: MapConfig = serde_json::from_str(
//!         r#"{
//!             "baseLayers": [{ "kind": "webTiles", "numZoomLevels": 19 }],
//!             "controls": [{ "kind": "navigation" }, { "kind": "zoom" }]
//!         }"#,
//!     )
//!     .expect("invalid configuration");
//!
//!     ortelius::configure(map, &config)?;
//!     ortelius::view::set_center(map, lonlat!(4.89, 52.37), Some(12), &CenterOptions::default());
//!
//!     let position = ortelius::get_position(map, PositionOptions::default()).await?;
//!     println!("device is at {}, {}", position.lon, position.lat);
//!
//!     Ok(())
//! }
//! ```
//!
//! Configuration errors (an unrecognized layer or control kind) are returned
//! synchronously by the materializer call that hit them. Geolocation errors
//! reject the future returned by [`get_position`]; one failure settles the
//! request permanently, retries are the caller's responsibility.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
mod crs;
pub mod engine;
pub mod error;
pub mod position;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::{configure, MapConfig};
pub use crs::{Crs, LonLat};
pub use engine::MapEngine;
pub use error::OrteliusError;
pub use position::get_position;
