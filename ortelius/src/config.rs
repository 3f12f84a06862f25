//! Materialization of declarative map configuration.
//!
//! A configuration is a plain data description of what the map should
//! contain: base layers, vector layers and controls. The functions in this
//! module walk such a description and issue the corresponding construction
//! calls to the [`MapEngine`], validating the kind identifiers along the way.
//!
//! Layers and controls are attached in the order they are listed; which base
//! layer ends up active is decided by the engine's sequential attachment
//! order, no reordering is done here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::MapEngine;
use crate::error::OrteliusError;
use crate::position::PositionOptions;

/// Supported base layer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BaseLayerKind {
    /// Tiled imagery from a web-mercator tile provider.
    WebTiles,
}

impl FromStr for BaseLayerKind {
    type Err = OrteliusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "webTiles" => Ok(BaseLayerKind::WebTiles),
            other => Err(OrteliusError::UnknownLayerKind(other.to_string())),
        }
    }
}

/// Supported control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControlKind {
    /// Readout of the pointer position in map coordinates.
    MousePosition,
    /// Pan/drag navigation.
    Navigation,
    /// Zoom in/out buttons.
    Zoom,
    /// Device geolocation trigger.
    Geolocate,
}

impl FromStr for ControlKind {
    type Err = OrteliusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mousePosition" => Ok(ControlKind::MousePosition),
            "navigation" => Ok(ControlKind::Navigation),
            "zoom" => Ok(ControlKind::Zoom),
            "geolocate" => Ok(ControlKind::Geolocate),
            other => Err(OrteliusError::UnknownControlKind(other.to_string())),
        }
    }
}

/// Options of a tiled base layer. Zoom level bounds are forwarded to the
/// engine verbatim; `None` leaves the engine default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseLayerOptions {
    /// Total number of zoom levels the layer provides.
    pub num_zoom_levels: Option<u32>,
    /// Lowest zoom level the layer should be displayed at.
    pub min_zoom_level: Option<u32>,
    /// Highest zoom level the layer should be displayed at.
    pub max_zoom_level: Option<u32>,
}

/// Options of an editable vector layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VectorLayerOptions {
    /// Display title of the layer.
    pub title: String,
}

/// Free-form option bag of a control, forwarded to the engine as is.
///
/// For the `geolocate` control kind the bag is interpreted as
/// [`PositionOptions`] before construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlOptions(pub serde_json::Map<String, serde_json::Value>);

/// A base layer entry of a [`MapConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayerSpec {
    /// Kind identifier, matched against [`BaseLayerKind`].
    pub kind: String,
    /// Kind-specific options.
    #[serde(flatten)]
    pub options: BaseLayerOptions,
}

/// A control entry of a [`MapConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSpec {
    /// Kind identifier, matched against [`ControlKind`].
    pub kind: String,
    /// Kind-specific option bag.
    #[serde(default)]
    pub options: ControlOptions,
}

/// Complete declarative description of a map setup.
///
/// ```
/// use ortelius::config::MapConfig;
///
/// let config: MapConfig = serde_json::from_str(
///     r#"{
///         "baseLayers": [{ "kind": "webTiles", "numZoomLevels": 19 }],
///         "layers": [{ "title": "Annotations" }],
///         "controls": [{ "kind": "navigation" }, { "kind": "zoom" }]
///     }"#,
/// )?;
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Base layers, bottom-most first.
    pub base_layers: Vec<BaseLayerSpec>,
    /// Vector layers, drawn above the base layers.
    pub layers: Vec<VectorLayerOptions>,
    /// Controls to attach to the map.
    pub controls: Vec<ControlSpec>,
}

/// Materializes a complete [`MapConfig`] onto the map: base layers first,
/// then vector layers, then controls, each section in declaration order.
///
/// The first configuration error aborts materialization; entries already
/// processed stay attached.
pub fn configure<E: MapEngine>(map: &mut E, config: &MapConfig) -> Result<(), OrteliusError> {
    add_base_layers(
        map,
        config
            .base_layers
            .iter()
            .map(|spec| (spec.kind.as_str(), spec.options)),
    )?;
    add_layers(map, config.layers.iter().cloned());
    add_controls(
        map,
        config
            .controls
            .iter()
            .map(|spec| (spec.kind.as_str(), spec.options.clone())),
    )
}

/// Constructs a base layer of the given kind and attaches it to the map.
///
/// Returns [`OrteliusError::UnknownLayerKind`] if `kind` is not a supported
/// base layer kind; nothing is attached in that case.
pub fn add_base_layer<E: MapEngine>(
    map: &mut E,
    kind: &str,
    opts: &BaseLayerOptions,
) -> Result<(), OrteliusError> {
    let layer = match BaseLayerKind::from_str(kind)? {
        BaseLayerKind::WebTiles => map.new_tiled_layer(opts),
    };

    log::debug!("Adding base layer of kind {kind}");
    map.add_layer(layer);

    Ok(())
}

/// Attaches one base layer per entry, in iteration order.
pub fn add_base_layers<E, I, K>(map: &mut E, layers: I) -> Result<(), OrteliusError>
where
    E: MapEngine,
    I: IntoIterator<Item = (K, BaseLayerOptions)>,
    K: AsRef<str>,
{
    for (kind, opts) in layers {
        add_base_layer(map, kind.as_ref(), &opts)?;
    }

    Ok(())
}

/// Constructs an editable vector layer and attaches it to the map.
pub fn add_layer<E: MapEngine>(map: &mut E, opts: &VectorLayerOptions) {
    log::debug!("Adding vector layer \"{}\"", opts.title);
    let layer = map.new_vector_layer(opts);
    map.add_layer(layer);
}

/// Attaches one vector layer per entry, in iteration order.
pub fn add_layers<E, I>(map: &mut E, layers: I)
where
    E: MapEngine,
    I: IntoIterator<Item = VectorLayerOptions>,
{
    for opts in layers {
        add_layer(map, &opts);
    }
}

/// Constructs a control of the given kind and attaches it to the map.
///
/// Returns [`OrteliusError::UnknownControlKind`] if `kind` is not a supported
/// control kind; nothing is attached in that case.
pub fn add_control<E: MapEngine>(
    map: &mut E,
    kind: &str,
    opts: &ControlOptions,
) -> Result<(), OrteliusError> {
    let control = match ControlKind::from_str(kind)? {
        ControlKind::MousePosition => map.new_mouse_position_control(opts),
        ControlKind::Navigation => map.new_navigation_control(opts),
        ControlKind::Zoom => map.new_zoom_control(opts),
        ControlKind::Geolocate => {
            let opts = position_options(kind, opts)?;
            let control = map.new_geolocate_control(&opts);
            log::debug!("Adding control of kind {kind}");
            map.add_geolocate(&control);
            return Ok(());
        }
    };

    log::debug!("Adding control of kind {kind}");
    map.add_control(control);

    Ok(())
}

/// Attaches one control per entry, in iteration order.
pub fn add_controls<E, I, K>(map: &mut E, controls: I) -> Result<(), OrteliusError>
where
    E: MapEngine,
    I: IntoIterator<Item = (K, ControlOptions)>,
    K: AsRef<str>,
{
    for (kind, opts) in controls {
        add_control(map, kind.as_ref(), &opts)?;
    }

    Ok(())
}

fn position_options(kind: &str, opts: &ControlOptions) -> Result<PositionOptions, OrteliusError> {
    serde_json::from_value(serde_json::Value::Object(opts.0.clone())).map_err(|err| {
        OrteliusError::InvalidControlOptions {
            kind: kind.to_string(),
            reason: err.to_string(),
        }
    })
}
