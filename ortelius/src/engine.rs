//! Abstraction over the underlying map engine.
//!
//! The configuration layer does not render anything itself. Everything it
//! does is expressed as calls to a pre-existing map widget implementing the
//! [`MapEngine`] trait: layer and control construction, view state access and
//! the geolocation control lifecycle. The engine instance is passed
//! explicitly into every operation of the crate, so applications can carry
//! several independent maps or swap the engine in tests.

use crate::config::{BaseLayerOptions, ControlOptions, VectorLayerOptions};
use crate::crs::Crs;
use crate::position::PositionOptions;

/// Handler for the terminal events of a geolocation request.
pub type LocationHandler<P> = Box<dyn FnMut(LocationEvent<P>)>;

/// Handler invoked with the new zoom level after each zoom-end event.
pub type ZoomHandler = Box<dyn FnMut(u32)>;

/// A point in the engine's native projection.
///
/// Conversion between reference systems is the engine's job; the
/// configuration layer only decides *when* a conversion happens and with
/// which [`Crs`] pair.
pub trait EnginePoint: Clone {
    /// Creates a point from raw projected coordinates.
    fn new(x: f64, y: f64) -> Self;
    /// Horizontal coordinate.
    fn x(&self) -> f64;
    /// Vertical coordinate.
    fn y(&self) -> f64;
    /// Converts the point from one reference system into another.
    fn transform(&self, from: &Crs, to: &Crs) -> Self;
}

/// Terminal event of a device location request.
///
/// The engine guarantees that at most one terminal event fires per control
/// instance; the orchestrator does not rely on that alone and additionally
/// guards against double settlement.
#[derive(Debug, Clone)]
pub enum LocationEvent<P> {
    /// The device has no geolocation capability at all.
    Uncapable,
    /// The platform geolocation service reported an error.
    Failed(Option<LocationError>),
    /// The device reported its location, as a point in the engine's native
    /// projection.
    Updated(P),
}

/// Error details reported by the platform geolocation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationError {
    /// Platform-specific numeric error code.
    pub code: i32,
    /// Human-readable description of the failure.
    pub message: String,
}

/// An engine control that queries the device location.
///
/// Event handlers are registered before the control is attached to a map, so
/// registration works on a shared reference; engines are expected to use
/// interior mutability for their event registries.
pub trait GeolocateControl {
    /// Point type the control reports locations with.
    type Point: EnginePoint;

    /// Registers the handler for the control's terminal events.
    fn on_location(&self, handler: LocationHandler<Self::Point>);
    /// Activates the control.
    fn activate(&self);
    /// Triggers a one-shot query of the current device location.
    fn request_current_location(&self);
}

/// The underlying interactive map widget.
///
/// Layer objects are owned by the engine once attached; the configuration
/// layer never retains them. The geolocate control is the exception: the
/// engine constructs it and hands out a handle that stays usable after the
/// control is attached, because its lifecycle methods must be called after
/// attachment.
pub trait MapEngine {
    /// Point type in the engine's native projection.
    type Point: EnginePoint;
    /// Live layer object.
    type Layer;
    /// Live control object.
    type Control;
    /// Live geolocation control handle.
    type Geolocate: GeolocateControl<Point = Self::Point>;

    /// Attaches a layer on top of the previously attached ones.
    fn add_layer(&mut self, layer: Self::Layer);
    /// Attaches a control to the map.
    fn add_control(&mut self, control: Self::Control);

    /// Constructs a tiled web-mercator base layer.
    fn new_tiled_layer(&mut self, opts: &BaseLayerOptions) -> Self::Layer;
    /// Constructs an editable vector layer.
    fn new_vector_layer(&mut self, opts: &VectorLayerOptions) -> Self::Layer;
    /// Constructs a pointer position readout control.
    fn new_mouse_position_control(&mut self, opts: &ControlOptions) -> Self::Control;
    /// Constructs a pan/drag navigation control.
    fn new_navigation_control(&mut self, opts: &ControlOptions) -> Self::Control;
    /// Constructs a zoom buttons control.
    fn new_zoom_control(&mut self, opts: &ControlOptions) -> Self::Control;
    /// Constructs a geolocation control.
    fn new_geolocate_control(&mut self, opts: &PositionOptions) -> Self::Geolocate;
    /// Attaches a geolocation control to the map.
    fn add_geolocate(&mut self, control: &Self::Geolocate);

    /// Reference system of the engine's native projection.
    fn crs(&self) -> Crs;
    /// Current center of the view, in the native projection.
    fn center(&self) -> Self::Point;
    /// Moves the view. A `None` center keeps the current one, so the zoom
    /// level can be changed alone.
    fn set_center(&mut self, center: Option<Self::Point>, zoom: Option<u32>);
    /// Current zoom level.
    fn zoom(&self) -> u32;
    /// Number of zoom levels the current base layer can display.
    fn num_zoom_levels(&self) -> u32;
    /// Registers a handler for the zoom-end event. Registration is
    /// append-only; see [`crate::view::on_zoom_change`] for a cancellable
    /// wrapper.
    fn on_zoom_end(&mut self, handler: ZoomHandler);
}
