//! Scripted map engine used by the unit tests of this crate.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{BaseLayerOptions, ControlOptions, VectorLayerOptions};
use crate::crs::Crs;
use crate::engine::{
    EnginePoint, GeolocateControl, LocationEvent, LocationHandler, MapEngine, ZoomHandler,
};
use crate::position::PositionOptions;

/// Point in the test engine's native projection, which is WGS84 degrees
/// scaled by [`TestEngine::PROJECTION_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestPoint {
    x: f64,
    y: f64,
}

impl EnginePoint for TestPoint {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn transform(&self, from: &Crs, to: &Crs) -> Self {
        if from == to {
            *self
        } else if *from == Crs::WGS84 && *to == TestEngine::NATIVE_CRS {
            Self::new(
                self.x * TestEngine::PROJECTION_SCALE,
                self.y * TestEngine::PROJECTION_SCALE,
            )
        } else if *from == TestEngine::NATIVE_CRS && *to == Crs::WGS84 {
            Self::new(
                self.x / TestEngine::PROJECTION_SCALE,
                self.y / TestEngine::PROJECTION_SCALE,
            )
        } else {
            panic!("test engine cannot transform {from} into {to}");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TestLayer {
    Tiled(BaseLayerOptions),
    Vector(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestControl {
    MousePosition,
    Navigation,
    Zoom,
}

#[derive(Default)]
struct GeolocateState {
    options: Option<PositionOptions>,
    handler: Option<LocationHandler<TestPoint>>,
    activated: bool,
    location_requested: bool,
}

/// Initializes log output for tests that exercise logged code paths.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Handle to a scripted geolocation control. Clones share state, as engine
/// handles do.
#[derive(Clone)]
pub struct TestGeolocate {
    state: Rc<RefCell<GeolocateState>>,
}

impl TestGeolocate {
    fn new(options: &PositionOptions) -> Self {
        Self {
            state: Rc::new(RefCell::new(GeolocateState {
                options: Some(options.clone()),
                ..Default::default()
            })),
        }
    }

    /// Fires a terminal event into the registered handler.
    pub fn fire(&self, event: LocationEvent<TestPoint>) {
        let handler = self.state.borrow_mut().handler.take();
        if let Some(mut handler) = handler {
            handler(event);
            self.state.borrow_mut().handler = Some(handler);
        }
    }

    pub fn is_activated(&self) -> bool {
        self.state.borrow().activated
    }

    pub fn location_was_requested(&self) -> bool {
        self.state.borrow().location_requested
    }

    pub fn options(&self) -> PositionOptions {
        self.state
            .borrow()
            .options
            .clone()
            .expect("control was created without options")
    }
}

impl GeolocateControl for TestGeolocate {
    type Point = TestPoint;

    fn on_location(&self, handler: LocationHandler<TestPoint>) {
        self.state.borrow_mut().handler = Some(handler);
    }

    fn activate(&self) {
        self.state.borrow_mut().activated = true;
    }

    fn request_current_location(&self) {
        self.state.borrow_mut().location_requested = true;
    }
}

/// Map engine that records everything attached to it and lets tests fire
/// events on demand.
pub struct TestEngine {
    layers: Vec<TestLayer>,
    controls: Vec<TestControl>,
    geolocates: Vec<TestGeolocate>,
    center: Option<TestPoint>,
    zoom: u32,
    num_zoom_levels: u32,
    zoom_handlers: Vec<ZoomHandler>,
}

impl TestEngine {
    pub const NATIVE_CRS: Crs = Crs::EPSG3857;
    pub const PROJECTION_SCALE: f64 = 111_320.0;

    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            controls: Vec::new(),
            geolocates: Vec::new(),
            center: None,
            zoom: 0,
            num_zoom_levels: 20,
            zoom_handlers: Vec::new(),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn tiled_layers(&self) -> Vec<BaseLayerOptions> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                TestLayer::Tiled(opts) => Some(*opts),
                TestLayer::Vector(_) => None,
            })
            .collect()
    }

    pub fn vector_layer_titles(&self) -> Vec<String> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                TestLayer::Vector(title) => Some(title.clone()),
                TestLayer::Tiled(_) => None,
            })
            .collect()
    }

    pub fn controls(&self) -> Vec<TestControl> {
        self.controls.clone()
    }

    pub fn geolocate_controls(&self) -> Vec<TestGeolocate> {
        self.geolocates.clone()
    }

    pub fn last_geolocate(&self) -> Option<TestGeolocate> {
        self.geolocates.last().cloned()
    }

    pub fn center_raw(&self) -> Option<(f64, f64)> {
        self.center.map(|point| (point.x, point.y))
    }

    pub fn set_num_zoom_levels(&mut self, levels: u32) {
        self.num_zoom_levels = levels;
    }

    /// Changes the zoom level and fires the zoom-end event.
    pub fn fire_zoom_end(&mut self, zoom: u32) {
        self.zoom = zoom;
        for handler in &mut self.zoom_handlers {
            handler(zoom);
        }
    }
}

impl MapEngine for TestEngine {
    type Point = TestPoint;
    type Layer = TestLayer;
    type Control = TestControl;
    type Geolocate = TestGeolocate;

    fn add_layer(&mut self, layer: TestLayer) {
        self.layers.push(layer);
    }

    fn add_control(&mut self, control: TestControl) {
        self.controls.push(control);
    }

    fn new_tiled_layer(&mut self, opts: &BaseLayerOptions) -> TestLayer {
        TestLayer::Tiled(*opts)
    }

    fn new_vector_layer(&mut self, opts: &VectorLayerOptions) -> TestLayer {
        TestLayer::Vector(opts.title.clone())
    }

    fn new_mouse_position_control(&mut self, _opts: &ControlOptions) -> TestControl {
        TestControl::MousePosition
    }

    fn new_navigation_control(&mut self, _opts: &ControlOptions) -> TestControl {
        TestControl::Navigation
    }

    fn new_zoom_control(&mut self, _opts: &ControlOptions) -> TestControl {
        TestControl::Zoom
    }

    fn new_geolocate_control(&mut self, opts: &PositionOptions) -> TestGeolocate {
        TestGeolocate::new(opts)
    }

    fn add_geolocate(&mut self, control: &TestGeolocate) {
        self.geolocates.push(control.clone());
    }

    fn crs(&self) -> Crs {
        Self::NATIVE_CRS
    }

    fn center(&self) -> TestPoint {
        self.center.unwrap_or(TestPoint { x: 0.0, y: 0.0 })
    }

    fn set_center(&mut self, center: Option<TestPoint>, zoom: Option<u32>) {
        if let Some(center) = center {
            self.center = Some(center);
        }
        if let Some(zoom) = zoom {
            self.zoom = zoom;
        }
    }

    fn zoom(&self) -> u32 {
        self.zoom
    }

    fn num_zoom_levels(&self) -> u32 {
        self.num_zoom_levels
    }

    fn on_zoom_end(&mut self, handler: ZoomHandler) {
        self.zoom_handlers.push(handler);
    }
}
