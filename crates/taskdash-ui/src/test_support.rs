//! Recording fakes for the host UI seams.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use taskdash_maps::Coordinate;

use crate::map_surface::{Endpoint, MapSurface, MarkerHandle};
use crate::notify::Notifier;

/// Records alerts and prompts; answers every prompt with a fixed choice.
#[derive(Default)]
pub struct FakeNotifier {
    pub alerts: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
    answer: AtomicBool,
}

impl FakeNotifier {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer: AtomicBool::new(answer),
            ..Default::default()
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl Notifier for FakeNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().push(message.to_string());
        self.answer.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Init(Coordinate, u8),
    AddMarker(Endpoint, Coordinate, MarkerHandle),
    RemoveMarker(MarkerHandle),
    SetView(Coordinate, u8),
    ShowRoute(usize),
    FitBounds(usize, u32),
}

/// Map surface that only records what was drawn.
#[derive(Clone, Default)]
pub struct FakeSurface {
    pub ops: Arc<Mutex<Vec<SurfaceOp>>>,
    next_id: Arc<Mutex<u64>>,
}

impl FakeSurface {
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().clone()
    }
}

impl MapSurface for FakeSurface {
    fn init(&mut self, center: Coordinate, zoom: u8) {
        self.ops.lock().push(SurfaceOp::Init(center, zoom));
    }

    fn add_marker(&mut self, endpoint: Endpoint, at: Coordinate) -> MarkerHandle {
        let mut next = self.next_id.lock();
        *next += 1;
        let handle = MarkerHandle(*next);
        self.ops.lock().push(SurfaceOp::AddMarker(endpoint, at, handle));
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.ops.lock().push(SurfaceOp::RemoveMarker(marker));
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.ops.lock().push(SurfaceOp::SetView(center, zoom));
    }

    fn show_route(&mut self, path: &[Coordinate]) {
        self.ops.lock().push(SurfaceOp::ShowRoute(path.len()));
    }

    fn fit_bounds(&mut self, path: &[Coordinate], padding: u32) {
        self.ops.lock().push(SurfaceOp::FitBounds(path.len(), padding));
    }
}
