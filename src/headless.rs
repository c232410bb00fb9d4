/*
 * A frame host without a display. It records every frame operation in a
 * shared `HeadlessProbe` so embedders and tests can observe what a native
 * host would have shown, and it replays input injected through the probe as
 * if it came from the native event queue.
 */
use crate::error::{OverlayError, Result};
use crate::host::{FrameHandle, FrameHost, FrameSpec, HostEvent, HostEventKind};
use crate::scene::Scene;
use crate::types::{ChromeTarget, ComponentInput, PointerEvent, Rect};
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

const HEADLESS_POLL: Duration = Duration::from_millis(10);

/// What the headless host knows about one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessFrame {
    pub handle: FrameHandle,
    pub spec: FrameSpec,
    pub bounds: Rect,
    pub visible: bool,
    pub title: String,
    pub scene: Option<Scene>,
    pub presents: usize,
    pub destroyed: bool,
}

#[derive(Debug, Default)]
struct ProbeState {
    frames: BTreeMap<FrameHandle, HeadlessFrame>,
    pending: VecDeque<HostEvent>,
    fail_creates: bool,
}

/// Shared view into a `HeadlessHost`; cheap to clone and usable from any thread.
#[derive(Debug, Clone, Default)]
pub struct HeadlessProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl HeadlessProbe {
    /// The live frame of `window_id`, or the most recent destroyed one.
    pub fn frame(&self, window_id: &str) -> Option<HeadlessFrame> {
        let state = self.state.lock();
        let all: Vec<&HeadlessFrame> = state
            .frames
            .values()
            .filter(|f| f.spec.window_id == window_id && !f.spec.synthetic)
            .collect();
        all.iter()
            .rev()
            .find(|f| !f.destroyed)
            .or_else(|| all.last())
            .map(|f| (*f).clone())
    }

    pub fn frames(&self) -> Vec<HeadlessFrame> {
        self.state.lock().frames.values().cloned().collect()
    }

    pub fn live_frame_count(&self) -> usize {
        self.state
            .lock()
            .frames
            .values()
            .filter(|f| !f.destroyed)
            .count()
    }

    pub fn scene(&self, window_id: &str) -> Option<Scene> {
        self.frame(window_id).and_then(|f| f.scene)
    }

    pub fn is_visible(&self, window_id: &str) -> bool {
        self.frame(window_id)
            .is_some_and(|f| f.visible && !f.destroyed)
    }

    pub fn bounds(&self, window_id: &str) -> Option<Rect> {
        self.frame(window_id).map(|f| f.bounds)
    }

    /// Makes every later `create_frame` fail until reset.
    pub fn fail_creates(&self, fail: bool) {
        self.state.lock().fail_creates = fail;
    }

    pub fn inject(&self, event: HostEvent) {
        self.state.lock().pending.push_back(event);
    }

    /// Queues pointer input on the live frame of `window_id`.
    pub fn inject_pointer(&self, window_id: &str, target: ChromeTarget, event: PointerEvent) -> bool {
        self.inject_for(window_id, HostEventKind::Pointer { target, event })
    }

    pub fn inject_activation(&self, window_id: &str, component_id: &str, input: ComponentInput) -> bool {
        self.inject_for(
            window_id,
            HostEventKind::Activate {
                component_id: component_id.to_string(),
                input,
            },
        )
    }

    fn inject_for(&self, window_id: &str, kind: HostEventKind) -> bool {
        let Some(frame) = self.frame(window_id).filter(|f| !f.destroyed) else {
            log::debug!("HeadlessHost: no live frame for '{window_id}'; input dropped");
            return false;
        };
        self.inject(HostEvent {
            frame: frame.handle,
            kind,
        });
        true
    }

    fn with_frame(&self, frame: FrameHandle, f: impl FnOnce(&mut HeadlessFrame)) {
        match self.state.lock().frames.get_mut(&frame) {
            Some(entry) if !entry.destroyed => f(entry),
            _ => log::debug!("HeadlessHost: {frame} is unknown or destroyed"),
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    probe: HeadlessProbe,
    next_handle: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_probe(probe: HeadlessProbe) -> Self {
        Self {
            probe,
            next_handle: 0,
        }
    }

    pub fn probe(&self) -> HeadlessProbe {
        self.probe.clone()
    }
}

impl FrameHost for HeadlessHost {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn create_frame(&mut self, spec: &FrameSpec) -> Result<FrameHandle> {
        let mut state = self.probe.state.lock();
        if state.fail_creates {
            return Err(OverlayError::Host(format!(
                "headless frame creation disabled for '{}'",
                spec.window_id
            )));
        }
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        log::trace!("HeadlessHost: created {handle} for '{}'", spec.window_id);
        state.frames.insert(
            handle,
            HeadlessFrame {
                handle,
                spec: spec.clone(),
                bounds: spec.bounds,
                visible: false,
                title: spec.title.clone(),
                scene: None,
                presents: 0,
                destroyed: false,
            },
        );
        Ok(handle)
    }

    fn set_bounds(&mut self, frame: FrameHandle, bounds: Rect) {
        self.probe.with_frame(frame, |f| f.bounds = bounds);
    }

    fn set_visible(&mut self, frame: FrameHandle, visible: bool) {
        self.probe.with_frame(frame, |f| f.visible = visible);
    }

    fn set_title(&mut self, frame: FrameHandle, title: &str) {
        self.probe.with_frame(frame, |f| f.title = title.to_string());
    }

    fn present(&mut self, frame: FrameHandle, scene: &Scene) {
        self.probe.with_frame(frame, |f| {
            f.scene = Some(scene.clone());
            f.presents += 1;
        });
    }

    fn destroy_frame(&mut self, frame: FrameHandle) {
        self.probe.with_frame(frame, |f| {
            f.destroyed = true;
            f.visible = false;
        });
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        self.probe.state.lock().pending.drain(..).collect()
    }

    fn poll_interval(&self) -> Option<Duration> {
        Some(HEADLESS_POLL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styling_primitives::Color;
    use crate::types::Point;

    fn spec(id: &str) -> FrameSpec {
        FrameSpec {
            window_id: id.into(),
            title: "Title".into(),
            bounds: Rect::new(50, 50, 300, 200),
            background: Color::BLACK,
            owner: None,
            synthetic: false,
        }
    }

    #[test]
    fn probe_tracks_frame_lifecycle() {
        // Arrange
        let mut host = HeadlessHost::new();
        let probe = host.probe();

        // Act
        let handle = host.create_frame(&spec("w")).expect("create");
        host.set_visible(handle, true);
        host.set_bounds(handle, Rect::new(0, 0, 100, 100));

        // Assert
        assert!(probe.is_visible("w"));
        assert_eq!(probe.bounds("w"), Some(Rect::new(0, 0, 100, 100)));
        host.destroy_frame(handle);
        assert!(!probe.is_visible("w"));
        assert_eq!(probe.live_frame_count(), 0);
        assert!(probe.frame("w").is_some_and(|f| f.destroyed));
    }

    #[test]
    fn failing_creates_surface_host_errors() {
        let mut host = HeadlessHost::new();
        host.probe().fail_creates(true);
        assert!(matches!(
            host.create_frame(&spec("w")),
            Err(OverlayError::Host(_))
        ));
    }

    #[test]
    fn injected_input_is_polled_once() {
        let mut host = HeadlessHost::new();
        let probe = host.probe();
        host.create_frame(&spec("w")).expect("create");
        assert!(probe.inject_pointer(
            "w",
            ChromeTarget::Header,
            PointerEvent::press(Point::new(1, 1), Point::new(51, 51))
        ));
        assert!(!probe.inject_activation("missing", "x", ComponentInput::Click));
        assert_eq!(host.poll_events().len(), 1);
        assert!(host.poll_events().is_empty());
    }
}
