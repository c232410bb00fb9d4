/*
 * The seam between the retained widget model and a native windowing system.
 *
 * A host lives on the UI thread and is only ever called from there, so it
 * need not be `Send`. It creates one native frame per window, mirrors bounds,
 * visibility and title changes, paints presented scenes, and reports native
 * input back as `HostEvent`s which the UI thread routes into the owning
 * window exactly like injected input.
 */
use crate::error::Result;
use crate::scene::Scene;
use crate::styling_primitives::Color;
use crate::types::{ChromeTarget, ComponentInput, PointerEvent, Rect};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Everything a host needs to create a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    pub window_id: String,
    pub title: String,
    pub bounds: Rect,
    pub background: Color,
    /// Owner frame for dialogs; owned frames stay above their owner.
    pub owner: Option<FrameHandle>,
    /// Invisible frames that exist only to own modal dialogs.
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEventKind {
    Pointer {
        target: ChromeTarget,
        event: PointerEvent,
    },
    Activate {
        component_id: String,
        input: ComponentInput,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    pub frame: FrameHandle,
    pub kind: HostEventKind,
}

pub trait FrameHost {
    fn name(&self) -> &'static str;

    fn create_frame(&mut self, spec: &FrameSpec) -> Result<FrameHandle>;

    fn set_bounds(&mut self, frame: FrameHandle, bounds: Rect);

    fn set_visible(&mut self, frame: FrameHandle, visible: bool);

    fn set_title(&mut self, frame: FrameHandle, title: &str);

    /// Replaces what the frame shows with `scene`.
    fn present(&mut self, frame: FrameHandle, scene: &Scene);

    fn destroy_frame(&mut self, frame: FrameHandle);

    /// Native input gathered since the last call.
    fn poll_events(&mut self) -> Vec<HostEvent> {
        Vec::new()
    }

    /// How often the UI loop must call `poll_events` while otherwise idle.
    fn poll_interval(&self) -> Option<Duration> {
        None
    }
}

/// Builds the host on the UI thread, where it will live.
pub type HostFactory = Box<dyn FnOnce() -> Result<Box<dyn FrameHost>> + Send>;
