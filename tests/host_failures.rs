/*
 * A frame host that fails while painting must not take the UI thread down
 * with it: state keeps updating and other windows keep presenting.
 */
use overlayui::scene::Scene;
use overlayui::{
    FrameHandle, FrameHost, FrameSpec, HeadlessHost, HeadlessProbe, LabelOptions,
    OverlayRuntime, PanelOptions, Properties, Rect, Result, RuntimeConfig, WindowConfig,
};
use pretty_assertions::assert_eq;

/// Panics whenever it is asked to paint a scene holding `poison`.
struct FragileHost {
    inner: HeadlessHost,
    poison: &'static str,
}

impl FrameHost for FragileHost {
    fn name(&self) -> &'static str {
        "fragile"
    }

    fn create_frame(&mut self, spec: &FrameSpec) -> Result<FrameHandle> {
        self.inner.create_frame(spec)
    }

    fn set_bounds(&mut self, frame: FrameHandle, bounds: Rect) {
        self.inner.set_bounds(frame, bounds);
    }

    fn set_visible(&mut self, frame: FrameHandle, visible: bool) {
        self.inner.set_visible(frame, visible);
    }

    fn set_title(&mut self, frame: FrameHandle, title: &str) {
        self.inner.set_title(frame, title);
    }

    fn present(&mut self, frame: FrameHandle, scene: &Scene) {
        if scene.contains(self.poison) {
            panic!("cannot paint {}", self.poison);
        }
        self.inner.present(frame, scene);
    }

    fn destroy_frame(&mut self, frame: FrameHandle) {
        self.inner.destroy_frame(frame);
    }
}

fn fragile_runtime(poison: &'static str) -> (OverlayRuntime, HeadlessProbe) {
    let probe = HeadlessProbe::default();
    let host_probe = probe.clone();
    let rt = OverlayRuntime::with_host_factory(
        RuntimeConfig::headless(),
        Box::new(move || {
            Ok(Box::new(FragileHost {
                inner: HeadlessHost::with_probe(host_probe),
                poison,
            }) as Box<dyn FrameHost>)
        }),
    )
    .expect("runtime");
    (rt, probe)
}

#[test]
fn a_panicking_present_leaves_the_ui_thread_serving() {
    // Arrange
    let (rt, probe) = fragile_runtime("bad-gauge");
    let broken = rt.create_window(WindowConfig::new("broken")).expect("window");
    broken.create_panel(PanelOptions::new("main")).expect("panel");
    broken
        .create_label(LabelOptions::new("bad-gauge", "main"))
        .expect("label");
    broken
        .create_label(LabelOptions::new("status", "main"))
        .expect("label");
    let healthy = rt.create_window(WindowConfig::new("healthy")).expect("window");
    healthy.create_panel(PanelOptions::new("side")).expect("panel");
    broken.show();
    healthy.show();
    assert!(rt.flush());

    // Act
    broken.update_component("status", Properties::new().text("still alive"));
    healthy
        .create_label(LabelOptions::new("hp", "side").text("100"))
        .expect("label");

    // Assert
    assert!(rt.flush());
    assert!(rt.is_running());
    let status = broken.component_state("status").expect("status");
    assert_eq!(status.text.as_deref(), Some("still alive"));
    let scene = probe.scene("healthy").expect("healthy scene");
    assert!(scene.contains("hp"));
}
