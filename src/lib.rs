/*
 * Declarative always-on-top overlay windows for live telemetry display.
 *
 * Callers on any thread declare windows, panels and components by id and
 * later update them by id; every mutation is marshalled onto one UI-owning
 * thread that keeps a retained widget model and hands each window's scene to
 * a frame host. The headless host works everywhere; on Windows the native
 * host paints borderless layered popups with GDI.
 *
 * The free functions below operate on the lazily started process-wide
 * runtime. Embedders and tests that want their own thread and host create an
 * `OverlayRuntime` directly.
 */
pub(crate) mod arrange;
pub(crate) mod callbacks;
pub(crate) mod chrome;
pub(crate) mod command_executor;
pub(crate) mod component_factory;
pub(crate) mod controls;
pub(crate) mod dialog_factory;
pub mod error;
pub mod headless;
pub mod host;
pub mod layout_file;
pub mod options;
pub(crate) mod panel_builder;
pub mod presets;
pub mod runtime;
pub mod scene;
pub(crate) mod styling_primitives;
pub(crate) mod timer_manager;
pub mod types;
pub(crate) mod ui_thread;
pub(crate) mod update_dispatcher;
#[cfg(target_os = "windows")]
pub(crate) mod win32_host;
pub(crate) mod window_common;
pub(crate) mod window_factory;
pub(crate) mod window_registry;

pub use arrange::{Placed, PlacedKind, arrange, component_at};
pub use callbacks::Listener;
pub use chrome::{ChromeLayout, MIN_FRAME_EXTENT};
pub use component_factory::ComponentHandle;
pub use controls::ComponentKind;
pub use controls::table_handler::TableModel;
pub use dialog_factory::Dialog;
pub use error::{OverlayError, Result};
pub use headless::{HeadlessFrame, HeadlessHost, HeadlessProbe};
pub use host::{FrameHandle, FrameHost, FrameSpec, HostEvent, HostEventKind, HostFactory};
pub use layout_file::LayoutDocument;
pub use options::{
    AddTab, ButtonOptions, CheckBoxOptions, ComboBoxOptions, ComponentOptions, DialogConfig,
    HostChoice, LabelOptions, PanelOptions, ProgressBarOptions, RuntimeConfig, SeparatorOptions,
    SliderOptions, TabbedPaneOptions, TableOptions, TextAreaOptions, TextFieldOptions,
    TimerOptions, WindowConfig,
};
pub use panel_builder::PanelHandle;
pub use presets::{
    DATA_WINDOW_ID, DEBUG_WINDOW_ID, DataColumn, DataRow, DataWindow, DataWindowOptions,
    DebugWindow, DebugWindowOptions,
};
pub use runtime::OverlayRuntime;
pub use styling_primitives::{Color, ColorScheme, FontDescription, FontStyle, ParseColorError};
pub use timer_manager::TimerHandle;
pub use types::{
    Alignment, ChromeTarget, ComponentInput, Layout, Point, PointerEvent, PointerPhase,
    Properties, Property, Rect, Region, Size,
};
pub use update_dispatcher::{CaretFollow, ComponentState, PanelState};
pub use window_factory::Window;
pub use window_registry::WindowRegistry;

/// Creates a window on the global runtime, or returns the one already registered under its id.
pub fn create_window(config: WindowConfig) -> Result<Window> {
    OverlayRuntime::global()?.create_window(config)
}

pub fn create_dialog(config: DialogConfig) -> Result<Dialog> {
    OverlayRuntime::global()?.create_dialog(config)
}

/// Looks up a window without starting the global runtime.
pub fn get_window(id: &str) -> Option<Window> {
    OverlayRuntime::global_if_started()?.get_window(id)
}

/// Disposes every window of the global runtime; a no-op if it never started.
pub fn close_all() {
    if let Some(runtime) = OverlayRuntime::global_if_started() {
        runtime.close_all();
    }
}

pub fn create_debug_window(opts: DebugWindowOptions) -> Result<DebugWindow> {
    OverlayRuntime::global()?.create_debug_window(opts)
}

pub fn create_data_window(opts: DataWindowOptions) -> Result<DataWindow> {
    OverlayRuntime::global()?.create_data_window(opts)
}
