/*
 * End-to-end behavior of overlay windows against the headless host: every
 * call goes through the public API, the UI thread and the frame host.
 */
use overlayui::{
    AddTab, ButtonOptions, ChromeTarget, Color, ComponentInput, DialogConfig, LabelOptions,
    Layout, OverlayRuntime, PanelOptions, Point, PointerEvent, ProgressBarOptions, Properties,
    TabbedPaneOptions, TableOptions, TimerOptions, WindowConfig,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

fn runtime() -> OverlayRuntime {
    OverlayRuntime::headless().expect("headless runtime")
}

#[test]
fn creating_the_same_id_twice_returns_the_first_window() {
    // Arrange
    let rt = runtime();

    // Act
    let first = rt
        .create_window(WindowConfig::new("stats").title("Stats").size(320, 240))
        .expect("first");
    let second = rt
        .create_window(WindowConfig::new("stats").title("Other").size(10, 10))
        .expect("second");
    first.show();

    // Assert
    assert!(rt.flush());
    assert_eq!(first, second);
    let probe = rt.probe().expect("probe");
    let frame = probe.frame("stats").expect("frame");
    assert_eq!(frame.title, "Stats");
    assert_eq!((frame.bounds.width, frame.bounds.height), (320, 240));
    assert!(frame.visible);
}

#[test]
fn a_panicking_callback_leaves_the_ui_thread_serving() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window.create_panel(PanelOptions::new("main")).expect("panel");
    window
        .create_button(ButtonOptions::new("boom", "main").on_click(|| panic!("listener bug")))
        .expect("button");
    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&clicks);
    window
        .create_button(ButtonOptions::new("ok", "main").on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .expect("button");
    window
        .create_label(LabelOptions::new("status", "main"))
        .expect("label");

    // Act
    window.activate("boom", ComponentInput::Click);
    window.activate("ok", ComponentInput::Click);
    window.update_component("status", Properties::new().text("still alive"));

    // Assert
    assert!(rt.flush());
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    let status = window.component_state("status").expect("status");
    assert_eq!(status.text.as_deref(), Some("still alive"));
}

#[test]
fn highlight_reverts_to_the_original_background() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window.create_panel(PanelOptions::new("main")).expect("panel");
    let label = window
        .create_label(LabelOptions::new("hp", "main").text("100"))
        .expect("label");
    let red = Color::rgb(200, 0, 0);

    // Act
    label.highlight(Some(red), Some(Duration::from_millis(400)));
    assert!(rt.flush());
    let during = label.state().expect("state");
    thread::sleep(Duration::from_millis(700));
    assert!(rt.flush());
    let after = label.state().expect("state");

    // Assert
    assert_eq!(during.background, Some(red));
    assert!(during.highlighted);
    assert_eq!(after.background, None);
    assert!(!after.highlighted);
}

#[test]
fn modal_dialogs_are_owned_by_the_most_recently_shown_window() {
    // Arrange
    let rt = runtime();
    let older = rt
        .create_window(WindowConfig::new("older").position(0, 0))
        .expect("older");
    let newer = rt
        .create_window(WindowConfig::new("newer").position(100, 100).size(400, 300))
        .expect("newer");
    older.show();
    newer.show();
    assert!(rt.flush());

    // Act
    let dialog = rt
        .create_dialog(DialogConfig::new("confirm").modal(true).size(200, 100))
        .expect("dialog");
    dialog.show();
    assert!(rt.flush());

    // Assert
    let probe = rt.probe().expect("probe");
    let owner = probe.frame("newer").expect("owner frame").handle;
    let frame = probe.frame("confirm").expect("dialog frame");
    assert_eq!(frame.spec.owner, Some(owner));
    assert_eq!((frame.bounds.x, frame.bounds.y), (200, 200));
    assert!(dialog.is_dialog());
}

#[test]
fn add_tab_with_select_switches_the_visible_tab() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window
        .create_panel(PanelOptions::new("main").layout(Layout::border()))
        .expect("panel");
    window
        .create_tabbed_pane(TabbedPaneOptions::new("tabs", "main"))
        .expect("tabs");

    // Act
    window
        .add_tab("tabs", AddTab::new("Stats", PanelOptions::new("stats-tab")))
        .expect("first tab");
    window
        .add_tab(
            "tabs",
            AddTab::new("Loot", PanelOptions::new("loot-tab")).select(true),
        )
        .expect("second tab");
    window
        .create_label(LabelOptions::new("loot-count", "loot-tab").text("3"))
        .expect("label");

    // Assert
    assert!(rt.flush());
    let tabs = window.component_state("tabs").expect("tabs");
    assert_eq!(tabs.value, Some(1));
    let scene = rt.probe().expect("probe").scene("w").expect("scene");
    assert!(scene.contains("loot-tab"));
    assert!(scene.contains("loot-count"));
    assert!(!scene.contains("stats-tab"));
}

#[test]
fn components_with_unknown_parents_are_hidden_but_updatable() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window.create_panel(PanelOptions::new("main")).expect("panel");

    // Act
    let orphan = window
        .create_label(LabelOptions::new("orphan", "nowhere").text("before"))
        .expect("orphan");
    orphan.set_text("after");

    // Assert
    assert!(rt.flush());
    let scene = rt.probe().expect("probe").scene("w").expect("scene");
    assert!(scene.contains("main"));
    assert!(!scene.contains("orphan"));
    let state = orphan.state().expect("state");
    assert_eq!(state.text.as_deref(), Some("after"));
    assert!(!state.attached);
}

#[test]
fn read_only_tables_reject_cell_edits() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window.create_panel(PanelOptions::new("main")).expect("panel");
    window
        .create_table(
            TableOptions::new("loot", "main")
                .columns(["Item", "Qty"])
                .rows(vec![vec!["Bones".to_string(), "1".to_string()]]),
        )
        .expect("table");

    // Act
    window.activate(
        "loot",
        ComponentInput::EditCell {
            row: 0,
            column: 1,
            value: "99".into(),
        },
    );
    window.append_table_row("loot", vec!["Coins".into(), "250".into()]);

    // Assert
    assert!(rt.flush());
    let table = window
        .component_state("loot")
        .and_then(|s| s.table)
        .expect("table model");
    assert_eq!(table.cell(0, 1), Some("1"));
    assert_eq!(table.row_count(), 2);
}

#[test]
fn disposing_a_window_stops_its_timers() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    let timer = window.create_timer(TimerOptions::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .interval_ms(10));
    thread::sleep(Duration::from_millis(80));

    // Act
    window.dispose();
    assert!(rt.flush());
    let at_dispose = ticks.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(80));

    // Assert
    assert!(at_dispose > 0);
    assert_eq!(ticks.load(Ordering::SeqCst), at_dispose);
    assert!(!timer.is_running());
    assert!(window.is_disposed());
    assert!(rt.get_window("w").is_none());
    assert_eq!(rt.probe().expect("probe").live_frame_count(), 0);
}

#[test]
fn timers_of_a_disposed_window_cannot_be_restarted() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    let timer = window.create_timer(
        TimerOptions::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .interval_ms(10)
        .auto_start(false),
    );
    window.dispose();
    assert!(rt.flush());

    // Act
    timer.start();
    thread::sleep(Duration::from_millis(60));

    // Assert
    assert!(rt.flush());
    assert!(!timer.is_running());
    assert!(timer.is_released());
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
    let late = window.create_timer(TimerOptions::new(|| {}).interval_ms(10));
    late.start();
    assert!(!late.is_running());
}

#[test]
fn updates_to_a_disposed_window_are_ignored() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window.create_panel(PanelOptions::new("main")).expect("panel");
    window
        .create_label(LabelOptions::new("status", "main").text("before"))
        .expect("label");
    window.dispose();

    // Act
    window.update_component("status", Properties::new().text("after"));
    window.highlight_component("status", None, None);

    // Assert
    assert!(rt.flush());
    assert_eq!(window.component_state("status"), None);
    assert!(rt.is_running());
}

#[test]
fn dragging_the_header_moves_the_frame_by_the_pointer_delta() {
    // Arrange
    let rt = runtime();
    let window = rt
        .create_window(WindowConfig::new("w").position(100, 100).size(300, 200))
        .expect("window");
    window.show();
    assert!(rt.flush());
    let screen = Point::new(110, 110);

    // Act
    window.dispatch_pointer(
        ChromeTarget::Header,
        PointerEvent::press(Point::new(10, 10), screen),
    );
    window.dispatch_pointer(
        ChromeTarget::Header,
        PointerEvent::drag(Point::new(15, 18), screen),
    );
    window.dispatch_pointer(
        ChromeTarget::Header,
        PointerEvent::release(Point::new(15, 18), screen),
    );

    // Assert
    assert!(rt.flush());
    let bounds = rt.probe().expect("probe").bounds("w").expect("bounds");
    assert_eq!((bounds.x, bounds.y), (105, 108));
    assert_eq!((bounds.width, bounds.height), (300, 200));
}

#[test]
fn a_full_width_progress_range_keeps_the_window_updating() {
    // Arrange
    let rt = runtime();
    let window = rt.create_window(WindowConfig::new("w")).expect("window");
    window.create_panel(PanelOptions::new("main")).expect("panel");
    window
        .create_progress_bar(
            ProgressBarOptions::new("xp", "main")
                .range(i32::MIN, i32::MAX)
                .value(0),
        )
        .expect("progress bar");
    window
        .create_label(LabelOptions::new("status", "main"))
        .expect("label");
    assert!(rt.flush());

    // Act
    window.update_component("xp", Properties::new().value(i32::MAX));
    window.update_component("status", Properties::new().text("maxed"));

    // Assert
    assert!(rt.flush());
    let bar = window.component_state("xp").expect("bar");
    assert_eq!(bar.value, Some(i32::MAX));
    let status = window.component_state("status").expect("status");
    assert_eq!(status.text.as_deref(), Some("maxed"));
}

#[test]
fn close_all_disposes_every_window() {
    // Arrange
    let rt = runtime();
    let windows: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|id| rt.create_window(WindowConfig::new(id)).expect("window"))
        .collect();

    // Act
    rt.close_all();

    // Assert
    assert!(rt.flush());
    assert!(windows.iter().all(|w| w.is_disposed()));
    assert!(rt.window_ids().is_empty());
    assert_eq!(rt.probe().expect("probe").live_frame_count(), 0);
}

#[test]
fn close_box_hides_the_window_and_notifies() {
    // Arrange
    let rt = runtime();
    let closed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&closed);
    let window = rt
        .create_window(WindowConfig::new("w").on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .expect("window");
    window.show();
    assert!(rt.flush());
    let probe = rt.probe().expect("probe");

    // Act
    let origin = overlayui::Point::new(0, 0);
    assert!(probe.inject_pointer(
        "w",
        overlayui::ChromeTarget::CloseButton,
        overlayui::PointerEvent::press(origin, origin),
    ));
    assert!(probe.inject_pointer(
        "w",
        overlayui::ChromeTarget::CloseButton,
        overlayui::PointerEvent::release(origin, origin),
    ));
    thread::sleep(Duration::from_millis(50));

    // Assert
    assert!(rt.flush());
    assert!(!probe.is_visible("w"));
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(!window.is_disposed());
}

#[test]
fn debug_window_log_lines_carry_level_and_status() {
    // Arrange
    let rt = runtime();
    let debug = rt
        .create_debug_window(Default::default())
        .expect("debug window");

    // Act
    debug
        .log("spawned", log::Level::Info)
        .log("low hp", log::Level::Warn);

    // Assert
    assert!(rt.flush());
    let area = debug.component_state("log-area").expect("log area");
    let text = area.text.expect("text");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[INFO] spawned"));
    assert!(lines[1].ends_with("[WARN] low hp"));
    let status = debug.component_state("status-label").expect("status");
    assert!(status.text.expect("status text").starts_with("Last entry: "));
    assert!(rt.probe().expect("probe").is_visible(overlayui::DEBUG_WINDOW_ID));
}
