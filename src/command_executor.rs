/*
 * Executes window operations on the UI thread.
 *
 * Every caller-side operation (window lifecycle, builders, updates, input)
 * ends up as a queued task that calls one `execute_*` function here with the
 * `UiContext`. These functions are the only code that mutates `WindowData`
 * and talks to the frame host. A missing window or component id is a silent
 * no-op (logged at debug), since the caller may have disposed it after the
 * task was queued.
 */
use crate::callbacks::{Fired, Listener, isolate};
use crate::controls::panel_handler::ContainerRef;
use crate::controls::table_handler::TableModel;
use crate::controls::{ComponentKind, Highlight, Widget, WidgetKind};
use crate::host::{FrameSpec, HostEvent, HostEventKind};
use crate::options::{AddTab, PanelOptions};
use crate::styling_primitives::Color;
use crate::types::{ChromeTarget, ComponentInput, PointerEvent, PointerPhase, Properties, Rect, Region};
use crate::ui_thread::UiContext;
use crate::update_dispatcher::{CaretFollow, TableOp};
use crate::window_common::{WindowData, WindowInit, WindowRole};

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visibility {
    Show,
    Hide,
    Toggle,
}

/*
 * Resolves the owner of a modal dialog: the most recently shown window that
 * is visible right now. Returns its id and bounds if it has a frame.
 */
fn modal_owner_candidate(ctx: &UiContext, exclude: &str) -> Option<(String, Option<Rect>)> {
    ctx.windows
        .values()
        .filter(|w| w.visible && w.id != exclude)
        .max_by_key(|w| w.shown_seq)
        .map(|w| (w.id.clone(), w.frame.map(|_| w.bounds)))
}

fn centered_over(owner: Rect, size: (i32, i32)) -> Rect {
    Rect::new(
        owner.x + (owner.width - size.0) / 2,
        owner.y + (owner.height - size.1) / 2,
        size.0,
        size.1,
    )
}

fn release_window(ctx: &mut UiContext, window: WindowData) {
    if let Some(frame) = window.frame {
        ctx.host.destroy_frame(frame);
    }
    if let WindowRole::Dialog {
        synthetic_owner: Some(owner),
        ..
    } = window.role
    {
        ctx.host.destroy_frame(owner);
    }
    let timers = ctx.timers.remove_window(&window.id);
    log::debug!(
        "CommandExecutor: released '{}' ({} timer(s) dropped)",
        window.id,
        timers
    );
}

/*
 * Creates the retained state and the native frame of a window or dialog. A
 * frame the host fails to create is logged; the window keeps working without
 * one (builders and updates still apply, nothing is shown).
 */
pub(crate) fn execute_create_window(ctx: &mut UiContext, init: WindowInit) {
    let id = init.id.clone();
    if let Some(stale) = ctx.windows.remove(&id) {
        log::warn!("CommandExecutor: '{id}' still had UI state; releasing it first");
        release_window(ctx, stale);
    }

    let mut window = WindowData::new(init);
    let mut owner_frame = None;
    if window.is_modal_dialog() {
        match modal_owner_candidate(ctx, &id) {
            Some((owner_id, owner_bounds)) => {
                log::debug!("CommandExecutor: modal dialog '{id}' is owned by '{owner_id}'");
                owner_frame = ctx.windows.get(&owner_id).and_then(|w| w.frame);
                if let Some(bounds) = owner_bounds {
                    window.bounds = centered_over(bounds, (window.bounds.width, window.bounds.height));
                }
                if let WindowRole::Dialog { owner, .. } = &mut window.role {
                    *owner = Some(owner_id);
                }
            }
            None => {
                let spec = FrameSpec {
                    window_id: id.clone(),
                    title: String::new(),
                    bounds: Rect::new(window.bounds.x, window.bounds.y, 0, 0),
                    background: Color::TRANSPARENT,
                    owner: None,
                    synthetic: true,
                };
                match ctx.host.create_frame(&spec) {
                    Ok(frame) => {
                        log::debug!(
                            "CommandExecutor: no visible window; '{id}' gets synthetic owner {frame}"
                        );
                        owner_frame = Some(frame);
                        if let WindowRole::Dialog {
                            synthetic_owner, ..
                        } = &mut window.role
                        {
                            *synthetic_owner = Some(frame);
                        }
                    }
                    Err(err) => log::warn!(
                        "CommandExecutor: synthetic owner for '{id}' failed: {err}"
                    ),
                }
            }
        }
    }

    let spec = FrameSpec {
        window_id: id.clone(),
        title: window.title.clone(),
        bounds: window.bounds,
        background: window.scheme.background,
        owner: owner_frame,
        synthetic: false,
    };
    match ctx.host.create_frame(&spec) {
        Ok(frame) => {
            log::debug!("CommandExecutor: '{id}' created as {frame} on '{}' host", ctx.host.name());
            window.frame = Some(frame);
        }
        Err(err) => log::error!(
            "CommandExecutor: native frame for '{id}' failed: {err}; window kept without a frame"
        ),
    }
    ctx.windows.insert(id, window);
}

pub(crate) fn execute_set_visibility(ctx: &mut UiContext, window_id: &str, change: Visibility) {
    let show_seq = ctx.next_show_seq();
    let Some(window) = ctx.windows.get_mut(window_id) else {
        log::debug!("CommandExecutor: {change:?} on unknown window '{window_id}'");
        return;
    };
    let visible = match change {
        Visibility::Show => true,
        Visibility::Hide => false,
        Visibility::Toggle => !window.visible,
    };
    if visible {
        window.shown_seq = show_seq;
    }
    window.visible = visible;
    window.dirty = true;
    if let Some(frame) = window.frame {
        ctx.host.set_visible(frame, visible);
    }
    log::trace!("CommandExecutor: '{window_id}' visible = {visible}");
}

pub(crate) fn execute_set_title(ctx: &mut UiContext, window_id: &str, title: String) {
    let Some(window) = ctx.windows.get_mut(window_id) else {
        log::debug!("CommandExecutor: set_title on unknown window '{window_id}'");
        return;
    };
    if let Some(frame) = window.frame {
        ctx.host.set_title(frame, &title);
    }
    window.title = title;
    window.dirty = true;
}

pub(crate) fn execute_dispose(ctx: &mut UiContext, window_id: &str) {
    match ctx.windows.remove(window_id) {
        Some(window) => release_window(ctx, window),
        None => log::debug!("CommandExecutor: '{window_id}' already disposed"),
    }
}

pub(crate) fn execute_create_panel(ctx: &mut UiContext, window_id: &str, opts: PanelOptions) {
    ctx.with_window(window_id, |window| {
        window.register_panel(opts, None);
    });
}

/*
 * Registers the tab's content panel, then appends the tab. Adding to an id
 * that is not a tabbed pane is ignored.
 */
pub(crate) fn execute_add_tab(ctx: &mut UiContext, window_id: &str, pane_id: &str, tab: AddTab) {
    ctx.with_window(window_id, |window| {
        if !matches!(
            window.widgets.get(pane_id).map(|w| &w.kind),
            Some(WidgetKind::TabbedPane(_))
        ) {
            log::debug!("CommandExecutor: '{pane_id}' is not a tabbed pane in '{window_id}'");
            return;
        }
        let panel_id = tab.panel.id.clone();
        window.register_panel(
            tab.panel,
            Some(ContainerRef::Tab {
                pane: pane_id.to_string(),
            }),
        );
        if let Some(WidgetKind::TabbedPane(tabs)) =
            window.widgets.get_mut(pane_id).map(|w| &mut w.kind)
        {
            let index = tabs.add(tab.title, panel_id);
            if tab.select {
                tabs.select(index);
            }
        }
        window.dirty = true;
    });
}

pub(crate) fn execute_create_component(
    ctx: &mut UiContext,
    window_id: &str,
    widget: Widget,
    region: Region,
    table: Option<TableModel>,
) {
    ctx.with_window(window_id, |window| {
        log::trace!(
            "CommandExecutor: creating {} '{}' in '{window_id}'",
            widget.component_kind().name(),
            widget.id
        );
        window.register_widget(widget, region, table);
    });
}

pub(crate) fn execute_set_listener(
    ctx: &mut UiContext,
    window_id: &str,
    component_id: &str,
    listener: Listener,
) {
    ctx.with_window(window_id, |window| match window.widgets.get_mut(component_id) {
        Some(widget) => widget.listener = Some(listener),
        None => log::debug!("CommandExecutor: no component '{component_id}' for listener"),
    });
}

fn with_widget(
    ctx: &mut UiContext,
    window_id: &str,
    component_id: &str,
    f: impl FnOnce(&mut Widget) -> bool,
) {
    ctx.with_window(window_id, |window| match window.widgets.get_mut(component_id) {
        Some(widget) => {
            if f(widget) {
                window.dirty = true;
            }
        }
        None => log::debug!("CommandExecutor: component '{component_id}' not found in '{window_id}'"),
    });
}

pub(crate) fn execute_update_component(
    ctx: &mut UiContext,
    window_id: &str,
    component_id: &str,
    props: Properties,
) {
    with_widget(ctx, window_id, component_id, |widget| {
        let applied = widget.apply_properties(&props);
        log::trace!("CommandExecutor: '{component_id}' applied {applied:?}");
        !applied.is_empty()
    });
}

/*
 * Swaps the background for `duration`. The restore color is captured by the
 * first of overlapping highlights; each new highlight takes over the
 * reversion so only the last one's timer restores.
 */
pub(crate) fn execute_highlight(
    ctx: &mut UiContext,
    window_id: &str,
    component_id: &str,
    color: Color,
    duration: Duration,
) {
    let Some(due) = Instant::now().checked_add(duration) else {
        log::warn!(
            "CommandExecutor: highlight of '{component_id}' ignored; {duration:?} is out of range"
        );
        return;
    };
    let generation = ctx.next_highlight_generation();
    let mut applied = false;
    with_widget(ctx, window_id, component_id, |widget| {
        let restore = match widget.highlight {
            Some(active) => active.restore,
            None => widget.common.background,
        };
        widget.highlight = Some(Highlight { restore, generation });
        widget.common.background = Some(color);
        applied = true;
        true
    });
    if !applied {
        return;
    }

    let window_id = window_id.to_string();
    let component_id = component_id.to_string();
    ctx.timers.schedule_once(
        due,
        "highlight reversion",
        Box::new(move |ctx: &mut UiContext| {
            with_widget(ctx, &window_id, &component_id, |widget| {
                match widget.highlight {
                    Some(active) if active.generation == generation => {
                        widget.highlight = None;
                        widget.common.background = active.restore;
                        true
                    }
                    _ => false,
                }
            });
        }),
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PanelChange {
    Background(Color),
    Title(String),
    Visible(bool),
    ShowCard(String),
}

pub(crate) fn execute_panel_change(
    ctx: &mut UiContext,
    window_id: &str,
    panel_id: &str,
    change: PanelChange,
) {
    ctx.with_window(window_id, |window| {
        let Some(panel) = window.panels.get_mut(panel_id) else {
            log::debug!("CommandExecutor: panel '{panel_id}' not found in '{window_id}'");
            return;
        };
        let changed = match change {
            PanelChange::Background(color) => {
                panel.background = color;
                true
            }
            PanelChange::Title(title) => panel.set_title(&title),
            PanelChange::Visible(visible) => {
                panel.visible = visible;
                true
            }
            PanelChange::ShowCard(child) => panel.show_card(&child),
        };
        if changed {
            window.dirty = true;
        }
    });
}

pub(crate) fn execute_table(ctx: &mut UiContext, window_id: &str, table_id: &str, op: TableOp) {
    ctx.with_window(window_id, |window| {
        let Some(model) = window.tables.get_mut(table_id) else {
            log::debug!("CommandExecutor: table '{table_id}' not found in '{window_id}'");
            return;
        };
        let changed = match op {
            TableOp::SetRows(rows) => {
                model.set_rows(rows);
                true
            }
            TableOp::SetCell { row, column, value } => model.set_cell(row, column, &value),
            TableOp::AppendRow(row) => {
                model.append_row(row);
                true
            }
            TableOp::Clear => {
                model.clear();
                true
            }
        };
        if changed {
            window.dirty = true;
        }
    });
}

pub(crate) fn execute_append_text(
    ctx: &mut UiContext,
    window_id: &str,
    area_id: &str,
    text: String,
    follow: CaretFollow,
) {
    ctx.with_window(window_id, |window| {
        let follow = match &follow {
            CaretFollow::Always => true,
            CaretFollow::Never => false,
            CaretFollow::WhenChecked(checkbox) => window
                .widgets
                .get(checkbox)
                .and_then(|w| w.kind.selected())
                .unwrap_or(false),
        };
        match window.widgets.get_mut(area_id).map(|w| &mut w.kind) {
            Some(WidgetKind::TextArea(area)) => {
                area.append(&text, follow);
                window.dirty = true;
            }
            Some(_) => log::debug!("CommandExecutor: '{area_id}' is not a text area"),
            None => log::debug!("CommandExecutor: text area '{area_id}' not found in '{window_id}'"),
        }
    });
}

/// Routes native input from the host to the window that owns the frame.
pub(crate) fn route_host_event(ctx: &mut UiContext, event: HostEvent) {
    let Some(window_id) = ctx.window_for_frame(event.frame) else {
        log::trace!("CommandExecutor: input for unknown {} dropped", event.frame);
        return;
    };
    match event.kind {
        HostEventKind::Pointer { target, event } => execute_pointer(ctx, &window_id, target, event),
        HostEventKind::Activate {
            component_id,
            input,
        } => execute_activate(ctx, &window_id, &component_id, input),
    }
}

fn blocked_by_modal(ctx: &UiContext, window_id: &str) -> bool {
    match ctx.blocking_modal(window_id) {
        Some(dialog) => {
            log::debug!("CommandExecutor: '{window_id}' is blocked by modal dialog '{dialog}'");
            true
        }
        None => false,
    }
}

/*
 * Window chrome input: header drag, corner resize and the close affordance.
 * Close hides the window and then runs its close callback.
 */
pub(crate) fn execute_pointer(
    ctx: &mut UiContext,
    window_id: &str,
    target: ChromeTarget,
    event: PointerEvent,
) {
    if blocked_by_modal(ctx, window_id) {
        return;
    }
    let Some(window) = ctx.windows.get_mut(window_id) else {
        log::debug!("CommandExecutor: pointer input for unknown window '{window_id}'");
        return;
    };
    let mut moved = false;
    match (target, event.phase) {
        (ChromeTarget::Header, PointerPhase::Press) if window.chrome.draggable => {
            window.drag.press(event.local);
        }
        (ChromeTarget::Header, PointerPhase::Drag) => {
            if let Some(origin) = window.drag.drag(event.local, window.bounds.origin()) {
                window.bounds.x = origin.x;
                window.bounds.y = origin.y;
                moved = true;
            }
        }
        (ChromeTarget::ResizeCorner, PointerPhase::Press) if window.chrome.resizable => {
            window.resize.press(event.screen);
        }
        (ChromeTarget::ResizeCorner, PointerPhase::Drag) => {
            if let Some(size) = window.resize.drag(event.screen, window.bounds.size()) {
                window.bounds.width = size.width;
                window.bounds.height = size.height;
                window.dirty = true;
                moved = true;
            }
        }
        (ChromeTarget::CloseButton, PointerPhase::Release) if window.chrome.closable => {
            log::debug!("CommandExecutor: close requested for '{window_id}'");
            window.visible = false;
            if let Some(frame) = window.frame {
                ctx.host.set_visible(frame, false);
            }
            if let Some(on_close) = window.on_close.as_mut() {
                isolate("window close handler", window_id, || on_close());
            }
        }
        (_, PointerPhase::Release) => {
            window.drag.release();
            window.resize.release();
        }
        (target, phase) => {
            log::trace!("CommandExecutor: {target:?} {phase:?} ignored on '{window_id}'");
        }
    }
    if moved {
        if let Some(frame) = window.frame {
            ctx.host.set_bounds(frame, window.bounds);
        }
    }
}

/*
 * Component input. User edits to a table cell go through the model (which
 * rejects them on read-only tables); every other input goes through the
 * widget. Listeners fire only for state changes the input actually caused.
 */
pub(crate) fn execute_activate(
    ctx: &mut UiContext,
    window_id: &str,
    component_id: &str,
    input: ComponentInput,
) {
    if blocked_by_modal(ctx, window_id) {
        return;
    }
    ctx.with_window(window_id, |window| {
        let Some(widget) = window.widgets.get_mut(component_id) else {
            log::debug!("CommandExecutor: input for unknown component '{component_id}'");
            return;
        };
        let fired = match &input {
            ComponentInput::EditCell { row, column, value }
                if widget.component_kind() == ComponentKind::Table =>
            {
                let edited = widget.common.enabled
                    && window
                        .tables
                        .get_mut(component_id)
                        .is_some_and(|model| model.edit_cell(*row, *column, value));
                edited.then(|| Fired::CellEdited(*row, *column, value.clone()))
            }
            _ => widget.apply_input(&input),
        };
        if let Some(fired) = fired {
            window.dirty = true;
            widget.fire(&fired);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::button_handler::ButtonState;
    use crate::controls::checkbox_handler::CheckBoxState;
    use crate::controls::table_handler::TableState;
    use crate::controls::text_handler::TextAreaState;
    use crate::headless::{HeadlessHost, HeadlessProbe};
    use crate::styling_primitives::ColorScheme;
    use crate::types::Point;
    use crate::window_common::ChromeFlags;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn context() -> (UiContext, HeadlessProbe) {
        let host = HeadlessHost::new();
        let probe = host.probe();
        (UiContext::detached(Box::new(host)), probe)
    }

    fn init(id: &str, role: WindowRole) -> WindowInit {
        WindowInit {
            id: id.into(),
            title: id.into(),
            scheme: ColorScheme::dark(),
            bounds: Rect::new(50, 50, 300, 200),
            chrome: ChromeFlags {
                closable: true,
                resizable: true,
                draggable: true,
            },
            role,
            on_close: None,
        }
    }

    fn modal() -> WindowRole {
        WindowRole::Dialog {
            modal: true,
            owner: None,
            synthetic_owner: None,
        }
    }

    fn add_button(ctx: &mut UiContext, window: &str, id: &str, hits: &Arc<AtomicUsize>) {
        execute_create_panel(ctx, window, PanelOptions::new("p"));
        let mut widget = Widget::new(
            id.into(),
            Some("p".into()),
            Color::WHITE,
            WidgetKind::Button(ButtonState::new("Go")),
        );
        let counter = Arc::clone(hits);
        widget.listener = Some(Listener::on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        execute_create_component(ctx, window, widget, Region::Center, None);
    }

    #[test]
    fn header_drag_moves_the_frame_by_the_anchor_offset() {
        // Arrange
        let (mut ctx, probe) = context();
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));

        // Act
        let screen = Point::new(0, 0);
        execute_pointer(&mut ctx, "w", ChromeTarget::Header, PointerEvent::press(Point::new(10, 5), screen));
        execute_pointer(&mut ctx, "w", ChromeTarget::Header, PointerEvent::drag(Point::new(40, 25), screen));

        // Assert
        assert_eq!(probe.bounds("w"), Some(Rect::new(80, 70, 300, 200)));
    }

    #[test]
    fn resize_never_shrinks_below_the_minimum() {
        let (mut ctx, probe) = context();
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        let local = Point::new(0, 0);
        execute_pointer(&mut ctx, "w", ChromeTarget::ResizeCorner, PointerEvent::press(local, Point::new(500, 500)));
        execute_pointer(&mut ctx, "w", ChromeTarget::ResizeCorner, PointerEvent::drag(local, Point::new(510, 480)));
        assert_eq!(probe.bounds("w"), Some(Rect::new(50, 50, 310, 180)));
        execute_pointer(&mut ctx, "w", ChromeTarget::ResizeCorner, PointerEvent::drag(local, Point::new(0, 0)));
        assert_eq!(probe.bounds("w"), Some(Rect::new(50, 50, 100, 100)));
    }

    #[test]
    fn close_affordance_hides_and_calls_on_close() {
        let (mut ctx, probe) = context();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut config = init("w", WindowRole::Overlay);
        config.on_close = Some(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        execute_create_window(&mut ctx, config);
        execute_set_visibility(&mut ctx, "w", Visibility::Show);

        let at = Point::new(1, 1);
        execute_pointer(&mut ctx, "w", ChromeTarget::CloseButton, PointerEvent::release(at, at));

        assert!(!probe.is_visible("w"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(ctx.windows.contains_key("w"));
    }

    #[test]
    fn modal_dialog_picks_the_most_recently_shown_visible_window() {
        let (mut ctx, probe) = context();
        execute_create_window(&mut ctx, init("a", WindowRole::Overlay));
        execute_create_window(&mut ctx, init("b", WindowRole::Overlay));
        execute_set_visibility(&mut ctx, "b", Visibility::Show);
        execute_set_visibility(&mut ctx, "a", Visibility::Show);

        let mut dialog = init("d", modal());
        dialog.bounds = Rect::new(0, 0, 100, 100);
        execute_create_window(&mut ctx, dialog);

        assert_eq!(ctx.windows.get("d").and_then(|d| d.modal_owner()), Some("a"));
        assert_eq!(probe.bounds("d"), Some(Rect::new(150, 100, 100, 100)));
    }

    #[test]
    fn modal_dialog_without_visible_windows_gets_a_synthetic_owner() {
        let (mut ctx, probe) = context();
        execute_create_window(&mut ctx, init("d", modal()));
        assert_eq!(probe.live_frame_count(), 2);
        assert!(probe.frames().iter().any(|f| f.spec.synthetic));

        execute_dispose(&mut ctx, "d");
        assert_eq!(probe.live_frame_count(), 0);
    }

    #[test]
    fn visible_modal_dialog_blocks_owner_input() {
        let (mut ctx, _probe) = context();
        let hits = Arc::new(AtomicUsize::new(0));
        execute_create_window(&mut ctx, init("main", WindowRole::Overlay));
        execute_set_visibility(&mut ctx, "main", Visibility::Show);
        add_button(&mut ctx, "main", "go", &hits);
        execute_create_window(&mut ctx, init("d", modal()));

        execute_activate(&mut ctx, "main", "go", ComponentInput::Click);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        execute_set_visibility(&mut ctx, "d", Visibility::Show);
        execute_activate(&mut ctx, "main", "go", ComponentInput::Click);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        execute_set_visibility(&mut ctx, "d", Visibility::Hide);
        execute_activate(&mut ctx, "main", "go", ComponentInput::Click);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn highlight_reverts_to_the_first_captured_background() {
        let (mut ctx, _probe) = context();
        let hits = Arc::new(AtomicUsize::new(0));
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        add_button(&mut ctx, "w", "b", &hits);
        let original = Color::rgb(1, 2, 3);
        execute_update_component(&mut ctx, "w", "b", Properties::new().background(original));

        execute_highlight(&mut ctx, "w", "b", Color::rgb(9, 9, 9), Duration::ZERO);
        execute_highlight(&mut ctx, "w", "b", Color::rgb(8, 8, 8), Duration::ZERO);
        crate::timer_manager::fire_due(&mut ctx, Instant::now() + Duration::from_millis(1));

        let state = ctx.windows.get("w").and_then(|w| w.component_state("b"));
        assert_eq!(state.as_ref().and_then(|s| s.background), Some(original));
        assert_eq!(state.map(|s| s.highlighted), Some(false));
    }

    #[test]
    fn unbounded_highlight_leaves_the_background_alone() {
        let (mut ctx, _probe) = context();
        let hits = Arc::new(AtomicUsize::new(0));
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        add_button(&mut ctx, "w", "b", &hits);
        let original = Color::rgb(1, 2, 3);
        execute_update_component(&mut ctx, "w", "b", Properties::new().background(original));

        execute_highlight(&mut ctx, "w", "b", Color::rgb(9, 9, 9), Duration::MAX);

        let state = ctx.windows.get("w").and_then(|w| w.component_state("b"));
        assert_eq!(state.as_ref().and_then(|s| s.background), Some(original));
        assert_eq!(state.map(|s| s.highlighted), Some(false));
        assert_eq!(ctx.timers.next_due(), None);
    }

    #[test]
    fn read_only_table_rejects_cell_edits_without_firing() {
        let (mut ctx, _probe) = context();
        let hits = Arc::new(AtomicUsize::new(0));
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        execute_create_panel(&mut ctx, "w", PanelOptions::new("p"));
        let mut table = Widget::new(
            "t".into(),
            Some("p".into()),
            Color::WHITE,
            WidgetKind::Table(TableState::default()),
        );
        let counter = Arc::clone(&hits);
        table.listener = Some(Listener::on_cell(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let model = TableModel::new(vec!["A".into()], vec![vec!["x".into()]], false);
        execute_create_component(&mut ctx, "w", table, Region::Center, Some(model));

        let edit = ComponentInput::EditCell {
            row: 0,
            column: 0,
            value: "y".into(),
        };
        execute_activate(&mut ctx, "w", "t", edit);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        let cell = ctx
            .windows
            .get("w")
            .and_then(|w| w.tables.get("t"))
            .and_then(|m| m.cell(0, 0).map(str::to_string));
        assert_eq!(cell.as_deref(), Some("x"));
    }

    #[test]
    fn append_text_follows_the_checkbox_state() {
        let (mut ctx, _probe) = context();
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        execute_create_panel(&mut ctx, "w", PanelOptions::new("p").layout(crate::types::Layout::flow()));
        let area = Widget::new(
            "log".into(),
            Some("p".into()),
            Color::WHITE,
            WidgetKind::TextArea(TextAreaState::new("", 2, 20, false, true)),
        );
        let follow = Widget::new(
            "follow".into(),
            Some("p".into()),
            Color::WHITE,
            WidgetKind::CheckBox(CheckBoxState::new("Auto", false)),
        );
        execute_create_component(&mut ctx, "w", area, Region::Center, None);
        execute_create_component(&mut ctx, "w", follow, Region::Center, None);

        let checked = CaretFollow::WhenChecked("follow".into());
        execute_append_text(&mut ctx, "w", "log", "one\n".into(), checked.clone());

        let caret = |ctx: &UiContext| match ctx.windows.get("w").and_then(|w| w.widgets.get("log")).map(|w| &w.kind) {
            Some(WidgetKind::TextArea(area)) => area.caret,
            _ => usize::MAX,
        };
        assert_eq!(caret(&ctx), 0);
        execute_update_component(&mut ctx, "w", "follow", Properties::new().selected(true));
        execute_append_text(&mut ctx, "w", "log", "two\n".into(), checked);
        assert_eq!(caret(&ctx), 8);
    }

    #[test]
    fn operations_on_missing_ids_are_no_ops() {
        let (mut ctx, probe) = context();
        execute_update_component(&mut ctx, "ghost", "x", Properties::new().text("t"));
        execute_set_visibility(&mut ctx, "ghost", Visibility::Show);
        execute_dispose(&mut ctx, "ghost");
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        execute_update_component(&mut ctx, "w", "missing", Properties::new().text("t"));
        execute_panel_change(&mut ctx, "w", "missing", PanelChange::Visible(false));
        assert_eq!(probe.live_frame_count(), 1);
    }

    #[test]
    fn failed_frame_creation_keeps_the_window_state() {
        let (mut ctx, probe) = context();
        probe.fail_creates(true);
        execute_create_window(&mut ctx, init("w", WindowRole::Overlay));
        execute_create_panel(&mut ctx, "w", PanelOptions::new("p"));
        let window = ctx.windows.get("w");
        assert!(window.is_some_and(|w| w.frame.is_none() && w.panels.contains_key("p")));
    }
}
