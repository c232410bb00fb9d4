/*
 * Native frame host for Windows.
 *
 * Every overlay window becomes one borderless, always-on-top layered popup of
 * a private window class. The popup paints the presented scene itself with
 * GDI (header, close box, resize grip, panels and components, placed by
 * `arrange`), and turns raw mouse messages into `HostEvent`s: presses on the
 * chrome become pointer events, clicks on components become activations. The
 * UI loop picks those up through `poll_events`, which also pumps the thread's
 * message queue.
 *
 * Per-frame state lives in a boxed `FrameState` stored in GWLP_USERDATA and
 * freed on WM_NCDESTROY.
 */

use crate::arrange::{self, LINE_HEIGHT, Placed, PlacedKind, TAB_STRIP};
use crate::chrome::ChromeLayout;
use crate::controls::ComponentKind;
use crate::controls::progress_handler::RangeModel;
use crate::controls::styling_handler::{color_to_colorref, shade};
use crate::error::{OverlayError, Result};
use crate::host::{FrameHandle, FrameHost, FrameSpec, HostEvent, HostEventKind};
use crate::scene::{ComponentDetail, ComponentView, PanelView, Scene};
use crate::styling_primitives::{Color, FontDescription};
use crate::types::{Alignment, ChromeTarget, ComponentInput, Point, PointerEvent, Rect, Size};

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::Duration;
use windows::Win32::{
    Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM},
    Graphics::Gdi::{
        BeginPaint, CLIP_DEFAULT_PRECIS, ClientToScreen, CreateFontW, CreateSolidBrush,
        DEFAULT_CHARSET, DEFAULT_QUALITY, DRAW_TEXT_FORMAT, DT_CENTER, DT_END_ELLIPSIS, DT_LEFT,
        DT_RIGHT, DT_SINGLELINE, DT_VCENTER, DeleteObject, DrawTextW, EndPaint, FF_DONTCARE,
        FW_BOLD, FW_NORMAL, FillRect, FrameRect, HDC, HFONT, HGDIOBJ, InvalidateRect,
        OUT_DEFAULT_PRECIS, PAINTSTRUCT, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
    },
    System::LibraryLoader::GetModuleHandleW,
    UI::{
        Input::KeyboardAndMouse::{ReleaseCapture, SetCapture},
        WindowsAndMessaging::{
            CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow,
            DispatchMessageW, GWLP_USERDATA, GetClientRect, GetWindowLongPtrW, HWND_TOPMOST,
            IDC_ARROW, LWA_ALPHA, LoadCursorW, MSG, PM_REMOVE, PeekMessageW, RegisterClassW,
            SW_HIDE, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SetLayeredWindowAttributes,
            SetWindowLongPtrW, SetWindowPos, SetWindowTextW, ShowWindow, TranslateMessage,
            WM_CAPTURECHANGED, WM_CLOSE, WM_ERASEBKGND, WM_LBUTTONDOWN, WM_LBUTTONUP,
            WM_MOUSEMOVE, WM_NCDESTROY, WM_PAINT, WNDCLASSW, WS_EX_LAYERED, WS_EX_TOOLWINDOW,
            WS_EX_TOPMOST, WS_POPUP,
        },
    },
};
use windows::core::{HSTRING, PCWSTR, w};

const OVERLAY_CLASS_NAME: PCWSTR = w!("OverlayUI_Frame");
const NATIVE_POLL: Duration = Duration::from_millis(16);
const CHECK_BOX: i32 = 12;
const DISABLED_SHADE: u32 = 60;

static OVERLAY_CLASS_REGISTERED: OnceLock<bool> = OnceLock::new();

type EventQueue = Rc<RefCell<VecDeque<HostEvent>>>;

/// Per-frame state owned by the native window.
struct FrameState {
    handle: FrameHandle,
    scene: Option<Scene>,
    placed: Vec<Placed>,
    capture: Option<ChromeTarget>,
    events: EventQueue,
}

impl FrameState {
    fn chrome(&self, size: Size) -> ChromeLayout {
        let (closable, resizable) = self
            .scene
            .as_ref()
            .map_or((false, false), |s| (s.closable, s.resizable));
        ChromeLayout::for_frame(size, closable, resizable)
    }

    fn push(&self, kind: HostEventKind) {
        self.events.borrow_mut().push_back(HostEvent {
            frame: self.handle,
            kind,
        });
    }
}

pub struct Win32Host {
    instance: HINSTANCE,
    frames: HashMap<FrameHandle, HWND>,
    events: EventQueue,
    next_handle: u64,
}

impl Win32Host {
    /// Registers the overlay window class for this process.
    pub fn new() -> Result<Self> {
        let module = unsafe { GetModuleHandleW(None)? };
        let instance = HINSTANCE(module.0);
        let registered = *OVERLAY_CLASS_REGISTERED.get_or_init(|| unsafe {
            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(overlay_wnd_proc),
                hInstance: instance,
                lpszClassName: OVERLAY_CLASS_NAME,
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                log::error!("Win32Host: RegisterClassW failed for the overlay frame class");
                false
            } else {
                log::debug!("Win32Host: overlay frame class registered");
                true
            }
        });
        if !registered {
            return Err(OverlayError::Host(
                "overlay frame class is not registered".into(),
            ));
        }
        Ok(Self {
            instance,
            frames: HashMap::new(),
            events: Rc::new(RefCell::new(VecDeque::new())),
            next_handle: 0,
        })
    }

    fn hwnd(&self, frame: FrameHandle) -> Option<HWND> {
        let hwnd = self.frames.get(&frame).copied();
        if hwnd.is_none() {
            log::debug!("Win32Host: {frame} is unknown or destroyed");
        }
        hwnd
    }
}

impl FrameHost for Win32Host {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn create_frame(&mut self, spec: &FrameSpec) -> Result<FrameHandle> {
        let owner = spec.owner.and_then(|owner| self.frames.get(&owner).copied());
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_LAYERED,
                OVERLAY_CLASS_NAME,
                &HSTRING::from(spec.title.as_str()),
                WS_POPUP,
                spec.bounds.x,
                spec.bounds.y,
                spec.bounds.width,
                spec.bounds.height,
                owner,
                None,
                Some(self.instance),
                None,
            )?
        };

        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        let state = Box::new(FrameState {
            handle,
            scene: None,
            placed: Vec::new(),
            capture: None,
            events: Rc::clone(&self.events),
        });
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);
            if let Err(e) =
                SetLayeredWindowAttributes(hwnd, COLORREF(0), spec.background.a, LWA_ALPHA)
            {
                log::warn!("Win32Host: SetLayeredWindowAttributes failed for '{}': {e:?}", spec.window_id);
            }
        }
        log::debug!(
            "Win32Host: created {handle} ({hwnd:?}) for '{}'{}",
            spec.window_id,
            if spec.synthetic { " (owner only)" } else { "" }
        );
        self.frames.insert(handle, hwnd);
        Ok(handle)
    }

    fn set_bounds(&mut self, frame: FrameHandle, bounds: Rect) {
        let Some(hwnd) = self.hwnd(frame) else {
            return;
        };
        let moved = unsafe {
            SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                SWP_NOACTIVATE,
            )
        };
        if let Err(e) = moved {
            log::warn!("Win32Host: SetWindowPos failed for {frame}: {e:?}");
        }
    }

    fn set_visible(&mut self, frame: FrameHandle, visible: bool) {
        if let Some(hwnd) = self.hwnd(frame) {
            let command = if visible { SW_SHOWNOACTIVATE } else { SW_HIDE };
            let _ = unsafe { ShowWindow(hwnd, command) };
        }
    }

    fn set_title(&mut self, frame: FrameHandle, title: &str) {
        let Some(hwnd) = self.hwnd(frame) else {
            return;
        };
        if let Err(e) = unsafe { SetWindowTextW(hwnd, &HSTRING::from(title)) } {
            log::warn!("Win32Host: SetWindowTextW failed for {frame}: {e:?}");
        }
        let _ = unsafe { InvalidateRect(Some(hwnd), None, false) };
    }

    fn present(&mut self, frame: FrameHandle, scene: &Scene) {
        let Some(hwnd) = self.hwnd(frame) else {
            return;
        };
        let Some(state) = (unsafe { frame_state(hwnd) }) else {
            return;
        };
        state.placed = arrange::arrange(scene);
        state.scene = Some(scene.clone());
        let _ = unsafe { InvalidateRect(Some(hwnd), None, false) };
    }

    fn destroy_frame(&mut self, frame: FrameHandle) {
        if let Some(hwnd) = self.frames.remove(&frame) {
            if let Err(e) = unsafe { DestroyWindow(hwnd) } {
                log::warn!("Win32Host: DestroyWindow failed for {frame}: {e:?}");
            }
        }
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        self.events.borrow_mut().drain(..).collect()
    }

    fn poll_interval(&self) -> Option<Duration> {
        Some(NATIVE_POLL)
    }
}

impl Drop for Win32Host {
    fn drop(&mut self) {
        for (frame, hwnd) in self.frames.drain() {
            log::debug!("Win32Host: destroying leftover {frame}");
            let _ = unsafe { DestroyWindow(hwnd) };
        }
    }
}

unsafe fn frame_state<'a>(hwnd: HWND) -> Option<&'a mut FrameState> {
    let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut FrameState;
    unsafe { ptr.as_mut() }
}

fn client_point(lparam: LPARAM) -> Point {
    Point::new(
        (lparam.0 & 0xFFFF) as i16 as i32,
        ((lparam.0 >> 16) & 0xFFFF) as i16 as i32,
    )
}

fn client_size(hwnd: HWND) -> Size {
    let mut rect = RECT::default();
    let _ = unsafe { GetClientRect(hwnd, &mut rect) };
    Size::new(rect.right - rect.left, rect.bottom - rect.top)
}

fn screen_point(hwnd: HWND, point: Point) -> Point {
    let mut pt = POINT {
        x: point.x,
        y: point.y,
    };
    let _ = unsafe { ClientToScreen(hwnd, &mut pt) };
    Point::new(pt.x, pt.y)
}

unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let Some(state) = (unsafe { frame_state(hwnd) }) else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };
    match msg {
        WM_ERASEBKGND => LRESULT(1),
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
            if !hdc.is_invalid() {
                unsafe { paint_frame(hdc, client_size(hwnd), state) };
            }
            let _ = unsafe { EndPaint(hwnd, &ps) };
            LRESULT(0)
        }
        WM_LBUTTONDOWN => {
            on_press(hwnd, state, client_point(lparam));
            LRESULT(0)
        }
        WM_MOUSEMOVE => {
            if let Some(target) = state.capture {
                let point = client_point(lparam);
                let local = state.chrome(client_size(hwnd)).to_local(target, point);
                state.push(HostEventKind::Pointer {
                    target,
                    event: PointerEvent::drag(local, screen_point(hwnd, point)),
                });
            }
            LRESULT(0)
        }
        WM_LBUTTONUP => {
            if let Some(target) = state.capture.take() {
                let point = client_point(lparam);
                let local = state.chrome(client_size(hwnd)).to_local(target, point);
                state.push(HostEventKind::Pointer {
                    target,
                    event: PointerEvent::release(local, screen_point(hwnd, point)),
                });
                let _ = unsafe { ReleaseCapture() };
            }
            LRESULT(0)
        }
        WM_CAPTURECHANGED => {
            if let Some(target) = state.capture.take() {
                log::debug!("Win32Host: capture lost on {} during {target:?}", state.handle);
            }
            LRESULT(0)
        }
        WM_CLOSE => {
            /* Alt+F4 goes through the close box so closability still applies. */
            let point = Point::default();
            let screen = screen_point(hwnd, point);
            state.push(HostEventKind::Pointer {
                target: ChromeTarget::CloseButton,
                event: PointerEvent::press(point, screen),
            });
            state.push(HostEventKind::Pointer {
                target: ChromeTarget::CloseButton,
                event: PointerEvent::release(point, screen),
            });
            LRESULT(0)
        }
        WM_NCDESTROY => {
            unsafe {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                drop(Box::from_raw(state as *mut FrameState));
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn on_press(hwnd: HWND, state: &mut FrameState, point: Point) {
    let chrome = state.chrome(client_size(hwnd));
    if let Some(target) = chrome.hit(point) {
        state.capture = Some(target);
        unsafe { SetCapture(hwnd) };
        state.push(HostEventKind::Pointer {
            target,
            event: PointerEvent::press(chrome.to_local(target, point), screen_point(hwnd, point)),
        });
        return;
    }
    let Some(scene) = &state.scene else {
        return;
    };
    let activation = arrange::component_at(&state.placed, point).and_then(|placed| {
        let view = scene.component(&placed.id)?;
        input_for_click(view, placed.rect, point).map(|input| (view.id.clone(), input))
    });
    if let Some((component_id, input)) = activation {
        state.push(HostEventKind::Activate {
            component_id,
            input,
        });
    }
}

/*
 * Maps a click at `point` (frame-relative) on a component to the input that
 * component understands. Kinds without pointer interaction yield None.
 */
fn input_for_click(view: &ComponentView, rect: Rect, point: Point) -> Option<ComponentInput> {
    if !view.enabled {
        return None;
    }
    match (&view.kind, &view.detail) {
        (ComponentKind::Button, _) => Some(ComponentInput::Click),
        (ComponentKind::CheckBox, _) => Some(ComponentInput::Toggle),
        (ComponentKind::ComboBox, ComponentDetail::Items { items }) if !items.is_empty() => {
            let next = view.value.map_or(0, |v| (v + 1).max(0) as usize) % items.len();
            Some(ComponentInput::SelectIndex(next))
        }
        (ComponentKind::Slider, ComponentDetail::Range { min, max }) if rect.width > 0 => {
            let track = RangeModel::new(*min, *max, *min);
            Some(ComponentInput::Slide(track.value_at(point.x - rect.x, rect.width)))
        }
        (ComponentKind::TabbedPane, ComponentDetail::Tabs { titles, .. })
            if !titles.is_empty() && point.y < rect.y + TAB_STRIP && rect.width > 0 =>
        {
            let index = ((point.x - rect.x) * titles.len() as i32 / rect.width).max(0) as usize;
            Some(ComponentInput::SelectTab(index.min(titles.len() - 1)))
        }
        _ => None,
    }
}

// ── Painting ────────────────────────────────────────────────────────────────

fn to_rect(r: Rect) -> RECT {
    RECT {
        left: r.x,
        top: r.y,
        right: r.right(),
        bottom: r.bottom(),
    }
}

unsafe fn fill(hdc: HDC, r: Rect, color: &Color) {
    unsafe {
        let brush = CreateSolidBrush(color_to_colorref(color));
        FillRect(hdc, &to_rect(r), brush);
        let _ = DeleteObject(brush.into());
    }
}

unsafe fn outline(hdc: HDC, r: Rect, color: &Color) {
    unsafe {
        let brush = CreateSolidBrush(color_to_colorref(color));
        FrameRect(hdc, &to_rect(r), brush);
        let _ = DeleteObject(brush.into());
    }
}

unsafe fn text(hdc: HDC, r: Rect, s: &str, color: &Color, format: DRAW_TEXT_FORMAT) {
    if s.is_empty() {
        return;
    }
    let mut wide: Vec<u16> = s.encode_utf16().collect();
    let mut rect = to_rect(r);
    unsafe {
        SetTextColor(hdc, color_to_colorref(color));
        DrawTextW(hdc, &mut wide, &mut rect, format);
    }
}

fn create_font(font: &FontDescription) -> Option<HFONT> {
    let weight = if font.style.is_bold() {
        FW_BOLD.0 as i32
    } else {
        FW_NORMAL.0 as i32
    };
    let hfont = unsafe {
        CreateFontW(
            -(font.size as i32),
            0,
            0,
            0,
            weight,
            font.style.is_italic() as u32,
            0,
            0,
            DEFAULT_CHARSET,
            OUT_DEFAULT_PRECIS,
            CLIP_DEFAULT_PRECIS,
            DEFAULT_QUALITY,
            FF_DONTCARE.0 as u32,
            &HSTRING::from(font.family.as_str()),
        )
    };
    (!hfont.is_invalid()).then_some(hfont)
}

const LINE: DRAW_TEXT_FORMAT = DRAW_TEXT_FORMAT(DT_SINGLELINE.0 | DT_VCENTER.0 | DT_END_ELLIPSIS.0);

unsafe fn paint_frame(hdc: HDC, size: Size, state: &FrameState) {
    let whole = Rect::new(0, 0, size.width, size.height);
    let Some(scene) = &state.scene else {
        unsafe { fill(hdc, whole, &Color::BLACK) };
        return;
    };
    let chrome = state.chrome(size);
    unsafe {
        SetBkMode(hdc, TRANSPARENT);
        fill(hdc, whole, &scene.background);
        fill(hdc, chrome.header, &scene.header_background);
        text(hdc, chrome.title, &scene.title, &scene.text, LINE | DT_LEFT);
        if let Some(close) = chrome.close {
            text(hdc, close, "\u{00D7}", &scene.text, LINE | DT_CENTER);
        }
        outline(hdc, whole, &scene.border);

        for placed in &state.placed {
            match placed.kind {
                PlacedKind::Panel => {
                    if let Some(panel) = scene.panel(&placed.id) {
                        paint_panel(hdc, placed.rect, panel);
                    }
                }
                PlacedKind::Component(_) => {
                    if let Some(component) = scene.component(&placed.id) {
                        paint_component(hdc, placed.rect, component, &scene.border);
                    }
                }
            }
        }

        if let Some(grip) = chrome.resize {
            fill(hdc, grip.inset(3), &scene.border);
        }
    }
}

unsafe fn paint_panel(hdc: HDC, r: Rect, panel: &PanelView) {
    unsafe {
        fill(hdc, r, &panel.background);
        if let Some(title) = &panel.title {
            outline(hdc, r, &panel.border_color);
            let band = Rect::new(r.x + 4, r.y, r.width - 8, LINE_HEIGHT);
            text(hdc, band, title, &panel.title_color, LINE | DT_LEFT);
        }
    }
}

unsafe fn paint_component(hdc: HDC, r: Rect, c: &ComponentView, border: &Color) {
    let fg = if c.enabled {
        c.foreground
    } else {
        shade(&c.foreground, DISABLED_SHADE)
    };
    let label = c.text.as_deref().unwrap_or("");
    unsafe {
        if let Some(bg) = &c.background {
            fill(hdc, r, bg);
        }
        match &c.detail {
            ComponentDetail::Label { align, font } => {
                let format = match align {
                    Alignment::Left => DT_LEFT,
                    Alignment::Center => DT_CENTER,
                    Alignment::Right => DT_RIGHT,
                };
                let hfont = create_font(font);
                let previous = hfont.map(|f| SelectObject(hdc, HGDIOBJ(f.0)));
                text(hdc, r, label, &fg, LINE | format);
                if let Some(previous) = previous {
                    SelectObject(hdc, previous);
                }
                if let Some(f) = hfont {
                    let _ = DeleteObject(f.into());
                }
            }
            ComponentDetail::Plain if c.kind == ComponentKind::CheckBox => {
                let y = r.y + (r.height - CHECK_BOX) / 2;
                let tick = Rect::new(r.x, y, CHECK_BOX, CHECK_BOX);
                outline(hdc, tick, &fg);
                if c.selected == Some(true) {
                    fill(hdc, tick.inset(3), &fg);
                }
                let rest = Rect::new(r.x + CHECK_BOX + 4, r.y, r.width - CHECK_BOX - 4, r.height);
                text(hdc, rest, label, &fg, LINE | DT_LEFT);
            }
            ComponentDetail::Plain => {
                outline(hdc, r, border);
                text(hdc, r, label, &fg, LINE | DT_CENTER);
            }
            ComponentDetail::Items { items } => {
                outline(hdc, r, border);
                let shown = c
                    .value
                    .and_then(|v| usize::try_from(v).ok())
                    .and_then(|v| items.get(v))
                    .map_or(label, String::as_str);
                text(hdc, r.inset(3), shown, &fg, LINE | DT_LEFT);
                text(hdc, r.inset(3), "\u{25BE}", &fg, LINE | DT_RIGHT);
            }
            ComponentDetail::Range { min, max } => {
                let filled = RangeModel::new(*min, *max, c.value.unwrap_or(*min)).filled(r.width);
                if c.kind == ComponentKind::ProgressBar {
                    outline(hdc, r, border);
                    fill(hdc, Rect::new(r.x, r.y, filled, r.height).inset(1), &fg);
                    text(hdc, r, label, &fg, LINE | DT_CENTER);
                } else {
                    fill(hdc, Rect::new(r.x, r.y + r.height / 2, r.width, 2), border);
                    fill(hdc, Rect::new(r.x + filled - 3, r.y + 2, 6, r.height - 4), &fg);
                }
            }
            ComponentDetail::TextField { .. } => {
                outline(hdc, r, border);
                text(hdc, r.inset(3), label, &fg, LINE | DT_LEFT);
            }
            ComponentDetail::Lines { lines, .. } => {
                outline(hdc, r, border);
                let inner = r.inset(3);
                for (index, line) in lines.iter().enumerate() {
                    let y = inner.y + index as i32 * LINE_HEIGHT;
                    if y + LINE_HEIGHT > inner.bottom() {
                        break;
                    }
                    let row = Rect::new(inner.x, y, inner.width, LINE_HEIGHT);
                    text(hdc, row, line, &fg, LINE | DT_LEFT);
                }
            }
            ComponentDetail::Separator { horizontal } => {
                let line = if *horizontal {
                    Rect::new(r.x, r.y + r.height / 2, r.width, 1)
                } else {
                    Rect::new(r.x + r.width / 2, r.y, 1, r.height)
                };
                fill(hdc, line, border);
            }
            ComponentDetail::Table { columns, rows } => {
                paint_table(hdc, r, columns, rows, &fg, border);
            }
            ComponentDetail::Tabs { titles, .. } => {
                if titles.is_empty() {
                    return;
                }
                let width = r.width / titles.len() as i32;
                for (index, title) in titles.iter().enumerate() {
                    let tab = Rect::new(r.x + index as i32 * width, r.y, width, TAB_STRIP);
                    if c.value == Some(index as i32) {
                        fill(hdc, tab, border);
                    }
                    outline(hdc, tab, border);
                    text(hdc, tab, title, &fg, LINE | DT_CENTER);
                }
            }
        }
    }
}

unsafe fn paint_table(
    hdc: HDC,
    r: Rect,
    columns: &[String],
    rows: &[Vec<String>],
    fg: &Color,
    border: &Color,
) {
    if columns.is_empty() {
        return;
    }
    let width = r.width / columns.len() as i32;
    let row_height = LINE_HEIGHT + 2;
    unsafe {
        outline(hdc, r, border);
        for (col, name) in columns.iter().enumerate() {
            let cell = Rect::new(r.x + col as i32 * width, r.y, width, row_height);
            fill(hdc, cell, border);
            text(hdc, cell.inset(2), name, fg, LINE | DT_LEFT);
        }
        for (index, row) in rows.iter().enumerate() {
            let y = r.y + (index as i32 + 1) * row_height;
            if y + row_height > r.bottom() {
                break;
            }
            for (col, value) in row.iter().take(columns.len()).enumerate() {
                let cell = Rect::new(r.x + col as i32 * width, y, width, row_height);
                text(hdc, cell.inset(2), value, fg, LINE | DT_LEFT);
            }
        }
    }
}
