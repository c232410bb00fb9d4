/*
 * Secondary windows. A dialog is a window with a fixed header (optional close
 * affordance, no drag, no resize). A modal dialog is owned by the most
 * recently shown window that is visible when the dialog is created, and while
 * the dialog is visible its owner ignores input. With no visible window a
 * hidden synthetic owner frame is created and released with the dialog.
 */
use crate::error::{OverlayError, Result};
use crate::options::DialogConfig;
use crate::styling_primitives::ColorScheme;
use crate::types::Rect;
use crate::window_common::{ChromeFlags, WindowInit, WindowRole};
use crate::window_factory::Window;

use std::ops::Deref;

/// Handle to a dialog; offers the full `Window` API plus `close`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    window: Window,
}

impl Dialog {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }

    /// Disposes the dialog and releases any synthetic owner frame.
    pub fn close(&self) {
        self.window.dispose();
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Deref for Dialog {
    type Target = Window;

    fn deref(&self) -> &Window {
        &self.window
    }
}

pub(crate) fn dialog_init(config: DialogConfig, default_scheme: &ColorScheme) -> Result<WindowInit> {
    if config.id.is_empty() {
        return Err(OverlayError::MissingId { scope: "dialog" });
    }
    Ok(WindowInit {
        id: config.id,
        title: config.title,
        scheme: config.scheme.unwrap_or_else(|| default_scheme.clone()),
        bounds: Rect::new(config.x, config.y, config.width, config.height),
        chrome: ChromeFlags {
            closable: config.closable,
            resizable: false,
            draggable: false,
        },
        role: WindowRole::Dialog {
            modal: config.modal,
            owner: None,
            synthetic_owner: None,
        },
        on_close: config.on_close,
    })
}
