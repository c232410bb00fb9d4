/*
 * Declaring panels. A panel is registered by id in its window; a later
 * declaration with the same id replaces the earlier one. Placement is
 * resolved on the UI thread, where the parent's layout is known: under a
 * border-layout parent the panel takes its region, under any other parent it
 * is appended, and an unknown parent mounts it on the window's content root.
 */
use crate::command_executor::{self, PanelChange};
use crate::error::{OverlayError, Result};
use crate::options::{AddTab, PanelOptions};
use crate::styling_primitives::Color;
use crate::update_dispatcher::PanelState;
use crate::window_factory::Window;

/// Handle to a declared panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelHandle {
    window: Window,
    id: String,
}

impl PanelHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn set_color(&self, color: Color) {
        self.window.update_panel_color(&self.id, color);
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.window.update_panel_title(&self.id, title);
    }

    pub fn set_visible(&self, visible: bool) {
        self.window.set_panel_visible(&self.id, visible);
    }

    pub fn show_card(&self, child_id: impl Into<String>) {
        self.window.show_card(&self.id, child_id);
    }

    pub fn state(&self) -> Option<PanelState> {
        self.window.panel_state(&self.id)
    }
}

impl Window {
    pub fn create_panel(&self, opts: PanelOptions) -> Result<PanelHandle> {
        if opts.id.is_empty() {
            return Err(OverlayError::MissingId { scope: "panel" });
        }
        let id = opts.id.clone();
        self.inner.panels.write().insert(id.clone());
        log::trace!("PanelBuilder: declaring '{id}' ({:?}) in '{}'", opts.layout, self.id());
        let window_id = self.id().to_string();
        self.post("create panel", move |ctx| {
            command_executor::execute_create_panel(ctx, &window_id, opts)
        });
        Ok(PanelHandle {
            window: self.clone(),
            id,
        })
    }

    /*
     * Appends a tab to the tabbed pane `pane_id`. The tab's content is a new
     * panel registered like any other, so components can be added to it by id.
     */
    pub fn add_tab(&self, pane_id: impl Into<String>, tab: AddTab) -> Result<PanelHandle> {
        if tab.panel.id.is_empty() {
            return Err(OverlayError::MissingId { scope: "tab panel" });
        }
        let id = tab.panel.id.clone();
        self.inner.panels.write().insert(id.clone());
        let window_id = self.id().to_string();
        let pane_id = pane_id.into();
        self.post("add tab", move |ctx| {
            command_executor::execute_add_tab(ctx, &window_id, &pane_id, tab)
        });
        Ok(PanelHandle {
            window: self.clone(),
            id,
        })
    }

    pub(crate) fn post_panel_change(&self, panel_id: &str, change: PanelChange) {
        let window_id = self.id().to_string();
        let panel_id = panel_id.to_string();
        self.post("panel change", move |ctx| {
            command_executor::execute_panel_change(ctx, &window_id, &panel_id, change)
        });
    }
}
