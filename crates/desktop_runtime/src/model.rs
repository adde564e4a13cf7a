use desktop_app_contract::{AppContent, ApplicationId, WindowRuntimeId};
use serde::{Deserialize, Serialize};

use crate::{
    apps,
    desktop_icons::DesktopIcon,
    geometry::{GridLayout, LayerSize, PixelPoint},
};

/// Viewport assumed until the host reports the real one.
pub const DEFAULT_VIEWPORT_WIDTH: i32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: i32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub WindowRuntimeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub content: AppContent,
    pub rect: WindowRect,
    /// Bounds captured when the window was maximized.
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    /// Next z-index handed to a window brought to front.
    pub next_z: u32,
    pub windows: Vec<WindowRecord>,
    pub icons: Vec<DesktopIcon>,
    pub selected_icon: Option<String>,
    pub desktop_area: LayerSize,
    pub layout: GridLayout,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_icons(
            apps::desktop_icons(),
            LayerSize::desktop_area(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        )
    }
}

impl DesktopState {
    /// Fresh desktop with no windows, laying `icons` out over `desktop_area`.
    pub fn with_icons(icons: Vec<DesktopIcon>, desktop_area: LayerSize) -> Self {
        let mut state = Self {
            next_window_id: 1,
            next_z: 1,
            windows: Vec::new(),
            icons,
            selected_icon: None,
            desktop_area,
            layout: GridLayout::for_area(desktop_area),
        };
        state.clamp_icons_to_layout();
        state
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn window_for_app(&self, app_id: &ApplicationId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.app_id == app_id)
    }

    /// Visible window with the highest z-index.
    pub fn top_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    pub fn icon(&self, icon_id: &str) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| icon.id == icon_id)
    }

    pub(crate) fn clamp_icons_to_layout(&mut self) {
        let layout = self.layout;
        for icon in &mut self.icons {
            icon.cell = layout.clamp_cell(icon.cell);
        }
    }
}

/// Everything needed to create a window for an app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWindowRequest {
    pub app_id: ApplicationId,
    pub title: String,
    pub content: AppContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub fn delta_from(self, start: PointerPosition) -> (i32, i32) {
        (self.x - start.x, self.y - start.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        Self::North,
        Self::South,
        Self::West,
        Self::East,
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthWest | Self::NorthEast)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthWest | Self::SouthEast)
    }

    /// CSS hook for the handle element.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::North => "top",
            Self::South => "bottom",
            Self::East => "right",
            Self::West => "left",
            Self::NorthEast => "tr",
            Self::NorthWest => "tl",
            Self::SouthEast => "br",
            Self::SouthWest => "bl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// An icon press that may turn into a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct IconDragSession {
    pub icon_id: String,
    pub pointer_start: PointerPosition,
    /// Top-left of the icon when the press began.
    pub origin: PixelPoint,
    /// Current top-left while dragging.
    pub position: PixelPoint,
    /// Set once the pointer crossed the drag threshold.
    pub moved: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
    pub icon_drag: Option<IconDragSession>,
}

impl InteractionState {
    /// Drops any window gesture that targets `window_id`.
    pub fn clear_window(&mut self, window_id: WindowId) {
        if self.dragging.as_ref().is_some_and(|s| s.window_id == window_id) {
            self.dragging = None;
        }
        if self.resizing.as_ref().is_some_and(|s| s.window_id == window_id) {
            self.resizing = None;
        }
    }

    /// Pixel position of an icon that is being dragged past the threshold.
    pub fn dragged_icon_position(&self, icon_id: &str) -> Option<PixelPoint> {
        self.icon_drag
            .as_ref()
            .filter(|session| session.moved && session.icon_id == icon_id)
            .map(|session| session.position)
    }
}
