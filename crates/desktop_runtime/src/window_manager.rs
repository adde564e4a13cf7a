//! Window geometry and stacking helpers used by the desktop reducer.

use crate::{
    geometry::LayerSize,
    model::{DesktopState, ResizeEdge, WindowId, WindowRect},
};

pub const DEFAULT_WINDOW_WIDTH: i32 = 720;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 460;
pub const MIN_WINDOW_WIDTH: i32 = 320;
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Gap kept around a maximized window.
pub const MAXIMIZE_MARGIN: i32 = 16;
/// Highest z-index a window may take. Sticky notes stack above this.
pub const WINDOW_Z_CEILING: u32 = 199;

/// Default-sized window centered in the layer.
pub fn default_window_rect(layer: LayerSize) -> WindowRect {
    let w = DEFAULT_WINDOW_WIDTH.min(layer.width).max(MIN_WINDOW_WIDTH);
    let h = DEFAULT_WINDOW_HEIGHT.min(layer.height).max(MIN_WINDOW_HEIGHT);
    WindowRect {
        x: ((layer.width - w) / 2).max(0),
        y: ((layer.height - h) / 2).max(0),
        w,
        h,
    }
}

/// Bounds of a maximized window.
pub fn maximized_rect(layer: LayerSize) -> WindowRect {
    WindowRect {
        x: MAXIMIZE_MARGIN,
        y: MAXIMIZE_MARGIN,
        w: (layer.width - MAXIMIZE_MARGIN * 2).max(0),
        h: (layer.height - MAXIMIZE_MARGIN * 2).max(0),
    }
}

/// Offsets `start` by the pointer delta, keeping the whole window inside the layer.
pub fn moved_rect(start: WindowRect, dx: i32, dy: i32, layer: LayerSize) -> WindowRect {
    WindowRect {
        x: (start.x + dx).min(layer.width - start.w).max(0),
        y: (start.y + dy).min(layer.height - start.h).max(0),
        ..start
    }
}

/// Follows the dragged edge or corner with the opposite edge anchored.
///
/// The result is never smaller than the minimum window size and never leaves the layer.
pub fn resized_rect(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    layer: LayerSize,
) -> WindowRect {
    let mut rect = start;

    if edge.moves_left() {
        rect.x = (start.x + dx).min(start.right() - MIN_WINDOW_WIDTH).max(0);
        rect.w = start.right() - rect.x;
    } else if edge.moves_right() {
        rect.w = (start.w + dx)
            .min(layer.width - start.x)
            .max(MIN_WINDOW_WIDTH);
    }

    if edge.moves_top() {
        rect.y = (start.y + dy).min(start.bottom() - MIN_WINDOW_HEIGHT).max(0);
        rect.h = start.bottom() - rect.y;
    } else if edge.moves_bottom() {
        rect.h = (start.h + dy)
            .min(layer.height - start.y)
            .max(MIN_WINDOW_HEIGHT);
    }

    rect.x = rect.x.min(layer.width - rect.w).max(0);
    rect.y = rect.y.min(layer.height - rect.h).max(0);
    rect
}

/// Gives `window_id` the next z-index.
///
/// When the counter would pass [`WINDOW_Z_CEILING`] every window is renumbered from 1 in its
/// current stacking order first. Returns `false` for an unknown window.
pub fn bring_to_front(state: &mut DesktopState, window_id: WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }
    if state.next_z > WINDOW_Z_CEILING {
        compact_z_order(state);
    }
    let z = state.next_z;
    state.next_z += 1;
    if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
        window.z_index = z;
    }
    true
}

fn compact_z_order(state: &mut DesktopState) {
    let mut order: Vec<usize> = (0..state.windows.len()).collect();
    order.sort_by_key(|&index| state.windows[index].z_index);
    for (rank, index) in order.into_iter().enumerate() {
        state.windows[index].z_index = rank as u32 + 1;
    }
    state.next_z = state.windows.len() as u32 + 1;
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppContent, ApplicationId};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRecord;

    const LAYER: LayerSize = LayerSize {
        width: 1200,
        height: 700,
    };

    fn rect(x: i32, y: i32, w: i32, h: i32) -> WindowRect {
        WindowRect { x, y, w, h }
    }

    #[test]
    fn default_rect_is_centered() {
        assert_eq!(default_window_rect(LAYER), rect(240, 120, 720, 460));
    }

    #[test]
    fn default_rect_shrinks_into_small_layers() {
        let small = LayerSize {
            width: 500,
            height: 300,
        };
        assert_eq!(default_window_rect(small), rect(0, 0, 500, 300));
    }

    #[test]
    fn maximized_rect_keeps_margin() {
        assert_eq!(maximized_rect(LAYER), rect(16, 16, 1168, 668));
    }

    #[test]
    fn move_is_clamped_to_layer() {
        let start = rect(100, 100, 400, 300);
        assert_eq!(moved_rect(start, -500, 20, LAYER), rect(0, 120, 400, 300));
        assert_eq!(moved_rect(start, 2000, 2000, LAYER), rect(800, 400, 400, 300));
    }

    #[test]
    fn west_resize_anchors_right_edge_and_respects_minimum() {
        let start = rect(400, 100, 500, 300);
        let grown = resized_rect(start, ResizeEdge::West, -100, 0, LAYER);
        assert_eq!(grown, rect(300, 100, 600, 300));

        let shrunk = resized_rect(start, ResizeEdge::West, 400, 0, LAYER);
        assert_eq!(shrunk, rect(580, 100, MIN_WINDOW_WIDTH, 300));
        assert_eq!(shrunk.right(), start.right());
    }

    #[test]
    fn south_east_resize_stops_at_layer_edge() {
        let start = rect(800, 300, 300, 300);
        assert_eq!(
            resized_rect(start, ResizeEdge::SouthEast, 500, 500, LAYER),
            rect(800, 300, 400, 400)
        );
    }

    #[test]
    fn north_resize_cannot_cross_top_of_layer() {
        let start = rect(10, 50, 400, 300);
        assert_eq!(
            resized_rect(start, ResizeEdge::NorthWest, -80, -80, LAYER),
            rect(0, 0, 410, 350)
        );
    }

    fn state_with_windows(count: u64) -> DesktopState {
        let mut state = DesktopState::with_icons(Vec::new(), LAYER);
        for id in 1..=count {
            state.windows.push(WindowRecord {
                id: WindowId(id),
                app_id: ApplicationId::trusted(format!("app{id}")),
                title: String::new(),
                content: AppContent::placeholder(),
                rect: default_window_rect(LAYER),
                restore_rect: None,
                z_index: 0,
                minimized: false,
                maximized: false,
            });
            bring_to_front(&mut state, WindowId(id));
        }
        state
    }

    #[test]
    fn bring_to_front_hands_out_increasing_z() {
        let mut state = state_with_windows(2);
        assert!(bring_to_front(&mut state, WindowId(1)));
        assert_eq!(state.window(WindowId(1)).map(|w| w.z_index), Some(3));
        assert_eq!(state.top_window_id(), Some(WindowId(1)));
        assert!(!bring_to_front(&mut state, WindowId(9)));
    }

    #[test]
    fn z_counter_compacts_at_ceiling_and_keeps_order() {
        let mut state = state_with_windows(3);
        state.windows[0].z_index = 150;
        state.windows[1].z_index = WINDOW_Z_CEILING;
        state.windows[2].z_index = 40;
        state.next_z = WINDOW_Z_CEILING + 1;

        bring_to_front(&mut state, WindowId(3));

        let z: Vec<u32> = state.windows.iter().map(|w| w.z_index).collect();
        assert_eq!(z, vec![2, 3, 4]);
        assert_eq!(state.next_z, 5);
    }
}
