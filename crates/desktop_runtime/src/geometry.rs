//! Desktop grid math: mapping between icon grid cells and layer pixels.

use serde::{Deserialize, Serialize};

/// Width and height of one icon cell.
pub const CELL_SIZE: f64 = 104.0;
/// Inset between the icon layer edge and the first cell.
pub const DESKTOP_PADDING: f64 = 16.0;
/// Height reserved for the taskbar at the bottom of the viewport.
pub const TASKBAR_HEIGHT: i32 = 52;

/// Pixel size of a layer (the desktop area above the taskbar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSize {
    pub width: i32,
    pub height: i32,
}

impl LayerSize {
    /// Desktop area left over once the taskbar is carved out of a viewport.
    pub fn desktop_area(viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            width: viewport_width.max(0),
            height: (viewport_height - TASKBAR_HEIGHT).max(0),
        }
    }
}

/// Number of icon cells that fit the desktop area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
}

impl GridLayout {
    /// Derives the grid from the desktop area. Always at least one cell.
    pub fn for_area(area: LayerSize) -> Self {
        let usable_width = (f64::from(area.width) - DESKTOP_PADDING * 2.0).max(CELL_SIZE);
        let usable_height = (f64::from(area.height) - DESKTOP_PADDING * 2.0).max(CELL_SIZE);
        Self {
            columns: ((usable_width / CELL_SIZE).floor() as u32).max(1),
            rows: ((usable_height / CELL_SIZE).floor() as u32).max(1),
        }
    }

    /// Clamps a cell into `[0, columns) x [0, rows)`.
    pub fn clamp_cell(self, cell: GridCell) -> GridCell {
        GridCell {
            col: cell.col.min(self.columns - 1),
            row: cell.row.min(self.rows - 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: u32,
    pub row: u32,
}

impl GridCell {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A point in layer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Top-left pixel of a cell.
pub fn grid_to_pixel(cell: GridCell) -> PixelPoint {
    PixelPoint {
        x: DESKTOP_PADDING + f64::from(cell.col) * CELL_SIZE,
        y: DESKTOP_PADDING + f64::from(cell.row) * CELL_SIZE,
    }
}

/// Cell containing `point`, clamped into the layout.
pub fn pixel_to_grid(point: PixelPoint, layout: GridLayout) -> GridCell {
    let to_index = |value: f64, count: u32| {
        let index = ((value - DESKTOP_PADDING) / CELL_SIZE).floor();
        index.clamp(0.0, f64::from(count - 1)) as u32
    };
    GridCell {
        col: to_index(point.x, layout.columns),
        row: to_index(point.y, layout.rows),
    }
}

/// Keeps a dragged icon's top-left inside the icon layer.
pub fn clamp_icon_position(point: PixelPoint, layer: LayerSize) -> PixelPoint {
    let clamp = |value: f64, extent: i32| {
        let max = f64::from(extent) - CELL_SIZE - DESKTOP_PADDING;
        value.max(DESKTOP_PADDING).min(max)
    };
    PixelPoint {
        x: clamp(point.x, layer.width),
        y: clamp(point.y, layer.height),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_fills_usable_area_and_never_drops_below_one_cell() {
        let area = LayerSize::desktop_area(1280, 800);
        assert_eq!(area, LayerSize { width: 1280, height: 748 });
        assert_eq!(
            GridLayout::for_area(area),
            GridLayout {
                columns: 12,
                rows: 6
            }
        );
        assert_eq!(
            GridLayout::for_area(LayerSize::desktop_area(50, 40)),
            GridLayout {
                columns: 1,
                rows: 1
            }
        );
    }

    #[test]
    fn pixel_and_grid_mapping_agree() {
        let layout = GridLayout {
            columns: 5,
            rows: 4,
        };
        let cell = GridCell::new(2, 3);
        let origin = grid_to_pixel(cell);
        assert_eq!(origin, PixelPoint { x: 224.0, y: 328.0 });
        let center = PixelPoint {
            x: origin.x + CELL_SIZE / 2.0,
            y: origin.y + CELL_SIZE / 2.0,
        };
        assert_eq!(pixel_to_grid(center, layout), cell);
    }

    #[test]
    fn pixel_to_grid_clamps_outside_points() {
        let layout = GridLayout {
            columns: 3,
            rows: 2,
        };
        assert_eq!(
            pixel_to_grid(PixelPoint { x: -40.0, y: 5000.0 }, layout),
            GridCell::new(0, 1)
        );
    }

    #[test]
    fn dragged_icon_stays_inside_layer() {
        let layer = LayerSize {
            width: 600,
            height: 400,
        };
        assert_eq!(
            clamp_icon_position(PixelPoint { x: -20.0, y: 900.0 }, layer),
            PixelPoint { x: 16.0, y: 280.0 }
        );
    }

    #[test]
    fn clamp_cell_pulls_cells_back_into_layout() {
        let layout = GridLayout {
            columns: 2,
            rows: 3,
        };
        assert_eq!(layout.clamp_cell(GridCell::new(7, 1)), GridCell::new(1, 1));
    }
}
