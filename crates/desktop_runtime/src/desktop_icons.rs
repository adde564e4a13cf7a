//! Desktop icon records and drop resolution.
//!
//! Icons live on a column/row grid. Dropping an icon into a column pushes the icons at and
//! below the target row down by one, as long as the column still has room; otherwise the
//! dragged icon goes back where it started. Overlaps are only resolved at drop time.

use std::collections::BTreeMap;

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

use crate::geometry::{GridCell, GridLayout};

/// Pointer travel (on either axis) before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub id: String,
    pub app_id: ApplicationId,
    pub label: String,
    pub image: Option<String>,
    pub cell: GridCell,
    /// Pinned icons always show a taskbar button.
    pub pinned: bool,
}

/// An occupant pushed one row down to make room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconShift {
    pub icon_id: String,
    pub from_row: u32,
    pub to_row: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertReason {
    /// Every row from the target down is taken.
    ColumnFull,
    /// Shifting left the target row occupied.
    TargetStillOccupied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped back onto its own cell.
    Unchanged,
    Placed {
        cell: GridCell,
        shifted: Vec<IconShift>,
    },
    Reverted {
        cell: GridCell,
        reason: RevertReason,
        shifted: Vec<IconShift>,
    },
}

/// Summary of a finished drop, used for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDropReport {
    pub label: String,
    pub target: GridCell,
    pub outcome: DropOutcome,
}

impl IconDropReport {
    /// Human-readable lines describing the drop.
    pub fn log_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("[drop] icon={} -> target cell {}", self.label, self.target)];
        let shifted = match &self.outcome {
            DropOutcome::Unchanged => {
                lines.push(format!("[snap] icon={} stayed at {}", self.label, self.target));
                return lines;
            }
            DropOutcome::Placed { shifted, .. } | DropOutcome::Reverted { shifted, .. } => shifted,
        };
        for shift in shifted {
            lines.push(format!(
                "[shift] moving {} from row {} -> row {} in col {}",
                shift.icon_id, shift.from_row, shift.to_row, self.target.col
            ));
        }
        match &self.outcome {
            DropOutcome::Placed { cell, .. } => {
                lines.push(format!("[snap] icon={} final cell={cell}", self.label));
            }
            DropOutcome::Reverted { cell, reason, .. } => {
                let why = match reason {
                    RevertReason::ColumnFull => "column full from target row",
                    RevertReason::TargetStillOccupied => "target still occupied after shift",
                };
                lines.push(format!(
                    "[collision] {why}, reverting {} to {cell}",
                    self.label
                ));
            }
            DropOutcome::Unchanged => {}
        }
        lines
    }
}

/// Whether a pointer delta is far enough to count as a drag.
pub fn exceeds_drag_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() >= DRAG_THRESHOLD_PX || dy.abs() >= DRAG_THRESHOLD_PX
}

/// Moves `dragged_id` to `target`, shifting occupants of the target column down.
///
/// `start` is the cell the icon occupied when the drag began. Mutates the icons in place,
/// including any shifted occupants, and reports what happened. An unknown `dragged_id`
/// leaves everything untouched and reports [`DropOutcome::Unchanged`].
pub fn resolve_icon_drop(
    icons: &mut [DesktopIcon],
    dragged_id: &str,
    start: GridCell,
    target: GridCell,
    layout: GridLayout,
) -> DropOutcome {
    let target = layout.clamp_cell(target);
    if target == start || !icons.iter().any(|icon| icon.id == dragged_id) {
        return DropOutcome::Unchanged;
    }

    // row -> index into `icons`
    let mut occupancy = BTreeMap::<u32, usize>::new();
    for (index, icon) in icons.iter().enumerate() {
        if icon.id != dragged_id && icon.cell.col == target.col {
            occupancy.insert(icon.cell.row, index);
        }
    }

    let has_free_below = (target.row..layout.rows).any(|row| !occupancy.contains_key(&row));
    if !has_free_below {
        place(icons, dragged_id, start);
        return DropOutcome::Reverted {
            cell: start,
            reason: RevertReason::ColumnFull,
            shifted: Vec::new(),
        };
    }

    let mut shifted = Vec::new();
    if layout.rows >= 2 {
        for row in (target.row..=layout.rows - 2).rev() {
            if occupancy.contains_key(&(row + 1)) {
                continue;
            }
            if let Some(index) = occupancy.remove(&row) {
                occupancy.insert(row + 1, index);
                icons[index].cell.row = row + 1;
                shifted.push(IconShift {
                    icon_id: icons[index].id.clone(),
                    from_row: row,
                    to_row: row + 1,
                });
            }
        }
    }

    if occupancy.contains_key(&target.row) {
        place(icons, dragged_id, start);
        return DropOutcome::Reverted {
            cell: start,
            reason: RevertReason::TargetStillOccupied,
            shifted,
        };
    }

    place(icons, dragged_id, target);
    DropOutcome::Placed {
        cell: target,
        shifted,
    }
}

fn place(icons: &mut [DesktopIcon], icon_id: &str, cell: GridCell) {
    if let Some(icon) = icons.iter_mut().find(|icon| icon.id == icon_id) {
        icon.cell = cell;
    }
}
