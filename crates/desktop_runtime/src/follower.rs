//! Motion model for the cursor-following duck.

use crate::geometry::LayerSize;

/// Rendered size of the follower element.
pub const FOLLOWER_SIZE: f64 = 72.0;
/// Fraction of the remaining distance covered each frame.
pub const FOLLOW_FACTOR: f64 = 0.12;
/// Horizontal speed (px/frame) needed to turn around.
pub const FACING_THRESHOLD: f64 = 0.4;
/// Speed (px/frame) at which lean and squash reach their maximum.
pub const MAX_USEFUL_SPEED: f64 = 8.0;
pub const MAX_LEAN_DEG: f64 = 22.0;

/// Area the follower roams: the whole desktop root, taskbar band included.
pub fn follower_area((viewport_width, viewport_height): (i32, i32)) -> LayerSize {
    LayerSize {
        width: viewport_width.max(0),
        height: viewport_height.max(0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// What the follower element should render this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerPose {
    pub x: f64,
    pub y: f64,
    pub angle_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub facing: Facing,
}

impl FollowerPose {
    /// CSS transform placing the follower's top-left at `(x, y)`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) rotate({:.2}deg) scale({:.3}, {:.3})",
            self.x,
            self.y,
            self.angle_deg,
            self.scale_x * self.facing.sign(),
            self.scale_y
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowerMotion {
    x: f64,
    y: f64,
    target_x: f64,
    target_y: f64,
    facing: Facing,
}

impl FollowerMotion {
    /// Starts resting in the lower-left part of `area`.
    pub fn new(area: LayerSize) -> Self {
        let x = f64::from(area.width) * 0.2;
        let y = f64::from(area.height) * 0.7;
        Self {
            x,
            y,
            target_x: x,
            target_y: y,
            facing: Facing::Right,
        }
    }

    /// Aims slightly behind the pointer, clamped so the follower stays inside `area`.
    pub fn set_target(&mut self, pointer_x: f64, pointer_y: f64, area: LayerSize) {
        let max_x = (f64::from(area.width) - FOLLOWER_SIZE).max(0.0);
        let max_y = (f64::from(area.height) - FOLLOWER_SIZE).max(0.0);
        self.target_x = (pointer_x - FOLLOWER_SIZE * 0.3).clamp(0.0, max_x);
        self.target_y = (pointer_y - FOLLOWER_SIZE * 0.1).clamp(0.0, max_y);
    }

    /// Advances one animation frame.
    pub fn step(&mut self) -> FollowerPose {
        let (prev_x, prev_y) = (self.x, self.y);
        self.x += (self.target_x - self.x) * FOLLOW_FACTOR;
        self.y += (self.target_y - self.y) * FOLLOW_FACTOR;

        let vx = self.x - prev_x;
        let vy = self.y - prev_y;
        if vx > FACING_THRESHOLD {
            self.facing = Facing::Right;
        } else if vx < -FACING_THRESHOLD {
            self.facing = Facing::Left;
        }

        let speed = (vx.hypot(vy) / MAX_USEFUL_SPEED).min(1.0);
        FollowerPose {
            x: self.x,
            y: self.y,
            angle_deg: MAX_LEAN_DEG * speed * self.facing.sign(),
            scale_x: 1.0 + speed * 0.2,
            scale_y: 1.0 - speed * 0.12,
            facing: self.facing,
        }
    }

    pub fn rest_pose(&self) -> FollowerPose {
        FollowerPose {
            x: self.x,
            y: self.y,
            angle_deg: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            facing: self.facing,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const AREA: LayerSize = LayerSize {
        width: 1000,
        height: 600,
    };

    #[test]
    fn starts_at_rest_in_lower_left() {
        let mut motion = FollowerMotion::new(AREA);
        let pose = motion.step();
        assert_eq!((pose.x, pose.y), (200.0, 420.0));
        assert_eq!(pose.angle_deg, 0.0);
        assert_eq!((pose.scale_x, pose.scale_y), (1.0, 1.0));
    }

    #[test]
    fn eases_toward_offset_target() {
        let mut motion = FollowerMotion::new(AREA);
        motion.set_target(221.6, 427.2, AREA);
        let pose = motion.step();
        // target is (200, 420): already there
        assert_eq!((pose.x, pose.y), (200.0, 420.0));

        motion.set_target(521.6, 427.2, AREA);
        let pose = motion.step();
        assert!((pose.x - 236.0).abs() < 1e-9);
        assert_eq!(pose.facing, Facing::Right);
        assert_eq!(pose.angle_deg, MAX_LEAN_DEG);
        assert!((pose.scale_x - 1.2).abs() < 1e-9);
        assert!((pose.scale_y - 0.88).abs() < 1e-9);
    }

    #[test]
    fn turns_left_when_moving_left_fast_enough() {
        let mut motion = FollowerMotion::new(AREA);
        motion.set_target(0.0, 420.0, AREA);
        let pose = motion.step();
        assert_eq!(pose.facing, Facing::Left);
        assert!(pose.angle_deg < 0.0);
        assert!(pose.css_transform().contains("scale(-"));
    }

    #[test]
    fn slow_drift_keeps_facing() {
        let mut motion = FollowerMotion::new(AREA);
        motion.set_target(0.0, 420.0, AREA);
        motion.step();
        // 0.12 * 2px = 0.24px per frame: below the turn threshold
        motion.set_target(motion.x + 2.0 + FOLLOWER_SIZE * 0.3, 420.0 + 7.2, AREA);
        let pose = motion.step();
        assert_eq!(pose.facing, Facing::Left);
    }

    #[test]
    fn roams_over_the_taskbar_band() {
        let viewport = (400, 100);
        let area = follower_area(viewport);
        assert_eq!(area.height, 100);
        assert!(LayerSize::desktop_area(viewport.0, viewport.1).height < area.height);

        let mut motion = FollowerMotion::new(area);
        motion.set_target(40.0, 100.0, area);
        assert_eq!(motion.target_y, 28.0);
    }

    #[test]
    fn target_is_clamped_to_area() {
        let mut motion = FollowerMotion::new(AREA);
        motion.set_target(5000.0, -300.0, AREA);
        assert_eq!((motion.target_x, motion.target_y), (928.0, 0.0));
    }
}
