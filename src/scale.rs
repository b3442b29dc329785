// SPDX-License-Identifier: GPL-3.0

use crate::constants::*;

/// Interface scale: the user preference times the screen's logical DPI
/// ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleManager {
    user: f64,
    dpi: Option<f64>,
    effective: f64,
}

impl Default for ScaleManager {
    fn default() -> Self {
        Self::new(DEFAULT_USER_SCALE_FACTOR)
    }
}

impl ScaleManager {
    pub fn new(user: f64) -> Self {
        let user = clamp_user_scale(user);
        Self {
            user,
            dpi: None,
            effective: user,
        }
    }

    pub fn user_scale(&self) -> f64 {
        self.user
    }

    pub fn effective_scale(&self) -> f64 {
        self.effective
    }

    pub fn screen_dpi(&self) -> Option<f64> {
        self.dpi
    }

    /// Clamp and store `user`. Returns `true` when the stored value changed.
    pub fn set_user_scale(&mut self, user: f64) -> bool {
        let user = clamp_user_scale(user);
        if (user - self.user).abs() <= SCALE_EPSILON {
            return false;
        }
        self.user = user;
        true
    }

    /// Step the user scale by one increment up or down.
    pub fn increment(&mut self, up: bool) -> bool {
        let step = if up { INTF_SCALE_STEP } else { -INTF_SCALE_STEP };
        self.set_user_scale(self.user + step)
    }

    /// `None` means the window is not on a known screen yet.
    pub fn set_screen_dpi(&mut self, dpi: Option<f64>) {
        self.dpi = dpi.filter(|dpi| dpi.is_finite() && *dpi > 0.0);
    }

    /// Recompute the effective scale. Returns the new value when it moved
    /// by more than the tolerance.
    pub fn recompute(&mut self) -> Option<f64> {
        let dpi = self.dpi.unwrap_or(REFERENCE_DPI);
        let effective = self.user * dpi / REFERENCE_DPI;
        if (effective - self.effective).abs() <= SCALE_EPSILON {
            return None;
        }
        self.effective = effective;
        Some(effective)
    }
}

pub fn clamp_user_scale(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_USER_SCALE_FACTOR;
    }
    value.clamp(MIN_INTF_USER_SCALE_FACTOR, MAX_INTF_USER_SCALE_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_scale_is_clamped() {
        let mut scale = ScaleManager::default();
        scale.set_screen_dpi(Some(144.0));
        assert!(scale.set_user_scale(10.0));
        assert_eq!(scale.user_scale(), MAX_INTF_USER_SCALE_FACTOR);
        assert_eq!(scale.recompute(), Some(4.5));

        assert!(scale.set_user_scale(0.0));
        assert_eq!(scale.user_scale(), MIN_INTF_USER_SCALE_FACTOR);
    }

    #[test]
    fn unchanged_within_tolerance() {
        let mut scale = ScaleManager::new(1.5);
        assert!(!scale.set_user_scale(1.5 + 1e-9));
        assert_eq!(scale.recompute(), None);

        scale.set_screen_dpi(Some(REFERENCE_DPI));
        assert_eq!(scale.recompute(), None);
    }

    #[test]
    fn screen_change_recomputes() {
        let mut scale = ScaleManager::new(1.0);
        scale.set_screen_dpi(Some(192.0));
        assert_eq!(scale.recompute(), Some(2.0));
        scale.set_screen_dpi(None);
        assert_eq!(scale.recompute(), Some(1.0));
    }

    #[test]
    fn increment_steps_and_stops_at_bounds() {
        let mut scale = ScaleManager::new(2.95);
        assert!(scale.increment(true));
        assert_eq!(scale.user_scale(), MAX_INTF_USER_SCALE_FACTOR);
        assert!(!scale.increment(true));

        assert!(scale.increment(false));
        assert!((scale.user_scale() - 2.9).abs() < 1e-9);
    }
}
