//! Physics tuning
//!
//! Data-driven copy of the movement constants. Defaults match `consts`;
//! a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::PersistError;

/// Per-frame physics parameters (one step = one display frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    /// Negative = upward
    pub jump_power: f32,
    pub move_speed: f32,
    /// Horizontal velocity multiplier when no direction is held
    pub ground_friction: f32,
    pub ground_y: f32,
    pub platform_snap_tolerance: f32,
    pub coin_pickup_radius: f32,
    pub flag_reach_radius: f32,
    pub advance_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            move_speed: MOVE_SPEED,
            ground_friction: GROUND_FRICTION,
            ground_y: GROUND_Y,
            platform_snap_tolerance: PLATFORM_SNAP_TOLERANCE,
            coin_pickup_radius: COIN_PICKUP_RADIUS,
            flag_reach_radius: FLAG_REACH_RADIUS,
            advance_delay_ms: ADVANCE_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), PersistError> {
        let finite = [
            self.gravity,
            self.jump_power,
            self.move_speed,
            self.ground_friction,
            self.ground_y,
            self.platform_snap_tolerance,
            self.coin_pickup_radius,
            self.flag_reach_radius,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite || !self.advance_delay_ms.is_finite() {
            return Err(PersistError::Invalid("tuning values must be finite"));
        }
        if !(0.0..=1.0).contains(&self.ground_friction) {
            return Err(PersistError::Invalid("ground_friction must be within 0..=1"));
        }
        if self.advance_delay_ms < 0.0 {
            return Err(PersistError::Invalid("advance_delay_ms must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.jump_power, -15.0);
        assert_eq!(t.move_speed, 5.0);
        assert_eq!(t.ground_friction, 0.85);
        assert_eq!(t.advance_delay_ms, 1000.0);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "gravity": 0.5, "move_speed": 7.0 }"#).unwrap();
        assert_eq!(t.gravity, 0.5);
        assert_eq!(t.move_speed, 7.0);
        assert_eq!(t.jump_power, JUMP_POWER);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(Tuning::from_json("not json"), Err(PersistError::Json(_))));
        assert!(matches!(
            Tuning::from_json(r#"{ "ground_friction": 1.5 }"#),
            Err(PersistError::Invalid(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut t = Tuning::default();
        t.flag_reach_radius = 64.0;
        let back = Tuning::from_json(&t.to_json().unwrap()).unwrap();
        assert_eq!(back, t);
    }
}
