use glam::Vec2;

use crate::config::SpinbotConfig;
use crate::input::ControlSlot;
use crate::numeric::quantize_aim;

/// Spins the aim around the character.
///
/// The angle is `time * speed` radians. Silent mode writes the quantised
/// vector into the transmitted aim, otherwise the cursor moves.
pub fn spinbot(slot: &mut ControlSlot, time: f32, config: &SpinbotConfig) {
    if config.autofire {
        slot.input.fire.bump(1);
    }
    let aim = Vec2::from_angle(time * config.speed) * config.distance;
    if config.silent {
        slot.input.target = quantize_aim(aim);
    } else {
        slot.mouse = aim;
    }
}
