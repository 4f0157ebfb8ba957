use crate::input::{ControlInput, Direction};
use crate::target::{nearest, LiveSnapshot};
use crate::world::ClientId;

/// Walks towards the nearest eligible player within `range`.
///
/// Compares rendered x positions; when they are equal the direction is left
/// as it was. Returns the followed player.
pub fn stabilizer(
    snapshot: &LiveSnapshot,
    range: f32,
    input: &mut ControlInput,
) -> Option<ClientId> {
    let followed = nearest(snapshot, range)?;
    let local = snapshot.local()?;
    let other = snapshot.player(followed)?;
    if let Some(direction) = Direction::towards(local.render_pos.x, other.render_pos.x) {
        input.direction = direction;
    }
    Some(followed)
}
