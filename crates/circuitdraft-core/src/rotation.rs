//! Rotation controller: quarter-turn stepping of shape instances.

use crate::error::CanvasResult;
use crate::store::{InstanceId, ShapeStore};

/// Angle added by one rotate request.
pub const ROTATION_STEP_DEGREES: u16 = 90;

/// The angle following `degrees`, wrapped into [0, 360).
pub fn next_rotation(degrees: u16) -> u16 {
    (degrees % 360 + ROTATION_STEP_DEGREES) % 360
}

/// Advance an instance by one rotation step and return its new angle.
pub fn rotate(store: &mut ShapeStore, id: InstanceId) -> CanvasResult<u16> {
    let instance = store.get_instance_mut(id)?;
    instance.rotation_degrees = next_rotation(instance.rotation_degrees);
    Ok(instance.rotation_degrees)
}
