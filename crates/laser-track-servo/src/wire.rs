use laser_track_core::ActuatorAngles;

/// Serialize one absolute-position command line.
///
/// The controller parses `X:<int> Y:<int>\n` and applies both fields as
/// absolute angle targets; no other commands exist on the wire.
pub fn format_command(angles: ActuatorAngles) -> String {
    format!("X:{} Y:{}\n", angles.x, angles.y)
}
