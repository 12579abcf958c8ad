//! Starter .repcoach.toml content
//!
//! Written by `repcoach init`. The numbers are reasonable starting points
//! for a side-on camera, not calibrated limits.

use std::fs;
use std::path::Path;

use anyhow::Context;

/// Rules for squat and push-up
pub const STARTER_RULES: &str = r#"# repcoach exercise rules
#
# Joint names are BlazePose landmarks. LEFT_* names follow whichever body
# side is better visible in each frame; RIGHT_* and central joints are fixed.

[[exercise]]
id = "squat"
name = "Squat"
aliases = ["bodyweight squat", "air squat"]

[exercise.rep_detection]
key_joint = "LEFT_HIP"
axis = "y"
threshold = 0.15
direction = "down_then_up"
hold_time_ms = 200

[[exercise.angle]]
name = "knee_depth"
joints = ["LEFT_HIP", "LEFT_KNEE", "LEFT_ANKLE"]
min_degrees = 70
max_degrees = 100
phase = "bottom"
violation_type = "SHALLOW_SQUAT"
message = "Squat deeper, aim for thighs parallel to the floor"
severity = "warning"

[[exercise.angle]]
name = "torso_lean"
joints = ["LEFT_SHOULDER", "LEFT_HIP", "LEFT_KNEE"]
min_degrees = 45
max_degrees = 180
violation_type = "EXCESSIVE_FORWARD_LEAN"
message = "Keep your chest up"
severity = "warning"

[[exercise.alignment]]
name = "knee_over_ankle"
points = ["LEFT_KNEE", "LEFT_ANKLE"]
type = "vertical"
max_deviation = 0.1
violation_type = "KNEES_PAST_TOES"
message = "Sit back, keep your knees over your ankles"
severity = "info"

[[exercise]]
id = "push_up"
name = "Push-up"
aliases = ["pushup", "press up"]

[exercise.rep_detection]
key_joint = "LEFT_SHOULDER"
axis = "y"
threshold = 0.1
direction = "down_then_up"
hold_time_ms = 100

[[exercise.angle]]
name = "elbow_depth"
joints = ["LEFT_SHOULDER", "LEFT_ELBOW", "LEFT_WRIST"]
min_degrees = 70
max_degrees = 100
phase = "bottom"
violation_type = "SHALLOW_PUSH_UP"
message = "Lower your chest closer to the floor"
severity = "warning"

[[exercise.alignment]]
name = "body_line"
points = ["LEFT_SHOULDER", "LEFT_HIP", "LEFT_ANKLE"]
type = "straight"
max_deviation = 0.15
violation_type = "SAGGING_HIPS"
message = "Brace your core and keep your body in a straight line"
severity = "critical"
"#;

/// Write the starter rules to `path`
///
/// Refuses to overwrite an existing file unless `force` is set. Returns
/// whether the file was written.
pub fn write_starter(path: &Path, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, STARTER_RULES).with_context(|| format!("writing {}", path.display()))?;
    Ok(true)
}
