//! Pose source port
//!
//! Defines the interface for anything that produces pose frames: a recorded
//! session file, a live estimator, a test fixture.

use super::super::models::PoseSnapshot;

/// A stream of pose frames in capture order
pub trait PoseSource {
    /// Next frame, or `None` at end of stream
    fn next_pose(&mut self) -> anyhow::Result<Option<PoseSnapshot>>;

    /// Drain the rest of the stream
    fn collect_poses(&mut self) -> anyhow::Result<Vec<PoseSnapshot>> {
        let mut poses = Vec::new();
        while let Some(pose) = self.next_pose()? {
            poses.push(pose);
        }
        Ok(poses)
    }
}
