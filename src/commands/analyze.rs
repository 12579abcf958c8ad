//! Replay a recorded session through the form analyzer

use std::path::{Path, PathBuf};

use repcoach::adapters::replay::JsonlPoseSource;
use repcoach::adapters::toml::TomlRulesRepository;
use repcoach::core::ports::{PoseSource, RulesRepository};
use repcoach::core::services::{FormAnalyzer, average_score, violation_frequency};
use repcoach::output::{OutputMode, SessionReport};

use super::{load_config, rules_path};

/// Arguments of `repcoach analyze`
#[derive(Debug)]
pub struct AnalyzeArgs {
    /// Session file
    pub session: PathBuf,
    /// Exercise id or name
    pub exercise: String,
    /// Rules file override
    pub rules: Option<PathBuf>,
    /// Confidence override
    pub min_confidence: Option<f32>,
    /// Cooldown override
    pub cooldown_ms: Option<u64>,
}

/// Replay a session and print the report
pub fn analyze(args: &AnalyzeArgs, config: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let config = load_config(config)?;

    let mut engine_config = config.engine;
    if let Some(min_confidence) = args.min_confidence {
        if !(0.0..=1.0).contains(&min_confidence) {
            anyhow::bail!("--min-confidence must be between 0 and 1, got {min_confidence}");
        }
        engine_config.min_confidence = min_confidence;
    }
    if let Some(cooldown_ms) = args.cooldown_ms {
        engine_config.feedback_cooldown_ms = cooldown_ms;
    }

    let repo = TomlRulesRepository::new(rules_path(args.rules.as_deref(), &config)?);
    let rules = repo.get(&args.exercise)?;
    let mut source = JsonlPoseSource::open(&args.session)?;

    let mut engine = FormAnalyzer::new(rules, engine_config);
    let mut rep_events = engine.subscribe_reps();

    let mut frames = 0;
    let mut low_confidence_frames = 0;
    let mut audio_cues = Vec::new();
    let mut reps = Vec::new();

    while let Some(pose) = source.next_pose()? {
        frames += 1;
        if pose.overall_confidence() < engine_config.min_confidence {
            low_confidence_frames += 1;
        }

        let feedback = engine.analyze(&pose);
        if let Some(cue) = feedback.audio_message {
            audio_cues.push(cue);
        }
        while let Ok(event) = rep_events.try_recv() {
            reps.push(event.analysis);
        }
    }

    log::debug!("replayed {frames} frame(s), {} rep(s)", reps.len());

    let rules = engine.rules();
    let report = SessionReport {
        exercise_id: rules.exercise_id.clone(),
        display_name: rules.display_name.clone(),
        frames,
        low_confidence_frames,
        audio_cues,
        average_score: average_score(&reps),
        violation_frequency: violation_frequency(&reps),
        reps,
    };
    report.render(mode);

    Ok(())
}
