//! Video and audio track merging via the system ffmpeg

use crate::error::{MediagenError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Check that ffmpeg is runnable on this system
pub fn probe_merge_tool() -> Result<()> {
    let status = Command::new("ffmpeg").arg("-version").output();
    match status {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(MediagenError::MergeToolUnavailable(format!(
            "ffmpeg -version exited with {}",
            out.status
        ))),
        Err(e) => Err(MediagenError::MergeToolUnavailable(format!(
            "ffmpeg not found: {}",
            e
        ))),
    }
}

/// Arguments for a merge run. The video stream is mapped from the first
/// input and copied untouched, the audio from the second, and the output
/// stops at the shorter input.
pub fn merge_args(video: &Path, audio: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        video.display().to_string(),
        "-i".to_string(),
        audio.display().to_string(),
        "-map".to_string(),
        "0:v".to_string(),
        "-map".to_string(),
        "1:a".to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        "-shortest".to_string(),
        output.display().to_string(),
    ]
}

/// Merge a video file and an audio file into `output`.
pub fn merge_video_audio(video: &Path, audio: &Path, output: &Path) -> Result<PathBuf> {
    probe_merge_tool()?;

    if !video.exists() {
        return Err(MediagenError::Merge(format!(
            "video input missing: {}",
            video.display()
        )));
    }
    if !audio.exists() {
        return Err(MediagenError::Merge(format!(
            "audio input missing: {}",
            audio.display()
        )));
    }
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let result = Command::new("ffmpeg")
        .args(merge_args(video, audio, output))
        .output()
        .map_err(|e| MediagenError::Merge(format!("failed to run ffmpeg: {}", e)))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(5)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(MediagenError::Merge(format!(
            "ffmpeg exited with {}: {}",
            result.status, tail
        )));
    }

    Ok(output.to_path_buf())
}
