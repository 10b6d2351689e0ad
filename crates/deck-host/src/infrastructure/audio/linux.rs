//! Linux master-volume access through the ALSA `amixer` tool.
//!
//! Shells out to `amixer sget/sset Master` rather than linking the ALSA
//! libraries; the output is parsed for the `[NN%]` and `[on]`/`[off]`
//! markers.

#![cfg(target_os = "linux")]

use std::process::Command;

use crate::application::actuate::ActuationError;
use crate::application::volume::AudioEndpoint;

const MIXER_CONTROL: &str = "Master";

/// ALSA-backed master-volume endpoint.
pub struct AmixerEndpoint;

impl AmixerEndpoint {
    pub fn new() -> Self {
        Self
    }

    fn amixer(&self, args: &[&str]) -> Result<String, ActuationError> {
        let output = Command::new("amixer")
            .args(args)
            .output()
            .map_err(|e| ActuationError::Platform(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ActuationError::Platform(format!("amixer failed: {stderr}")));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for AmixerEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEndpoint for AmixerEndpoint {
    fn volume(&self) -> Result<f32, ActuationError> {
        let stdout = self.amixer(&["sget", MIXER_CONTROL])?;
        parse_percent(&stdout)
            .map(|p| p as f32 / 100.0)
            .ok_or_else(|| ActuationError::Platform("no volume in amixer output".into()))
    }

    fn set_volume(&self, scalar: f32) -> Result<(), ActuationError> {
        let percent = (scalar.clamp(0.0, 1.0) * 100.0).round() as u32;
        self.amixer(&["sset", MIXER_CONTROL, &format!("{percent}%")])?;
        Ok(())
    }

    fn muted(&self) -> Result<bool, ActuationError> {
        let stdout = self.amixer(&["sget", MIXER_CONTROL])?;
        if stdout.contains("[off]") {
            Ok(true)
        } else if stdout.contains("[on]") {
            Ok(false)
        } else {
            Err(ActuationError::Platform("no mute marker in amixer output".into()))
        }
    }

    fn set_muted(&self, muted: bool) -> Result<(), ActuationError> {
        let state = if muted { "mute" } else { "unmute" };
        self.amixer(&["sset", MIXER_CONTROL, state])?;
        Ok(())
    }
}

/// Finds the first `[NN%]` token in amixer output.
fn parse_percent(stdout: &str) -> Option<u32> {
    stdout
        .split_whitespace()
        .find(|part| part.starts_with('[') && part.ends_with("%]"))
        .and_then(|part| part.trim_start_matches('[').trim_end_matches("%]").parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_finds_the_volume_token() {
        let stdout = "Simple mixer control 'Master',0\n  Mono: Playback 52 [67%] [-12.00dB] [on]\n";
        assert_eq!(parse_percent(stdout), Some(67));
    }

    #[test]
    fn test_parse_percent_rejects_output_without_percent() {
        assert_eq!(parse_percent("no markers here [on]"), None);
    }
}
