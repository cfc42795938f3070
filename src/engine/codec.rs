//! Launchd job document codec.
//!
//! [`encode`] turns a [`Schedule`] into the property-list document launchd
//! consumes, including the bash action script that applies the warmth
//! change at fire time. [`decode`] is the reverse path used by the rescan:
//! a strict decode of the calendar trigger (failure skips the file),
//! followed by a best-effort scan of the action script for the intensity
//! that was embedded when the job was written.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::{FadeError, Result};
use crate::schedule::Schedule;
use crate::{fade_dirs, nightlight};

/// Intensity assumed when a job's script no longer yields one.
///
/// Hour and minute are what scheduling identity needs; a job whose script
/// was edited out from under us still reloads, at this value, instead of
/// vanishing from the list.
pub const DEFAULT_INTENSITY: i32 = 50;

/// Substring immediately preceding the intensity in generated scripts.
///
/// The decode fallback scans for this marker, and jobs written by earlier
/// releases carry it too. Rephrasing the tool invocation breaks decoding
/// of every previously created job.
pub const INTENSITY_MARKER: &str = "temp ";

/// Calendar trigger block, launchd's `StartCalendarInterval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInterval {
    #[serde(rename = "Hour")]
    pub hour: u8,
    #[serde(rename = "Minute")]
    pub minute: u8,
}

/// On-disk launchd job description for one scheduled warmth change.
///
/// Keys are launchd's and must round-trip through it unmodified. Decode is
/// lenient everywhere except the calendar trigger: a hand-edited file
/// missing the label or arguments still yields its time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LaunchdJob {
    #[serde(default)]
    pub label: String,
    /// Shell invocation wrapping the action script: `["/bin/bash", "-c", script]`.
    #[serde(default)]
    pub program_arguments: Vec<String>,
    pub start_calendar_interval: CalendarInterval,
    /// Always false: jobs fire at their scheduled time, never on load.
    #[serde(default)]
    pub run_at_load: bool,
    #[serde(default)]
    pub standard_out_path: String,
    #[serde(default)]
    pub standard_error_path: String,
}

/// Schedule fields recovered from a decoded job document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedJob {
    pub hour: u8,
    pub minute: u8,
    pub intensity: i32,
}

/// Inputs to action-script generation that come from app config.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    /// Resolved path of the background-set tool.
    pub nightlight_path: PathBuf,
    /// Emit the `afplay` line.
    pub play_sound: bool,
    /// Sound name for both `afplay` and the notification.
    pub sound_name: String,
    /// Emit the `osascript` notification line.
    pub show_notification: bool,
}

impl ScriptOptions {
    /// Resolve script options from config, running nightlight discovery
    /// unless the config pins an explicit path.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            nightlight_path: nightlight::discover(config.nightlight_path.as_deref()),
            play_sound: config.play_sound,
            sound_name: config.sound_name.clone(),
            show_notification: config.show_notification,
        }
    }
}

/// Encode a schedule as a launchd job document.
#[must_use]
pub fn encode(schedule: &Schedule, options: &ScriptOptions) -> LaunchdJob {
    let label = schedule.label();
    LaunchdJob {
        program_arguments: vec![
            "/bin/bash".to_owned(),
            "-c".to_owned(),
            action_script(schedule.intensity, options),
        ],
        start_calendar_interval: CalendarInterval {
            hour: schedule.hour,
            minute: schedule.minute,
        },
        run_at_load: false,
        standard_out_path: fade_dirs::job_stdout_path(&label),
        standard_error_path: fade_dirs::job_stderr_path(&label),
        label,
    }
}

/// Serialize a job document as XML property-list bytes.
pub fn to_xml(job: &LaunchdJob) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    plist::to_writer_xml(&mut buf, job).map_err(|e| FadeError::Codec(e.to_string()))?;
    Ok(buf)
}

/// Decode a job document from property-list bytes.
///
/// Fails only when the document is not a plist or its calendar trigger is
/// missing or non-integer. Intensity recovery cannot fail — see
/// [`DEFAULT_INTENSITY`].
pub fn decode(bytes: &[u8]) -> Result<DecodedJob> {
    let job: LaunchdJob = plist::from_bytes(bytes).map_err(|e| FadeError::Codec(e.to_string()))?;
    Ok(DecodedJob {
        hour: job.start_calendar_interval.hour,
        minute: job.start_calendar_interval.minute,
        intensity: recover_intensity(&job.program_arguments),
    })
}

/// Build the bash script a job runs at fire time.
///
/// The final line is the contract: `"<tool>" temp <intensity>`. The sound
/// and notification lines are opaque payload as far as decoding goes.
fn action_script(intensity: i32, options: &ScriptOptions) -> String {
    let mut script = String::from("#!/bin/bash\n");
    if options.play_sound {
        script.push_str(&format!(
            "afplay /System/Library/Sounds/{}.aiff &\n",
            options.sound_name
        ));
    }
    if options.show_notification {
        script.push_str(&format!(
            "osascript -e 'display notification \"Night Shift warming up to {intensity}%\" \
             with title \"Night Fade\" sound name \"{}\"'\n",
            options.sound_name
        ));
    }
    script.push_str(&format!(
        "\"{}\" {INTENSITY_MARKER}{intensity}\n",
        options.nightlight_path.display()
    ));
    script
}

/// Best-effort intensity recovery from a job's shell invocation.
///
/// Looks at the last `ProgramArguments` element (the script), finds the
/// first [`INTENSITY_MARKER`], and parses the integer token that follows.
fn recover_intensity(program_arguments: &[String]) -> i32 {
    let Some(script) = program_arguments.last() else {
        return DEFAULT_INTENSITY;
    };
    let Some(at) = script.find(INTENSITY_MARKER) else {
        return DEFAULT_INTENSITY;
    };
    parse_leading_int(&script[at + INTENSITY_MARKER.len()..]).unwrap_or(DEFAULT_INTENSITY)
}

/// Parse an optionally signed integer at the start of `text`, skipping
/// leading whitespace.
fn parse_leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn options() -> ScriptOptions {
        ScriptOptions {
            nightlight_path: PathBuf::from("/usr/local/bin/nightlight"),
            play_sound: true,
            sound_name: "Submarine".to_owned(),
            show_notification: true,
        }
    }

    #[test]
    fn encode_decode_round_trips() {
        for (hour, minute, intensity) in [(0, 0, 0), (7, 5, 1), (12, 59, 50), (23, 30, 100)] {
            let schedule = Schedule::new(hour, minute, intensity);
            let bytes = to_xml(&encode(&schedule, &options())).unwrap();
            let decoded = decode(&bytes).unwrap();
            assert_eq!(
                decoded,
                DecodedJob {
                    hour,
                    minute,
                    intensity
                }
            );
        }
    }

    #[test]
    fn encoded_job_matches_launchd_contract() {
        let schedule = Schedule::new(21, 30, 40);
        let job = encode(&schedule, &options());

        assert_eq!(job.label, "com.nightfade.schedule.21.30");
        assert!(!job.run_at_load);
        assert_eq!(job.program_arguments.len(), 3);
        assert_eq!(job.program_arguments[0], "/bin/bash");
        assert_eq!(job.program_arguments[1], "-c");
        assert_eq!(
            job.standard_out_path,
            "/tmp/nightfade-com.nightfade.schedule.21.30.log"
        );
        assert_eq!(
            job.standard_error_path,
            "/tmp/nightfade-com.nightfade.schedule.21.30.error.log"
        );

        let script = &job.program_arguments[2];
        assert!(script.contains("afplay /System/Library/Sounds/Submarine.aiff"));
        assert!(script.contains("display notification"));
        assert!(script.ends_with("\"/usr/local/bin/nightlight\" temp 40\n"));
    }

    #[test]
    fn encoded_xml_uses_launchd_key_names() {
        let bytes = to_xml(&encode(&Schedule::new(6, 0, 80), &options())).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        for key in [
            "Label",
            "ProgramArguments",
            "StartCalendarInterval",
            "Hour",
            "Minute",
            "RunAtLoad",
            "StandardOutPath",
            "StandardErrorPath",
        ] {
            assert!(xml.contains(&format!("<key>{key}</key>")), "missing {key}");
        }
    }

    #[test]
    fn script_lines_are_config_gated() {
        let mut quiet = options();
        quiet.play_sound = false;
        quiet.show_notification = false;

        let job = encode(&Schedule::new(22, 0, 35), &quiet);
        let script = &job.program_arguments[2];
        assert!(!script.contains("afplay"));
        assert!(!script.contains("osascript"));
        // The tool invocation always survives gating.
        assert!(script.contains("temp 35"));
    }

    #[test]
    fn missing_marker_falls_back_to_default() {
        let mut job = encode(&Schedule::new(20, 0, 75), &options());
        job.program_arguments[2] = "#!/bin/bash\necho no tool call here\n".to_owned();
        let decoded = decode(&to_xml(&job).unwrap()).unwrap();
        assert_eq!(decoded.intensity, DEFAULT_INTENSITY);
    }

    #[test]
    fn marker_without_integer_falls_back_to_default() {
        let mut job = encode(&Schedule::new(20, 0, 75), &options());
        job.program_arguments[2] = "\"/usr/local/bin/nightlight\" temp off\n".to_owned();
        let decoded = decode(&to_xml(&job).unwrap()).unwrap();
        assert_eq!(decoded.intensity, DEFAULT_INTENSITY);
    }

    #[test]
    fn empty_program_arguments_fall_back_to_default() {
        let mut job = encode(&Schedule::new(20, 0, 75), &options());
        job.program_arguments.clear();
        let decoded = decode(&to_xml(&job).unwrap()).unwrap();
        assert_eq!(decoded.hour, 20);
        assert_eq!(decoded.intensity, DEFAULT_INTENSITY);
    }

    #[test]
    fn zero_and_out_of_ui_range_intensities_decode_as_data() {
        for intensity in [0, -20, 250] {
            let mut job = encode(&Schedule::new(20, 0, 75), &options());
            job.program_arguments[2] = format!("\"nightlight\" temp {intensity}\n");
            let decoded = decode(&to_xml(&job).unwrap()).unwrap();
            assert_eq!(decoded.intensity, intensity);
        }
    }

    #[test]
    fn missing_calendar_interval_fails_decode() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.nightfade.schedule.9.0</string>
    <key>RunAtLoad</key>
    <false/>
</dict>
</plist>"#;
        assert!(decode(xml).is_err());
    }

    #[test]
    fn garbage_bytes_fail_decode() {
        assert!(decode(b"not a plist at all").is_err());
    }

    #[test]
    fn foreign_keys_are_ignored_on_decode() {
        // launchd plists accumulate keys we never write; decode must not care.
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.nightfade.schedule.18.45</string>
    <key>StartCalendarInterval</key>
    <dict>
        <key>Hour</key>
        <integer>18</integer>
        <key>Minute</key>
        <integer>45</integer>
    </dict>
    <key>ProgramArguments</key>
    <array>
        <string>/bin/bash</string>
        <string>-c</string>
        <string>"nightlight" temp 15</string>
    </array>
    <key>KeepAlive</key>
    <false/>
    <key>Nice</key>
    <integer>5</integer>
</dict>
</plist>"#;
        let decoded = decode(xml).unwrap();
        assert_eq!(
            decoded,
            DecodedJob {
                hour: 18,
                minute: 45,
                intensity: 15
            }
        );
    }

    #[test]
    fn parse_leading_int_handles_signs_and_junk() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7\nrest"), Some(7));
        assert_eq!(parse_leading_int("-13%"), Some(-13));
        assert_eq!(parse_leading_int("+9"), Some(9));
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
