//! Schedule value type and its derived identities.
//!
//! A [`Schedule`] is an immutable (hour, minute, intensity) triple. It is
//! constructed transiently — once when the user asks for a new job, and
//! again for every job file found during a rescan — and is never mutated or
//! stored. The persistent identity of a schedule is its launchd label,
//! which is a function of time-of-day only (see [`job_label`]).

use chrono::NaiveTime;
use uuid::Uuid;

/// Label prefix shared by every job this tool creates.
///
/// Earlier releases wrote this exact string too, so any version of the
/// tool finds jobs created by any other. Changing it orphans every
/// previously registered job.
pub const LABEL_PREFIX: &str = "com.nightfade.schedule.";

/// File extension launchd expects for job descriptions.
pub const JOB_FILE_EXTENSION: &str = "plist";

/// One scheduled warmth change.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// List identity for UI rows. Regenerated at every construction and
    /// never persisted — only (hour, minute) identify a schedule on disk.
    pub id: Uuid,
    /// Wall-clock hour, 0-23.
    pub hour: u8,
    /// Minute of the hour, 0-59.
    pub minute: u8,
    /// Warmth intensity. The UI offers 1-100, but any integer found in
    /// persisted state decodes as-is; launchd imposes no range.
    pub intensity: i32,
}

impl Schedule {
    /// Construct a schedule. No validation happens here: range limits are
    /// a concern of the input fields, not of the value type.
    #[must_use]
    pub fn new(hour: u8, minute: u8, intensity: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            hour,
            minute,
            intensity,
        }
    }

    /// Launchd label for this schedule's job. See [`job_label`].
    #[must_use]
    pub fn label(&self) -> String {
        job_label(self.hour, self.minute)
    }

    /// File name of this schedule's persisted job description.
    #[must_use]
    pub fn file_name(&self) -> String {
        job_file_name(self.hour, self.minute)
    }

    /// 12-hour display label, e.g. `"9:30 PM"`.
    #[must_use]
    pub fn display_time(&self) -> String {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .map(|t| t.format("%-I:%M %p").to_string())
            .unwrap_or_else(|| format!("{}:{:02}", self.hour, self.minute))
    }

    /// Swatch color for this schedule's intensity.
    #[must_use]
    pub fn warmth_color(&self) -> Rgb {
        Rgb::for_intensity(self.intensity)
    }

    /// Sort rank placing noon-11:59pm before midnight-11:59am.
    ///
    /// Hours 0-11 map to 24-35, so a ramp that fades warmth later into the
    /// night lists evening first and pre-dawn last.
    #[must_use]
    pub fn evening_rank(&self) -> (u8, u8) {
        let adjusted = if self.hour < 12 {
            self.hour + 24
        } else {
            self.hour
        };
        (adjusted, self.minute)
    }
}

/// Launchd label for a job at the given time of day.
///
/// Identity is time-of-day ONLY: intensity never contributes, so a second
/// schedule at an occupied (hour, minute) replaces the first. The label is
/// stable across processes and runs, which is what lets the engine locate
/// and unregister a job it did not create in this session.
#[must_use]
pub fn job_label(hour: u8, minute: u8) -> String {
    format!("{LABEL_PREFIX}{hour}.{minute}")
}

/// File name of the persisted job description for a time of day.
#[must_use]
pub fn job_file_name(hour: u8, minute: u8) -> String {
    format!("{}.{JOB_FILE_EXTENSION}", job_label(hour, minute))
}

/// Whether `name` follows this tool's job naming convention.
///
/// Used by the rescan to keep our jobs and skip every foreign file in the
/// LaunchAgents directory.
#[must_use]
pub fn is_job_file_name(name: &str) -> bool {
    name.starts_with(LABEL_PREFIX) && name.ends_with(&format!(".{JOB_FILE_EXTENSION}"))
}

/// An sRGB swatch color, channels in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Swatch color for a warmth intensity: cool white at 0, neutral at 50,
    /// warm orange at 100, matching what Night Shift itself looks like.
    #[must_use]
    pub fn for_intensity(intensity: i32) -> Self {
        if intensity == 0 {
            return Self {
                r: 0.95,
                g: 0.95,
                b: 1.0,
            };
        }
        if intensity <= 50 {
            let factor = intensity as f32 / 50.0;
            Self {
                r: 0.95 + (1.0 - 0.95) * factor,
                g: 0.95 + (0.92 - 0.95) * factor,
                b: 1.0 + (0.85 - 1.0) * factor,
            }
        } else {
            let factor = (intensity - 50) as f32 / 50.0;
            Self {
                r: 1.0,
                g: 0.92 + (0.75 - 0.92) * factor,
                b: 0.85 + (0.55 - 0.85) * factor,
            }
        }
    }
}
