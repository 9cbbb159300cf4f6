//! Guilt level table and the per-level presentation derived from it.

/// Minimum attempt count for each guilt level, indexed by level.
pub const GUILT_THRESHOLDS: [u32; 6] = [0, 1, 3, 6, 11, 16];

pub const MAX_GUILT_LEVEL: u8 = (GUILT_THRESHOLDS.len() - 1) as u8;

/// Guilt level reached after `attempts` declines. Pure step function, never decreases.
pub fn guilt_level(attempts: u32) -> u8 {
    GUILT_THRESHOLDS
        .iter()
        .rposition(|&threshold| attempts >= threshold)
        .unwrap_or(0) as u8
}

/// Attempt count at which `level` is first reached.
pub fn level_entry(level: u8) -> u32 {
    GUILT_THRESHOLDS[level.min(MAX_GUILT_LEVEL) as usize]
}

/// Coarse state of the interaction, derived from the controller fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Escalating(u8),
    /// Level 5, decline control still on screen (fading out).
    Vanishing,
    /// Level 5, decline control removed.
    Hidden,
    Accepted,
}

/// Background colour scheme of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Excited,
}

impl Mood {
    pub fn for_state(level: u8, accepted: bool) -> Mood {
        if accepted {
            Mood::Excited
        } else if (2..MAX_GUILT_LEVEL).contains(&level) {
            Mood::Sad
        } else {
            Mood::Happy
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Mood::Happy => "mood-happy",
            Mood::Sad => "mood-sad",
            Mood::Excited => "mood-excited",
        }
    }
}

pub const DECLINE_LABELS: [&str; 6] = [
    "No",
    "You sure about that?",
    "Think carefully...",
    "Please reconsider!",
    "I'm disappointed...",
    "Okay fine, I guess it's yes then",
];

/// Label on the decline control; a cross is appended until the final level.
pub fn decline_label(level: u8) -> String {
    let text = DECLINE_LABELS[level.min(MAX_GUILT_LEVEL) as usize];
    if level < MAX_GUILT_LEVEL {
        format!("{text} ✗")
    } else {
        text.to_string()
    }
}

/// Shrink factor of the decline control.
pub fn decline_scale(level: u8) -> f64 {
    1.0 - f64::from(level.min(MAX_GUILT_LEVEL)) * 0.15
}

pub fn decline_opacity(level: u8) -> f64 {
    match level {
        4 => 0.3,
        l if l >= MAX_GUILT_LEVEL => 0.0,
        _ => 1.0,
    }
}

/// Accept control scale: linear growth per attempt, capped.
pub fn accept_scale(attempts: u32, growth: f64, max: f64) -> f64 {
    (1.0 + f64::from(attempts) * growth).min(max)
}
