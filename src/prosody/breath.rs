//! Pause classification and breath planning
//!
//! Turns the pause markers of an utterance into timed pauses and decides
//! where the speaker breathes. Timing is estimated from character counts
//! scaled by the regional pace, so breath placement follows the profile.

use super::profile::ProsodicProfile;
use super::utterance::{MarkerKind, ProsodyMarker};
use crate::config::BreathConfig;
use crate::text;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseClass {
    /// Before a conjunction, not marked in writing
    Micro,
    Short,
    Medium,
    Long,
    Paragraph,
    /// Inserted only to let the speaker breathe
    Breath,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pause {
    /// Character offset in the modelled text
    pub position: usize,
    pub pause_class: PauseClass,
    pub duration_ms: u32,
    pub is_breath_point: bool,
    /// Text around the pause, for inspection
    pub context_snippet: String,
    /// Estimated time at which the pause starts, seconds
    pub onset_s: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreathPlan {
    /// Pauses ordered by position
    pub pauses: Vec<Pause>,
    /// Positions of the pauses that are breaths
    pub breath_points: Vec<usize>,
    pub estimated_duration_s: f32,
}

impl BreathPlan {
    pub fn breaths(&self) -> impl Iterator<Item = &Pause> {
        self.pauses.iter().filter(|p| p.is_breath_point)
    }

    /// Total silence added by pauses, seconds
    pub fn total_pause_s(&self) -> f32 {
        self.pauses.iter().map(|p| p.duration_ms as f32 / 1000.0).sum()
    }
}

const CONJUNCTIONS: &[&str] = &[
    "y", "e", "o", "u", "ni", "pero", "aunque", "sino", "porque", "pues", "mientras", "entonces",
];

/// Characters of context kept on each side of a pause
const SNIPPET_RADIUS: usize = 10;

/// Slack for float rounding when comparing onsets against the hard threshold
const TIMING_EPSILON_S: f32 = 1e-4;

/// Plans pauses and breaths for one regional profile
#[derive(Debug, Clone)]
pub struct BreathPauseModeler {
    profile: &'static ProsodicProfile,
    config: BreathConfig,
}

impl BreathPauseModeler {
    pub fn new(profile: &'static ProsodicProfile, config: BreathConfig) -> Self {
        Self { profile, config }
    }

    /// Speaking time per character for this profile
    pub fn seconds_per_char(&self) -> f32 {
        self.config.seconds_per_char / self.profile.pace_multiplier
    }

    /// Build the pause plan of `text` from its utterance markers
    pub fn model(&self, text: &str, markers: &[ProsodyMarker]) -> BreathPlan {
        let chars: Vec<char> = text.chars().collect();
        let mut pauses = self.candidates(&chars, text, markers);
        self.place_breaths(&chars, &mut pauses);

        let spc = self.seconds_per_char();
        let pause_s: f32 = pauses.iter().map(|p| p.duration_ms as f32 / 1000.0).sum();
        let breath_points = pauses
            .iter()
            .filter(|p| p.is_breath_point)
            .map(|p| p.position)
            .collect();

        BreathPlan {
            estimated_duration_s: chars.len() as f32 * spc + pause_s,
            pauses,
            breath_points,
        }
    }

    fn candidates(&self, chars: &[char], text: &str, markers: &[ProsodyMarker]) -> Vec<Pause> {
        let c = &self.config;
        let mut pauses: Vec<Pause> = markers
            .iter()
            .filter_map(|m| {
                let (class, ms) = match m.kind {
                    MarkerKind::PauseShort => (PauseClass::Short, c.short_pause_ms),
                    MarkerKind::PauseMedium => (PauseClass::Medium, c.medium_pause_ms),
                    MarkerKind::PauseLong => (PauseClass::Long, c.long_pause_ms),
                    MarkerKind::PauseParagraph => (PauseClass::Paragraph, c.paragraph_pause_ms),
                    _ => return None,
                };
                Some(self.pause(chars, m.position, class, ms))
            })
            .collect();

        for word in text::words(text) {
            if !CONJUNCTIONS.contains(&word.key().as_str()) {
                continue;
            }
            let previous = chars[..word.start].iter().rev().find(|c| !c.is_whitespace());
            let after_pause = match previous {
                None => true,
                Some(&ch) => matches!(ch, ',' | ';' | ':' | '.' | '!' | '?' | '¿' | '¡'),
            };
            if !after_pause {
                pauses.push(self.pause(chars, word.start, PauseClass::Micro, c.micro_pause_ms));
            }
        }

        pauses.sort_by_key(|p| p.position);
        // Keep the stronger pause when two share a position
        pauses.dedup_by(|later, earlier| {
            if later.position == earlier.position {
                if later.pause_class > earlier.pause_class {
                    std::mem::swap(later, earlier);
                }
                true
            } else {
                false
            }
        });
        pauses
    }

    fn pause(&self, chars: &[char], position: usize, class: PauseClass, ms: u32) -> Pause {
        let is_breath = matches!(class, PauseClass::Paragraph | PauseClass::Breath);
        let duration_ms = if is_breath {
            ms.max(self.config.breath_min_ms)
        } else {
            ms
        };
        let from = position.saturating_sub(SNIPPET_RADIUS);
        let to = (position + SNIPPET_RADIUS).min(chars.len());
        Pause {
            position,
            pause_class: class,
            duration_ms,
            is_breath_point: is_breath,
            context_snippet: chars[from..to].iter().collect(),
            onset_s: 0.0,
        }
    }

    fn make_breath(&self, pause: &mut Pause) {
        // Micro pauses never breathe as such; a promoted one becomes a breath
        if pause.pause_class == PauseClass::Micro {
            pause.pause_class = PauseClass::Breath;
        }
        pause.is_breath_point = true;
        pause.duration_ms = pause.duration_ms.max(self.config.breath_min_ms);
    }

    /// Walk the pauses in order, timing each one and promoting or inserting
    /// breaths so that no stretch exceeds the hard threshold.
    fn place_breaths(&self, chars: &[char], pauses: &mut Vec<Pause>) {
        let spc = self.seconds_per_char();
        let soft = self.config.soft_threshold_s;
        let hard = self.config.hard_threshold_s;

        let mut elapsed_pauses = 0.0f32;
        let mut last_breath_onset = 0.0f32;
        let mut last_breath: Option<usize> = None;
        let mut i = 0;

        // Index `pauses.len()` stands for the end of the text
        while i <= pauses.len() {
            let position = pauses.get(i).map_or(chars.len(), |p| p.position);
            let onset = position as f32 * spc + elapsed_pauses;

            if onset - last_breath_onset > hard + TIMING_EPSILON_S {
                let first_open = last_breath.map_or(0, |b| b + 1);
                if i > first_open {
                    // Promote the latest pause since the last breath and replay from it
                    let j = i - 1;
                    self.make_breath(&mut pauses[j]);
                    elapsed_pauses = pauses[..j]
                        .iter()
                        .map(|p| p.duration_ms as f32 / 1000.0)
                        .sum();
                    i = j;
                    continue;
                }

                let floor = last_breath.map_or(0, |b| pauses[b].position + 1);
                let target_time = last_breath_onset + hard;
                let target = ((target_time - elapsed_pauses) / spc).floor().max(0.0) as usize;
                let target = target.min(position.saturating_sub(1));
                let boundary = (floor..=target)
                    .rev()
                    .find(|&k| chars.get(k).map_or(false, |c| c.is_whitespace()))
                    .or(if target > floor { Some(target) } else { None });

                if let Some(at) = boundary {
                    log::trace!("inserting breath at char {}", at);
                    let breath =
                        self.pause(chars, at, PauseClass::Breath, self.config.breath_min_ms);
                    pauses.insert(i, breath);
                    continue;
                }
                log::warn!("no room for a breath before char {}", position);
            }

            let Some(pause) = pauses.get_mut(i) else {
                break;
            };
            pause.onset_s = onset;
            if pause.pause_class == PauseClass::Paragraph {
                self.make_breath(pause);
            } else if pause.pause_class == PauseClass::Long && onset - last_breath_onset >= soft {
                self.make_breath(pause);
            }
            if pause.is_breath_point {
                last_breath_onset = onset;
                last_breath = Some(i);
            }
            elapsed_pauses += pause.duration_ms as f32 / 1000.0;
            i += 1;
        }
    }
}
