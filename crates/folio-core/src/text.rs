//! # Animated Text
//!
//! Two text effects:
//! - **Segmented reveal**: split a string into words, letters or lines and stagger the
//!   segments into view.
//! - **Typewriter**: cycle through strings, typing and deleting one grapheme at a time.
//!   The typewriter is a pure function of elapsed time, so any frame can be sampled.

use serde::Serialize;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

use crate::node::{MotionBinding, NodeKind, ViewNode};
use crate::variants::names;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentMode {
    #[default]
    Word,
    Letter,
    Line,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub text: String,
    /// Words keep a small inline gap after them.
    pub gap_after: bool,
    /// Lines are followed by a break, except the last one.
    pub break_after: bool,
}

pub fn segment(text: &str, mode: SegmentMode) -> Vec<Segment> {
    let parts: Vec<&str> = match mode {
        SegmentMode::Word => text.split(' ').collect(),
        SegmentMode::Letter => text.graphemes(true).collect(),
        SegmentMode::Line => text.split('\n').collect(),
    };
    let last = parts.len().saturating_sub(1);
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| Segment {
            text: part.to_string(),
            gap_after: mode == SegmentMode::Word,
            break_after: mode == SegmentMode::Line && i < last,
        })
        .collect()
}

/// Builder for a segmented text reveal.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentedReveal {
    pub text: String,
    pub mode: SegmentMode,
    /// Seconds between consecutive segments, also used as the initial offset.
    pub delay: f64,
}

impl SegmentedReveal {
    pub fn new(text: impl Into<String>, mode: SegmentMode) -> Self {
        Self {
            text: text.into(),
            mode,
            delay: 0.1,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn segments(&self) -> Vec<Segment> {
        segment(&self.text, self.mode)
    }

    /// The reveal subtree: a mount-triggered inline run with one node per segment.
    pub fn view(&self) -> ViewNode {
        let segments = self.segments().into_iter().map(|seg| {
            ViewNode::new(NodeKind::Segment {
                text: seg.text,
                gap_after: seg.gap_after,
                break_after: seg.break_after,
            })
            .animate(MotionBinding::variant(names::TEXT_SEGMENT))
        });

        ViewNode::new(NodeKind::Inline)
            .animate(
                MotionBinding::variant(names::TEXT_REVEAL)
                    .custom(self.delay as f32)
                    .on_mount(),
            )
            .children(segments)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypewriterPhase {
    Typing,
    Pausing,
    Deleting,
    /// Only reached without looping: the last string stays typed.
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypewriterFrame {
    pub text: String,
    pub index: usize,
    pub phase: TypewriterPhase,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    strings: Vec<Vec<String>>,
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub pause: Duration,
    pub looping: bool,
}

impl Typewriter {
    pub fn new<S: AsRef<str>>(strings: &[S]) -> Self {
        Self {
            strings: strings
                .iter()
                .map(|s| s.as_ref().graphemes(true).map(str::to_string).collect())
                .collect(),
            type_delay: Duration::from_millis(75),
            delete_delay: Duration::from_millis(50),
            pause: Duration::from_millis(1500),
            looping: true,
        }
    }

    pub fn with_delays(mut self, type_delay: Duration, delete_delay: Duration) -> Self {
        self.type_delay = type_delay;
        self.delete_delay = delete_delay;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn strings(&self) -> Vec<String> {
        self.strings.iter().map(|g| g.concat()).collect()
    }

    fn type_ms(&self, len: usize) -> u128 {
        len as u128 * self.type_delay.as_millis()
    }

    fn delete_ms(&self, len: usize) -> u128 {
        len as u128 * self.delete_delay.as_millis()
    }

    fn cycle_ms(&self, len: usize) -> u128 {
        self.type_ms(len) + self.pause.as_millis() + self.delete_ms(len)
    }

    /// Length of one full pass over every string.
    pub fn period(&self) -> Duration {
        let ms: u128 = self.strings.iter().map(|g| self.cycle_ms(g.len())).sum();
        Duration::from_millis(ms as u64)
    }

    pub fn frame_at(&self, elapsed: Duration) -> TypewriterFrame {
        let done = |text: String, index: usize| TypewriterFrame {
            text,
            index,
            phase: TypewriterPhase::Done,
        };
        if self.strings.is_empty() {
            return done(String::new(), 0);
        }

        let period = self.period().as_millis();
        let mut t = elapsed.as_millis();
        if self.looping && period > 0 {
            t %= period;
        }

        let last = self.strings.len() - 1;
        for (index, graphemes) in self.strings.iter().enumerate() {
            let len = graphemes.len();
            let shown = |count: usize| graphemes[..count.min(len)].concat();

            let typing = self.type_ms(len);
            if t < typing {
                let count = (t / self.type_delay.as_millis().max(1)) as usize;
                return TypewriterFrame {
                    text: shown(count),
                    index,
                    phase: TypewriterPhase::Typing,
                };
            }
            if !self.looping && index == last {
                return done(shown(len), index);
            }
            t -= typing;

            let pause = self.pause.as_millis();
            if t < pause {
                return TypewriterFrame {
                    text: shown(len),
                    index,
                    phase: TypewriterPhase::Pausing,
                };
            }
            t -= pause;

            let deleting = self.delete_ms(len);
            if t < deleting {
                let removed = (t / self.delete_delay.as_millis().max(1)) as usize;
                return TypewriterFrame {
                    text: shown(len - removed),
                    index,
                    phase: TypewriterPhase::Deleting,
                };
            }
            t -= deleting;
        }

        // Only reachable with a zero-length period.
        done(String::new(), last)
    }

    pub fn view(&self) -> ViewNode {
        ViewNode::new(NodeKind::Typewriter {
            strings: self.strings(),
            type_delay_ms: self.type_delay.as_millis() as u64,
            delete_delay_ms: self.delete_delay.as_millis() as u64,
            looping: self.looping,
        })
    }
}
