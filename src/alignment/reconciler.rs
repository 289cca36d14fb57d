use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use super::CharacterTiming;
use crate::core::{
    utils::{
        find_from,
        CjkText,
    },
    LessonContent,
    LessonError,
    SentenceTiming,
    TimedSentence,
    WordTiming,
};

/// Where the search for each sentence starts inside the aligned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Continue after the end of the previous match, so matches never overlap and
    /// stay in sentence order.
    #[default]
    Cursor,
    /// Always take the first occurrence in the aligned text.
    FirstMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceOutcome {
    /// Indices into the timing array of the first and last matched token.
    TimingAssigned { aligned_start: usize, aligned_end: usize },
    SkippedNoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    pub outcomes: Vec<SentenceOutcome>,
    /// Sentences that do not occur in the authored lesson text.
    pub baseline_misses: Vec<usize>,
}

impl ReconcileReport {
    pub fn matched(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, SentenceOutcome::TimingAssigned { .. })).count()
    }

    pub fn skipped(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| **o == SentenceOutcome::SkippedNoMatch)
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub content: LessonContent,
    pub report: ReconcileReport,
}

/// The provider transcript, one entry per matchable code point, each remembering
/// which timing token it came from.
struct AlignedText<'t> {
    chars: Vec<char>,
    owners: Vec<usize>,
    timings: &'t [CharacterTiming],
}

impl<'t> AlignedText<'t> {
    fn new(timings: &'t [CharacterTiming]) -> Self {
        let mut chars = Vec::new();
        let mut owners = Vec::new();
        for (index, timing) in timings.iter().enumerate() {
            for c in timing.text.alignment_key() {
                chars.push(c);
                owners.push(index);
            }
        }
        AlignedText { chars, owners, timings }
    }

    fn find(&self, key: &[char], from: usize) -> Option<(usize, usize)> {
        find_from(&self.chars, key, from).map(|start| (start, start + key.len() - 1))
    }

    fn sentence_timing(&self, start: usize, end: usize) -> Option<SentenceTiming> {
        let first = self.timings.get(self.owners[start])?;
        let last = self.timings.get(self.owners[end])?;
        Some(SentenceTiming::new(first.start, last.end))
    }

    fn word_timings(&self, start: usize, end: usize) -> Vec<WordTiming> {
        let mut owners: Vec<usize> = self.owners[start..=end].to_vec();
        owners.dedup();
        owners
            .into_iter()
            .filter_map(|index| self.timings.get(index))
            .map(|t| WordTiming::new(t.text.clone(), t.start, t.end))
            .collect()
    }
}

/// Recovers sentence and per-character timing from a provider's character timings.
///
/// Sentences are located positionally in the text reconstructed from the timings,
/// since the same character can occur many times in a lesson. A sentence that
/// cannot be found keeps whatever timing it had before.
#[derive(Debug, Clone, Default)]
pub struct AlignmentReconciler {
    strategy: MatchStrategy,
}

impl AlignmentReconciler {
    pub fn new(strategy: MatchStrategy) -> Self {
        AlignmentReconciler { strategy }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn reconcile(
        &self,
        content: &LessonContent,
        timings: &[CharacterTiming],
    ) -> Result<Reconciliation, LessonError> {
        if timings.is_empty() {
            return Err(LessonError::EmptyTimingInput);
        }

        let aligned = AlignedText::new(timings);
        let original = content.chinese.alignment_key();
        let mut report = ReconcileReport::default();
        let mut sentences: Vec<TimedSentence> = Vec::with_capacity(content.sentences.len());
        let mut cursor = 0;

        for (index, sentence) in content.sentences.iter().enumerate() {
            let key = sentence.chinese.alignment_key();

            if find_from(&original, &key, 0).is_none() {
                warn!(index, sentence = %sentence.chinese, "Sentence not found in lesson text");
                report.baseline_misses.push(index);
            }

            let from = match self.strategy {
                MatchStrategy::Cursor => cursor,
                MatchStrategy::FirstMatch => 0,
            };

            let matched = aligned.find(&key, from).and_then(|(start, end)| {
                aligned.sentence_timing(start, end).map(|timing| (start, end, timing))
            });

            match matched {
                Some((start, end, timing)) => {
                    debug!(
                        index,
                        start = timing.start,
                        end = timing.end,
                        "Assigned sentence timing"
                    );
                    let mut updated = sentence.clone();
                    updated.timing = Some(timing);
                    updated.words = Some(aligned.word_timings(start, end));
                    sentences.push(updated);

                    report.outcomes.push(SentenceOutcome::TimingAssigned {
                        aligned_start: aligned.owners[start],
                        aligned_end: aligned.owners[end],
                    });
                    cursor = end + 1;
                }
                None => {
                    let failure =
                        LessonError::SentenceMatch { index, sentence: sentence.chinese.clone() };
                    warn!(error = %failure, "Keeping previous timing");
                    sentences.push(sentence.clone());
                    report.outcomes.push(SentenceOutcome::SkippedNoMatch);
                }
            }
        }

        info!(
            matched = report.matched(),
            skipped = report.outcomes.len() - report.matched(),
            strategy = ?self.strategy,
            "Reconciled sentence timings"
        );

        let mut content = content.clone();
        content.sentences = sentences;
        content.has_timings = true;

        Ok(Reconciliation { content, report })
    }
}
