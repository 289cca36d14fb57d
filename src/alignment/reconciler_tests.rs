use serde_json::Value;

use super::{
    AlignmentReconciler,
    CharacterTiming,
    MatchStrategy,
    SentenceOutcome,
};
use crate::core::{
    LessonContent,
    LessonError,
    SentenceTiming,
    TimedSentence,
    WordTiming,
};

const EPSILON: f64 = 1e-9;

/// One timing per character, `step` seconds each, starting at zero.
fn even_timings(text: &str, step: f64) -> Vec<CharacterTiming> {
    text.chars()
        .enumerate()
        .map(|(i, c)| CharacterTiming {
            text: c.to_string(),
            start: i as f64 * step,
            end: (i + 1) as f64 * step,
        })
        .collect()
}

fn lesson(sentences: &[&str]) -> LessonContent {
    LessonContent::from_sentences(sentences.iter().map(|s| TimedSentence::new(*s, "")).collect())
}

fn assert_timing(timing: &Option<SentenceTiming>, start: f64, end: f64) {
    let timing = timing.as_ref().expect("sentence should have timing");
    assert!((timing.start - start).abs() < EPSILON, "start {} != {}", timing.start, start);
    assert!((timing.end - end).abs() < EPSILON, "end {} != {}", timing.end, end);
    assert!((timing.duration - (end - start)).abs() < EPSILON);
}

fn word_texts(words: &Option<Vec<WordTiming>>) -> Vec<&str> {
    words.as_ref().map(|w| w.iter().map(|t| t.word.as_str()).collect()).unwrap_or_default()
}

#[test]
fn test_two_sentence_lesson() {
    let content = lesson(&["你好！", "我很好，谢谢你。"]);
    let timings = even_timings("你好我很好谢谢你", 0.2);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    let sentences = &result.content.sentences;

    assert!(result.content.has_timings);
    assert_timing(&sentences[0].timing, 0.0, 0.4);
    assert_timing(&sentences[1].timing, 0.4, 1.6);
    assert_eq!(word_texts(&sentences[0].words), vec!["你", "好"]);
    assert_eq!(word_texts(&sentences[1].words), vec!["我", "很", "好", "谢", "谢", "你"]);

    let first_word = &sentences[1].words.as_ref().unwrap()[0];
    assert!((first_word.start - 0.4).abs() < EPSILON);
    assert!((first_word.duration - 0.2).abs() < EPSILON);

    assert_eq!(
        result.report.outcomes,
        vec![
            SentenceOutcome::TimingAssigned { aligned_start: 0, aligned_end: 1 },
            SentenceOutcome::TimingAssigned { aligned_start: 2, aligned_end: 7 },
        ]
    );
    assert!(result.report.baseline_misses.is_empty());
}

#[test]
fn test_empty_timings_fail_fast() {
    let content = lesson(&["你好！"]);
    let result = AlignmentReconciler::default().reconcile(&content, &[]);
    assert!(matches!(result, Err(LessonError::EmptyTimingInput)));
}

#[test]
fn test_unmatched_sentence_keeps_previous_timing() {
    let mut content = lesson(&["你好！", "再见！", "谢谢。"]);
    content.sentences[1].timing = Some(SentenceTiming::new(9.0, 9.5));
    let timings = even_timings("你好谢谢", 0.25);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    let sentences = &result.content.sentences;

    assert_timing(&sentences[0].timing, 0.0, 0.5);
    assert_timing(&sentences[1].timing, 9.0, 9.5);
    assert!(sentences[1].words.is_none());
    assert_timing(&sentences[2].timing, 0.5, 1.0);
    assert_eq!(result.report.skipped(), vec![1]);
    assert_eq!(result.report.matched(), 2);
}

#[test]
fn test_unmatched_sentence_without_timing_stays_untimed() {
    let content = lesson(&["你好！", "再见！"]);
    let timings = even_timings("你好", 0.3);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    assert!(result.content.sentences[1].timing.is_none());
    assert_eq!(result.content.sentences[1], content.sentences[1]);
}

#[test]
fn test_reconcile_is_idempotent() {
    let content = lesson(&["你好！", "我很好，谢谢你。", "你好！"]);
    let timings = even_timings("你好我很好谢谢你你好", 0.2);
    let reconciler = AlignmentReconciler::default();

    let first = reconciler.reconcile(&content, &timings).unwrap();
    let second = reconciler.reconcile(&content, &timings).unwrap();
    let rerun = reconciler.reconcile(&first.content, &timings).unwrap();

    let first_json = serde_json::to_string(&first.content).unwrap();
    assert_eq!(first_json, serde_json::to_string(&second.content).unwrap());
    assert_eq!(first_json, serde_json::to_string(&rerun.content).unwrap());
}

#[test]
fn test_repeated_sentence_with_cursor() {
    let content = lesson(&["你好！", "我很好。", "你好！"]);
    let timings = even_timings("你好我很好你好", 0.5);

    let result = AlignmentReconciler::new(MatchStrategy::Cursor).reconcile(&content, &timings).unwrap();
    let sentences = &result.content.sentences;

    assert_timing(&sentences[0].timing, 0.0, 1.0);
    assert_timing(&sentences[1].timing, 1.0, 2.5);
    assert_timing(&sentences[2].timing, 2.5, 3.5);
}

#[test]
fn test_repeated_sentence_with_first_match() {
    let content = lesson(&["你好！", "我很好。", "你好！"]);
    let timings = even_timings("你好我很好你好", 0.5);

    let reconciler = AlignmentReconciler::new(MatchStrategy::FirstMatch);
    assert_eq!(reconciler.strategy(), MatchStrategy::FirstMatch);

    let result = reconciler.reconcile(&content, &timings).unwrap();
    let sentences = &result.content.sentences;

    // The repeated greeting maps back onto the first one.
    assert_timing(&sentences[0].timing, 0.0, 1.0);
    assert_timing(&sentences[2].timing, 0.0, 1.0);
}

#[test]
fn test_cursor_skips_sentence_only_found_earlier() {
    let content = lesson(&["我很好。", "你好！"]);
    let timings = even_timings("你好我很好", 0.2);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    assert_timing(&result.content.sentences[0].timing, 0.4, 1.0);
    assert!(result.content.sentences[1].timing.is_none());
    assert_eq!(result.report.skipped(), vec![1]);
}

#[test]
fn test_multi_character_tokens() {
    let content = lesson(&["你好！", "谢谢。"]);
    let timings = vec![
        CharacterTiming { text: "你好".to_string(), start: 0.0, end: 0.6 },
        CharacterTiming { text: " ".to_string(), start: 0.6, end: 0.7 },
        CharacterTiming { text: "谢".to_string(), start: 0.7, end: 0.9 },
        CharacterTiming { text: "谢".to_string(), start: 0.9, end: 1.1 },
    ];

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    let sentences = &result.content.sentences;

    assert_timing(&sentences[0].timing, 0.0, 0.6);
    assert_eq!(word_texts(&sentences[0].words), vec!["你好"]);
    assert_timing(&sentences[1].timing, 0.7, 1.1);
    assert_eq!(
        result.report.outcomes[1],
        SentenceOutcome::TimingAssigned { aligned_start: 2, aligned_end: 3 }
    );
}

#[test]
fn test_sentence_missing_from_lesson_text_is_reported() {
    let mut content = lesson(&["你好！", "谢谢。"]);
    content.chinese = "你好！".to_string();
    let timings = even_timings("你好谢谢", 0.2);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    assert_eq!(result.report.baseline_misses, vec![1]);
    assert_timing(&result.content.sentences[1].timing, 0.4, 0.8);
}

#[test]
fn test_punctuation_only_sentence_is_skipped() {
    let content = lesson(&["你好！", "……"]);
    let timings = even_timings("你好", 0.2);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    assert_eq!(
        result.report.outcomes,
        vec![
            SentenceOutcome::TimingAssigned { aligned_start: 0, aligned_end: 1 },
            SentenceOutcome::SkippedNoMatch,
        ]
    );
}

#[test]
fn test_other_fields_are_preserved() {
    let json = r#"{
        "chinese": "你好！",
        "level": "HSK1",
        "sentences": [ { "chinese": "你好！", "english": "Hello!", "speaker": "Li" } ]
    }"#;
    let content: LessonContent = serde_json::from_str(json).unwrap();
    let timings = even_timings("你好", 0.2);

    let result = AlignmentReconciler::default().reconcile(&content, &timings).unwrap();
    let value = serde_json::to_value(&result.content).unwrap();

    assert_eq!(value["level"], "HSK1");
    assert_eq!(value["hasTimings"], Value::Bool(true));
    assert_eq!(value["sentences"][0]["english"], "Hello!");
    assert_eq!(value["sentences"][0]["speaker"], "Li");
    assert_eq!(value["sentences"][0]["words"].as_array().map(Vec::len), Some(2));
}
