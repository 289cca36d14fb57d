use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// How a vocabulary item was discovered. Items supplied by the caller carry no type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabType {
    Character,
    Word,
}

impl VocabType {
    pub fn rank(&self) -> u8 {
        match self {
            VocabType::Character => 0,
            VocabType::Word => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub chinese: String,
    #[serde(default)]
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vocab_type: Option<VocabType>,
}

impl VocabularyItem {
    pub fn base(chinese: impl Into<String>, english: impl Into<String>) -> Self {
        VocabularyItem {
            chinese: chinese.into(),
            english: english.into(),
            pinyin: None,
            vocab_type: None,
        }
    }

    pub fn discovered(
        chinese: String,
        english: String,
        pinyin: Option<String>,
        vocab_type: VocabType,
    ) -> Self {
        VocabularyItem { chinese, english, pinyin, vocab_type: Some(vocab_type) }
    }

    // characters, then words, then caller-supplied entries
    pub fn sort_rank(&self) -> u8 {
        self.vocab_type.map_or(2, |t| t.rank())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceTiming {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

impl SentenceTiming {
    pub fn new(start: f64, end: f64) -> Self {
        SentenceTiming { start, end, duration: (end - start).max(0.0) }
    }
}

/// Timing of a single aligned token inside a sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

impl WordTiming {
    pub fn new(word: String, start: f64, end: f64) -> Self {
        WordTiming { word, start, end, duration: (end - start).max(0.0) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSentence {
    pub chinese: String,
    #[serde(default)]
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<SentenceTiming>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordTiming>>,
    /// Fields this crate does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TimedSentence {
    pub fn new(chinese: impl Into<String>, english: impl Into<String>) -> Self {
        TimedSentence {
            chinese: chinese.into(),
            english: english.into(),
            timing: None,
            words: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonContent {
    pub chinese: String,
    #[serde(default)]
    pub sentences: Vec<TimedSentence>,
    #[serde(rename = "hasTimings", default)]
    pub has_timings: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vocabulary: Vec<VocabularyItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LessonContent {
    /// Builds a lesson whose full text is the concatenation of its sentences.
    pub fn from_sentences(sentences: Vec<TimedSentence>) -> Self {
        let chinese = sentences.iter().map(|s| s.chinese.as_str()).collect::<String>();
        LessonContent {
            chinese,
            sentences,
            has_timings: false,
            vocabulary: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Full text followed by every sentence, the input for vocabulary extraction.
    /// Parts are separated by a newline so no word spans two of them.
    pub fn combined_text(&self) -> String {
        let mut text = self.chinese.clone();
        for sentence in &self.sentences {
            text.push('\n');
            text.push_str(&sentence.chinese);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_rank() {
        let character = VocabularyItem::discovered(
            "你".to_string(),
            "you".to_string(),
            None,
            VocabType::Character,
        );
        let word =
            VocabularyItem::discovered("你好".to_string(), "hello".to_string(), None, VocabType::Word);
        let base = VocabularyItem::base("谢谢", "thanks");

        assert_eq!(character.sort_rank(), 0);
        assert_eq!(word.sort_rank(), 1);
        assert_eq!(base.sort_rank(), 2);
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let timing = SentenceTiming::new(1.5, 1.0);
        assert_eq!(timing.duration, 0.0);
        assert_eq!(WordTiming::new("好".to_string(), 0.2, 0.4).word, "好");
    }

    #[test]
    fn test_lesson_json_keeps_unknown_fields() {
        let json = r#"{
            "chinese": "你好！",
            "title": "Greetings",
            "sentences": [
                { "chinese": "你好！", "english": "Hello!", "speaker": "A" }
            ]
        }"#;

        let lesson: LessonContent = serde_json::from_str(json).unwrap();
        assert!(!lesson.has_timings);
        assert_eq!(lesson.extra.get("title"), Some(&Value::String("Greetings".to_string())));
        assert_eq!(
            lesson.sentences[0].extra.get("speaker"),
            Some(&Value::String("A".to_string()))
        );

        let round_trip = serde_json::to_value(&lesson).unwrap();
        assert_eq!(round_trip["title"], "Greetings");
        assert_eq!(round_trip["hasTimings"], false);
        assert_eq!(round_trip["sentences"][0]["speaker"], "A");
        assert!(round_trip["sentences"][0].get("timing").is_none());
    }

    #[test]
    fn test_vocabulary_type_wire_format() {
        let item: VocabularyItem =
            serde_json::from_str(r#"{ "chinese": "好", "english": "good", "type": "character" }"#)
                .unwrap();
        assert_eq!(item.vocab_type, Some(VocabType::Character));

        let base: VocabularyItem =
            serde_json::from_str(r#"{ "chinese": "好", "english": "good" }"#).unwrap();
        assert_eq!(base.vocab_type, None);
        assert!(serde_json::to_value(&base).unwrap().get("type").is_none());
    }

    #[test]
    fn test_combined_text() {
        let lesson = LessonContent::from_sentences(vec![
            TimedSentence::new("你好！", "Hello!"),
            TimedSentence::new("谢谢。", "Thanks."),
        ]);
        assert_eq!(lesson.chinese, "你好！谢谢。");
        assert_eq!(lesson.combined_text(), "你好！谢谢。\n你好！\n谢谢。");
    }
}
