use std::{
    env,
    io::{
        self,
        Write,
    },
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use hanzi_lesson::{
    persistence::{
        read_alignment_cache,
        read_lesson,
    },
    segmentation::MaxMatchSegmenter,
    DictionaryStore,
    LessonError,
    LessonSettings,
    VocabularyExtractor,
};
use tracing::{
    error,
    info,
    warn,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: hanzi-lesson <dictionary.json|-> <lesson.json> [alignment-cache.json]";

#[derive(Debug, PartialEq)]
struct CliArgs {
    /// `None` when given as `-`, meaning the dictionary from the settings file.
    dictionary: Option<PathBuf>,
    lesson: PathBuf,
    alignment_cache: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, LessonError> {
    let (dictionary, lesson, alignment_cache) = match args {
        [dictionary, lesson] => (dictionary, lesson, None),
        [dictionary, lesson, cache] => (dictionary, lesson, Some(PathBuf::from(cache))),
        _ => return Err(LessonError::Custom(USAGE.to_string())),
    };

    Ok(CliArgs {
        dictionary: (dictionary != "-").then(|| PathBuf::from(dictionary)),
        lesson: PathBuf::from(lesson),
        alignment_cache,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), LessonError> {
    let total_start = Instant::now();
    let settings = LessonSettings::load();
    let mut lesson = read_lesson(&args.lesson)?;
    info!(sentences = lesson.sentences.len(), "Loaded lesson {:?}", args.lesson);

    if let Some(cache_path) = &args.alignment_cache {
        let record = read_alignment_cache(cache_path)?;
        let timings = record.response.timings();
        let reconciliation = settings.reconciler().reconcile(&lesson, &timings)?;

        let skipped = reconciliation.report.skipped();
        if !skipped.is_empty() {
            warn!(?skipped, "Some sentences were not found in the aligned text");
        }
        lesson = reconciliation.content;
    }

    let dictionary = match args.dictionary {
        Some(path) => DictionaryStore::from_path(path, settings.use_dictionary_cache),
        None => settings.dictionary_store(),
    };
    dictionary.load()?;
    let stats = dictionary.stats();
    info!(entries = stats.entry_count, "Dictionary ready");

    let segmenter = MaxMatchSegmenter::with_max_word_length(&dictionary, settings.max_word_length);
    let extractor = VocabularyExtractor::with_segmenter(&dictionary, segmenter);
    let extraction = extractor.expand(&lesson, &lesson.vocabulary)?;
    if !extraction.is_complete() {
        warn!(status = ?extraction.status, "Vocabulary extracted from characters only");
    }
    lesson.vocabulary = extraction.items;

    let json = serde_json::to_string_pretty(&lesson)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;

    info!("Processing completed ({:.1}s)", total_start.elapsed().as_secs_f32());
    Ok(())
}
