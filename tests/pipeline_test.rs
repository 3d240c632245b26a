//! End-to-end properties of the feature pipeline through the public API.

use qsim::features::{FEATURE_NAMES, FeatureGroup, offsets};
use qsim::{FEATURE_COUNT, PipelineError, QuestionPair, QuestionPipeline, Vocabulary};

fn vocabulary() -> Vocabulary {
    Vocabulary::from_tokens([
        "what", "is", "the", "capital", "of", "france", "how", "do", "i", "learn", "rust",
        "python", "best", "way", "to", "cook", "pasta", "can", "not", "dollar", "5000",
    ])
    .unwrap()
}

fn pipeline() -> QuestionPipeline {
    QuestionPipeline::builder()
        .vocabulary(vocabulary())
        .build()
        .unwrap()
}

const SAMPLE_PAIRS: &[(&str, &str)] = &[
    ("What is the capital of France?", "What is the capital of France"),
    ("How to learn Python?", "What is the best way to cook pasta?"),
    ("How do I learn Rust?", "What is the best way to learn Rust?"),
    ("I can't cook", "I cannot cook pasta"),
    ("Is $5k a lot?", "what is 5000 dollar"),
    ("???", "What is the capital?"),
    ("<b>Rust</b>", "rust &amp; python"),
    ("zebra", "xylophone"),
];

#[test]
fn test_every_vector_has_23_finite_fields() {
    let p = pipeline();
    for (a, b) in SAMPLE_PAIRS {
        let features = p.compute_features(a, b).unwrap();
        assert_eq!(features.len(), FEATURE_COUNT);
        assert!(features.is_finite(), "non-finite features for {a:?} / {b:?}");
    }
}

#[test]
fn test_ranges_hold() {
    let p = pipeline();
    for (a, b) in SAMPLE_PAIRS {
        let f = p.compute_features(a, b).unwrap();

        let cosine = f.cosine_similarity();
        assert!((0.0..=1.0).contains(&cosine), "cosine {cosine} for {a:?}");

        for &score in f.group(FeatureGroup::Fuzzy) {
            assert!((0.0..=100.0).contains(&score));
            assert_eq!(score.fract(), 0.0, "fuzzy scores are whole numbers");
        }

        for offset in offsets::WORD_RATIO_MIN..=offsets::TOKEN_RATIO_MAX {
            assert!(f[offset] >= 0.0 && f[offset] <= 1.0, "{} = {}", FEATURE_NAMES[offset], f[offset]);
        }

        assert!(f[offsets::LAST_WORD_MATCH] == 0.0 || f[offsets::LAST_WORD_MATCH] == 1.0);
        assert!(f[offsets::FIRST_WORD_MATCH] == 0.0 || f[offsets::FIRST_WORD_MATCH] == 1.0);
        assert!(f[offsets::LONGEST_SUBSTRING_RATIO] <= 0.5);
    }
}

#[test]
fn test_symmetric_fields_do_not_depend_on_order() {
    let p = pipeline();
    let symmetric = [
        offsets::COMMON_WORDS,
        offsets::TOTAL_WORDS,
        offsets::COMMON_TOTAL_RATIO,
        offsets::WORD_RATIO_MIN,
        offsets::WORD_RATIO_MAX,
        offsets::STOP_RATIO_MIN,
        offsets::STOP_RATIO_MAX,
        offsets::TOKEN_RATIO_MIN,
        offsets::TOKEN_RATIO_MAX,
        offsets::LAST_WORD_MATCH,
        offsets::FIRST_WORD_MATCH,
        offsets::ABS_LENGTH_DIFF,
        offsets::MEAN_LENGTH,
        offsets::LONGEST_SUBSTRING_RATIO,
        offsets::FUZZ_RATIO,
        offsets::TOKEN_SORT_RATIO,
        offsets::TOKEN_SET_RATIO,
        offsets::COSINE_SIMILARITY,
    ];

    for (a, b) in SAMPLE_PAIRS {
        let ab = p.compute_features(a, b).unwrap();
        let ba = p.compute_features(b, a).unwrap();
        for offset in symmetric {
            assert!(
                (ab[offset] - ba[offset]).abs() < 1e-12,
                "{} differs for {a:?} / {b:?}",
                FEATURE_NAMES[offset]
            );
        }
        assert_eq!(ab[offsets::Q1_LENGTH], ba[offsets::Q2_LENGTH]);
        assert_eq!(ab[offsets::Q1_WORD_COUNT], ba[offsets::Q2_WORD_COUNT]);
    }
}

#[test]
fn test_identical_in_vocabulary_questions() {
    let f = pipeline()
        .compute_features("How do I learn Rust?", "How do I learn Rust?")
        .unwrap();

    assert!((f.cosine_similarity() - 1.0).abs() < 1e-9);
    assert_eq!(f[offsets::FUZZ_RATIO], 100.0);
    assert_eq!(f[offsets::FUZZ_PARTIAL_RATIO], 100.0);
    assert_eq!(f[offsets::TOKEN_SORT_RATIO], 100.0);
    assert_eq!(f[offsets::TOKEN_SET_RATIO], 100.0);
    assert_eq!(f[offsets::COMMON_WORDS], 5.0);
    assert_eq!(f[offsets::TOTAL_WORDS], 10.0);
}

#[test]
fn test_normalization_is_idempotent_for_scoring() {
    let p = pipeline();
    let raw = "I can't believe it's $5k!";
    let once = p.normalize(raw);
    let twice = p.normalize(once.text());
    assert_eq!(once, twice);
}

#[test]
fn test_compare_uses_strict_threshold() {
    let p = pipeline();
    let result = p
        .compare("What is the capital of France?", "What is the capital of France", 0.85)
        .unwrap();
    assert!(result.is_duplicate);

    let exact_edge = p
        .compare("What is the capital of France?", "What is the capital of France", 1.0)
        .unwrap();
    assert!(!exact_edge.is_duplicate);
}

#[test]
fn test_unrelated_questions_score_low() {
    let score = pipeline()
        .score("How to learn Python?", "What is the best way to cook pasta?")
        .unwrap();
    assert!(score < 0.3, "got {score}");
}

#[test]
fn test_invalid_inputs() {
    let p = pipeline();
    assert!(matches!(
        p.compute_features("", "What?"),
        Err(PipelineError::InvalidInput { .. })
    ));
    assert!(matches!(
        p.compare("a", "b", f64::NAN),
        Err(PipelineError::InvalidThreshold(_))
    ));
    assert!(matches!(
        QuestionPipeline::builder().build(),
        Err(PipelineError::VocabularyUnavailable)
    ));
}

#[test]
fn test_batch_matches_single_pair_scoring() {
    let p = pipeline();
    let pairs: Vec<QuestionPair> = SAMPLE_PAIRS
        .iter()
        .map(|(a, b)| QuestionPair::new(*a, *b))
        .collect();

    let batch = p.compute_batch(&pairs);
    assert_eq!(batch.len(), pairs.len());
    for (pair, computed) in pairs.iter().zip(batch) {
        let single = p.compute_features(&pair.question_a, &pair.question_b).unwrap();
        assert_eq!(computed.unwrap(), single);
    }
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    let p = std::sync::Arc::new(pipeline());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = p.clone();
            std::thread::spawn(move || p.score("How do I learn Rust?", "learn rust").unwrap())
        })
        .collect();

    let scores: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] == w[1]));
}
