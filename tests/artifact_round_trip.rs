// Saving then loading each artifact through the store gives
// back the same value and, saved again, the same bytes.

use std::fs;

use medibot::data::{sample_corpus::SampleCorpus, vocabulary::Vocabulary};
use medibot::domain::responses::LabelResponseMap;
use medibot::domain::traits::CorpusSource;
use medibot::error::EngineError;
use medibot::infra::artifact_store::ArtifactStore;

#[test]
fn vocabulary_and_responses_round_trip_byte_for_byte() {
    let examples  = SampleCorpus.load_all().unwrap();
    let questions: Vec<&str> = examples.iter().map(|e| e.question.as_str()).collect();
    let vocab     = Vocabulary::fitted(&questions, 10_000);
    let responses = LabelResponseMap::from_examples(&examples);

    let first  = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = ArtifactStore::create(first.path()).unwrap();
    let b = ArtifactStore::create(second.path()).unwrap();

    a.save_vocabulary(&vocab).unwrap();
    a.save_responses(&responses).unwrap();
    a.save_categories(&SampleCorpus::categories()).unwrap();

    let vocab_back     = a.load_vocabulary().unwrap();
    let responses_back = a.load_responses().unwrap();
    let categories     = a.load_categories().unwrap();
    assert_eq!(vocab_back, vocab);
    assert_eq!(responses_back, responses);
    assert_eq!(categories, SampleCorpus::categories());

    // Ids are unchanged after the round trip
    for q in &questions {
        assert_eq!(vocab_back.encode(q, 100), vocab.encode(q, 100));
    }

    b.save_vocabulary(&vocab_back).unwrap();
    b.save_responses(&responses_back).unwrap();
    b.save_categories(&categories).unwrap();
    for (x, y) in [
        (a.vocabulary_path(), b.vocabulary_path()),
        (a.responses_path(), b.responses_path()),
        (a.categories_path(), b.categories_path()),
    ] {
        assert_eq!(fs::read(x).unwrap(), fs::read(y).unwrap());
    }
}

#[test]
fn each_artifact_is_reported_on_its_own() {
    let dir   = tempfile::tempdir().unwrap();
    let store = ArtifactStore::create(dir.path()).unwrap();

    store.save_responses(&LabelResponseMap::fallback_defaults()).unwrap();
    fs::write(store.vocabulary_path(), "[]").unwrap();

    assert!(store.load_responses().is_ok());
    assert!(matches!(store.load_vocabulary(), Err(EngineError::ArtifactCorrupt { .. })));
    assert!(matches!(store.load_architecture(), Err(EngineError::ArtifactMissing { .. })));
    assert!(matches!(store.load_categories(), Err(EngineError::ArtifactMissing { .. })));
}
