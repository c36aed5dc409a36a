// A short real training run on a small CSV, then the chat
// engine answering from what it wrote.

use std::fs;

use medibot::application::chat_engine::{ChatEngine, EngineSettings, EngineStatus};
use medibot::application::train_use_case::{TrainConfig, TrainUseCase};
use medibot::domain::responses::CLARIFICATION_PROMPT;
use medibot::infra::artifact_store::ArtifactStore;
use medibot::infra::metrics::METRICS_HEADER;

const CORPUS: &str = "\
question,answer,category
I have a runny nose,\"Rest, fluids and warm drinks.\",cold
My nose is blocked and I sneeze,Try a saline spray.,cold
Is a sore throat and runny nose a cold?,It sounds like a cold.,cold
My head hurts a lot,Rest in a dark quiet room.,headache
I have a pounding headache,Drink water and rest.,headache
Why does my head ache every morning?,Check your sleep and hydration.,headache
I burned my hand on the stove,Cool the burn under running water.,burn
How do I treat a small burn?,Cool it and cover it loosely.,burn
My finger has a burn blister,Do not pop the blister.,burn
I twisted my ankle,\"Rest, ice, compression, elevation.\",sprain
";

fn tiny_config(data: &std::path::Path, model_dir: &std::path::Path) -> TrainConfig {
    TrainConfig {
        data_path:     Some(data.to_path_buf()),
        model_dir:     model_dir.to_path_buf(),
        max_seq_len:   12,
        embedding_dim: 8,
        filters:       8,
        kernel_size:   3,
        pool_size:     2,
        dense_units:   8,
        dropout:       0.1,
        epochs:        3,
        batch_size:    4,
        ..TrainConfig::default()
    }
}

#[test]
fn train_writes_artifacts_and_engine_answers() {
    let work = tempfile::tempdir().unwrap();
    let data = work.path().join("health.csv");
    let models = work.path().join("models");
    fs::write(&data, CORPUS).unwrap();

    let report = TrainUseCase::new(tiny_config(&data, &models)).execute().unwrap();
    assert_eq!(report.examples, 10);
    assert_eq!(report.num_classes, 4);
    assert_eq!(report.history.len(), 3);

    let store = ArtifactStore::new(&models);
    for path in [
        store.model_path(),
        store.architecture_path(),
        store.config_path(),
        store.vocabulary_path(),
        store.responses_path(),
        store.categories_path(),
        store.metrics_path(),
    ] {
        assert!(path.is_file(), "missing {}", path.display());
    }

    let metrics = fs::read_to_string(store.metrics_path()).unwrap();
    assert_eq!(metrics.lines().next(), Some(METRICS_HEADER));
    assert_eq!(metrics.lines().count(), 4);

    assert_eq!(fs::read_to_string(store.categories_path()).unwrap(), "cold,0\nheadache,1\nburn,2\nsprain,3\n");

    let responses = store.load_responses().unwrap();
    assert_eq!(responses.get(0), Some("Rest, fluids and warm drinks."));
    assert_eq!(responses.len(), 4);

    let engine = ChatEngine::new(EngineSettings {
        model_dir: models.clone(),
        ..EngineSettings::default()
    });
    assert_eq!(engine.warm_up(), EngineStatus::Ready);

    for question in ["I have a runny nose", "", "completely unrelated words"] {
        let reply = engine.get_response(question);
        assert!(
            reply == CLARIFICATION_PROMPT || responses.iter().any(|(_, r)| r == reply),
            "unexpected reply {reply:?} for {question:?}"
        );
    }
}

#[test]
fn short_sequence_length_fails_before_writing_anything() {
    let work = tempfile::tempdir().unwrap();
    let data = work.path().join("health.csv");
    let models = work.path().join("models");
    fs::write(&data, CORPUS).unwrap();

    let cfg = TrainConfig { max_seq_len: 5, ..tiny_config(&data, &models) };
    let err = TrainUseCase::new(cfg).execute().unwrap_err();
    assert!(format!("{err:#}").contains("too short"));
    assert!(!models.exists());
}
