use procrepo_core::errors::ExErrorKind;
use procrepo_core::logging_facility::Profile;
use procrepo_engine::{Engine, EngineConfig};
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> EngineConfig {
    EngineConfig {
        name: "test".to_string(),
        database: Some(dir.path().join("engine.db")),
        log_profile: Profile::Test,
    }
}

#[test]
fn test_flush_then_reopen_restores_catalog() {
    let dir = TempDir::new().unwrap();

    let (dep_id, def_id, model_id) = {
        let mut engine = Engine::new(config_for(&dir)).unwrap();
        let repo = engine.repository();
        let dep = repo
            .create_deployment_builder()
            .name("orders")
            .add_resource("order.bpmn", b"<process/>".to_vec())
            .deploy();
        let def = repo.save_process_definition("order", "Order", &dep.id);
        repo.suspend_process_definition_by_key("order").unwrap();
        let model = repo.new_model("Order draft", "order");
        repo.add_model_editor_source(&model.id, b"{}".to_vec())
            .unwrap();
        engine.flush().unwrap();
        (dep.id, def.id, model.id)
    };

    let engine = Engine::new(config_for(&dir)).unwrap();
    let repo = engine.repository();

    assert!(engine.is_persistent());
    assert_eq!(
        repo.get_resource_as_bytes(&dep_id, "order.bpmn").unwrap(),
        b"<process/>".to_vec()
    );
    assert!(repo.get_process_definition(&def_id).unwrap().suspended);
    assert_eq!(repo.get_model_editor_source(&model_id).unwrap(), b"{}".to_vec());
}

#[test]
fn test_unflushed_changes_are_not_persisted() {
    let dir = TempDir::new().unwrap();

    {
        let engine = Engine::new(config_for(&dir)).unwrap();
        engine.repository().create_deployment("lost");
    }

    let engine = Engine::new(config_for(&dir)).unwrap();
    assert!(engine.repository().list_deployments().is_empty());
}

#[test]
fn test_config_file_drives_engine() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("from-config.db");
    let config_path = dir.path().join("procrepo.toml");
    std::fs::write(
        &config_path,
        format!(
            "name = \"configured\"\ndatabase = {:?}\nlog_profile = \"test\"\n",
            db_path.display().to_string()
        ),
    )
    .unwrap();

    let mut engine = Engine::new(EngineConfig::load(&config_path).unwrap()).unwrap();
    engine.repository().new_model("M", "m");
    engine.flush().unwrap();

    assert_eq!(engine.name(), "configured");
    assert!(db_path.exists());
}

#[test]
fn test_stale_engine_flush_is_refused() {
    let dir = TempDir::new().unwrap();
    let mut first = Engine::new(config_for(&dir)).unwrap();
    let mut second = Engine::new(config_for(&dir)).unwrap();

    let a = first.repository().save_process_definition("k", "A", "dep");
    second.repository().save_process_definition("k", "B", "dep");

    first.flush().unwrap();
    let err = second.flush().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.request_id(), Some(second.request_id()));

    let reopened = Engine::new(config_for(&dir)).unwrap();
    let defs = reopened.repository().get_process_definitions_by_key("k");
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].id, a.id);
    assert_eq!(defs[0].name, "A");
}

#[test]
fn test_reloaded_engine_continues_after_conflict() {
    let dir = TempDir::new().unwrap();
    let mut first = Engine::new(config_for(&dir)).unwrap();
    let mut second = Engine::new(config_for(&dir)).unwrap();
    first.repository().save_process_definition("k", "A", "dep");
    first.flush().unwrap();
    second.repository().save_process_definition("k", "B", "dep");
    assert!(second.flush().is_err());

    let mut retry = Engine::new(config_for(&dir)).unwrap();
    let b = retry.repository().save_process_definition("k", "B", "dep");
    retry.flush().unwrap();

    assert_eq!(b.version, 2);
    let reopened = Engine::new(config_for(&dir)).unwrap();
    assert_eq!(
        reopened.repository().get_process_definitions_by_key("k").len(),
        2
    );
}

#[test]
fn test_repeated_flushes_from_one_engine() {
    let dir = TempDir::new().unwrap();
    let mut engine = Engine::new(config_for(&dir)).unwrap();

    engine.repository().create_deployment("one");
    engine.flush().unwrap();
    engine.repository().create_deployment("two");
    engine.flush().unwrap();

    let reopened = Engine::new(config_for(&dir)).unwrap();
    assert_eq!(reopened.repository().list_deployments().len(), 2);
}
