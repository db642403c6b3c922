//! Shared-access behaviour of RepositoryService across threads

mod common;

use common::new_repo;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn test_concurrent_saves_lose_nothing_and_never_duplicate_versions() {
    let repo = new_repo();
    let dep = repo.create_deployment("dep");
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let repo = repo.clone();
            let dep_id = dep.id.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|_| repo.save_process_definition("hot-key", "Hot", &dep_id).id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let total = THREADS * PER_THREAD;
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), total);

    let defs = repo.get_process_definitions_by_key("hot-key");
    assert_eq!(defs.len(), total);
    let versions: Vec<u32> = defs.iter().map(|d| d.version).collect();
    assert_eq!(versions, (1..=total as u32).collect::<Vec<_>>());
}

#[test]
fn test_cascade_racing_with_saves_leaves_no_stragglers_from_before() {
    let repo = new_repo();
    let dep = repo.create_deployment("contested");
    for _ in 0..20 {
        repo.save_process_definition("pre", "Pre", &dep.id);
    }

    let writer = {
        let repo = repo.clone();
        let dep_id = dep.id.clone();
        thread::spawn(move || {
            (0..200)
                .map(|_| repo.save_process_definition("race", "Race", &dep_id).id)
                .collect::<Vec<_>>()
        })
    };
    repo.delete_deployment(&dep.id, true).unwrap();
    let saved_during_race = writer.join().unwrap();

    // Everything saved before the delete is gone
    assert!(repo.get_process_definitions_by_key("pre").is_empty());

    // Survivors are exactly the saves that landed after the cascade, and
    // they are contiguous at the tail of the writer's sequence
    let survivors: HashSet<String> = repo
        .get_process_definitions_by_key("race")
        .into_iter()
        .map(|d| d.id)
        .collect();
    let first_survivor = saved_during_race
        .iter()
        .position(|id| survivors.contains(id))
        .unwrap_or(saved_during_race.len());
    assert!(saved_during_race[first_survivor..]
        .iter()
        .all(|id| survivors.contains(id)));
    assert_eq!(survivors.len(), saved_during_race.len() - first_survivor);
}

#[test]
fn test_readers_never_see_deployment_without_its_resources() {
    let repo = new_repo();
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let reader = {
        let repo = repo.clone();
        let stop = stop.clone();
        thread::spawn(move || {
            let mut observed = 0;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                for dep in repo.list_deployments() {
                    assert_eq!(dep.resources.len(), 2, "partial deployment observed");
                    observed += 1;
                }
            }
            observed
        })
    };

    for i in 0..200 {
        repo.create_deployment_builder()
            .name(format!("dep-{}", i))
            .add_resource("a.bpmn", b"a".to_vec())
            .add_resource("b.bpmn", b"b".to_vec())
            .deploy();
    }
    stop.store(true, std::sync::atomic::Ordering::Relaxed);

    reader.join().unwrap();
    assert_eq!(repo.list_deployments().len(), 200);
}

#[test]
fn test_concurrent_model_upserts_and_deletes() {
    let repo = new_repo();
    let models: Vec<_> = (0..THREADS).map(|i| repo.new_model(format!("m{}", i), "k")).collect();

    let handles: Vec<_> = models
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, model)| {
            let repo = repo.clone();
            thread::spawn(move || {
                for rev in 0..PER_THREAD as u32 {
                    let mut next = model.clone();
                    next.version = rev;
                    repo.save_model(next);
                    repo.add_model_editor_source(&model.id, vec![rev as u8]).unwrap();
                }
                if i % 2 == 0 {
                    repo.delete_model(&model.id).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(repo.list_models().len(), THREADS / 2);
    for model in repo.list_models() {
        assert_eq!(model.version, PER_THREAD as u32 - 1);
        assert_eq!(model.editor_source, vec![(PER_THREAD - 1) as u8]);
    }
}
