//! End-to-end catalog scenarios

mod common;

use common::{new_repo, sorted_ids};
use procrepo_core::RepoError;

#[test]
fn test_deploy_suspend_cascade_round_trip() {
    let repo = new_repo();

    // Given: a deployment with two definitions of proc-A
    let dep1 = repo.create_deployment("dep1");
    let first = repo.save_process_definition("proc-A", "Process A", &dep1.id);
    let second = repo.save_process_definition("proc-A", "Process A", &dep1.id);

    // Then: key lookup returns exactly those two
    let by_key = repo.get_process_definitions_by_key("proc-A");
    assert_eq!(
        sorted_ids(by_key.iter().map(|d| d.id.as_str())),
        sorted_ids([first.id.as_str(), second.id.as_str()])
    );

    // When: the key is suspended
    repo.suspend_process_definition_by_key("proc-A").unwrap();

    // Then: both report suspended
    assert!(repo.get_process_definition(&first.id).unwrap().suspended);
    assert!(repo.get_process_definition(&second.id).unwrap().suspended);

    // When: the deployment is deleted with cascade
    repo.delete_deployment(&dep1.id, true).unwrap();

    // Then: neither definition is retrievable
    for id in [&first.id, &second.id] {
        assert!(matches!(
            repo.get_process_definition(id),
            Err(RepoError::ProcessDefinitionNotFound { .. })
        ));
    }
}

#[test]
fn test_not_found_scenario_has_no_side_effects() {
    let repo = new_repo();
    let dep = repo.create_deployment("dep");
    let def = repo.save_process_definition("k", "K", &dep.id);
    let before = repo.snapshot();

    assert!(matches!(
        repo.get_deployment("unknown-id"),
        Err(RepoError::DeploymentNotFound { .. })
    ));
    assert!(matches!(
        repo.suspend_process_definition_by_id("unknown-id"),
        Err(RepoError::ProcessDefinitionNotFound { .. })
    ));

    let after = repo.snapshot();
    assert_eq!(
        before.get_definition(&def.id).unwrap(),
        after.get_definition(&def.id).unwrap()
    );
    assert_eq!(after.list_definitions().len(), 1);
}

#[test]
fn test_redeploy_after_cascade_continues_versions_from_survivors() {
    let repo = new_repo();
    let old = repo.create_deployment("old");
    repo.save_process_definition("k", "K", &old.id);
    let kept = repo.create_deployment("kept");
    repo.save_process_definition("k", "K", &kept.id);

    repo.delete_deployment(&old.id, true).unwrap();
    let next = repo.save_process_definition("k", "K", &kept.id);

    assert_eq!(next.version, 3);
}
