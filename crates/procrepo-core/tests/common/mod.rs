use procrepo_core::{Deployment, ProcessDefinition, RepositoryService};

/// Create a new empty repository for testing
#[allow(dead_code)]
pub fn new_repo() -> RepositoryService {
    RepositoryService::new()
}

/// Create a deployment and save `count` versions of `key` under it
#[allow(dead_code)]
pub fn deploy_versions(
    repo: &RepositoryService,
    deployment_name: &str,
    key: &str,
    count: usize,
) -> (Deployment, Vec<ProcessDefinition>) {
    let deployment = repo.create_deployment(deployment_name);
    let defs = (0..count)
        .map(|_| repo.save_process_definition(key, format!("{} process", key), &deployment.id))
        .collect();
    (deployment, defs)
}

/// Sorted ids, for order-insensitive comparisons
#[allow(dead_code)]
pub fn sorted_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut ids: Vec<String> = ids.into_iter().map(str::to_string).collect();
    ids.sort();
    ids
}
