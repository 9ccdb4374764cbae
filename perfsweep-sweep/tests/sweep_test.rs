//! End-to-end sweep behaviour against a recording fake cluster

mod common;

use common::*;
use perfsweep_cluster::FailureKind;
use perfsweep_core::{ArtifactKind, SweepGrid, SweepParameter};
use perfsweep_manifest::{replica_count, ManifestDocuments};
use perfsweep_sweep::SweepError;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_single_coordinate_produces_exactly_its_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = perfsweep_config::SweepConfig::default();
    let cluster = RecordingCluster::new();
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![3], vec![4]).unwrap();
    let report = controller(dir.path(), cluster.clone(), generator, &config)
        .run(&grid)
        .await
        .unwrap();

    let output = resolved_paths(dir.path(), &config).output_folder;
    assert_eq!(
        artifact_names(&output),
        vec![
            "3-4-mbei-component-0.txt",
            "3-4-mbei-component-1.txt",
            "3-4-mbei-component-2.txt",
            "3-4-pod-scheduling.txt",
            "3-4-producer.txt",
        ]
    );
    assert_eq!(report.completed.len(), 1);
    assert_eq!(report.artifact_count(), 5);

    let scheduling = std::fs::read_to_string(output.join("3-4-pod-scheduling.txt")).unwrap();
    assert!(scheduling.contains("mbei-component-2"));
    let replica = std::fs::read_to_string(output.join("3-4-mbei-component-1.txt")).unwrap();
    assert_eq!(replica, "log output of pod/mbei-component-1\n");
}

#[tokio::test(start_paused = true)]
async fn test_iteration_call_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = perfsweep_config::SweepConfig::default();
    let cluster = RecordingCluster::new();
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![2], vec![8]).unwrap();
    controller(dir.path(), cluster.clone(), generator, &config)
        .run(&grid)
        .await
        .unwrap();

    let job_command = "/usr/local/bin/mbei-testdata-writer -n=100000 -o=msgs.yaml complex-factory -s=8 &> writer.txt && /usr/local/bin/mbei-testdata-file-producer -i=msgs.yaml -u=/etc/config/names-url-map.yaml";
    assert_eq!(
        cluster.calls(),
        vec![
            "apply_namespace mbei-namespace.yaml".to_string(),
            "set_namespace mbei".to_string(),
            "delete_config component-config".to_string(),
            "create_config component-config config-folder".to_string(),
            "delete mbei-component.yaml".to_string(),
            "delete testing-job.yaml".to_string(),
            "apply mbei-component.yaml replicas=2".to_string(),
            "wait pods (app=mbei-component) Ready".to_string(),
            format!("apply testing-job.yaml command={job_command}"),
            "wait job.batch/perftest-job complete".to_string(),
            "get pod".to_string(),
            "logs job.batch/perftest-job".to_string(),
            "logs pod/mbei-component-0 [mbei-component]".to_string(),
            "logs pod/mbei-component-1 [mbei-component]".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_grid_runs_in_order_with_fresh_manifests() {
    let dir = tempfile::tempdir().unwrap();
    let config = immediate_config();
    let cluster = RecordingCluster::new();
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![3, 6], vec![4, 8]).unwrap();
    let report = controller(dir.path(), cluster.clone(), generator.clone(), &config)
        .run(&grid)
        .await
        .unwrap();

    let expected = vec![
        SweepParameter::new(3, 4),
        SweepParameter::new(3, 8),
        SweepParameter::new(6, 4),
        SweepParameter::new(6, 8),
    ];
    assert_eq!(*generator.requests.lock().unwrap(), expected);
    assert_eq!(
        report
            .completed
            .iter()
            .map(|run| run.parameter)
            .collect::<Vec<_>>(),
        expected
    );

    // Namespace is prepared once, before the first coordinate
    let calls = cluster.calls();
    assert_eq!(calls[..2], ["apply_namespace mbei-namespace.yaml", "set_namespace mbei"]);
    assert_eq!(calls.iter().filter(|c| c.starts_with("apply_namespace")).count(), 1);
    assert_eq!(calls.iter().filter(|c| c.starts_with("set_namespace")).count(), 1);

    let applied: Vec<&String> = calls
        .iter()
        .filter(|c| c.starts_with("apply mbei-component.yaml"))
        .collect();
    assert_eq!(
        applied,
        vec![
            "apply mbei-component.yaml replicas=3",
            "apply mbei-component.yaml replicas=3",
            "apply mbei-component.yaml replicas=6",
            "apply mbei-component.yaml replicas=6",
        ]
    );

    let paths = resolved_paths(dir.path(), &config);
    let last = ManifestDocuments::load(&paths.workload_manifest).unwrap();
    assert_eq!(replica_count(&last), Some(6));

    let mut expected_names: Vec<String> = expected
        .iter()
        .flat_map(|parameter| {
            ArtifactKind::expected_for(*parameter, "mbei-component")
                .into_iter()
                .map(move |kind| perfsweep_core::artifact_file_name(*parameter, &kind))
        })
        .collect();
    expected_names.sort();
    assert_eq!(artifact_names(&paths.output_folder), expected_names);
    assert_eq!(report.artifact_count(), 18);
}

#[tokio::test]
async fn test_prepare_failure_starts_no_coordinate() {
    let dir = tempfile::tempdir().unwrap();
    let config = immediate_config();
    let cluster = RecordingCluster::with_fault(Fault::ApplyNamespace);
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![3, 6], vec![4]).unwrap();
    let err = controller(dir.path(), cluster.clone(), generator.clone(), &config)
        .run(&grid)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 7);
    assert_eq!(cluster.calls(), vec!["apply_namespace mbei-namespace.yaml"]);
    assert!(generator.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generator_failure_stops_before_publishing() {
    let dir = tempfile::tempdir().unwrap();
    let config = immediate_config();
    let cluster = RecordingCluster::new();
    let generator = Arc::new(RecordingGenerator::failing(3));

    let grid = SweepGrid::new(vec![3, 6], vec![4, 8]).unwrap();
    let err = controller(dir.path(), cluster.clone(), generator.clone(), &config)
        .run(&grid)
        .await
        .unwrap_err();

    assert!(matches!(err, SweepError::Generator(_)));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(
        *generator.requests.lock().unwrap(),
        vec![SweepParameter::new(3, 4)]
    );
    assert_eq!(
        cluster.calls(),
        vec!["apply_namespace mbei-namespace.yaml", "set_namespace mbei"]
    );
    assert!(artifact_names(&resolved_paths(dir.path(), &config).output_folder).is_empty());
}

#[tokio::test]
async fn test_create_failure_attempts_no_deploy() {
    let dir = tempfile::tempdir().unwrap();
    let config = immediate_config();
    let cluster = RecordingCluster::with_fault(Fault::CreateConfig);
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![3], vec![4]).unwrap();
    let err = controller(dir.path(), cluster.clone(), generator, &config)
        .run(&grid)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        cluster.calls().last().map(String::as_str),
        Some("create_config component-config config-folder")
    );
    assert!(!cluster.calls().iter().any(|c| c.starts_with("apply ")));
    assert!(artifact_names(&resolved_paths(dir.path(), &config).output_folder).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ready_timeout_aborts_before_launch() {
    let dir = tempfile::tempdir().unwrap();
    let config = perfsweep_config::SweepConfig::default();
    let cluster = RecordingCluster::with_fault(Fault::ReadyWait);
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![3], vec![4, 8]).unwrap();
    let err = controller(dir.path(), cluster.clone(), generator.clone(), &config)
        .run(&grid)
        .await
        .unwrap_err();

    assert!(matches!(err, SweepError::Cluster(_)));
    assert_ne!(err.exit_code(), 0);
    assert!(!cluster
        .calls()
        .iter()
        .any(|c| c.starts_with("apply testing-job.yaml")));
    assert_eq!(generator.requests.lock().unwrap().len(), 1);
    assert!(artifact_names(&resolved_paths(dir.path(), &config).output_folder).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_completion_timeout_collects_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = perfsweep_config::SweepConfig::default();
    let cluster = RecordingCluster::with_fault(Fault::CompleteWait);
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![3, 6], vec![4]).unwrap();
    let err = controller(dir.path(), cluster.clone(), generator, &config)
        .run(&grid)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert!(!cluster.calls().iter().any(|c| c.starts_with("logs")));
    assert!(!cluster.calls().iter().any(|c| c.ends_with("replicas=6")));
    assert!(artifact_names(&resolved_paths(dir.path(), &config).output_folder).is_empty());
}

#[tokio::test]
async fn test_failed_deletes_are_tolerated_by_default() {
    for kind in [FailureKind::NotFound, FailureKind::Other] {
        let dir = tempfile::tempdir().unwrap();
        let config = immediate_config();
        let cluster = RecordingCluster::with_fault(Fault::DeletesFail(kind));
        let generator = Arc::new(RecordingGenerator::default());

        let grid = SweepGrid::new(vec![1], vec![4, 8]).unwrap();
        let report = controller(dir.path(), cluster, generator, &config)
            .run(&grid)
            .await
            .unwrap();

        assert_eq!(report.completed.len(), 2);
        assert_eq!(report.artifact_count(), 6);
    }
}

#[tokio::test]
async fn test_strict_deletes_still_tolerate_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = immediate_config();
    config.cluster.strict_deletes = true;

    let cluster = RecordingCluster::with_fault(Fault::DeletesFail(FailureKind::NotFound));
    let report = controller(
        dir.path(),
        cluster,
        Arc::new(RecordingGenerator::default()),
        &config,
    )
    .run(&SweepGrid::new(vec![1], vec![4]).unwrap())
    .await
    .unwrap();
    assert_eq!(report.completed.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let cluster = RecordingCluster::with_fault(Fault::DeletesFail(FailureKind::Other));
    let err = controller(
        dir.path(),
        cluster.clone(),
        Arc::new(RecordingGenerator::default()),
        &config,
    )
    .run(&SweepGrid::new(vec![1], vec![4]).unwrap())
    .await
    .unwrap_err();

    assert!(matches!(err, SweepError::Cluster(_)));
    assert_eq!(
        cluster.calls().last().map(String::as_str),
        Some("delete_config component-config")
    );
}

#[tokio::test]
async fn test_strict_deletes_complete_a_fresh_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = immediate_config();
    config.cluster.strict_deletes = true;
    let paths = resolved_paths(dir.path(), &config);
    assert!(!paths.job_manifest.exists());

    let cluster = RecordingCluster::new();
    let grid = SweepGrid::new(vec![1], vec![4, 8]).unwrap();
    let report = controller(
        dir.path(),
        cluster.clone(),
        Arc::new(RecordingGenerator::default()),
        &config,
    )
    .run(&grid)
    .await
    .unwrap();

    assert_eq!(report.completed.len(), 2);
    let calls = cluster.calls();
    assert_eq!(calls.iter().filter(|c| *c == "delete testing-job.yaml").count(), 2);
    assert_eq!(
        calls.iter().filter(|c| c.starts_with("apply testing-job.yaml")).count(),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn test_settle_delays_are_spent_per_iteration() {
    let dir = tempfile::tempdir().unwrap();
    let config = perfsweep_config::SweepConfig::default();
    let cluster = RecordingCluster::new();
    let generator = Arc::new(RecordingGenerator::default());

    let grid = SweepGrid::new(vec![1], vec![4, 8]).unwrap();
    let report = controller(dir.path(), cluster, generator, &config)
        .run(&grid)
        .await
        .unwrap();

    for run in &report.completed {
        assert!(run.elapsed >= Duration::from_secs(142));
    }
    assert!(report.elapsed >= Duration::from_secs(284));
}
