use mpm_tool::{BuildError, END_TASK, START_TASK, TaskNetwork, TaskSpec};

fn network(
    names: &[&str],
    durations: &[i64],
    preds: &[&[&str]],
) -> Result<TaskNetwork, BuildError> {
    TaskNetwork::new(
        names.iter().copied(),
        durations.iter().copied(),
        preds.iter().map(|list| list.iter().copied()),
    )
}

#[test]
fn mismatched_lengths_are_rejected() {
    let err = network(&["T1", "T2", "T3"], &[3, 2], &[&[], &["T1"], &["T2"]]).unwrap_err();
    assert!(matches!(err, BuildError::LengthMismatch { .. }));

    let err = network(&["T1", "T2"], &[3, 2], &[&[], &["T1"], &["T2"]]).unwrap_err();
    assert_eq!(err, BuildError::LengthMismatch { row: 2 });
}

#[test]
fn unknown_predecessor_is_rejected() {
    let err = network(&["A", "B"], &[1, 2], &[&[], &["Z"]]).unwrap_err();
    assert_eq!(
        err,
        BuildError::UnknownPredecessor {
            task: "B".to_string(),
            predecessor: "Z".to_string(),
        }
    );
}

#[test]
fn conflicting_durations_are_rejected() {
    let err = network(&["A", "A"], &[1, 2], &[&[], &[]]).unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicateDuration {
            task: "A".to_string(),
            first: 1,
            second: 2,
        }
    );
}

#[test]
fn second_predecessor_set_is_rejected() {
    let err = network(&["A", "B", "C", "C"], &[1, 1, 1, 1], &[&[], &[], &["A"], &["B"]])
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicatePredecessorSet {
            task: "C".to_string()
        }
    );
}

#[test]
fn empty_then_explicit_predecessors_are_merged() {
    let mut net = network(&["A", "B", "B"], &[2, 1, 1], &[&[], &[], &["A"]]).unwrap();
    assert_eq!(net.predecessors()["B"], ["A"]);
    assert_eq!(net.successors()[START_TASK], ["A"]);
    assert_eq!(net.earliest_dates().unwrap()["B"], 2);
}

#[test]
fn reserved_names_are_rejected() {
    let err = network(&["START"], &[1], &[&[]]).unwrap_err();
    assert_eq!(err, BuildError::ReservedTaskName("START".to_string()));
    let err = network(&["A", "END"], &[1, 1], &[&[], &[]]).unwrap_err();
    assert_eq!(err, BuildError::ReservedTaskName("END".to_string()));
}

#[test]
fn negative_duration_is_rejected() {
    let err = network(&["A"], &[-3], &[&[]]).unwrap_err();
    assert_eq!(
        err,
        BuildError::NegativeDuration {
            task: "A".to_string(),
            duration: -3,
        }
    );
}

#[test]
fn cycles_are_rejected() {
    let err = network(&["A", "B", "C"], &[1, 1, 1], &[&["C"], &["A"], &["B"]]).unwrap_err();
    assert!(matches!(err, BuildError::CyclicDependency { .. }));

    // END as a predecessor always loops back to END
    let err = network(&["A"], &[1], &[&["END"]]).unwrap_err();
    assert!(matches!(err, BuildError::CyclicDependency { .. }));
}

#[test]
fn predecessor_and_successor_maps_stay_symmetric() {
    let net = network(
        &["A", "B", "C", "D"],
        &[1, 2, 3, 4],
        &[&[], &["A"], &["A"], &["B", "C"]],
    )
    .unwrap();

    for (task, preds) in net.predecessors() {
        for pred in preds {
            assert!(
                net.successors()[pred].contains(task),
                "{pred} -> {task} missing from successors"
            );
        }
    }
    for (task, succs) in net.successors() {
        for succ in succs {
            assert!(net.predecessors()[succ].contains(task));
        }
    }
    assert_eq!(net.successors()["A"], ["B", "C"]);
    assert_eq!(net.predecessors()[END_TASK], ["D"]);
    assert_eq!(net.durations()[END_TASK], -1);
    assert_eq!(net.task_names(), ["START", "A", "B", "C", "D", "END"]);
}

#[test]
fn from_tasks_matches_column_input() {
    let tasks = vec![
        TaskSpec::new("T1", 3),
        TaskSpec::new("T2", 2).with_predecessors(["T1"]),
        TaskSpec::new("T3", 1).with_predecessors(["T1", "T2"]),
    ];
    let from_rows = TaskNetwork::from_tasks(&tasks).unwrap();
    let from_columns = network(
        &["T1", "T2", "T3"],
        &[3, 2, 1],
        &[&[], &["T1"], &["T1", "T2"]],
    )
    .unwrap();
    assert_eq!(from_rows.graph(), from_columns.graph());
}
