//! Determinism lock tests: identical inputs give byte-identical plans and
//! audit graphs, within one process and across processes.

use std::path::Path;
use std::process::Command;

use graft_diff::runner::plan_edits;
use graft_search::policy::{PolicyConfig, SearchPolicy};
use graft_search::search::plan;
use lock_tests::fixtures::{mixed_goal, mixed_heuristic, mixed_library, walk_state};

fn mixed_run() -> (Vec<u8>, Vec<u8>) {
    let result = plan(
        &walk_state(5),
        &mixed_goal,
        &mixed_library(),
        &mixed_heuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    let plan_bytes = result.plan().unwrap().to_canonical_json_bytes().unwrap();
    let graph_bytes = result.graph.unwrap().to_canonical_json_bytes().unwrap();
    (plan_bytes, graph_bytes)
}

#[test]
fn search_determinism_inproc_n10() {
    let (first_plan, first_graph) = mixed_run();
    for _ in 1..10 {
        let (plan_bytes, graph_bytes) = mixed_run();
        assert_eq!(first_plan, plan_bytes, "plan bytes differ across runs");
        assert_eq!(first_graph, graph_bytes, "graph bytes differ across runs");
    }
}

#[test]
fn graph_bytes_are_a_canonical_fixed_point() {
    let (_, graph_bytes) = mixed_run();
    let value: serde_json::Value = serde_json::from_slice(&graph_bytes).unwrap();
    let again = graft_kernel::proof::canon::canonical_json_bytes(&value).unwrap();
    assert_eq!(graph_bytes, again);
}

#[test]
fn equal_cost_plans_break_ties_the_same_way() {
    // "abc" -> "cab" has several cost-2 scripts; the choice must be stable.
    let chars = |s: &str| s.chars().collect::<Vec<_>>();
    let first = plan_edits(&chars("abc"), &chars("cab"), &PolicyConfig::default())
        .unwrap()
        .script
        .unwrap();
    for _ in 1..10 {
        let again = plan_edits(&chars("abc"), &chars("cab"), &PolicyConfig::default())
            .unwrap()
            .script
            .unwrap();
        assert_eq!(first, again);
    }
}

// ---------------------------------------------------------------------------
// Cross-process
// ---------------------------------------------------------------------------

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("plan_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "plan_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    for key in [
        "walk_plan_digest=sha256:",
        "walk_graph_digest=sha256:",
        "walk_policy_digest=sha256:",
        "walk_library_digest=sha256:",
        "walk_plan_cost=5",
        "uniform_plan_cost=5",
        "diff_cost=2",
    ] {
        assert!(baseline.contains(key), "baseline output missing {key}");
    }

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    assert_eq!(
        baseline,
        run_variant(alt_cwd, &[]),
        "output differs when cwd changes from {root} to {alt_cwd}"
    );
    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "output differs when LC_ALL=C LANG=C"
    );
    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[
                ("GRAFT_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("HOME", "/nonexistent"),
            ],
        ),
        "output differs with spurious env vars"
    );
}
