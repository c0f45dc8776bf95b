use algoviz::cli::{
    commands::{
        game::{self, GameArgs},
        search::{self, SearchArgs},
    },
    config::CommonConfig,
};
use clap::Parser;
use tempfile::tempdir;

mod common;

fn quiet_json(path: &std::path::Path) -> CommonConfig {
    CommonConfig {
        quiet: true,
        json: Some(path.to_path_buf()),
        ..CommonConfig::default()
    }
}

#[test]
fn search_report_contains_trace_and_result() {
    let tmp = tempdir().unwrap();
    let edges = common::write_input(&tmp, "edges.txt", "A-B-1\nA-C-4\nB-C-2\nB-D-5\nC-D-1\n");
    let report = tmp.path().join("report.json");

    let args = SearchArgs::parse_from([
        "algoviz-search",
        edges.to_str().unwrap(),
        "--nodes",
        "A,B,C,D",
        "--start",
        "A",
        "--goal",
        "D",
        "--strategy",
        "ucs",
    ]);
    search::execute(args, &quiet_json(&report)).expect("search should succeed");

    let contents = std::fs::read_to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["result"]["status"], "found");
    assert_eq!(parsed["result"]["cost"], 4.0);
    assert_eq!(parsed["result"]["path"], serde_json::json!(["A", "B", "C", "D"]));
    assert!(parsed["error"].is_null());

    let trace = parsed["trace"].as_array().expect("trace should be an array");
    assert_eq!(trace[0]["step"], 1);
    assert_eq!(trace.last().unwrap()["level"], "success");
}

#[test]
fn comparing_strategies_writes_one_report_each() {
    let tmp = tempdir().unwrap();
    let edges = common::write_input(&tmp, "edges.txt", "A-B-1\nB-C-1\n");
    let report = tmp.path().join("report.json");

    let args = SearchArgs::parse_from([
        "algoviz-search",
        edges.to_str().unwrap(),
        "--nodes",
        "A,B,C",
        "--start",
        "A",
        "--goal",
        "C",
        "--strategy",
        "all",
    ]);
    search::execute(args, &quiet_json(&report)).expect("search should succeed");

    for label in ["ucs", "greedy", "astar"] {
        let path = tmp.path().join(format!("report-{label}.json"));
        assert!(path.exists(), "expected report at {}", path.display());
    }
    assert!(!report.exists());
}

#[test]
fn game_comparison_exports_both_runs() {
    let tmp = tempdir().unwrap();
    let tree = common::write_input(
        &tmp,
        "tree.txt",
        "A-MAX-null\nB-MIN-A\nC-MIN-A\nL1-3-B\nL2-5-B\nL3-2-C\nL4-9-C\n",
    );
    let report = tmp.path().join("game.json");

    let args = GameArgs::parse_from([
        "algoviz-game",
        tree.to_str().unwrap(),
        "--algorithm",
        "compare",
    ]);
    game::execute(args, &quiet_json(&report)).expect("game evaluation should succeed");

    let contents = std::fs::read_to_string(tmp.path().join("game-alpha-beta.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["result"]["value"], 3.0);
    assert_eq!(parsed["result"]["pruned"], serde_json::json!(["L4"]));
    assert_eq!(parsed["result"]["visited"], 6);

    let contents = std::fs::read_to_string(tmp.path().join("game-minimax.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["result"]["algorithm"], "minimax");
    assert_eq!(parsed["result"]["visited"], 7);
    assert!(!report.exists());
}

#[test]
fn single_move_tree_exports_and_missing_file_is_reported() {
    let tmp = tempdir().unwrap();
    let tree = common::write_input(&tmp, "tree.txt", "A-MAX-null\nB-3-A\n");
    let report = tmp.path().join("game.json");

    let args = GameArgs::parse_from(["algoviz-game", tree.to_str().unwrap()]);
    game::execute(args, &quiet_json(&report)).expect("a single-leaf tree is valid");
    assert!(report.exists());

    let missing = tmp.path().join("missing.txt");
    let args = GameArgs::parse_from(["algoviz-game", missing.to_str().unwrap()]);
    let err = game::execute(args, &quiet_json(&report)).unwrap_err();
    assert!(err.to_string().contains("missing.txt"));
}
