use algoviz::{
    Error,
    game_tree::{self, GameAlgorithm, GameTree},
    input::parse_game_tree,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

mod common;

const TEXTBOOK: &str = "\
A-MAX-null
B-MIN-A
C-MIN-A
D-MIN-A
B1-3-B
B2-12-B
B3-8-B
C1-2-C
C2-4-C
C3-6-C
D1-14-D
D2-5-D
D3-2-D
";

#[test]
fn textbook_tree_from_text_prunes_second_branch() {
    let tree = GameTree::build(parse_game_tree(TEXTBOOK).unwrap()).unwrap();
    let comparison = game_tree::compare(&tree);

    let minimax = comparison.minimax.result.as_ref().unwrap();
    let alpha_beta = comparison.alpha_beta.result.as_ref().unwrap();

    assert_eq!(minimax.value, 3.0);
    assert_eq!(alpha_beta.value, 3.0);
    assert_eq!(minimax.best_move.as_ref().map(|m| m.as_str()), Some("B"));
    assert_eq!(minimax.visited, 13);
    assert!(minimax.pruned.is_empty());
    assert_eq!(alpha_beta.pruned, ["C2", "C3"]);
    assert_eq!(comparison.nodes_saved(), Some(2));
}

#[test]
fn alpha_beta_agrees_with_minimax_on_random_trees() {
    let mut rng = StdRng::seed_from_u64(2024);

    for case in 0..300 {
        let depth = rng.random_range(1..=5);
        let tree = common::random_game_tree(depth, 4, &mut rng);

        let minimax = game_tree::run(&tree, GameAlgorithm::Minimax).result.unwrap();
        let alpha_beta = game_tree::run(&tree, GameAlgorithm::AlphaBeta).result.unwrap();

        assert_eq!(
            minimax.value, alpha_beta.value,
            "case {case}: pruning must not change the root value"
        );
        assert_eq!(minimax.visited, tree.len(), "case {case}: minimax visits every node");
        assert!(alpha_beta.visited <= minimax.visited);
        assert!(
            alpha_beta.pruned.len() <= tree.len(),
            "case {case}: pruned {} of {} nodes",
            alpha_beta.pruned.len(),
            tree.len()
        );
        assert!(
            alpha_beta
                .pruned
                .iter()
                .all(|id| alpha_beta.value_of(id.as_str()).is_none()),
            "case {case}: pruned nodes carry no value"
        );
    }
}

#[test]
fn best_move_leads_to_a_child_with_the_root_value() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..100 {
        let tree = common::random_game_tree(4, 3, &mut rng);
        let outcome = game_tree::run(&tree, GameAlgorithm::Minimax).result.unwrap();
        let best = outcome.best_move.clone().expect("root always has children");
        assert_eq!(outcome.value_of(best.as_str()), Some(outcome.value));
    }
}

#[test]
fn malformed_trees_are_rejected_before_search() {
    let two_roots = parse_game_tree("R-MAX-null\nS-MIN-null\nx-1-R\ny-2-S").unwrap();
    assert!(matches!(GameTree::build(two_roots), Err(Error::MultipleRoots { .. })));

    let orphan = parse_game_tree("R-MAX-null\nx-1-Q").unwrap();
    assert!(matches!(GameTree::build(orphan), Err(Error::UnknownNode { .. })));

    assert!(matches!(
        parse_game_tree("R-MAYBE-null"),
        Err(Error::MalformedLine { line: 1, .. })
    ));
}
