//! Text formats accepted by the command-line front end
//!
//! Every parser skips blank lines and reports malformed ones with their
//! 1-based line number.

mod tabular;

use std::{fs, path::Path};

pub use tabular::{parse_points, parse_query, parse_table, parse_transactions};

use crate::{
    Error, Result,
    game_tree::{NodeKind, NodeSpec},
    identifiers::NodeId,
    search::{Edge, Heuristic},
    semantic::Fact,
};

/// Read a whole input file.
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read {}", path.display()),
        source,
    })
}

/// Non-blank lines with their 1-based line numbers, trimmed.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Comma- or newline-separated names, blanks dropped.
pub fn parse_names(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_nodes(text: &str) -> Vec<NodeId> {
    parse_names(text).into_iter().map(NodeId::from).collect()
}

/// Split `head-middle-tail` on the first and last `-`.
fn split_triple(line_no: usize, line: &str, shape: &str) -> Result<(String, String, String)> {
    let malformed = || Error::malformed(line_no, format!("expected {shape}, got '{line}'"));
    let first = line.find('-').ok_or_else(malformed)?;
    let last = line.rfind('-').ok_or_else(malformed)?;
    if first == last {
        return Err(malformed());
    }
    let head = line[..first].trim();
    let middle = line[first + 1..last].trim();
    let tail = line[last + 1..].trim();
    if head.is_empty() || middle.is_empty() || tail.is_empty() {
        return Err(malformed());
    }
    Ok((head.to_string(), middle.to_string(), tail.to_string()))
}

pub(crate) fn parse_number(line_no: usize, token: &str) -> Result<f64> {
    let token = token.trim();
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            Error::malformed(
                line_no,
                Error::InvalidNumber {
                    input: token.to_string(),
                }
                .to_string(),
            )
        })
}

/// Edge lines `from-to-cost`.
///
/// # Examples
///
/// ```
/// use algoviz::input::parse_edges;
///
/// let edges = parse_edges("A-B-1\n\nB-C-2.5")?;
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges[1].cost, 2.5);
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn parse_edges(text: &str) -> Result<Vec<Edge>> {
    lines(text)
        .map(|(line_no, line)| {
            let (from, to, cost) = split_triple(line_no, line, "from-to-cost")?;
            Ok(Edge::new(from, to, parse_number(line_no, &cost)?))
        })
        .collect()
}

/// `key=value` pair of a single line.
pub(crate) fn split_assignment(line_no: usize, line: &str) -> Result<(String, String)> {
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| Error::malformed(line_no, format!("expected key=value, got '{line}'")))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(Error::malformed(line_no, format!("expected key=value, got '{line}'")));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Heuristic lines `node=value`.
pub fn parse_heuristic(text: &str) -> Result<Heuristic> {
    let entries = lines(text)
        .map(|(line_no, line)| {
            let (node, value) = split_assignment(line_no, line)?;
            Ok((NodeId::from(node), parse_number(line_no, &value)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Heuristic::from_entries(entries)
}

/// Game-tree lines `id-kindOrValue-parent`; `null` or `none` marks the root.
///
/// # Examples
///
/// ```
/// use algoviz::{game_tree::NodeKind, input::parse_game_tree};
///
/// let specs = parse_game_tree("A-MAX-null\nL1--3-A")?;
/// assert_eq!(specs[0].parent, None);
/// assert_eq!(specs[1].kind, NodeKind::Leaf(-3.0));
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn parse_game_tree(text: &str) -> Result<Vec<NodeSpec>> {
    lines(text)
        .map(|(line_no, line)| {
            let (id, kind, parent) = split_triple(line_no, line, "id-kind-parent")?;
            let kind = NodeKind::parse(&id, &kind)
                .map_err(|err| Error::malformed(line_no, err.to_string()))?;
            let parent = match parent.to_ascii_lowercase().as_str() {
                "null" | "none" => None,
                _ => Some(NodeId::from(parent)),
            };
            Ok(NodeSpec {
                id: NodeId::from(id),
                kind,
                parent,
            })
        })
        .collect()
}

/// Fact lines `subject-relation-object`. Relations may contain `-`, as in
/// `Cat-is-a-Animal`.
pub fn parse_facts(text: &str) -> Result<Vec<Fact>> {
    lines(text)
        .map(|(line_no, line)| {
            let (subject, relation, object) =
                split_triple(line_no, line, "subject-relation-object")?;
            Ok(Fact::new(subject, relation, object))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_split_on_commas_and_newlines() {
        assert_eq!(parse_names("A, B,\nC,,"), ["A", "B", "C"]);
    }

    #[test]
    fn edge_errors_carry_line_numbers() {
        let err = parse_edges("A-B-1\n\nA-C-x").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 3, .. }));
        let err = parse_edges("AB1").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn heuristic_lines_parse() {
        let h = parse_heuristic("A=3\n B = 1.5 ").unwrap();
        assert_eq!(h.get("A"), 3.0);
        assert_eq!(h.get("B"), 1.5);
        assert_eq!(h.get("C"), 0.0);
    }

    #[test]
    fn game_tree_lines_handle_negative_values() {
        let specs = parse_game_tree("R-MIN-none\nx--2.5-R\ny-7-R").unwrap();
        assert_eq!(specs[1].kind, NodeKind::Leaf(-2.5));
        assert_eq!(specs[1].parent, Some(NodeId::from("R")));
        assert_eq!(specs[2].kind, NodeKind::Leaf(7.0));
    }

    #[test]
    fn game_tree_rejects_unknown_kind() {
        let err = parse_game_tree("R-CHANCE-null").unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn facts_keep_hyphenated_relations() {
        let facts = parse_facts("Cat-is-a-Animal\nCat-has-Fur").unwrap();
        assert_eq!(facts[0], Fact::new("Cat", "is-a", "Animal"));
        assert_eq!(facts[1].relation, "has");
    }
}
