use chrono::NaiveDate;

use crate::report_helpers::{format_bytes, max_width, pad_right, separator};
use crate::tree::{Node, NodeId, Tree};

const INDENT: usize = 2;

/// Row label: the full path for the top row, the indented name below it.
fn label(node: &Node, depth: usize) -> String {
    if depth == 0 {
        node.path.clone()
    } else {
        format!("{}{}", " ".repeat(depth * INDENT), node.name)
    }
}

pub fn format_contributors(node: &Node, top: usize) -> String {
    node.users
        .iter()
        .take(top)
        .map(|u| format!("{} ({:.2})", u.email, u.normalized_authorship))
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_label(node: &Node) -> String {
    node.status.map_or_else(|| "-".to_string(), |s| s.label())
}

pub fn print_report(
    tree: &Tree,
    node: NodeId,
    depth: usize,
    top: usize,
    anchor: Option<NaiveDate>,
) {
    if tree.is_empty() {
        println!("No files found for bus factor analysis.");
        return;
    }

    let rows: Vec<(NodeId, &Node, String)> = tree
        .descendants(node, depth)
        .into_iter()
        .filter_map(|(id, level)| tree.node(id).map(|n| (id, n, label(n, level))))
        .collect();

    let label_width = max_width(rows.iter().map(|(_, _, l)| l.as_str()), 4);
    // path + 2 + files(6) + 1 + size(10) + 1 + bf(7) + 2 + contributors
    let header_width = label_width + 29;
    let separator = separator(header_width.max(78));

    match anchor {
        Some(anchor) => println!("Bus Factor — {} (anchor {anchor})", tree.root().name),
        None => println!("Bus Factor — {}", tree.root().name),
    }
    println!("{separator}");
    println!(
        " {}  {:>6} {:>10} {:>7}  Top contributors",
        pad_right("Path", label_width),
        "Files",
        "Size",
        "BF"
    );
    println!("{separator}");

    for (id, n, row_label) in &rows {
        let files = tree.file_paths(*id).len();
        println!(
            " {}  {:>6} {:>10} {:>7}  {}",
            pad_right(row_label, label_width),
            files,
            format_bytes(n.bytes),
            status_label(n),
            format_contributors(n, top)
        );
    }

    println!("{separator}");
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
