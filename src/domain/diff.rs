//! Line-level unified diff between two content snapshots

use super::text;
use std::fmt::Write as _;

/// Default number of context lines around each change
pub const CONTEXT_LINES: usize = 3;

/// One line of unified diff output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `--- label` / `+++ label`
    File(String),
    /// `@@ -a,b +c,d @@`
    Hunk(String),
    Context(String),
    Removed(String),
    Added(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Opcode {
    tag: Tag,
    i1: usize,
    i2: usize,
    j1: usize,
    j2: usize,
}

/// Compute a unified diff of `old` against `new`, line by line.
///
/// Returns no lines at all when both sides are identical.
pub fn unified_diff(
    old: &str,
    new: &str,
    from_label: &str,
    to_label: &str,
    context: usize,
) -> Vec<DiffLine> {
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();

    let groups = grouped_opcodes(opcodes(&a, &b), context);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut out = vec![
        DiffLine::File(format!("--- {}", from_label)),
        DiffLine::File(format!("+++ {}", to_label)),
    ];

    for group in groups {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        out.push(DiffLine::Hunk(format!(
            "@@ -{} +{} @@",
            format_range(first.i1, last.i2),
            format_range(first.j1, last.j2)
        )));

        for op in &group {
            match op.tag {
                Tag::Equal => {
                    out.extend(a[op.i1..op.i2].iter().map(|l| DiffLine::Context(l.to_string())));
                }
                Tag::Change => {
                    out.extend(a[op.i1..op.i2].iter().map(|l| DiffLine::Removed(l.to_string())));
                    out.extend(b[op.j1..op.j2].iter().map(|l| DiffLine::Added(l.to_string())));
                }
            }
        }
    }

    out
}

/// Diff two HTML contents after converting them to plain text lines
pub fn diff_html(old_html: &str, new_html: &str, from_label: &str, to_label: &str) -> Vec<DiffLine> {
    unified_diff(
        &text::to_lines(old_html),
        &text::to_lines(new_html),
        from_label,
        to_label,
        CONTEXT_LINES,
    )
}

/// Render diff lines as annotated markup blocks, escaping all user text.
pub fn render_html(lines: &[DiffLine]) -> String {
    if lines.is_empty() {
        return r#"<div class="no-changes">No changes detected</div>"#.to_string();
    }

    let mut html = String::new();
    for line in lines {
        let (class, prefix, body) = match line {
            DiffLine::File(l) => ("diff-file", "", l),
            DiffLine::Hunk(l) => ("diff-header", "", l),
            DiffLine::Context(l) => ("diff-context", "  ", l),
            DiffLine::Removed(l) => ("diff-removed", "- ", l),
            DiffLine::Added(l) => ("diff-added", "+ ", l),
        };
        let _ = write!(
            html,
            r#"<div class="{}">{}{}</div>"#,
            class,
            prefix,
            text::escape_html(body)
        );
    }
    html
}

// difflib-style range: "start,len", or just "start" for one line
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    let beginning = if length == 0 { start } else { start + 1 };
    if length == 1 {
        beginning.to_string()
    } else {
        format!("{},{}", beginning, length)
    }
}

fn opcodes(a: &[&str], b: &[&str]) -> Vec<Opcode> {
    let (n, m) = (a.len(), b.len());

    // lcs[i][j] = length of the longest common subsequence of a[i..] and b[j..]
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut codes: Vec<Opcode> = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && a[i] == b[j] {
            push_op(&mut codes, Tag::Equal, 1, 1, i, j);
            i += 1;
            j += 1;
        } else if j >= m || (i < n && lcs[i + 1][j] >= lcs[i][j + 1]) {
            push_op(&mut codes, Tag::Change, 1, 0, i, j);
            i += 1;
        } else {
            push_op(&mut codes, Tag::Change, 0, 1, i, j);
            j += 1;
        }
    }

    codes
}

fn push_op(codes: &mut Vec<Opcode>, tag: Tag, di: usize, dj: usize, i: usize, j: usize) {
    if let Some(last) = codes.last_mut() {
        if last.tag == tag && last.i2 == i && last.j2 == j {
            last.i2 += di;
            last.j2 += dj;
            return;
        }
    }
    codes.push(Opcode {
        tag,
        i1: i,
        i2: i + di,
        j1: j,
        j2: j + dj,
    });
}

fn grouped_opcodes(mut codes: Vec<Opcode>, n: usize) -> Vec<Vec<Opcode>> {
    if codes.is_empty() {
        codes.push(Opcode {
            tag: Tag::Equal,
            i1: 0,
            i2: 1,
            j1: 0,
            j2: 1,
        });
    }

    if let Some(first) = codes.first_mut() {
        if first.tag == Tag::Equal {
            first.i1 = first.i1.max(first.i2.saturating_sub(n));
            first.j1 = first.j1.max(first.j2.saturating_sub(n));
        }
    }
    if let Some(last) = codes.last_mut() {
        if last.tag == Tag::Equal {
            last.i2 = last.i2.min(last.i1 + n);
            last.j2 = last.j2.min(last.j1 + n);
        }
    }

    let mut groups = Vec::new();
    let mut group = Vec::new();
    for mut op in codes {
        if op.tag == Tag::Equal && op.i2 - op.i1 > 2 * n {
            group.push(Opcode {
                i2: op.i2.min(op.i1 + n),
                j2: op.j2.min(op.j1 + n),
                ..op
            });
            groups.push(std::mem::take(&mut group));
            op.i1 = op.i1.max(op.i2.saturating_sub(n));
            op.j1 = op.j1.max(op.j2.saturating_sub(n));
        }
        group.push(op);
    }
    if !(group.is_empty() || (group.len() == 1 && group[0].tag == Tag::Equal)) {
        groups.push(group);
    }

    groups
        .into_iter()
        .filter(|g| g.iter().any(|op| op.tag == Tag::Change))
        .collect()
}
