//! Indentation of multi-line literals
//!
//! Narratives, comments and binary blocks may span lines. Their continuation lines carry
//! the indentation of the position the literal was written at, which is layout rather
//! than content. [`dedent`] removes it when a token enters the tree and [`indent`] puts it
//! back, at the writer's depth, when the tree is formatted.
//!
//! The amount removed is the indentation of the closing line. Empty lines are left empty.

/// One level of indentation.
pub const INDENTATION: &str = "    ";

/// Strip the closing line's indentation from every continuation line.
pub fn dedent(text: &str) -> String {
    let Some((_, last)) = text.rsplit_once('\n') else {
        return text.to_string();
    };
    let amount = leading_spaces(last);
    let mut lines = text.split('\n');
    let mut result = lines.next().unwrap_or_default().to_string();
    for line in lines {
        result.push('\n');
        result.push_str(&line[leading_spaces(line).min(amount)..]);
    }
    result
}

/// Prefix every non-empty continuation line with `depth` levels of indentation.
pub fn indent(text: &str, depth: usize) -> String {
    if depth == 0 || !text.contains('\n') {
        return text.to_string();
    }
    let prefix = INDENTATION.repeat(depth);
    let mut lines = text.split('\n');
    let mut result = lines.next().unwrap_or_default().to_string();
    for line in lines {
        result.push('\n');
        if !line.is_empty() {
            result.push_str(&prefix);
        }
        result.push_str(line);
    }
    result
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
