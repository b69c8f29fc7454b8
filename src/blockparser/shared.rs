//! Small text helpers shared by the built-in block processors.

/// Count leading ASCII space characters (tabs are not expanded here; callers
/// needing tab-aware indentation should expand tabs before calling this).
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Remove up to `n` leading spaces from every line of `text`.
pub fn dedent(text: &str, n: usize) -> String {
    text.split('\n')
        .map(|line| {
            let strip = leading_spaces(line).min(n);
            &line[strip..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn first_line(block: &str) -> &str {
    block.split('\n').next().unwrap_or("")
}
