//! Block-parser state stack (spec §3 "Parser State").
//!
//! Block processors push a label before recursing into `parse_blocks` and
//! pop it on the way out, so a nested call can tell (via `isstate`) that it
//! is already inside e.g. a list item and must not re-match the outermost
//! list processor, which would otherwise recurse forever.

#[derive(Debug, Default)]
pub struct State {
    stack: Vec<String>,
}

impl State {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn set(&mut self, label: &str) {
        self.stack.push(label.to_string());
    }

    pub fn reset(&mut self) {
        self.stack.pop();
    }

    pub fn isstate(&self, label: &str) -> bool {
        self.stack.last().map(|s| s.as_str()) == Some(label)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reset_round_trips() {
        let mut s = State::new();
        assert!(!s.isstate("list"));
        s.set("list");
        assert!(s.isstate("list"));
        s.set("blockquote");
        assert!(s.isstate("blockquote"));
        assert!(!s.isstate("list"));
        s.reset();
        assert!(s.isstate("list"));
        s.reset();
        assert!(!s.isstate("list"));
    }
}
