use crate::utils::ui;

/// Before/after contents of one rewritten file.
#[derive(Debug, Clone)]
pub struct DryRunDiff {
    before: String,
    after: String,
}

impl DryRunDiff {
    pub fn new(before: String, after: String) -> Self {
        Self { before, after }
    }

    pub fn print(&self, path: &str) {
        ui::print_diff(path, &self.before, &self.after);
    }
}
