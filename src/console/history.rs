/// Append-only log of submitted commands.
///
/// Entries are recalled by a 1-based offset counted backward from the most
/// recent submission; offset 0 means "not recalling". There is no
/// de-duplication and no capacity bound.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a command. Empty commands are ignored.
    pub fn push(&mut self, command: &str) {
        if command.is_empty() {
            return;
        }
        self.entries.push(command.to_string());
    }

    /// Returns the entry `cursor` positions before the most recent one, or
    /// `None` when the cursor is 0 or out of range.
    pub fn fetch(&self, cursor: usize) -> Option<&str> {
        if cursor == 0 || cursor > self.entries.len() {
            return None;
        }
        self.entries
            .get(self.entries.len() - cursor)
            .map(String::as_str)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
