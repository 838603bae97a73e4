//! Autocomplete cycling.
//!
//! [`AutocompleteManager`] holds one list of candidates and a cursor into it.
//! Candidates come from a [`SuggestionSource`], which the engine implements.

/// Produces completion candidates for a partial input line.
pub trait SuggestionSource {
    /// Full replacement lines for `partial`, best first. May be empty.
    fn suggestions(&self, partial: &str) -> Vec<String>;
}

/// Cyclic cursor over completion candidates.
#[derive(Clone, Debug, Default)]
pub struct AutocompleteManager {
    partial: String,
    candidates: Vec<String>,
    /// Index of the current candidate, `None` before the first move.
    cursor: Option<usize>,
    initialized: bool,
}

impl AutocompleteManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new completion of `partial`, replacing any previous one.
    pub fn init_suggestions<S: SuggestionSource + ?Sized>(
        &mut self,
        partial: &str,
        source: &S,
    ) -> &[String] {
        self.partial = partial.to_string();
        self.candidates = source.suggestions(partial);
        self.cursor = None;
        self.initialized = true;
        &self.candidates
    }

    /// Move to the next candidate, wrapping after the last.
    pub fn next(&mut self) -> Option<&str> {
        let len = self.len()?;
        let index = self.cursor.map_or(0, |i| (i + 1) % len);
        self.cursor = Some(index);
        self.current()
    }

    /// Move to the previous candidate, wrapping before the first.
    pub fn previous(&mut self) -> Option<&str> {
        let len = self.len()?;
        let index = self.cursor.map_or(len - 1, |i| (i + len - 1) % len);
        self.cursor = Some(index);
        self.current()
    }

    /// The candidate under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }

    /// Take the current candidate and end the completion.
    pub fn accept(&mut self) -> Option<String> {
        let accepted = self.current().map(str::to_string);
        self.cancel();
        accepted
    }

    /// Drop the candidates and the partial input.
    pub fn cancel(&mut self) {
        self.partial.clear();
        self.candidates.clear();
        self.cursor = None;
        self.initialized = false;
    }

    pub fn is_active(&self) -> bool {
        self.initialized && !self.candidates.is_empty()
    }

    /// The input the current candidates complete.
    pub fn partial(&self) -> &str {
        &self.partial
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn len(&self) -> Option<usize> {
        if self.is_active() {
            Some(self.candidates.len())
        } else {
            None
        }
    }
}
