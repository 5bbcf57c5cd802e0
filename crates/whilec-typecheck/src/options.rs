//! Driver configuration.

/// Options controlling a [`TypeChecker`](crate::TypeChecker) run.
///
/// ```
/// use whilec_typecheck::CheckOptions;
///
/// let options = CheckOptions::default().keep_going(true).file("main.while");
/// assert!(options.keep_going);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Resume at the next declaration after a failure and collect every
    /// diagnostic instead of stopping at the first.
    pub keep_going: bool,
    /// File name for diagnostics, overriding the one on the tree.
    pub file: Option<String>,
}

impl CheckOptions {
    /// Sets [`keep_going`](Self::keep_going).
    #[must_use]
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Sets [`file`](Self::file).
    #[must_use]
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}
