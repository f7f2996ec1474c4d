//! Navigation-related state types.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    /// Saved records are still being read.
    Loading,
    Form,
    List,
}

impl View {
    /// Returns the name shown in the footer.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            View::Loading => "Loading",
            View::Form => "Scouting Form",
            View::List => "Submitted Forms",
        }
    }
}

/// Specifying whether the form holds a new or a saved record.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionMode {
    New,
    Editing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view() {
        assert_eq!(View::Loading, View::Loading);
        assert_ne!(View::Form, View::List);
        assert_eq!(View::List.name(), "Submitted Forms");
    }

    #[test]
    fn test_session_mode() {
        assert_eq!(SessionMode::New, SessionMode::New);
        assert_ne!(SessionMode::New, SessionMode::Editing);
    }
}
