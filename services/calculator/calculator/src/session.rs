use calculator_client::{Action, ComputeValue};

/// Editing state of a single calculator
///
/// The input buffer and the memory register are the only state; every
/// caller owns its own session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    buffer: String,
    memory: Option<ComputeValue>,
}

impl Session {
    pub fn new() -> Session {
        Default::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn memory(&self) -> Option<ComputeValue> {
        self.memory
    }

    /// Applies the buffer edit for `action`
    ///
    /// Returns false, leaving the session untouched, when recalling an empty
    /// memory register.
    pub fn edit(&mut self, action: &Action) -> bool {
        match action {
            Action::Append(text) => self.buffer.push_str(text),
            Action::Backspace => {
                self.buffer.pop();
            }
            Action::Clear => {
                self.buffer.clear();
                self.memory = None;
            }
            Action::Recall => match self.memory {
                Some(v) => self.buffer.push_str(&v.to_string()),
                None => return false,
            },
            Action::Evaluate => {}
        }
        true
    }

    pub(crate) fn remember(&mut self, value: ComputeValue) {
        self.memory = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use calculator_client::ComputeValue::{Float, Int};

    use super::*;

    #[test]
    fn test_edit() {
        let mut session = Session::new();

        assert!(session.edit(&Action::Append("12".to_string())));
        assert!(session.edit(&Action::Append("+".to_string())));
        assert_eq!(session.buffer(), "12+");

        assert!(session.edit(&Action::Backspace));
        assert!(session.edit(&Action::Evaluate));
        assert_eq!(session.buffer(), "12");

        assert!(session.edit(&Action::Backspace));
        assert!(session.edit(&Action::Backspace));
        assert!(session.edit(&Action::Backspace));
        assert_eq!(session.buffer(), "");
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut session = Session::new();
        session.edit(&Action::Append("2é".to_string()));
        session.edit(&Action::Backspace);
        assert_eq!(session.buffer(), "2");
    }

    #[test]
    fn test_memory() {
        let mut session = Session::new();

        assert!(!session.edit(&Action::Recall));
        assert_eq!(session, Session::new());

        session.remember(Float(-2.5));
        session.edit(&Action::Append("1-".to_string()));
        assert!(session.edit(&Action::Recall));
        assert_eq!(session.buffer(), "1--2.5");

        session.remember(Int(7));
        assert!(session.edit(&Action::Clear));
        assert_eq!(session.buffer(), "");
        assert_eq!(session.memory(), None);
    }
}
