//! Transition target: another stage or the terminal.

use std::fmt;

/// Where the executor goes after a stage.
///
/// Used as the target of static edges and as the values of a conditional route map.
/// The terminal is its own variant, so no stage name (not even `"__end__"`) can be
/// mistaken for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Next {
    /// Run the stage with this name next.
    Node(String),
    /// Stop the run and return the current state.
    End,
}

/// Terminal target for `add_edge(stage, END)` and route maps.
pub const END: Next = Next::End;

impl Next {
    /// Returns the stage name, or `None` for the terminal.
    pub fn stage(&self) -> Option<&str> {
        match self {
            Next::Node(id) => Some(id),
            Next::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Next::End)
    }
}

impl From<&str> for Next {
    fn from(id: &str) -> Self {
        Next::Node(id.to_string())
    }
}

impl From<String> for Next {
    fn from(id: String) -> Self {
        Next::Node(id)
    }
}

impl fmt::Display for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Next::Node(id) => write!(f, "{}", id),
            Next::End => write!(f, "<END>"),
        }
    }
}
