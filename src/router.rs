//! View routing.
//!
//! Maps the console's two views to the URL paths the web front end uses.

use std::fmt;

/// A top-level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// SQL editor and results.
    #[default]
    Main,
    /// Project information.
    About,
}

impl View {
    /// All views, in navigation order.
    pub const ALL: [View; 2] = [View::Main, View::About];

    /// Returns the URL path for this view.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Main => "/",
            Self::About => "/about",
        }
    }

    /// Returns the route name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::About => "about",
        }
    }

    /// Resolves a route name (case-insensitive) to a view.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|view| view.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
