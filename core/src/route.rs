//! Addressable Views
//!
//! Two views exist: the persona selection at `/` and a chat per persona at
//! `/chat/{personaId}`. Any address that is not a chat address resolves to
//! the selection view.

use std::fmt;

use crate::persona::PersonaId;

/// A view the conductor can show
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Persona selection
    Selection,
    /// Chat with one persona
    Chat(PersonaId),
}

impl Route {
    /// Parse an address. Unknown shapes fall back to [`Route::Selection`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let mut segments = trimmed.trim_start_matches('/').split('/');

        match (segments.next(), segments.next(), segments.next()) {
            (Some("chat"), Some(id), None) if !id.is_empty() => Route::Chat(PersonaId::new(id)),
            _ => Route::Selection,
        }
    }

    /// The address of this view
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Selection => "/".to_string(),
            Route::Chat(id) => format!("/chat/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_chat() {
        assert_eq!(Route::parse("/chat/luna"), Route::Chat("luna".into()));
        assert_eq!(Route::parse("chat/alex/"), Route::Chat("alex".into()));
    }

    #[test]
    fn test_parse_falls_back_to_selection() {
        assert_eq!(Route::parse("/"), Route::Selection);
        assert_eq!(Route::parse(""), Route::Selection);
        assert_eq!(Route::parse("/chat"), Route::Selection);
        assert_eq!(Route::parse("/chat/"), Route::Selection);
        assert_eq!(Route::parse("/chat/luna/extra"), Route::Selection);
        assert_eq!(Route::parse("/settings"), Route::Selection);
    }

    #[test]
    fn test_path_round_trip() {
        let route = Route::Chat("luna".into());
        assert_eq!(route.path(), "/chat/luna");
        assert_eq!(Route::parse(&route.path()), route);
        assert_eq!(Route::Selection.to_string(), "/");
    }
}
