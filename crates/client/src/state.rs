//! Application state owned by the composition root.
//!
//! Session and theme are plain values threaded by reference from the
//! composition root into whatever needs them. No ambient singletons.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The signed-in participant. Authentication itself happens at the backend;
/// the client only carries the result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub session: Option<Session>,
    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            session: None,
            theme,
        }
    }

    pub fn sign_in(&mut self, user_id: String, display_name: String) {
        self.session = Some(Session {
            user_id,
            display_name,
        });
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// Participant id the debt summary is computed for.
    #[must_use]
    pub fn viewpoint_user(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.user_id.as_str())
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}
