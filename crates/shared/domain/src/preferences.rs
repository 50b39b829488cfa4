use serde::{Deserialize, Serialize};

/// Client-local settings persisted between desktop sessions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    #[must_use]
    pub const fn toggled(self) -> Self {
        Self { dark_mode: !self.dark_mode }
    }

    /// CSS class applied to the application root.
    #[must_use]
    pub const fn theme_class(self) -> &'static str {
        if self.dark_mode { "theme-dark" } else { "theme-light" }
    }
}
