use log::{debug, warn};
use thiserror::Error;

pub const THEME_KEY: &str = "darkMode";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        self.is_dark()
    }

    pub fn app_class(self) -> &'static str {
        match self {
            Self::Light => "app light-mode",
            Self::Dark => "app dark-mode",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("durable storage is unavailable")]
    Unavailable,
    #[error("durable storage rejected the operation: {0}")]
    Rejected(String),
}

/// String-keyed durable storage.
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn decode_dark(raw: &str) -> Option<bool> {
    serde_json::from_str::<bool>(raw.trim()).ok()
}

fn encode_dark(dark: bool) -> String {
    serde_json::Value::Bool(dark).to_string()
}

/// The persisted light/dark choice.
///
/// Reads once on load and writes through on every change. Storage failures
/// never reach the caller: a bad read means [`Theme::Light`], a failed write
/// keeps the in-memory value for the rest of the session.
pub struct PreferenceStore<B> {
    backend: B,
    theme: Theme,
}

impl<B: PreferenceBackend> PreferenceStore<B> {
    pub fn load(backend: B) -> Self {
        let theme = match backend.read(THEME_KEY) {
            Ok(Some(raw)) => decode_dark(&raw).map(Theme::from_dark).unwrap_or_else(|| {
                debug!("ignoring malformed {THEME_KEY} value {raw:?}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("reading {THEME_KEY} failed: {err}");
                Theme::default()
            }
        };

        Self { backend, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;

        if let Err(err) = self.backend.write(THEME_KEY, &encode_dark(theme.is_dark())) {
            warn!("persisting {THEME_KEY} failed: {err}");
        }
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set(next);
        next
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        &self.backend
    }
}
