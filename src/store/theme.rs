use crate::model::theme::{ResolvedTheme, ThemePreference};
use crate::store::kv::KeyValue;
use crate::store::tasks::StoreError;

/// Storage key for the theme preference
pub const THEME_KEY: &str = "@app_theme_preference";

/// The persisted theme preference: a single literal token (`light`,
/// `dark`, or `system`) under one key, written raw rather than as JSON.
pub struct ThemeStore<S> {
    kv: S,
}

impl<S: KeyValue> ThemeStore<S> {
    pub fn new(kv: S) -> Self {
        ThemeStore { kv }
    }

    /// Load the saved preference, defaulting to `system` when nothing is
    /// persisted or the stored token is not one of the three legal values.
    pub fn load(&self) -> Result<ThemePreference, StoreError> {
        let pref = self
            .kv
            .get(THEME_KEY)?
            .as_deref()
            .map(str::trim)
            .and_then(ThemePreference::from_token)
            .unwrap_or_default();
        Ok(pref)
    }

    /// Persist the given preference.
    pub fn save(&self, pref: ThemePreference) -> Result<(), StoreError> {
        self.kv.set(THEME_KEY, pref.token())?;
        Ok(())
    }

    /// Flip the resolved theme between light and dark and persist the
    /// result. Once toggled, the preference is always a concrete theme —
    /// never `system` again.
    pub fn toggle(&self, system: Option<ResolvedTheme>) -> Result<ThemePreference, StoreError> {
        let resolved = self.load()?.resolve(system);
        let next = match resolved.flipped() {
            ResolvedTheme::Light => ThemePreference::Light,
            ResolvedTheme::Dark => ThemePreference::Dark,
        };
        self.save(next)?;
        Ok(next)
    }
}
