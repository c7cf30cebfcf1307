//! Render-Szene als expliziter Übergabevertrag zwischen Designer und Renderer.
//!
//! Lebt im shared-Modul, da `design` das Profil liefert und `render` es konsumiert.

use super::options::MirrorOptions;
use super::ProfileChannel;
use crate::core::ProfileSet;
use std::sync::Arc;

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Profil-Snapshot für diesen Frame (Arc für O(1)-Clone)
    pub profile: Arc<ProfileSet>,
    /// Szenen-, Profil- und Shading-Parameter
    pub options: MirrorOptions,
}

impl RenderScene {
    pub fn new(profile: Arc<ProfileSet>, options: MirrorOptions) -> Self {
        Self { profile, options }
    }

    /// Szene aus dem aktuell veröffentlichten Profil.
    pub fn from_channel(channel: &ProfileChannel, options: &MirrorOptions) -> Self {
        Self::new(channel.snapshot(), options.clone())
    }

    /// Flacher Spiegel mit Tiefe 0 über die konfigurierte Höhe.
    pub fn flat(options: MirrorOptions) -> Self {
        let (y_min, y_max) = options.profile_bounds();
        Self::new(Arc::new(ProfileSet::flat(0.0, y_min, y_max)), options)
    }
}
