//! Veröffentlichung des aktuellen Spiegelprofils an Render-Threads.
//!
//! Der Designer ersetzt das `Arc<ProfileSet>` als Ganzes; Leser klonen den
//! `Arc` zu Frame-Beginn und sehen nie einen halb aktualisierten Stand.

use crate::core::ProfileSet;
use std::sync::{Arc, RwLock};

/// Geteilter Slot für das jeweils gültige Profil (Clone = gleicher Slot).
#[derive(Debug, Clone)]
pub struct ProfileChannel {
    slot: Arc<RwLock<Arc<ProfileSet>>>,
}

impl ProfileChannel {
    pub fn new(initial: Arc<ProfileSet>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(initial)),
        }
    }

    /// Ersetzt das veröffentlichte Profil atomar.
    pub fn publish(&self, profile: Arc<ProfileSet>) {
        match self.slot.write() {
            Ok(mut guard) => *guard = profile,
            Err(poisoned) => {
                log::error!("Profil-Lock vergiftet, überschreibe trotzdem");
                *poisoned.into_inner() = profile;
            }
        }
    }

    /// Aktuelles Profil (O(1): nur Arc-Ref-Count erhöhen).
    pub fn snapshot(&self) -> Arc<ProfileSet> {
        match self.slot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => {
                log::error!("Profil-Lock vergiftet, lese letzten Stand");
                Arc::clone(&poisoned.into_inner())
            }
        }
    }
}
