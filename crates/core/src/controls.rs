//! Lobby controls driven by the running application

use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::BootConfig;
use crate::error::{BootkitError, ClipboardError, SurfaceError};
use crate::platform::{Clipboard, Scheduler, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Copied; acknowledgment shown and revert scheduled
    Copied,
    /// The acknowledgment itself was showing, nothing copied
    Suppressed,
}

pub struct LobbyControls<S, C, K> {
    surface: S,
    clipboard: C,
    scheduler: K,
    lobby_code_id: String,
    start_button_id: String,
    disabled_class: String,
    copied_indicator: String,
    revert_delay: Duration,
}

impl<S, C, K> LobbyControls<S, C, K>
where
    S: Surface + Clone + 'static,
    C: Clipboard,
    K: Scheduler,
{
    pub fn new(surface: S, clipboard: C, scheduler: K, config: &BootConfig) -> Self {
        Self {
            surface,
            clipboard,
            scheduler,
            lobby_code_id: config.elements.lobby_code.clone(),
            start_button_id: config.elements.start_button.clone(),
            disabled_class: config.elements.disabled_class.clone(),
            copied_indicator: config.copied_indicator.clone(),
            revert_delay: config.copy_revert_delay(),
        }
    }

    /// Only the lobby owner sees the start button
    pub fn set_owner_controls_visible(&self, is_owner: bool) -> Result<(), SurfaceError> {
        let display = if is_owner { "block" } else { "none" };
        self.surface.set_style(&self.start_button_id, "display", display)
    }

    pub fn set_start_enabled(&self, is_enabled: bool) -> Result<(), SurfaceError> {
        self.surface.set_disabled(&self.start_button_id, !is_enabled)?;
        self.surface.set_class(&self.start_button_id, &self.disabled_class, !is_enabled)
    }

    /// Copy whatever the lobby code element currently shows. A missing
    /// element is a markup error, not a clipboard failure.
    pub async fn copy_lobby_code(&self) -> Result<CopyOutcome, BootkitError> {
        let current = self
            .surface
            .text(&self.lobby_code_id)
            .inspect_err(|e| error!(error = %e, "Lobby code element unavailable"))?;
        Ok(self.copy_lobby_code_to_clipboard(&current).await?)
    }

    /// On success the element shows the acknowledgment and goes back to
    /// `current_text` after the revert delay. The revert restores the text
    /// captured here even if the code changed in the meantime.
    pub async fn copy_lobby_code_to_clipboard(
        &self,
        current_text: &str,
    ) -> Result<CopyOutcome, ClipboardError> {
        if current_text == self.copied_indicator {
            debug!("Copy acknowledgment still showing, ignoring");
            return Ok(CopyOutcome::Suppressed);
        }

        if let Err(cause) = self.clipboard.write_text(current_text).await {
            error!(%cause, "Failed to copy code");
            return Err(ClipboardError { cause });
        }

        if let Err(e) = self.surface.set_text(&self.lobby_code_id, &self.copied_indicator) {
            // Copied anyway; nothing to acknowledge on or revert
            warn!(error = %e, "Copied lobby code but cannot show acknowledgment");
            return Ok(CopyOutcome::Copied);
        }

        let surface = self.surface.clone();
        let id = self.lobby_code_id.clone();
        let original = current_text.to_string();
        self.scheduler.schedule(
            self.revert_delay,
            Box::new(move || {
                if let Err(e) = surface.set_text(&id, &original) {
                    warn!(error = %e, "Failed to restore lobby code");
                }
            }),
        );

        Ok(CopyOutcome::Copied)
    }
}
