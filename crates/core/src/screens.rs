//! Mutually exclusive screens
//!
//! The registry owns the set of screens it may show. Asking for anything else
//! is a programming error and is reported instead of ignored. Hiding covers
//! every element marked as a screen, registered or not.

use std::collections::BTreeSet;
use tracing::{debug, error};

use crate::config::BootConfig;
use crate::error::{BootkitError, ScreenError, SurfaceError};
use crate::models::ScreenId;
use crate::platform::Surface;

pub struct ScreenRegistry<S> {
    surface: S,
    screens: BTreeSet<ScreenId>,
    screen_class: String,
    visible_class: String,
    visible: Option<ScreenId>,
}

impl<S: Surface> ScreenRegistry<S> {
    pub fn new(
        surface: S,
        screens: impl IntoIterator<Item = ScreenId>,
        screen_class: impl Into<String>,
        visible_class: impl Into<String>,
    ) -> Self {
        Self {
            surface,
            screens: screens.into_iter().collect(),
            screen_class: screen_class.into(),
            visible_class: visible_class.into(),
            visible: None,
        }
    }

    pub fn from_config(surface: S, config: &BootConfig) -> Self {
        Self::new(
            surface,
            config.screens.iter().copied(),
            &config.elements.screen_class,
            &config.elements.visible_class,
        )
    }

    pub fn visible(&self) -> Option<ScreenId> {
        self.visible
    }

    pub fn is_registered(&self, id: ScreenId) -> bool {
        self.screens.contains(&id)
    }

    /// Take over whichever registered screen the markup already marks visible.
    /// With several marked, the first in registry order wins and the rest are
    /// hidden.
    pub fn adopt_markup_state(&mut self) -> Result<Option<ScreenId>, BootkitError> {
        let mut marked = Vec::new();
        for id in &self.screens {
            if self.surface.has_class(id.as_str(), &self.visible_class)? {
                marked.push(*id);
            }
        }

        match marked.first() {
            Some(&first) if marked.len() > 1 => self.show_screen(first)?,
            Some(&first) => self.visible = Some(first),
            None => self.visible = None,
        }
        Ok(self.visible)
    }

    /// Hide every registered or marked screen, then show `id`
    pub fn show_screen(&mut self, id: ScreenId) -> Result<(), BootkitError> {
        if !self.is_registered(id) {
            error!(screen = %id, "Attempted to show an unregistered screen");
            return Err(ScreenError::UnknownScreen { id: id.to_string() }.into());
        }

        // Every element must exist before anything is touched
        for screen in &self.screens {
            if !self.surface.has_element(screen.as_str()) {
                error!(screen = %screen, "Screen element missing from markup");
                return Err(SurfaceError::MissingElement { id: screen.to_string() }.into());
            }
        }

        self.surface.set_class_on_all(&self.screen_class, &self.visible_class, false)?;
        for screen in &self.screens {
            self.surface.set_class(screen.as_str(), &self.visible_class, false)?;
        }
        self.surface.set_class(id.as_str(), &self.visible_class, true)?;

        debug!(screen = %id, previous = ?self.visible, "Showing screen");
        self.visible = Some(id);
        Ok(())
    }

    /// String form used by the JS bridge
    pub fn show_screen_named(&mut self, name: &str) -> Result<(), BootkitError> {
        let id = name
            .parse::<ScreenId>()
            .inspect_err(|_| error!(screen = name, "Attempted to show an unknown screen"))?;
        self.show_screen(id)
    }
}
