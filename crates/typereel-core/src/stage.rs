#![forbid(unsafe_code)]

//! Stage: the named collection of surfaces and controls a sequence touches.
//!
//! Every lookup returns `Option` — a missing target is a guard that skips
//! the single action referencing it, never an error that stops a sequence.
//!
//! # Invariants
//!
//! 1. Names are unique; inserting an existing name replaces the entry.
//! 2. Removal of a control leaves every other entry untouched.
//! 3. Unknown names yield `None` from every accessor.

use bitflags::bitflags;

use crate::surface::{Span, TextSurface};

// ---------------------------------------------------------------------------
// Control styling state
// ---------------------------------------------------------------------------

bitflags! {
    /// Visual state classes a control can carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClassSet: u8 {
        /// The control is in its toggled-on visual state.
        const ACTIVE = 1 << 0;
        /// Busy indicator while a sequence is in flight.
        const ANIMATING = 1 << 1;
        /// The control currently offers the reload affordance.
        const RELOAD = 1 << 2;
    }
}

/// Mutable style state of a non-text control (buttons, icons, decorations).
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    classes: ClassSet,
    visible: bool,
    interactive: bool,
    opacity: f32,
    fill: Option<String>,
    gradient: bool,
    pulse: bool,
    shimmer: bool,
    text: String,
    content: Vec<Span>,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            classes: ClassSet::empty(),
            visible: true,
            interactive: true,
            opacity: 1.0,
            fill: None,
            gradient: false,
            pulse: false,
            shimmer: false,
            text: String::new(),
            content: Vec::new(),
        }
    }
}

impl Control {
    /// Create a control in its default (visible, interactive) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label / placeholder text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the rich content shown inside the control.
    #[must_use]
    pub fn with_content(mut self, content: Vec<Span>) -> Self {
        self.content = content;
        self
    }

    /// Enable the animated gradient fill.
    #[must_use]
    pub fn with_gradient(mut self) -> Self {
        self.gradient = true;
        self
    }

    /// Enable the pulse animation.
    #[must_use]
    pub fn with_pulse(mut self) -> Self {
        self.pulse = true;
        self
    }

    /// Enable the shimmer text effect.
    #[must_use]
    pub fn with_shimmer(mut self) -> Self {
        self.shimmer = true;
        self
    }

    // -- class flags --------------------------------------------------------

    pub fn add_class(&mut self, class: ClassSet) {
        self.classes.insert(class);
    }

    pub fn remove_class(&mut self, class: ClassSet) {
        self.classes.remove(class);
    }

    #[must_use]
    pub fn has_class(&self, class: ClassSet) -> bool {
        self.classes.contains(class)
    }

    // -- visibility / interactivity -----------------------------------------

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Enable or disable pointer interaction, dimming accordingly.
    pub fn set_interactive(&mut self, interactive: bool, opacity: f32) {
        self.interactive = interactive;
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    // -- fill / animation styling -------------------------------------------

    #[must_use]
    pub fn fill(&self) -> Option<&str> {
        self.fill.as_deref()
    }

    /// Replace the icon fill with a solid color, dropping any gradient.
    pub fn set_solid_fill(&mut self, color: impl Into<String>) {
        self.fill = Some(color.into());
        self.gradient = false;
    }

    /// Restore the animated gradient fill.
    pub fn restore_gradient(&mut self) {
        self.fill = None;
        self.gradient = true;
    }

    #[must_use]
    pub fn has_gradient(&self) -> bool {
        self.gradient
    }

    #[must_use]
    pub fn has_pulse(&self) -> bool {
        self.pulse
    }

    pub fn set_pulse(&mut self, pulse: bool) {
        self.pulse = pulse;
    }

    #[must_use]
    pub fn has_shimmer(&self) -> bool {
        self.shimmer
    }

    pub fn set_shimmer(&mut self, shimmer: bool) {
        self.shimmer = shimmer;
    }

    // -- text / content ------------------------------------------------------

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn content(&self) -> &[Span] {
        &self.content
    }

    pub fn set_rich_content(&mut self, content: Vec<Span>) {
        self.content = content;
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

struct NamedSurface<S> {
    name: String,
    surface: S,
}

struct NamedControl {
    name: String,
    control: Control,
}

/// Named registry of the surfaces and controls one sequence reads and writes.
pub struct Stage<S> {
    surfaces: Vec<NamedSurface<S>>,
    controls: Vec<NamedControl>,
}

impl<S> std::fmt::Debug for Stage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("surfaces", &self.surfaces.len())
            .field("controls", &self.controls.len())
            .finish()
    }
}

impl<S: TextSurface> Stage<S> {
    /// Create an empty stage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            controls: Vec::new(),
        }
    }

    /// Register a surface (builder pattern). Existing names are replaced.
    #[must_use]
    pub fn with_surface(mut self, name: &str, surface: S) -> Self {
        self.insert_surface(name, surface);
        self
    }

    /// Register a control (builder pattern). Existing names are replaced.
    #[must_use]
    pub fn with_control(mut self, name: &str, control: Control) -> Self {
        self.insert_control(name, control);
        self
    }

    /// Insert or replace a surface.
    pub fn insert_surface(&mut self, name: &str, surface: S) {
        if let Some(existing) = self.surfaces.iter_mut().find(|s| s.name == name) {
            existing.surface = surface;
        } else {
            self.surfaces.push(NamedSurface {
                name: name.to_string(),
                surface,
            });
        }
    }

    /// Insert or replace a control.
    pub fn insert_control(&mut self, name: &str, control: Control) {
        if let Some(existing) = self.controls.iter_mut().find(|c| c.name == name) {
            existing.control = control;
        } else {
            self.controls.push(NamedControl {
                name: name.to_string(),
                control,
            });
        }
    }

    /// Remove a control. Returns `true` if it existed.
    pub fn remove_control(&mut self, name: &str) -> bool {
        let before = self.controls.len();
        self.controls.retain(|c| c.name != name);
        self.controls.len() < before
    }

    /// Whether a control with this name exists.
    #[must_use]
    pub fn has_control(&self, name: &str) -> bool {
        self.controls.iter().any(|c| c.name == name)
    }

    /// Look up a surface by name.
    #[must_use]
    pub fn surface(&self, name: &str) -> Option<&S> {
        self.surfaces
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.surface)
    }

    /// Look up a surface mutably by name.
    pub fn surface_mut(&mut self, name: &str) -> Option<&mut S> {
        self.surfaces
            .iter_mut()
            .find(|s| s.name == name)
            .map(|s| &mut s.surface)
    }

    /// Look up a control by name.
    #[must_use]
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.control)
    }

    /// Look up a control mutably by name.
    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| &mut c.control)
    }
}

impl<S: TextSurface> Default for Stage<S> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
