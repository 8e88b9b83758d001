//! Turbo enums.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::view::Error;

/// What a Turbo Stream does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurboStreamAction {
    /// Append to the target's children.
    Append,
    /// Prepend to the target's children.
    Prepend,
    /// Replace the target.
    Replace,
    /// Replace the target's children.
    #[default]
    Update,
    /// Remove the target.
    Remove,
    /// Insert before the target.
    Before,
    /// Insert after the target.
    After,
    /// Morph the target into the template.
    Morph,
    /// Refresh the page.
    Refresh,
}

impl TurboStreamAction {
    pub fn as_str(&self) -> &'static str {
        use TurboStreamAction::*;

        match self {
            Append => "append",
            Prepend => "prepend",
            Replace => "replace",
            Update => "update",
            Remove => "remove",
            Before => "before",
            After => "after",
            Morph => "morph",
            Refresh => "refresh",
        }
    }
}

impl Display for TurboStreamAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TurboStreamAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use TurboStreamAction::*;

        Ok(match s.to_lowercase().as_str() {
            "append" => Append,
            "prepend" => Prepend,
            "replace" => Replace,
            "update" => Update,
            "remove" => Remove,
            "before" => Before,
            "after" => After,
            "morph" => Morph,
            "refresh" => Refresh,
            _ => return Err(Error::InvalidAttribute(s.to_string())),
        })
    }
}

/// `data-turbo-action` of a frame: how navigation is recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitAction {
    Restore,
    Replace,
    Advance,
}

impl Display for VisitAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            VisitAction::Restore => "restore",
            VisitAction::Replace => "replace",
            VisitAction::Advance => "advance",
        };

        write!(f, "{}", value)
    }
}

impl FromStr for VisitAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "restore" => Ok(VisitAction::Restore),
            "replace" => Ok(VisitAction::Replace),
            "advance" => Ok(VisitAction::Advance),
            _ => Err(Error::InvalidAttribute(s.to_string())),
        }
    }
}

/// When a frame with `src` loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// Navigate as soon as `src` changes.
    Eager,
    /// Wait until the frame is visible.
    Lazy,
}

impl Display for Loading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Loading::Eager => write!(f, "eager"),
            Loading::Lazy => write!(f, "lazy"),
        }
    }
}

impl FromStr for Loading {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eager" => Ok(Loading::Eager),
            "lazy" => Ok(Loading::Lazy),
            _ => Err(Error::InvalidAttribute(s.to_string())),
        }
    }
}
