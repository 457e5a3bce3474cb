#![forbid(unsafe_code)]

use thiserror::Error;

use crate::profile::Axis;

pub type Result<T> = std::result::Result<T, DragError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("element not found: {name}")]
    UnknownElement { name: String },

    #[error("element {id} is not on the surface")]
    Detached { id: crate::event::ElementId },

    #[error("invalid {axis} bounds: min {min} > max {max}")]
    InvalidBounds { axis: Axis, min: i32, max: i32 },

    #[error("snap grid must be positive")]
    InvalidSnap,
}

impl DragError {
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownElement { name: name.into() }
    }

    /// Whether the error came from option validation rather than lookup.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidBounds { .. } | Self::InvalidSnap)
    }
}

#[cfg(test)]
mod tests {
    use super::DragError;
    use crate::event::ElementId;
    use crate::profile::Axis;

    #[test]
    fn unknown_constructor_preserves_name() {
        let error = DragError::unknown("handle");
        assert_eq!(error.to_string(), "element not found: handle");
        assert!(!error.is_config_error());
    }

    #[test]
    fn invalid_bounds_message_names_axis() {
        let error = DragError::InvalidBounds {
            axis: Axis::Y,
            min: 300,
            max: 100,
        };
        assert_eq!(error.to_string(), "invalid y bounds: min 300 > max 100");
        assert!(error.is_config_error());
    }

    #[test]
    fn detached_message_uses_element_display() {
        let error = DragError::Detached {
            id: ElementId::new(9),
        };
        assert_eq!(error.to_string(), "element #9 is not on the surface");
    }
}
