use thiserror::Error;

/// Errors raised when the drawer is driven before it is fully set up
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DrawerError {
    /// An event arrived before the drawer layout was measured
    #[error("drawer layout has not been measured yet")]
    LayoutNotMeasured,

    #[error("invalid drawer geometry: collapsed offset {collapsed} must be below expanded offset {expanded}")]
    InvalidGeometry { collapsed: f32, expanded: f32 },

    #[error("invalid label metrics: closed height {closed_height}, open height {open_height}")]
    InvalidLabelMetrics {
        closed_height: f32,
        open_height: f32,
    },
}

pub type Result<T> = std::result::Result<T, DrawerError>;
