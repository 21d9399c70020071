use crate::config::DrawerConfig;
use crate::error::{DrawerError, Result};

/// Resting offsets of the drawer, measured once layout has run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerGeometry {
    collapsed_offset: f32,
    expanded_offset: f32,
}

impl DrawerGeometry {
    pub fn new(collapsed_offset: f32, expanded_offset: f32) -> Result<Self> {
        let valid = collapsed_offset.is_finite()
            && expanded_offset.is_finite()
            && collapsed_offset < expanded_offset;
        if !valid {
            return Err(DrawerError::InvalidGeometry {
                collapsed: collapsed_offset,
                expanded: expanded_offset,
            });
        }
        Ok(Self {
            collapsed_offset,
            expanded_offset,
        })
    }

    /// Expanded offset is the measured drawer height; collapsed comes from config
    pub fn measured(config: &DrawerConfig, drawer_height: f32) -> Result<Self> {
        Self::new(config.collapsed_offset, drawer_height)
    }

    pub fn collapsed_offset(&self) -> f32 {
        self.collapsed_offset
    }

    pub fn expanded_offset(&self) -> f32 {
        self.expanded_offset
    }

    /// Drag distance that covers a whole transition. Always positive.
    pub fn total_distance(&self) -> f32 {
        self.expanded_offset - self.collapsed_offset
    }
}

/// Label sizes and vertical positions after layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelMetrics {
    pub closed_height: f32,
    pub open_height: f32,
    pub closed_frame_y: f32,
    pub open_frame_y: f32,
}

impl LabelMetrics {
    /// Scale and shift that map the open label onto the closed one.
    pub fn reshape(&self) -> Result<LabelReshape> {
        let valid = self.closed_height.is_finite()
            && self.open_height.is_finite()
            && self.closed_height > 0.0
            && self.open_height > 0.0;
        if !valid {
            return Err(DrawerError::InvalidLabelMetrics {
                closed_height: self.closed_height,
                open_height: self.open_height,
            });
        }

        let closed_scale = self.closed_height / self.open_height;
        let centering = (self.open_height - self.closed_height) / 2.0;
        let closed_translation = self.open_frame_y - (self.closed_frame_y - centering);
        Ok(LabelReshape {
            closed_scale,
            closed_translation,
        })
    }
}

/// Label transform parameters, computed once per layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelReshape {
    /// closed height / open height
    pub closed_scale: f32,
    pub closed_translation: f32,
}

/// Everything measured from the view tree that the transition needs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerLayout {
    pub geometry: DrawerGeometry,
    pub labels: LabelReshape,
}

impl DrawerLayout {
    pub fn new(geometry: DrawerGeometry, labels: &LabelMetrics) -> Result<Self> {
        Ok(Self {
            geometry,
            labels: labels.reshape()?,
        })
    }
}
