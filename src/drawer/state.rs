/// Resting position of the drawer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawerState {
    #[default]
    Collapsed,
    Expanded,
}

impl DrawerState {
    /// The other resting position
    pub const fn opposite(self) -> Self {
        match self {
            DrawerState::Collapsed => DrawerState::Expanded,
            DrawerState::Expanded => DrawerState::Collapsed,
        }
    }

    /// Top corner radius of the drawer at rest
    pub const fn corner_radius(self) -> f32 {
        match self {
            DrawerState::Collapsed => 0.0,
            DrawerState::Expanded => 15.0,
        }
    }
}

/// Free-function form of [`DrawerState::opposite`]
pub const fn opposite(state: DrawerState) -> DrawerState {
    state.opposite()
}
