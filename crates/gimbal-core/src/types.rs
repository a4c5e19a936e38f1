//! Transform mode and orientation frame

/// Which component of the transform the gizmo edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl TransformMode {
    pub const ALL: &'static [TransformMode] = &[
        TransformMode::Translate,
        TransformMode::Rotate,
        TransformMode::Scale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransformMode::Translate => "Translate",
            TransformMode::Rotate => "Rotate",
            TransformMode::Scale => "Scale",
        }
    }
}

/// Frame the gizmo axes are aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Axes follow the object's own rotation
    Local,
    /// Axes are fixed to the scene
    #[default]
    World,
}

impl Orientation {
    /// The other frame
    pub fn opposite(self) -> Self {
        match self {
            Orientation::Local => Orientation::World,
            Orientation::World => Orientation::Local,
        }
    }

    /// Flip in place
    pub fn toggle(&mut self) {
        *self = self.opposite();
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Local => "local",
            Orientation::World => "world",
        }
    }
}
