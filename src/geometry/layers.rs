use bitflags::bitflags;

bitflags! {
    /// A bit mask classifying a registered collider
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColliderLayer: u32 {
        /// Default group
        const DEFAULT  = 0x00000001;

        /// Static course terrain
        const TERRAIN  = 0x00000002;

        /// Moving platform surfaces
        const PLATFORM = 0x00000004;

        /// Trigger volumes (detected by gameplay logic, never resolved)
        const SENSOR   = 0x00000008;
    }
}

impl ColliderLayer {
    /// The layers that participate in contact generation
    pub fn solid() -> Self {
        Self::all() - Self::SENSOR
    }
}

impl Default for ColliderLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}
