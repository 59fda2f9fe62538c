/// All tracing parameters in one struct.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    // -- Bitmap stage --
    /// RGB color treated as background. Alpha is ignored.
    pub background: [u8; 3],
    /// Optional binarization applied when loading from a file.
    /// `None` keeps the decoded colors as they are.
    pub threshold: Option<ThresholdMethod>,
    /// If true, swap foreground/background after thresholding.
    pub invert: bool,

    // -- Trace stage --
    /// Maximum number of blobs in one run. `None` = width * height.
    pub max_shapes: Option<usize>,
    /// Maximum walk steps for a single blob. `None` = 8 * width * height + 8.
    pub max_steps: Option<usize>,

    // -- Polygon stage --
    /// RDP tolerance in pixels applied before triangulation. 0 = off.
    pub simplify_epsilon: f64,
}

/// Threshold method for converting a grayscale image to binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMethod {
    /// Fixed brightness threshold (0-255).
    Fixed(u8),
    /// Otsu's method (automatic).
    Otsu,
}

pub const WHITE: [u8; 3] = [255, 255, 255];

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            background: WHITE,
            threshold: None,
            invert: false,
            max_shapes: None,
            max_steps: None,
            simplify_epsilon: 0.0,
        }
    }
}

impl TracingConfig {
    /// Blob cap for a `width` x `height` grid.
    pub fn shape_limit(&self, width: u32, height: u32) -> usize {
        self.max_shapes
            .unwrap_or((width as usize * height as usize).max(1))
    }

    /// Per-blob step cap for a `width` x `height` grid.
    pub fn step_limit(&self, width: u32, height: u32) -> usize {
        self.max_steps
            .unwrap_or(8 * width as usize * height as usize + 8)
    }
}
