/// The two package classes the model distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnackClass {
    Kinoko,
    Takenoko,
}

impl SnackClass {
    pub const ALL: &[SnackClass] = &[SnackClass::Kinoko, SnackClass::Takenoko];

    /// Maps an SSD class index to a package class.
    ///
    /// Index 0 is the background class and yields `None`, as does anything
    /// outside the model's taxonomy.
    pub fn from_class_id(id: u32) -> Option<SnackClass> {
        match id {
            1 => Some(SnackClass::Kinoko),
            2 => Some(SnackClass::Takenoko),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SnackClass::Kinoko => "KINOKO",
            SnackClass::Takenoko => "TAKENOKO",
        }
    }

    /// Overlay color for this class (RGB).
    pub fn color(self) -> [u8; 3] {
        match self {
            SnackClass::Kinoko => [214, 40, 40],
            SnackClass::Takenoko => [76, 160, 60],
        }
    }
}

/// One detected package: pixel-space bounding box, class, and confidence.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub class: SnackClass,
    pub score: f64,
}

impl Detection {
    pub fn iou(&self, other: &Detection) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        let area_a = self.width as f64 * self.height as f64;
        let area_b = other.width as f64 * other.height as f64;
        inter / (area_a + area_b - inter)
    }

    /// Per-class counts for a set of detections, in `SnackClass::ALL` order.
    pub fn count_by_class(detections: &[Detection]) -> Vec<(SnackClass, usize)> {
        SnackClass::ALL
            .iter()
            .map(|&class| {
                let n = detections.iter().filter(|d| d.class == class).count();
                (class, n)
            })
            .collect()
    }
}
