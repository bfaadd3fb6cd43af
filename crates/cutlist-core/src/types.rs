use serde::{Deserialize, Serialize};

/// Optional secondary panel mounted above the leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPanel {
    pub height: f64,
}

/// Input: door leaf configuration captured by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorConfig {
    pub width: f64,
    pub height: f64,
    /// Overall leaf thickness including both face stacks
    pub thickness: f64,
    /// Member multiplier: each frame side is built from this many prisms
    pub prism_count: u32,
    /// Sheet layer thicknesses applied to each face, outermost first.
    /// `None` means a single layer of the default thickness.
    #[serde(default)]
    pub layers: Option<Vec<f64>>,
    #[serde(default)]
    pub top_panel: Option<TopPanel>,
}

/// Linear member to be cut from bar stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPiece {
    pub name: String,
    pub nominal_length: f64,
    /// Nominal length plus the per-cut kerf reserve
    pub reserved_length: f64,
}

/// A stock bar with the cuts assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub capacity: f64,
    pub remaining: f64,
    pub cuts: Vec<LinearPiece>,
    /// Set when the bar was opened for a piece longer than the standard length
    #[serde(default)]
    pub oversized: bool,
}

/// Rectangular sheet piece before placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPiece {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    /// Material thickness (mm)
    pub thickness: f64,
    pub thickness_group: String,
}

impl SheetPiece {
    pub fn new(name: impl Into<String>, width: f64, height: f64, thickness: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            area: width * height,
            thickness,
            thickness_group: crate::requirements::thickness_label(thickness),
        }
    }
}

/// Placement of a sheet piece on a stock sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub placed_width: f64,
    pub placed_height: f64,
    pub rotated: bool,
    pub area: f64,
}

/// Stock sheet size from the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetFormat {
    pub width: f64,
    pub height: f64,
    pub label: String,
}

impl SheetFormat {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            label: format!("{}x{}", width, height),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Layout of a single stock sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub format: SheetFormat,
    pub thickness_group: String,
    pub placed_pieces: Vec<PlacedPiece>,
    pub efficiency: f64,
    /// Set when the only piece on the sheet does not fit any catalogue format
    #[serde(default)]
    pub oversized: bool,
}

/// Sheets produced for one material thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThicknessGroup {
    pub label: String,
    pub thickness: f64,
    pub sheets: Vec<Sheet>,
    pub stock_area: f64,
    pub net_area: f64,
    pub waste_area: f64,
    pub waste_percentage: f64,
}

/// Bar packing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearSummary {
    pub bars: Vec<Bar>,
    pub standard_length: f64,
    pub bars_needed: u32,
    pub stock_length: f64,
    pub net_length: f64,
    pub waste_length: f64,
    pub waste_percentage: f64,
}

/// Sheet packing statistics across all thickness groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub groups: Vec<ThicknessGroup>,
    /// Group labels in first-appearance order
    pub thickness_labels: Vec<String>,
    pub sheets_needed: u32,
    pub stock_area: f64,
    pub net_area: f64,
    pub waste_area: f64,
    pub waste_percentage: f64,
}

/// Core material between the frame members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfillSummary {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    /// m²
    pub area: f64,
    /// kg
    pub weight: f64,
}

/// Derived whole-assembly figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblySummary {
    /// kg
    pub total_mass: f64,
    /// m²
    pub coated_area: f64,
    /// Mass of all consumed stock (bars + sheets), kg
    pub stock_mass: f64,
    /// Mass of offcuts (bars + sheets), kg
    pub waste_mass: f64,
    pub combined_waste_percentage: f64,
}

/// Output: everything the UI and export layers read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub prism: LinearSummary,
    pub mdf: SheetSummary,
    pub infill: InfillSummary,
    pub assembly: AssemblySummary,
    /// True when the input was malformed and this is the zeroed fallback
    #[serde(default)]
    pub fallback: bool,
    /// Pieces emitted on oversized stock because nothing in stock fits them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degenerate_pieces: Vec<String>,
}

impl MaterialSummary {
    /// All-zero summary shown while the configuration is invalid.
    pub fn zeroed() -> Self {
        Self {
            fallback: true,
            ..Self::default()
        }
    }

    /// True if any figure rests on oversized (non-catalogue) stock.
    pub fn is_approximate(&self) -> bool {
        !self.degenerate_pieces.is_empty()
    }
}

/// Error type for cut-list computation
#[derive(Debug, thiserror::Error)]
pub enum CutlistError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed input: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CutlistError>;
