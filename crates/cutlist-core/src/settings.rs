use crate::types::{CutlistError, Result, SheetFormat};
use serde::{Deserialize, Serialize};

/// Stock and material constants the engine works against.
///
/// These are workshop settings rather than per-door input: bar length, saw
/// allowances, the sheet catalogue and the densities used for mass figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSettings {
    /// Length of one stock bar (mm)
    pub standard_length: f64,
    /// Extra length reserved on every linear cut (mm)
    pub kerf_reserve: f64,
    /// Gap kept between sheet pieces and towards the far sheet edges (mm)
    pub sheet_kerf: f64,
    /// Available sheet formats, in preference order
    pub sheet_formats: Vec<SheetFormat>,
    /// Layer thickness used when a door has no layer combination (mm)
    pub default_layer_thickness: f64,
    /// Width of one frame prism (mm)
    pub prism_width: f64,
    /// kg/m³
    pub sheet_density: f64,
    /// kg/m³
    pub timber_density: f64,
    /// kg/m³
    pub infill_density: f64,
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            standard_length: 3000.0,
            kerf_reserve: 10.0,
            sheet_kerf: 4.0,
            sheet_formats: vec![
                SheetFormat::new(2800.0, 2070.0),
                SheetFormat::new(2440.0, 1830.0),
                SheetFormat::new(2440.0, 1220.0),
            ],
            default_layer_thickness: 4.0,
            prism_width: 30.0,
            sheet_density: 750.0,
            timber_density: 500.0,
            infill_density: 25.0,
        }
    }
}

impl StockSettings {
    /// Rejects settings the packers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sheet_formats.is_empty() {
            return Err(CutlistError::InvalidInput(
                "At least one sheet format must be provided".to_string(),
            ));
        }

        if !(self.standard_length.is_finite() && self.standard_length > 0.0) {
            return Err(CutlistError::InvalidInput(
                "Standard bar length must be positive".to_string(),
            ));
        }

        for format in &self.sheet_formats {
            if !(format.width.is_finite() && format.width > 0.0)
                || !(format.height.is_finite() && format.height > 0.0)
            {
                return Err(CutlistError::InvalidInput(format!(
                    "Sheet format '{}' has non-positive dimensions",
                    format.label
                )));
            }
        }

        let non_negative = [
            ("kerf_reserve", self.kerf_reserve),
            ("sheet_kerf", self.sheet_kerf),
            ("default_layer_thickness", self.default_layer_thickness),
            ("prism_width", self.prism_width),
            ("sheet_density", self.sheet_density),
            ("timber_density", self.timber_density),
            ("infill_density", self.infill_density),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CutlistError::InvalidInput(format!(
                    "Setting '{}' must be a non-negative number",
                    name
                )));
            }
        }

        Ok(())
    }
}
