use crate::requirements;
use crate::settings::StockSettings;
use crate::types::*;
use serde::Deserialize;
use tracing::warn;

mod linear;
mod sheet;
mod summary;

/// Turns one door configuration into bar and sheet cutting plans.
///
/// Both packers are deterministic greedy heuristics (first-fit-decreasing for
/// bars, shelf packing for sheets). They give good, repeatable layouts but no
/// guarantee of minimum waste.
pub struct CutlistEngine {
    config: DoorConfig,
    settings: StockSettings,
}

impl CutlistEngine {
    /// Rejects malformed configurations and unusable settings.
    ///
    /// Values are expected to be range-checked by the caller; only
    /// non-finite or negative numbers are refused here.
    pub fn new(config: DoorConfig, settings: StockSettings) -> Result<Self> {
        settings.validate()?;

        let mut dimensions = vec![
            ("width", config.width),
            ("height", config.height),
            ("thickness", config.thickness),
        ];
        if let Some(panel) = &config.top_panel {
            dimensions.push(("top_panel.height", panel.height));
        }
        for &layer in config.layers.iter().flatten() {
            dimensions.push(("layers", layer));
        }

        for (name, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(CutlistError::InvalidInput(format!(
                    "Field '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(Self { config, settings })
    }

    pub fn settings(&self) -> &StockSettings {
        &self.settings
    }

    /// Runs requirement building, both packers and the aggregation.
    pub fn compute(&self) -> MaterialSummary {
        let requirements = requirements::build(&self.config, &self.settings);

        let bars = self.pack_bars(&requirements.linear);
        let mdf = self.pack_sheets(&requirements.sheet);

        self.summarize(bars, mdf)
    }
}

/// Computes the summary for a typed configuration, never failing.
///
/// Invalid input yields [`MaterialSummary::zeroed`] so an interactive
/// display always has something to show.
pub fn compute_summary(config: &DoorConfig, settings: &StockSettings) -> MaterialSummary {
    match CutlistEngine::new(config.clone(), settings.clone()) {
        Ok(engine) => engine.compute(),
        Err(err) => {
            warn!(error = %err, "Falling back to zeroed summary");
            MaterialSummary::zeroed()
        }
    }
}

/// Computes the summary for a loosely typed configuration record.
///
/// Missing or non-numeric fields yield [`MaterialSummary::zeroed`].
pub fn compute_from_value(value: &serde_json::Value, settings: &StockSettings) -> MaterialSummary {
    match parse_config(value) {
        Ok(config) => compute_summary(&config, settings),
        Err(err) => {
            warn!(error = %err, "Falling back to zeroed summary");
            MaterialSummary::zeroed()
        }
    }
}

/// Deserializes a configuration record posted by the UI.
pub fn parse_config(value: &serde_json::Value) -> Result<DoorConfig> {
    Ok(DoorConfig::deserialize(value)?)
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}
