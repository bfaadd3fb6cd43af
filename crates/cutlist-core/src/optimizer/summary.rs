use super::*;
use tracing::info;

const MM2_PER_M2: f64 = 1e6;
const MM3_PER_M3: f64 = 1e9;

impl CutlistEngine {
    /// Reduces packed bars and sheets to totals, waste, mass and coating area.
    pub(super) fn summarize(&self, bars: Vec<Bar>, mdf: SheetSummary) -> MaterialSummary {
        let config = &self.config;
        let settings = &self.settings;

        let prism = self.linear_summary(bars);
        let infill = self.infill_summary();

        // Frame prisms fill the core between the two face stacks.
        let prism_section = settings.prism_width * infill.thickness;
        let prism_net_mass =
            prism.net_length * prism_section / MM3_PER_M3 * settings.timber_density;
        let prism_stock_mass =
            prism.stock_length * prism_section / MM3_PER_M3 * settings.timber_density;

        let density = settings.sheet_density;
        let sheet_net_mass = sheet_mass(&mdf.groups, density, |g| g.net_area);
        let sheet_stock_mass = sheet_mass(&mdf.groups, density, |g| g.stock_area);
        let sheet_waste_mass = sheet_mass(&mdf.groups, density, |g| g.waste_area);

        let stock_mass = prism_stock_mass + sheet_stock_mass;
        let waste_mass = (prism_stock_mass - prism_net_mass).max(0.0) + sheet_waste_mass;

        let mut coated_area = coated_surface(config.width, config.height, config.thickness);
        if let Some(panel) = &config.top_panel {
            coated_area += coated_surface(config.width, panel.height, config.thickness);
        }

        let assembly = AssemblySummary {
            total_mass: sheet_net_mass + prism_net_mass + infill.weight,
            coated_area,
            stock_mass,
            waste_mass,
            combined_waste_percentage: percentage(waste_mass, stock_mass),
        };

        let degenerate_pieces: Vec<String> = prism
            .bars
            .iter()
            .filter(|bar| bar.oversized)
            .flat_map(|bar| bar.cuts.iter().map(|cut| cut.name.clone()))
            .chain(
                mdf.groups
                    .iter()
                    .flat_map(|g| &g.sheets)
                    .filter(|sheet| sheet.oversized)
                    .flat_map(|sheet| sheet.placed_pieces.iter().map(|p| p.name.clone())),
            )
            .collect();

        info!(
            bars = prism.bars_needed,
            sheets = mdf.sheets_needed,
            prism_waste_pct = prism.waste_percentage,
            sheet_waste_pct = mdf.waste_percentage,
            mass_kg = assembly.total_mass,
            "Cut-list computed"
        );

        MaterialSummary {
            prism,
            mdf,
            infill,
            assembly,
            fallback: false,
            degenerate_pieces,
        }
    }

    /// Computes stock, net and waste length over the packed bars.
    pub(super) fn linear_summary(&self, bars: Vec<Bar>) -> LinearSummary {
        let stock_length: f64 = bars.iter().map(|b| b.capacity).sum();
        let net_length: f64 = bars
            .iter()
            .flat_map(|b| &b.cuts)
            .map(|c| c.nominal_length)
            .sum();
        let waste_length = stock_length - net_length;

        LinearSummary {
            standard_length: self.settings.standard_length,
            bars_needed: bars.len() as u32,
            stock_length,
            net_length,
            waste_length,
            waste_percentage: percentage(waste_length, stock_length),
            bars,
        }
    }

    /// Sizes the infill pocket left inside `prism_count` nested frames.
    pub(super) fn infill_summary(&self) -> InfillSummary {
        let config = &self.config;
        let settings = &self.settings;

        let frame = 2.0 * config.prism_count as f64 * settings.prism_width;
        let width = (config.width - frame).max(0.0);
        let height = (config.height - frame).max(0.0);

        let face_stack: f64 = requirements::face_layers(config, settings).iter().sum();
        let thickness = (config.thickness - 2.0 * face_stack).max(0.0);

        InfillSummary {
            width,
            height,
            thickness,
            area: width * height / MM2_PER_M2,
            weight: width * height * thickness / MM3_PER_M3 * settings.infill_density,
        }
    }
}

/// Mass of one area figure per group, taken at the group's thickness.
fn sheet_mass(
    groups: &[ThicknessGroup],
    density: f64,
    area_of: impl Fn(&ThicknessGroup) -> f64,
) -> f64 {
    groups
        .iter()
        .map(|g| area_of(g) * g.thickness / MM3_PER_M3 * density)
        .sum()
}

/// Both faces plus the four edges of a panel, in m².
fn coated_surface(width: f64, height: f64, thickness: f64) -> f64 {
    (2.0 * width * height + 2.0 * (width + height) * thickness) / MM2_PER_M2
}
