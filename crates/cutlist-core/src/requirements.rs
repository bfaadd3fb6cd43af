//! Derives what has to be cut from a door configuration.

use crate::settings::StockSettings;
use crate::types::{DoorConfig, SheetPiece};

/// Length-only requirement before kerf reserve is applied
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRequirement {
    pub name: String,
    pub length: f64,
}

/// Everything one door needs from stock
#[derive(Debug, Clone, PartialEq)]
pub struct Requirements {
    pub linear: Vec<LinearRequirement>,
    pub sheet: Vec<SheetPiece>,
}

/// Label used to group sheet pieces of one thickness.
pub fn thickness_label(thickness: f64) -> String {
    format!("{}mm", thickness)
}

/// Layer thicknesses applied to each face of the door.
pub fn face_layers(config: &DoorConfig, settings: &StockSettings) -> Vec<f64> {
    match &config.layers {
        Some(layers) if !layers.is_empty() => layers.clone(),
        _ => vec![settings.default_layer_thickness],
    }
}

/// Builds the linear and sheet requirement for a door.
pub fn build(config: &DoorConfig, settings: &StockSettings) -> Requirements {
    Requirements {
        linear: linear_requirement(config),
        sheet: sheet_requirement(config, settings),
    }
}

/// `2×M` sides of the door height, then `2×M` top/bottom members of its width.
fn linear_requirement(config: &DoorConfig) -> Vec<LinearRequirement> {
    let count = 2 * config.prism_count as usize;
    let sides = std::iter::repeat_with(|| LinearRequirement {
        name: "Side".to_string(),
        length: config.height,
    })
    .take(count);
    let rails = std::iter::repeat_with(|| LinearRequirement {
        name: "Top/Bottom".to_string(),
        length: config.width,
    })
    .take(count);

    sides.chain(rails).collect()
}

/// One piece per face and layer for the leaf, then for the top panel.
fn sheet_requirement(config: &DoorConfig, settings: &StockSettings) -> Vec<SheetPiece> {
    let layers = face_layers(config, settings);

    let mut parts = vec![("Leaf", config.height)];
    if let Some(panel) = &config.top_panel {
        parts.push(("Top panel", panel.height));
    }

    let mut pieces = Vec::new();
    for (part, height) in parts {
        for face in ["A", "B"] {
            for (idx, &thickness) in layers.iter().enumerate() {
                let label = thickness_label(thickness);
                let repeated = layers[..idx].contains(&thickness);
                let name = if repeated {
                    format!("{} {} {} #{}", part, face, label, idx + 1)
                } else {
                    format!("{} {} {}", part, face, label)
                };
                pieces.push(SheetPiece::new(name, config.width, height, thickness));
            }
        }
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TopPanel;

    fn door(layers: Option<Vec<f64>>, top_panel: Option<TopPanel>) -> DoorConfig {
        DoorConfig {
            width: 900.0,
            height: 2000.0,
            thickness: 40.0,
            prism_count: 2,
            layers,
            top_panel,
        }
    }

    #[test]
    fn test_linear_requirement_counts() {
        let req = build(&door(None, None), &StockSettings::default());

        assert_eq!(req.linear.len(), 8);
        assert!(req.linear[..4]
            .iter()
            .all(|p| p.name == "Side" && p.length == 2000.0));
        assert!(req.linear[4..]
            .iter()
            .all(|p| p.name == "Top/Bottom" && p.length == 900.0));
    }

    #[test]
    fn test_default_layer_used_without_combination() {
        let req = build(&door(None, None), &StockSettings::default());

        assert_eq!(req.sheet.len(), 2);
        assert!(req.sheet.iter().all(|p| p.thickness_group == "4mm"));
        assert_eq!(req.sheet[0].name, "Leaf A 4mm");
        assert_eq!(req.sheet[1].name, "Leaf B 4mm");
    }

    #[test]
    fn test_layers_and_top_panel() {
        let req = build(
            &door(Some(vec![6.0, 4.0]), Some(TopPanel { height: 400.0 })),
            &StockSettings::default(),
        );

        // 2 parts x 2 faces x 2 layers
        assert_eq!(req.sheet.len(), 8);
        let six: Vec<_> = req
            .sheet
            .iter()
            .filter(|p| p.thickness_group == "6mm")
            .collect();
        assert_eq!(six.len(), 4);

        let panel: Vec<_> = req
            .sheet
            .iter()
            .filter(|p| p.name.starts_with("Top panel"))
            .collect();
        assert_eq!(panel.len(), 4);
        assert!(panel.iter().all(|p| p.height == 400.0 && p.width == 900.0));
    }

    #[test]
    fn test_repeated_thickness_keeps_names_unique() {
        let req = build(&door(Some(vec![4.0, 4.0]), None), &StockSettings::default());

        let names: Vec<_> = req.sheet.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Leaf A 4mm", "Leaf A 4mm #2", "Leaf B 4mm", "Leaf B 4mm #2"]
        );
    }

    #[test]
    fn test_zero_prisms_gives_empty_linear_requirement() {
        let mut config = door(None, None);
        config.prism_count = 0;

        assert!(build(&config, &StockSettings::default()).linear.is_empty());
    }
}
