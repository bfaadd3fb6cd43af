use super::*;
use tracing::debug;

/// Outcome of shelf-packing one format against a snapshot of the worklist.
#[derive(Debug, Clone)]
pub(super) struct Simulation {
    pub format_index: usize,
    /// Worklist index of each placed piece, with its placement
    pub placements: Vec<(usize, PlacedPiece)>,
    pub efficiency: f64,
}

impl Simulation {
    /// Strictly higher efficiency wins; equal efficiency falls back to the
    /// packed piece count. Full ties keep the earlier candidate.
    fn beats(&self, other: &Simulation) -> bool {
        self.efficiency > other.efficiency
            || (self.efficiency == other.efficiency
                && self.placements.len() > other.placements.len())
    }
}

impl CutlistEngine {
    /// Packs sheet pieces per thickness group, groups in first-appearance order.
    pub(super) fn pack_sheets(&self, pieces: &[SheetPiece]) -> SheetSummary {
        let mut worklists: Vec<(String, f64, Vec<SheetPiece>)> = Vec::new();
        for piece in pieces {
            match worklists
                .iter_mut()
                .find(|(label, _, _)| *label == piece.thickness_group)
            {
                Some((_, _, list)) => list.push(piece.clone()),
                None => worklists.push((
                    piece.thickness_group.clone(),
                    piece.thickness,
                    vec![piece.clone()],
                )),
            }
        }

        let groups: Vec<ThicknessGroup> = worklists
            .into_iter()
            .map(|(label, thickness, list)| self.pack_group(label, thickness, list))
            .collect();

        let stock_area: f64 = groups.iter().map(|g| g.stock_area).sum();
        let net_area: f64 = groups.iter().map(|g| g.net_area).sum();
        let waste_area: f64 = groups.iter().map(|g| g.waste_area).sum();

        SheetSummary {
            thickness_labels: groups.iter().map(|g| g.label.clone()).collect(),
            sheets_needed: groups.iter().map(|g| g.sheets.len() as u32).sum(),
            stock_area,
            net_area,
            waste_area,
            waste_percentage: percentage(waste_area, stock_area),
            groups,
        }
    }

    /// Produces sheets for one thickness group until every piece is placed.
    pub(super) fn pack_group(
        &self,
        label: String,
        thickness: f64,
        mut worklist: Vec<SheetPiece>,
    ) -> ThicknessGroup {
        let net_area: f64 = worklist.iter().map(|p| p.area).sum();
        let mut sheets = Vec::new();

        while !worklist.is_empty() {
            let best = self
                .settings
                .sheet_formats
                .iter()
                .enumerate()
                .map(|(idx, _)| self.simulate(idx, &worklist))
                .filter(|sim| !sim.placements.is_empty())
                .fold(None::<Simulation>, |best, sim| match best {
                    Some(current) if !sim.beats(&current) => Some(current),
                    _ => Some(sim),
                });

            match best {
                Some(sim) => {
                    let format = self.settings.sheet_formats[sim.format_index].clone();
                    debug!(
                        group = %label,
                        format = %format.label,
                        pieces = sim.placements.len(),
                        efficiency = sim.efficiency,
                        "Selected sheet format"
                    );

                    let mut packed = vec![false; worklist.len()];
                    let mut placed_pieces = Vec::with_capacity(sim.placements.len());
                    for (idx, placement) in sim.placements {
                        packed[idx] = true;
                        placed_pieces.push(placement);
                    }

                    sheets.push(Sheet {
                        format,
                        thickness_group: label.clone(),
                        placed_pieces,
                        efficiency: sim.efficiency,
                        oversized: false,
                    });

                    let mut flags = packed.into_iter();
                    worklist.retain(|_| !flags.next().unwrap_or(false));
                }
                None => {
                    let piece = worklist.remove(0);
                    let format = self.settings.sheet_formats[0].clone();
                    warn!(
                        group = %label,
                        piece = %piece.name,
                        width = piece.width,
                        height = piece.height,
                        "Piece fits no sheet format, emitting oversized sheet"
                    );

                    sheets.push(Sheet {
                        efficiency: piece.area / format.area(),
                        format,
                        thickness_group: label.clone(),
                        placed_pieces: vec![PlacedPiece {
                            name: piece.name,
                            x: 0.0,
                            y: 0.0,
                            placed_width: piece.width,
                            placed_height: piece.height,
                            rotated: false,
                            area: piece.area,
                        }],
                        oversized: true,
                    });
                }
            }
        }

        let stock_area: f64 = sheets.iter().map(|s| s.format.area()).sum();
        // Oversized sheets can hold more than their format area.
        let waste_area = (stock_area - net_area).max(0.0);

        ThicknessGroup {
            label,
            thickness,
            sheets,
            stock_area,
            net_area,
            waste_area,
            waste_percentage: percentage(waste_area, stock_area),
        }
    }

    /// Shelf-packs one catalogue format over the worklist without touching it.
    ///
    /// Each shelf scans the unpacked pieces in order and places whatever still
    /// fits in the row, trying the piece as given and then rotated. A scan
    /// that places nothing ends the sheet.
    pub(super) fn simulate(&self, format_index: usize, worklist: &[SheetPiece]) -> Simulation {
        let format = &self.settings.sheet_formats[format_index];
        let kerf = self.settings.sheet_kerf;

        let mut packed = vec![false; worklist.len()];
        let mut placements = Vec::new();
        let mut y = 0.0;

        loop {
            let mut x = 0.0;
            let mut shelf_height: f64 = 0.0;
            let mut placed_in_shelf = 0;

            for (idx, piece) in worklist.iter().enumerate() {
                if packed[idx] {
                    continue;
                }

                let fits =
                    |w: f64, h: f64| x + w + kerf <= format.width && y + h + kerf <= format.height;
                let orientation = if fits(piece.width, piece.height) {
                    Some((piece.width, piece.height, false))
                } else if fits(piece.height, piece.width) {
                    Some((piece.height, piece.width, true))
                } else {
                    None
                };

                if let Some((placed_width, placed_height, rotated)) = orientation {
                    placements.push((
                        idx,
                        PlacedPiece {
                            name: piece.name.clone(),
                            x,
                            y,
                            placed_width,
                            placed_height,
                            rotated,
                            area: piece.area,
                        },
                    ));
                    packed[idx] = true;
                    placed_in_shelf += 1;
                    x += placed_width + kerf;
                    shelf_height = shelf_height.max(placed_height);
                }
            }

            if placed_in_shelf == 0 {
                break;
            }
            y += shelf_height + kerf;
        }

        let placed_area: f64 = placements.iter().map(|(_, p)| p.area).sum();

        Simulation {
            format_index,
            placements,
            efficiency: placed_area / format.area(),
        }
    }
}
