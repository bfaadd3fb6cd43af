use super::*;
use crate::requirements::LinearRequirement;
use std::cmp::Ordering;
use tracing::debug;

/// Slack on the fit test so accumulated subtraction error never rejects a
/// cut that fills a bar exactly.
const FIT_TOLERANCE: f64 = 1e-9;

impl CutlistEngine {
    /// Assigns linear pieces to stock bars using first-fit decreasing.
    ///
    /// Pieces are stable-sorted by reserved length (longest first) and each one
    /// goes onto the first bar, in creation order, that still has room. A new
    /// bar is opened only when none has. A piece longer than a stock bar gets
    /// an oversized bar of its own.
    pub(super) fn pack_bars(&self, requirements: &[LinearRequirement]) -> Vec<Bar> {
        let standard_length = self.settings.standard_length;

        let mut pieces: Vec<LinearPiece> = requirements
            .iter()
            .map(|req| LinearPiece {
                name: req.name.clone(),
                nominal_length: req.length,
                reserved_length: req.length + self.settings.kerf_reserve,
            })
            .collect();
        pieces.sort_by(|a, b| {
            b.reserved_length
                .partial_cmp(&a.reserved_length)
                .unwrap_or(Ordering::Equal)
        });

        let mut bars: Vec<Bar> = Vec::new();

        for piece in pieces {
            if piece.reserved_length > standard_length + FIT_TOLERANCE {
                warn!(
                    piece = %piece.name,
                    length = piece.reserved_length,
                    standard_length,
                    "Piece exceeds stock bar length, using oversized bar"
                );
                bars.push(Bar {
                    capacity: piece.reserved_length,
                    remaining: 0.0,
                    cuts: vec![piece],
                    oversized: true,
                });
                continue;
            }

            let host = bars
                .iter_mut()
                .find(|bar| {
                    !bar.oversized && bar.remaining + FIT_TOLERANCE >= piece.reserved_length
                });

            match host {
                Some(bar) => {
                    bar.remaining = (bar.remaining - piece.reserved_length).max(0.0);
                    bar.cuts.push(piece);
                }
                None => bars.push(Bar {
                    capacity: standard_length,
                    remaining: (standard_length - piece.reserved_length).max(0.0),
                    cuts: vec![piece],
                    oversized: false,
                }),
            }
        }

        debug!(bars = bars.len(), pieces = requirements.len(), "Packed bars");
        bars
    }
}
