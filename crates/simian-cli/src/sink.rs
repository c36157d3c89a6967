// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Actuators the CLI drives: a JSON-lines event stream and a gesture counter.

use std::collections::BTreeMap;
use std::io::Write;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use simian_core::{ActionError, Actuator, Gesture, Orientation, RunSummary};

#[derive(Serialize)]
struct Record<'a> {
    seq: u64,
    action: &'static str,
    orientation: Orientation,
    gesture: &'a Gesture,
}

/// Writes one JSON object per gesture to `out`.
pub struct JsonLinesActuator<W> {
    out: W,
    seq: u64,
}

impl<W: Write> JsonLinesActuator<W> {
    /// Stream records to `out`.
    pub fn new(out: W) -> Self {
        Self { out, seq: 0 }
    }

    /// Records written so far.
    pub fn written(&self) -> u64 {
        self.seq
    }

    /// Flush buffered records.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    /// Returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Actuator for JsonLinesActuator<W> {
    fn perform(&mut self, gesture: &Gesture, orientation: Orientation) -> Result<(), ActionError> {
        self.seq += 1;
        let record = Record {
            seq: self.seq,
            action: gesture.label(),
            orientation,
            gesture,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Counts gestures by label without emitting them.
#[derive(Debug, Default)]
pub struct CountingActuator {
    counts: BTreeMap<&'static str, u64>,
}

impl CountingActuator {
    /// Per-label counts, sorted by label.
    #[cfg(test)]
    pub fn counts(&self) -> &BTreeMap<&'static str, u64> {
        &self.counts
    }

    /// Renders the counts plus run totals.
    pub fn render(&self, seed: u32, summary: &RunSummary) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Gesture", "Count"]);
        for (label, count) in &self.counts {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(count).set_alignment(CellAlignment::Right),
            ]);
        }
        let totals = [
            ("Seed", u64::from(seed)),
            ("Ticks", summary.ticks),
            ("Weighted fired", summary.random_fired),
            ("Interval fired", summary.regular_fired),
        ];
        for (label, value) in totals {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(value).set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }
}

impl Actuator for CountingActuator {
    fn perform(&mut self, gesture: &Gesture, _orientation: Orientation) -> Result<(), ActionError> {
        *self.counts.entry(gesture.label()).or_insert(0) += 1;
        Ok(())
    }
}
