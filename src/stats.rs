use alloc::vec::Vec;

use crate::key::Key;
use crate::probing_table::ProbingTable;
use crate::probing_table::Slot;

/// Debug statistics for hash table analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of live entries
    pub live: usize,
    /// Number of tombstones
    pub tombstones: usize,
    /// Number of non-empty slots (live plus tombstones)
    pub occupied: usize,
    /// Number of empty slots
    pub empty: usize,
    /// Total number of slots
    pub capacity: usize,
    /// Occupied slots over capacity; growth happens once this passes 0.5
    pub load_factor: f64,
    /// Longest distance from a live entry to its home slot
    pub max_probe: usize,
}

impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probing Table Debug Statistics ===");
        println!(
            "Slots: {}/{} occupied ({:.2}% load factor)",
            self.occupied,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Entries: {} live, {} deleted, {} empty slots",
            self.live, self.tombstones, self.empty
        );
        println!("Longest probe: {}", self.max_probe);
    }
}

impl<K: Key, V> ProbingTable<K, V> {
    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Bin `d` counts the live entries stored `d` slots past their home slot,
    /// wrapping around the end of the table. The histogram is as long as the
    /// longest displacement plus one, and empty for an empty table.
    pub fn probe_histogram(&self) -> Vec<usize> {
        let capacity = self.capacity();
        let mut hist = Vec::new();

        for (index, slot) in self.slots().iter().enumerate() {
            if let Slot::Occupied { key, .. } = slot {
                let distance = (index + capacity - self.slot_index(key)) % capacity;
                if hist.len() <= distance {
                    hist.resize(distance + 1, 0);
                }
                hist[distance] += 1;
            }
        }

        hist
    }

    /// Returns occupancy statistics for debugging.
    pub fn debug_stats(&self) -> DebugStats {
        let capacity = self.capacity();
        let empty = self.slots().iter().filter(|slot| slot.is_empty()).count();

        DebugStats {
            live: self.len(),
            tombstones: self.tombstones(),
            occupied: self.occupied_count(),
            empty,
            capacity,
            load_factor: self.occupied_count() as f64 / capacity as f64,
            max_probe: self.probe_histogram().len().saturating_sub(1),
        }
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.len());
        for (distance, &count) in hist.iter().enumerate() {
            let bar = "█".repeat((count * max_bar).div_ceil(max));
            println!("{distance:>4} | {bar} {count}");
        }
    }
}
