use crate::carrier::Carrier;
use crate::codec::Level;
use crate::layout::{capacity, max_embed_len, PREAMBLE_LEN};
use serde::Serialize;

/// How much a carrier can hold at one density
#[derive(Debug, Clone, Serialize)]
pub struct LevelCapacity {
    pub level: Level,
    /// Largest embeddable file in bytes
    pub max_embed_bytes: usize,
    /// Padded payload bytes available after the preamble
    pub payload_capacity_bytes: usize,
}

/// Capacity summary of a carrier image
#[derive(Debug, Clone, Serialize)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub preamble_channels: usize,
    pub levels: Vec<LevelCapacity>,
}

impl CapacityReport {
    pub fn for_level(&self, level: Level) -> Option<&LevelCapacity> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// Analyze how much data a carrier can hide at each density
pub fn analyze(carrier: &Carrier) -> CapacityReport {
    let channels = carrier.channel_count();
    let levels = Level::ALL
        .iter()
        .map(|&level| LevelCapacity {
            level,
            max_embed_bytes: max_embed_len(channels, level),
            payload_capacity_bytes: capacity(channels, level),
        })
        .collect();

    CapacityReport {
        width: carrier.width(),
        height: carrier.height(),
        channels,
        preamble_channels: PREAMBLE_LEN,
        levels,
    }
}

/// Human readable byte count: `B`, `KiB` or `MiB`
pub fn format_size(size: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    if size >= MIB {
        format!("{:.2} MiB", size as f64 / MIB as f64)
    } else if size >= KIB {
        format!("{:.2} KiB", size as f64 / KIB as f64)
    } else {
        format!("{} B", size)
    }
}
