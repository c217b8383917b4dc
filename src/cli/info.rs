use crate::capacity::{analyze, format_size};
use crate::carrier::Carrier;
use crate::error::Result;
use std::path::Path;

/// Describe how much a carrier image can hold, as text or JSON
pub fn show_info(path: &Path, json: bool) -> Result<String> {
    let carrier = Carrier::load(path)?;
    let report = analyze(&carrier);

    if json {
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }

    let mut output = String::new();
    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!(
        "Image size: {}x{} pixels ({} channels)\n",
        report.width, report.height, report.channels
    ));
    output.push_str(&format!("Reserved preamble: {} channels\n\n", report.preamble_channels));

    output.push_str("Max embed size:\n");
    for entry in &report.levels {
        output.push_str(&format!(
            "  {:<7} {}\n",
            entry.level.to_string(),
            format_size(entry.max_embed_bytes)
        ));
    }
    Ok(output)
}
