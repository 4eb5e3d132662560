//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Format a landmark list as an ASCII table with stable row indices.
pub fn format_landmark_table(landmarks: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Landmark"]);

    for (index, landmark) in landmarks.iter().enumerate() {
        table.add_row(vec![index.to_string(), landmark.clone()]);
    }

    table
}
