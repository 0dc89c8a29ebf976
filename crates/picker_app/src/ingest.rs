//! Parts-list ingestion: stud.io CSV export into `RequestedPart` rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use picker_core::RequestedPart;
use picker_logging::pick_warn;
use serde::Deserialize;

/// One line of a stud.io parts-list export. Every column is optional; the
/// drop rules in `to_part` decide which rows reach the orchestrator.
#[derive(Debug, Deserialize)]
struct CsvLine {
    #[serde(rename = "ElementId", default)]
    element_id: Option<String>,
    #[serde(rename = "BLItemNo", default)]
    part_number: Option<String>,
    #[serde(rename = "LDrawColorId", default)]
    color_id: Option<String>,
    #[serde(rename = "Qty", default)]
    quantity: Option<String>,
    #[serde(rename = "PartName", default)]
    name: Option<String>,
    #[serde(rename = "ColorName", default)]
    color: Option<String>,
}

pub fn parse_parts_list(path: &Path, locale: &str) -> anyhow::Result<Vec<RequestedPart>> {
    let file = File::open(path)
        .with_context(|| format!("opening parts list {}", path.display()))?;
    Ok(parse_reader(file, locale))
}

/// Deterministic: the same input bytes always yield the same sequence,
/// independent of any network state.
pub fn parse_reader(reader: impl Read, locale: &str) -> Vec<RequestedPart> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut parts = Vec::new();
    for record in csv_reader.deserialize::<CsvLine>() {
        match record {
            Ok(line) => {
                if let Some(part) = to_part(line, locale) {
                    parts.push(part);
                }
            }
            Err(err) => {
                pick_warn!("skipping malformed parts-list row: {err}");
            }
        }
    }
    parts
}

/// Rows missing a quantity, part number, or color id are dropped. An empty
/// element id means the part needs resolution through the alternative
/// lookup.
fn to_part(line: CsvLine, locale: &str) -> Option<RequestedPart> {
    let part_number = non_empty(line.part_number)?;
    let color_id = non_empty(line.color_id)?;
    let quantity = non_empty(line.quantity)?
        .parse::<u32>()
        .ok()
        .filter(|qty| *qty > 0)?;

    Some(RequestedPart {
        element_id: non_empty(line.element_id),
        color_id,
        part_number,
        quantity,
        name: non_empty(line.name),
        color: non_empty(line.color),
        locale: locale.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
