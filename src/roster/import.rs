// Roster draft rows from CSV.
//
// A rebuild replaces the whole roster from a coach-supplied draft list.
// Expected columns: `name,number,primary_pos` (header required; extra
// columns ignored). Rows with a blank name are skipped, matching the draft
// editor's behavior of ignoring empty lines.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// One cleaned draft row for a roster rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRow {
    pub name: String,
    pub number: u32,
    pub primary_pos: Option<String>,
}

/// Raw CSV row before cleaning.
#[derive(Debug, Deserialize)]
struct RawDraftRow {
    name: String,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    primary_pos: Option<String>,
}

fn clean_row(raw: RawDraftRow) -> Option<DraftRow> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return None;
    }

    let number = raw
        .number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| match s.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!(name = %name, number = s, "unparseable jersey number, using 0");
                None
            }
        })
        .unwrap_or(0);

    let primary_pos = raw
        .primary_pos
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(DraftRow {
        name,
        number,
        primary_pos,
    })
}

fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<DraftRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawDraftRow>() {
        if let Some(row) = clean_row(result?) {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Read and clean draft rows from a CSV file.
pub fn read_draft_csv(path: &Path) -> anyhow::Result<Vec<DraftRow>> {
    use anyhow::Context;

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open roster CSV {}", path.display()))?;
    load_from_reader(file)
        .with_context(|| format!("failed to parse roster CSV {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let csv_data = "\
name,number,primary_pos
Rylan Davenport,7,SS
Marshall Gonze,12,CF
";
        let rows = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            DraftRow {
                name: "Rylan Davenport".into(),
                number: 7,
                primary_pos: Some("SS".into()),
            }
        );
    }

    #[test]
    fn blank_names_are_skipped() {
        let csv_data = "\
name,number,primary_pos
  ,4,1B
Luke Bauer,3,2B
";
        let rows = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Luke Bauer");
    }

    #[test]
    fn missing_number_and_position_default() {
        let csv_data = "\
name,number,primary_pos
Noah Green,,
";
        let rows = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows[0].number, 0);
        assert_eq!(rows[0].primary_pos, None);
    }

    #[test]
    fn unparseable_number_becomes_zero() {
        let csv_data = "\
name,number,primary_pos
Declan Gwynn,nine,P
";
        let rows = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows[0].number, 0);
        assert_eq!(rows[0].primary_pos.as_deref(), Some("P"));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let csv_data = "\
name,number,primary_pos
  Joel Sanders  , 5 ,  LF
";
        let rows = load_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Joel Sanders");
        assert_eq!(rows[0].number, 5);
        assert_eq!(rows[0].primary_pos.as_deref(), Some("LF"));
    }
}
