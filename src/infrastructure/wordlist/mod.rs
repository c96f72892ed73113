use crate::domain::track::SpeechRow;
use csv::ReaderBuilder;

/// Parse a header-less CSV word list into speech rows.
///
/// Blank cells are kept as missing cells (not dropped) so column positions
/// stay stable for primary-column addressing. Records may have differing
/// lengths.
pub fn parse_csv(data: &[u8]) -> Result<Vec<SpeechRow>, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("invalid CSV: {}", e))?;
        let cells = record
            .iter()
            .map(|cell| {
                let cell = cell.trim();
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        rows.push(SpeechRow::new(cells));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_two_column_list() {
        let rows = parse_csv("привет,hallo\nмир,welt\n".as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                SpeechRow::from_texts(["привет", "hallo"]),
                SpeechRow::from_texts(["мир", "welt"]),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_blank_cells_as_missing() {
        let rows = parse_csv(b"eins,,three\n").unwrap();
        assert_eq!(
            rows,
            vec![SpeechRow::new(vec![
                Some("eins".to_string()),
                None,
                Some("three".to_string()),
            ])]
        );
    }

    #[test]
    fn test_parse_flexible_row_lengths() {
        let rows = parse_csv(b"a,b,c\nd\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells.len(), 3);
        assert_eq!(rows[1].cells.len(), 1);
    }

    #[test]
    fn test_parse_empty_document() {
        let rows = parse_csv(b"").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        assert!(parse_csv(b"\xff\xfe,abc\n").is_err());
    }
}
