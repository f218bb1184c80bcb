// crates/horizon-field/src/csv_matrix.rs
//
// Loader for square drift matrices stored as CSV.
//
// Two layouts are accepted:
// - headered: first row `node,<col1>,<col2>,...`, then one `name,<values>` row per node;
// - headerless: N rows of N numbers, only when the node order is supplied.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use horizon_core::HorizonError;

fn parse_cell(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

fn csv_err(source: &str, msg: impl std::fmt::Display) -> HorizonError {
    HorizonError::Csv(format!("{}: {}", source, msg))
}

/// Parse a square matrix from CSV text.
///
/// `source` only labels error messages. With `expect` set (and non-empty),
/// a headered file must list exactly those columns in that order, and a
/// headerless file is read in that order. In headered mode, rows for
/// unknown names are skipped, unparsable or missing cells read as 0.0 and the
/// diagonal is forced to 0.0; every node must have a row.
pub fn parse_square_matrix(
    text: &str,
    expect: Option<&[String]>,
    source: &str,
) -> Result<(Vec<String>, Vec<Vec<f64>>), HorizonError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rows: Vec<Vec<&str>> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').collect())
        .collect();
    let expect = expect.filter(|e| !e.is_empty());

    if rows.len() < 2 {
        return Err(csv_err(source, "has no data"));
    }

    let header = &rows[0];
    if header.len() >= 2 && header[0].trim().eq_ignore_ascii_case("node") {
        let cols: Vec<String> = header[1..].iter().map(|c| c.to_string()).collect();
        if let Some(expected) = expect {
            if cols.as_slice() != expected {
                return Err(csv_err(
                    source,
                    format!("header columns {:?} do not match expected nodes {:?}", cols, expected),
                ));
            }
        }
        let nodes = cols;
        let n = nodes.len();
        let position: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut matrix = vec![vec![0.0; n]; n];
        let mut seen = HashSet::new();
        for row in &rows[1..] {
            let Some(&i) = position.get(row[0]) else {
                continue;
            };
            seen.insert(i);
            let values: HashMap<&str, f64> = nodes
                .iter()
                .map(String::as_str)
                .zip(row[1..].iter().map(|raw| parse_cell(raw)))
                .collect();
            for (j, name) in nodes.iter().enumerate() {
                matrix[i][j] = if j == i {
                    0.0
                } else {
                    values.get(name.as_str()).copied().unwrap_or(0.0)
                };
            }
        }

        if seen.len() != n {
            let missing: Vec<&String> = nodes
                .iter()
                .enumerate()
                .filter(|(i, _)| !seen.contains(i))
                .map(|(_, name)| name)
                .collect();
            return Err(csv_err(source, format!("missing rows for nodes: {:?}", missing)));
        }
        return Ok((nodes, matrix));
    }

    let Some(expected) = expect else {
        return Err(csv_err(source, "header must be: node,<col1>,<col2>,..."));
    };
    let n = expected.len();
    if rows.len() != n {
        return Err(csv_err(
            source,
            format!("expected {} rows, found {} (headerless mode)", n, rows.len()),
        ));
    }
    let mut matrix = Vec::with_capacity(n);
    for row in &rows {
        if row.len() < n {
            return Err(csv_err(
                source,
                format!("row has insufficient columns for n={}", n),
            ));
        }
        matrix.push(row[..n].iter().map(|raw| parse_cell(raw)).collect());
    }
    Ok((expected.to_vec(), matrix))
}

/// Read and parse a square matrix CSV file.
pub fn load_square_matrix(
    path: &Path,
    expect: Option<&[String]>,
) -> Result<(Vec<String>, Vec<Vec<f64>>), HorizonError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HorizonError::NotFound(format!("required CSV not found: {}", path.display()))
        } else {
            HorizonError::Io(format!("{}: {}", path.display(), e))
        }
    })?;
    parse_square_matrix(&text, expect, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_headered_matrix() {
        let text = "node,A,B,C\nA,0,1.5,2\nB,1.5,0,1\nC,2,1,0\n";
        let (nodes, m) = parse_square_matrix(text, None, "phi.csv").unwrap();
        assert_eq!(nodes, names(&["A", "B", "C"]));
        assert_eq!(m[0], vec![0.0, 1.5, 2.0]);
        assert_eq!(m[2][1], 1.0);
    }

    #[test]
    fn test_headered_tolerates_bom_noise_and_unknown_rows() {
        let text = "\u{feff}node,A,B\r\nZ,9,9\r\nB,7,x\r\nA,3,4\r\n";
        let (_, m) = parse_square_matrix(text, None, "phi.csv").unwrap();
        // Diagonal forced to zero, unparsable cell read as 0.
        assert_eq!(m, vec![vec![0.0, 4.0], vec![7.0, 0.0]]);
    }

    #[test]
    fn test_headered_missing_row() {
        let err = parse_square_matrix("node,A,B\nA,0,1\n", None, "phi.csv").unwrap_err();
        assert!(err.to_string().contains("missing rows"));
    }

    #[test]
    fn test_headered_order_must_match_expected() {
        let text = "node,A,B\nA,0,1\nB,1,0\n";
        let expected = names(&["B", "A"]);
        let err = parse_square_matrix(text, Some(&expected), "phi.csv").unwrap_err();
        assert!(matches!(err, HorizonError::Csv(_)));
    }

    #[test]
    fn test_headerless_requires_nodes() {
        let text = "0,0.2\n0.2,0\n";
        assert!(parse_square_matrix(text, None, "phi.csv").is_err());

        let expected = names(&["A", "B"]);
        let (nodes, m) = parse_square_matrix(text, Some(&expected), "phi.csv").unwrap();
        assert_eq!(nodes, expected);
        assert_eq!(m, vec![vec![0.0, 0.2], vec![0.2, 0.0]]);
    }

    #[test]
    fn test_headerless_shape_checked() {
        let expected = names(&["A", "B", "C"]);
        assert!(parse_square_matrix("0,1,1\n1,0,1\n", Some(&expected), "phi.csv").is_err());
        assert!(parse_square_matrix("0,1,1\n1,0\n1,1,0\n", Some(&expected), "phi.csv").is_err());
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_square_matrix("", None, "phi.csv").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_square_matrix(Path::new("/nonexistent/phi_matrix.csv"), None).unwrap_err();
        assert!(matches!(err, HorizonError::NotFound(_)));
    }
}
