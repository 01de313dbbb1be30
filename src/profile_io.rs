use std::io::{BufRead, Write};

use crate::canopy::Canopy;
use crate::errors::CanopyError;
use crate::point::Point;
use crate::types::Result;

/// Parses whitespace-separated profile rows (`gene_id  s1  s2  ...  sD`) from
/// `reader` into `Point`s. Every row after the first must carry the same
/// sample count as the first; a mismatch is reported as
/// `CanopyError::DimensionMismatch` rather than a panic, since a ragged input
/// file is caller error, not an internal contract violation.
///
/// Blank lines are skipped. Line numbers in errors are 1-indexed.
pub fn read_profiles(reader: impl BufRead) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut expected_dimension: Option<usize> = None;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| CanopyError::Io(e.to_string()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let id = fields.next().ok_or_else(|| CanopyError::MalformedProfileLine {
            line: line_no,
            detail: "missing gene id".to_string(),
        })?;

        let samples: Vec<f32> = fields
            .map(|f| {
                f.parse::<f32>().map_err(|_| CanopyError::MalformedProfileLine {
                    line: line_no,
                    detail: format!("could not parse sample value {:?}", f),
                })
            })
            .collect::<Result<_>>()?;

        match expected_dimension {
            None => expected_dimension = Some(samples.len()),
            Some(d) if d != samples.len() => {
                return Err(CanopyError::DimensionMismatch {
                    expected: d,
                    found: samples.len(),
                    line: line_no,
                });
            }
            _ => {}
        }

        points.push(Point::from_samples(id, samples));
    }

    Ok(points)
}

/// Serializes canopies back out, one row per canopy: the origin id, the
/// center's coordinates, and the member ids, tab-separated.
pub fn write_canopies(writer: &mut impl Write, canopies: &[Canopy], pool: &[Point]) -> Result<()> {
    for canopy in canopies {
        let origin = canopy.origin_point(pool);
        let center = canopy.center_point(pool);
        let members: Vec<&str> = canopy
            .neighbors()
            .iter()
            .map(|n| n.resolve(pool).id.as_str())
            .collect();

        let coords: Vec<String> = center.samples.iter().map(|v| v.to_string()).collect();

        writeln!(
            writer,
            "{}\t{}\t{}",
            origin.id,
            coords.join(","),
            members.join(",")
        )
        .map_err(|e| CanopyError::Io(e.to_string()))?;
    }
    Ok(())
}
