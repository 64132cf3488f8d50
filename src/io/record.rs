use crate::io::loader::strip_line_terminator;
use crate::io::schema::{ColumnSchema, DELIMITER, SAMPLE_ID_COLUMN};
use log::debug;

/// A data line split into the fields the schema points at.
/// Values are kept as text; a `None` is a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMeasurement {
    /// 1-based line number in the input file
    pub line: usize,
    pub sample_id: String,
    pub predicted_group: Option<String>,
    pub probabilities: Vec<Option<String>>,
    pub snp_values: Vec<Option<String>>,
}

// SPSS/PASW writes missing values as a single blank
fn field(fields: &[&str], ix: usize) -> Option<String> {
    fields
        .get(ix)
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(|f| f.to_owned())
}

impl CandidateMeasurement {
    /// Returns `None` for blank lines.
    pub fn from_line(line: &str, line_number: usize, schema: &ColumnSchema) -> Option<Self> {
        let fields = strip_line_terminator(line)
            .split(DELIMITER)
            .collect::<Vec<&str>>();
        if fields.len() == 1 {
            return None;
        }

        // a short line yields a short snp slice, which is reported as a shape error later
        let snp_end = schema.snp_region_end().min(fields.len());
        let snp_values = (schema.snp_region_start()..snp_end)
            .map(|ix| field(&fields, ix))
            .collect();

        Some(Self {
            line: line_number,
            sample_id: fields[SAMPLE_ID_COLUMN].to_owned(),
            predicted_group: field(&fields, schema.predicted_group()),
            probabilities: schema
                .probabilities()
                .iter()
                .map(|ix| field(&fields, *ix))
                .collect(),
            snp_values,
        })
    }
}

/// Builds candidates from all lines after the header, skipping blank ones.
pub fn build_candidates(lines: &[String], schema: &ColumnSchema) -> Vec<CandidateMeasurement> {
    lines
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(ix, line)| {
            let candidate = CandidateMeasurement::from_line(line, ix + 1, schema);
            if candidate.is_none() {
                debug!("Skipping blank line {}", ix + 1);
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_candidates, CandidateMeasurement};
    use crate::io::schema::{ColumnSchema, DEFAULT_END_MARKER};

    const HEADER: &str = "SampleID\tSNP1\tSNP2\tSkincolour\tDis_1\tDis1_1\tDis2_1\tDis3_1\tDis4_1";

    fn schema() -> ColumnSchema {
        ColumnSchema::resolve(HEADER, DEFAULT_END_MARKER).unwrap()
    }

    fn some(v: &[&str]) -> Vec<Option<String>> {
        v.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn extracts_fields_without_conversion() {
        let c = CandidateMeasurement::from_line(
            "S1\t0.1\t16E005\tX\t2\t0.9\t0.05\t0.03\t0.02\n",
            2,
            &schema(),
        )
        .unwrap();
        assert_eq!(c.line, 2);
        assert_eq!(c.sample_id, "S1");
        assert_eq!(c.predicted_group.as_deref(), Some("2"));
        assert_eq!(c.probabilities, some(&["0.9", "0.05", "0.03", "0.02"]));
        assert_eq!(c.snp_values, some(&["0.1", "16E005"]));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(CandidateMeasurement::from_line("\n", 3, &schema()).is_none());
        assert!(CandidateMeasurement::from_line("\r\n", 3, &schema()).is_none());
        assert!(CandidateMeasurement::from_line("", 3, &schema()).is_none());
    }

    #[test]
    fn blank_field_is_missing() {
        let c = CandidateMeasurement::from_line(
            "S2\t0.1\t \tX\t \t0.9\t\t0.03\t0.02\r\n",
            3,
            &schema(),
        )
        .unwrap();
        assert_eq!(c.predicted_group, None);
        assert_eq!(c.snp_values, vec![Some("0.1".to_owned()), None]);
        assert_eq!(c.probabilities[1], None);
        // the last field survives crlf stripping
        assert_eq!(c.probabilities[3].as_deref(), Some("0.02"));
    }

    #[test]
    fn short_line_gives_short_snp_slice() {
        let c = CandidateMeasurement::from_line("S3\t0.1", 4, &schema()).unwrap();
        assert_eq!(c.snp_values.len(), 1);
        assert_eq!(c.predicted_group, None);
        assert!(c.probabilities.iter().all(|p| p.is_none()));
    }

    #[test]
    fn candidates_carry_line_numbers() {
        let lines = vec![
            format!("{}\n", HEADER),
            "S1\t1\t2\tX\t1\t0.9\t0.05\t0.03\t0.02\n".to_owned(),
            "\n".to_owned(),
            "S2\t1\t2\tX\t2\t0.1\t0.8\t0.05\t0.05\n".to_owned(),
        ];
        let candidates = build_candidates(&lines, &schema());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].line, 2);
        assert_eq!(candidates[1].line, 4);
        assert_eq!(candidates[1].sample_id, "S2");
    }
}
