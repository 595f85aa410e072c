//! MEPS health-survey cleaning routine
//!
//! Restricts a raw Medical Expenditure Panel Survey table to one panel and
//! reshapes it for fairness analysis:
//!
//! 1. Derive a binary `RACE` column: 1 (privileged) iff the record is
//!    non-Hispanic White (`HISPANX == 2` and `RACEV2X == 1`), else 0
//! 2. Derive `UTILIZATION`: the sum of five utilization counts, binarized
//!    at 10 visits (0 below, 1 at or above)
//! 3. Rename panel/round-specific columns to their generic names
//! 4. Drop rows whose screening columns carry negative sentinel codes for
//!    missing/unknown/not-ascertained values
//! 5. Project to the fixed retained-feature list
//!
//! All derivations are vectorized column expressions; there is no per-row
//! callback.

use super::Frame;
use crate::error::Result;

/// Panel/round-specific survey columns and their generic names.
const RENAMES: &[(&str, &str)] = &[
    ("FTSTU53X", "FTSTU"),
    ("ACTDTY53", "ACTDTY"),
    ("HONRDC53", "HONRDC"),
    ("RTHLTH53", "RTHLTH"),
    ("MNHLTH53", "MNHLTH"),
    ("CHBRON53", "CHBRON"),
    ("JTPAIN53", "JTPAIN"),
    ("PREGNT53", "PREGNT"),
    ("WLKLIM53", "WLKLIM"),
    ("ACTLIM53", "ACTLIM"),
    ("SOCLIM53", "SOCLIM"),
    ("COGLIM53", "COGLIM"),
    ("EMPST53", "EMPST"),
    ("REGION53", "REGION"),
    ("MARRY53X", "MARRY"),
    ("AGE53X", "AGE"),
    ("POVCAT15", "POVCAT"),
    ("INSCOV15", "INSCOV"),
];

/// Utilization-count columns summed into `UTILIZATION`.
const UTILIZATION_PARTS: &[&str] = &["OBTOTV15", "OPTOTV15", "ERTOT15", "IPNGTD15", "HHTOTD15"];

/// Columns where any negative value marks a row for removal.
const NON_NEGATIVE: &[&str] = &["REGION", "AGE", "MARRY", "ASTHDX"];

/// Categorical columns where values below -1 mark a row for removal.
const CATEGORICAL_SCREEN: &[&str] = &[
    "FTSTU", "ACTDTY", "HONRDC", "RTHLTH", "MNHLTH", "HIBPDX", "CHDDX", "ANGIDX", "EDUCYR",
    "HIDEG", "MIDX", "OHRTDX", "STRKDX", "EMPHDX", "CHBRON", "CHOLDX", "CANCERDX", "DIABDX",
    "JTPAIN", "ARTHDX", "ARTHTYPE", "ASTHDX", "ADHDADDX", "PREGNT", "WLKLIM", "ACTLIM", "SOCLIM",
    "COGLIM", "DFHEAR42", "DFSEE42", "ADSMOK42", "PHQ242", "EMPST", "POVCAT", "INSCOV",
];

/// Feature columns retained in the cleaned table, in output order.
pub const FEATURES_TO_KEEP: &[&str] = &[
    "REGION", "AGE", "SEX", "RACE", "MARRY", "FTSTU", "ACTDTY", "HONRDC", "RTHLTH", "MNHLTH",
    "HIBPDX", "CHDDX", "ANGIDX", "MIDX", "OHRTDX", "STRKDX", "EMPHDX", "CHBRON", "CHOLDX",
    "CANCERDX", "DIABDX", "JTPAIN", "ARTHDX", "ARTHTYPE", "ASTHDX", "ADHDADDX", "PREGNT",
    "WLKLIM", "ACTLIM", "SOCLIM", "COGLIM", "DFHEAR42", "DFSEE42", "ADSMOK42", "PCS42", "MCS42",
    "K6SUM42", "PHQ242", "EMPST", "POVCAT", "INSCOV", "UTILIZATION", "PERWT15F",
];

/// Utilization-count sum below which `UTILIZATION` binarizes to 0.
const UTILIZATION_CUTOFF: f64 = 10.0;

/// Clean a raw MEPS table, restricted to `panel`.
///
/// Missing required columns surface as [`crate::Error::ColumnNotFound`].
pub fn preprocess(frame: &Frame, panel: f64) -> Result<Frame> {
    let mut df = frame.clone();

    let in_panel: Vec<bool> = df.column("PANEL")?.iter().map(|&v| v == panel).collect();
    df.retain_rows(&in_panel)?;

    // Non-Hispanic White is the privileged group.
    let race: Vec<f64> = df
        .column("HISPANX")?
        .iter()
        .zip(df.column("RACEV2X")?)
        .map(|(&hispanx, &racev2x)| {
            if hispanx == 2.0 && racev2x == 1.0 {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    df.push_column("RACE", race)?;

    let mut utilization = vec![0.0; df.n_rows()];
    for &part in UTILIZATION_PARTS {
        for (sum, &count) in utilization.iter_mut().zip(df.column(part)?) {
            *sum += count;
        }
    }
    let utilization = utilization
        .into_iter()
        .map(|sum| if sum < UTILIZATION_CUTOFF { 0.0 } else { 1.0 })
        .collect();
    df.push_column("UTILIZATION", utilization)?;

    for &(from, to) in RENAMES {
        df.rename(from, to)?;
    }

    for &name in NON_NEGATIVE {
        let keep: Vec<bool> = df.column(name)?.iter().map(|&v| v >= 0.0).collect();
        df.retain_rows(&keep)?;
    }
    for &name in CATEGORICAL_SCREEN {
        let keep: Vec<bool> = df.column(name)?.iter().map(|&v| v >= -1.0).collect();
        df.retain_rows(&keep)?;
    }

    df.select(FEATURES_TO_KEEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Raw two-row table with every column the routine touches.
    fn raw_frame(rows: &[(&str, Vec<f64>)]) -> Frame {
        let mut frame = Frame::new();
        for (name, values) in rows {
            frame.push_column(*name, values.clone()).unwrap();
        }
        frame
    }

    fn minimal_raw(n: usize) -> Frame {
        let mut frame = Frame::new();
        frame.push_column("PANEL", vec![20.0; n]).unwrap();
        frame.push_column("HISPANX", vec![2.0; n]).unwrap();
        frame.push_column("RACEV2X", vec![1.0; n]).unwrap();
        for &part in UTILIZATION_PARTS {
            frame.push_column(part, vec![0.0; n]).unwrap();
        }
        for &(from, _) in RENAMES {
            frame.push_column(from, vec![1.0; n]).unwrap();
        }
        // Everything screened or retained that is not renamed or derived.
        for &name in &[
            "SEX", "HIBPDX", "CHDDX", "ANGIDX", "MIDX", "OHRTDX", "STRKDX", "EMPHDX", "CHOLDX",
            "CANCERDX", "DIABDX", "ARTHDX", "ARTHTYPE", "ASTHDX", "ADHDADDX", "DFHEAR42",
            "DFSEE42", "ADSMOK42", "PCS42", "MCS42", "K6SUM42", "PHQ242", "EDUCYR", "HIDEG",
            "PERWT15F",
        ] {
            frame.push_column(name, vec![1.0; n]).unwrap();
        }
        frame
    }

    #[test]
    fn projects_to_retained_features() {
        let cleaned = preprocess(&minimal_raw(3), 20.0).unwrap();
        let names: Vec<&str> = cleaned.names().iter().map(String::as_str).collect();
        assert_eq!(names, FEATURES_TO_KEEP);
        assert_eq!(cleaned.n_rows(), 3);
    }

    #[test]
    fn restricts_to_requested_panel() {
        let mut frame = minimal_raw(3);
        frame.rename("PANEL", "OLD").unwrap();
        frame.push_column("PANEL", vec![19.0, 20.0, 19.0]).unwrap();
        let cleaned = preprocess(&frame, 20.0).unwrap();
        assert_eq!(cleaned.n_rows(), 1);
    }

    #[test]
    fn race_recode_is_non_hispanic_white() {
        let mut frame = minimal_raw(4);
        frame.rename("HISPANX", "H").unwrap();
        frame.rename("RACEV2X", "R").unwrap();
        frame
            .push_column("HISPANX", vec![2.0, 1.0, 2.0, 1.0])
            .unwrap();
        frame
            .push_column("RACEV2X", vec![1.0, 1.0, 3.0, 2.0])
            .unwrap();
        let cleaned = preprocess(&frame, 20.0).unwrap();
        assert_eq!(cleaned.column("RACE").unwrap(), &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn utilization_sums_and_binarizes() {
        let mut frame = minimal_raw(2);
        frame.rename("OBTOTV15", "OLD").unwrap();
        frame.push_column("OBTOTV15", vec![9.0, 10.0]).unwrap();
        let cleaned = preprocess(&frame, 20.0).unwrap();
        assert_eq!(cleaned.column("UTILIZATION").unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn drops_sentinel_rows() {
        let mut frame = minimal_raw(3);
        // AGE53X renames to AGE; -1 there means missing and drops the row.
        frame.rename("AGE53X", "OLD_AGE").unwrap();
        frame.push_column("AGE53X", vec![30.0, -1.0, 44.0]).unwrap();
        // -1 survives the categorical screen, -7 does not.
        frame.rename("HIBPDX", "OLD_HIBPDX").unwrap();
        frame.push_column("HIBPDX", vec![-1.0, 1.0, -7.0]).unwrap();
        let cleaned = preprocess(&frame, 20.0).unwrap();
        assert_eq!(cleaned.n_rows(), 1);
        assert_eq!(cleaned.column("AGE").unwrap(), &[30.0]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let frame = raw_frame(&[("PANEL", vec![20.0])]);
        let err = preprocess(&frame, 20.0).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(_)));
    }
}
