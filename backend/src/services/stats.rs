//! Paired t-test and one-way repeated-measures ANOVA.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDateTime;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

const PAIRED_T_TEST: &str = "Paired t-test";
const ANOVA_RM: &str = "Repeated-measures ANOVA";

/// Variance below this fraction of the squared mean difference is rounding
/// noise around a constant difference.
const RELATIVE_VARIANCE_TOLERANCE: f64 = 1e-24;

/// Failure of a statistical routine on a degenerate selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("{test} needs at least {required} complete observations, found {found}")]
    InsufficientData {
        test: &'static str,
        required: usize,
        found: usize,
    },

    #[error("{test} needs at least 2 levels of the within factor, found {found}")]
    TooFewLevels { test: &'static str, found: usize },

    #[error("{0}: observations have zero variance")]
    ZeroVariance(&'static str),

    #[error("{test}: unbalanced design, subject {subject} has several values for level '{level}'")]
    Unbalanced {
        test: &'static str,
        subject: NaiveDateTime,
        level: String,
    },

    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Outcome of a paired (matched-samples) t-test.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedTTest {
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Number of complete pairs used.
    pub n: usize,
    pub df: f64,
}

/// Paired t-test of `a - b`.
///
/// Positions where either side is missing are dropped, which only shrinks
/// the sample.
pub fn paired_t_test(a: &[Option<f64>], b: &[Option<f64>]) -> Result<PairedTTest, StatsError> {
    let diffs: Vec<f64> = a
        .iter()
        .zip(b)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect();

    let n = diffs.len();
    if n < 2 {
        return Err(StatsError::InsufficientData {
            test: PAIRED_T_TEST,
            required: 2,
            found: n,
        });
    }

    let nf = n as f64;
    let df = nf - 1.0;
    let mean = diffs.iter().sum::<f64>() / nf;
    let variance = diffs.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / df;

    // A constant difference is an infinitely significant shift; a constant
    // zero difference has no defined statistic.
    if variance <= mean * mean * RELATIVE_VARIANCE_TOLERANCE {
        if mean == 0.0 {
            return Err(StatsError::ZeroVariance(PAIRED_T_TEST));
        }
        return Ok(PairedTTest {
            statistic: f64::INFINITY.copysign(mean),
            p_value: 0.0,
            n,
            df,
        });
    }

    let statistic = mean / (variance / nf).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution(e.to_string()))?;
    let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);

    Ok(PairedTTest {
        statistic,
        p_value,
        n,
        df,
    })
}

/// One observation in long form: a subject measured at one level of the
/// within-subject factor.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub subject: NaiveDateTime,
    pub level: String,
    pub value: Option<f64>,
}

/// Result table of a one-way repeated-measures ANOVA.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaRm {
    /// Name of the within-subject factor.
    pub factor: String,
    pub f_value: f64,
    pub num_df: f64,
    pub den_df: f64,
    pub p_value: f64,
    /// Subjects with a value at every level.
    pub subjects: usize,
    pub levels: usize,
}

/// One-way repeated-measures ANOVA over long-form records.
///
/// Levels keep their order of first appearance. Subjects missing a value at
/// any level are left out so the design stays balanced.
pub fn anova_rm(records: &[LongRecord], factor: &str) -> Result<AnovaRm, StatsError> {
    let mut levels: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let next = levels.len();
        levels.entry(record.level.as_str()).or_insert(next);
    }
    let k = levels.len();
    if k < 2 {
        return Err(StatsError::TooFewLevels {
            test: ANOVA_RM,
            found: k,
        });
    }

    // Outer Option: level seen for this subject; inner: value present.
    let mut subjects: BTreeMap<NaiveDateTime, Vec<Option<Option<f64>>>> = BTreeMap::new();
    for record in records {
        let level = levels[record.level.as_str()];
        let cells = subjects
            .entry(record.subject)
            .or_insert_with(|| vec![None; k]);
        if cells[level].is_some() {
            return Err(StatsError::Unbalanced {
                test: ANOVA_RM,
                subject: record.subject,
                level: record.level.clone(),
            });
        }
        cells[level] = Some(record.value);
    }

    let complete: Vec<Vec<f64>> = subjects
        .values()
        .filter_map(|cells| {
            cells
                .iter()
                .copied()
                .map(Option::flatten)
                .collect::<Option<Vec<f64>>>()
        })
        .collect();

    let n = complete.len();
    if n < 2 {
        return Err(StatsError::InsufficientData {
            test: ANOVA_RM,
            required: 2,
            found: n,
        });
    }

    let (nf, kf) = (n as f64, k as f64);
    let grand = complete.iter().flatten().sum::<f64>() / (nf * kf);
    let level_means: Vec<f64> = (0..k)
        .map(|j| complete.iter().map(|row| row[j]).sum::<f64>() / nf)
        .collect();

    let ss_total: f64 = complete
        .iter()
        .flatten()
        .map(|v| (v - grand) * (v - grand))
        .sum();
    let ss_levels: f64 = nf * level_means.iter().map(|m| (m - grand) * (m - grand)).sum::<f64>();
    let ss_subjects: f64 = kf * complete
        .iter()
        .map(|row| {
            let m = row.iter().sum::<f64>() / kf;
            (m - grand) * (m - grand)
        })
        .sum::<f64>();
    let ss_error = ss_total - ss_levels - ss_subjects;

    if ss_error <= ss_total * 1e-12 {
        return Err(StatsError::ZeroVariance(ANOVA_RM));
    }

    let num_df = kf - 1.0;
    let den_df = (kf - 1.0) * (nf - 1.0);
    let f_value = (ss_levels / num_df) / (ss_error / den_df);
    let dist = FisherSnedecor::new(num_df, den_df)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;

    Ok(AnovaRm {
        factor: factor.to_string(),
        f_value,
        num_df,
        den_df,
        p_value: dist.sf(f_value),
        subjects: n,
        levels: k,
    })
}

impl fmt::Display for AnovaRm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = ["F Value", "Num DF", "Den DF", "Pr > F"];
        let cells = [
            format!("{:.4}", self.f_value),
            format!("{:.4}", self.num_df),
            format!("{:.4}", self.den_df),
            format!("{:.4}", self.p_value),
        ];
        let widths: Vec<usize> = headers
            .iter()
            .zip(&cells)
            .map(|(h, c)| h.len().max(c.len()))
            .collect();
        let label = self.factor.len();
        let total = label + widths.iter().map(|w| w + 1).sum::<usize>();

        writeln!(f, "{:^total$}", "Anova")?;
        writeln!(f, "{}", "=".repeat(total))?;
        write!(f, "{:label$}", "")?;
        for (header, width) in headers.iter().zip(widths.iter().copied()) {
            write!(f, " {:>width$}", header)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(total))?;
        write!(f, "{}", self.factor)?;
        for (cell, width) in cells.iter().zip(widths.iter().copied()) {
            write!(f, " {:>width$}", cell)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(total))
    }
}
