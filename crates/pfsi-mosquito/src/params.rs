//! Mosquito bionomics and the periodic emergence / EIP tables.

use crate::{MosquitoError, MosquitoResult};

/// Parameters of the Ross–Macdonald model for every patch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MosquitoParams {
    /// Daily probability an adult survives (`p`).
    pub survival: f64,

    /// Blood meals per mosquito per day (`f`).
    pub feeding_rate: f64,

    /// Emergence of new adults, `lambda[day % period][patch]`.
    pub lambda: Vec<Vec<f64>>,

    /// Extrinsic incubation period in days, `eip[day % period]`.
    pub eip: Vec<u32>,

    /// Initial susceptible adults per patch.
    pub initial_m: Vec<f64>,

    /// Initial exposed adults per patch (entered incubation on day 0).
    pub initial_y: Vec<f64>,

    /// Initial infectious adults per patch.
    pub initial_z: Vec<f64>,
}

fn check_counts(what: &'static str, v: &[f64], n: usize) -> MosquitoResult<()> {
    if v.len() != n {
        return Err(MosquitoError::Dimension { what, expected: n, got: v.len() });
    }
    if let Some(bad) = v.iter().find(|x| !x.is_finite() || **x < 0.0) {
        return Err(MosquitoError::Config(format!("{what} contains {bad}")));
    }
    Ok(())
}

impl MosquitoParams {
    /// Constant emergence and EIP over a 365-day year.
    pub fn constant(
        survival:     f64,
        feeding_rate: f64,
        lambda:       Vec<f64>,
        eip:          u32,
        initial:      (Vec<f64>, Vec<f64>, Vec<f64>),
    ) -> Self {
        Self {
            survival,
            feeding_rate,
            lambda:    vec![lambda; 365],
            eip:       vec![eip; 365],
            initial_m: initial.0,
            initial_y: initial.1,
            initial_z: initial.2,
        }
    }

    /// Length of the emergence table.
    pub fn lambda_period(&self) -> usize {
        self.lambda.len()
    }

    /// Length of the EIP table.
    pub fn eip_period(&self) -> usize {
        self.eip.len()
    }

    /// Longest EIP in the table; bounds the number of live cohorts.
    pub fn max_eip(&self) -> u32 {
        self.eip.iter().copied().max().unwrap_or(0)
    }

    /// Check every table against `n` patches.
    pub fn validate(&self, n: usize) -> MosquitoResult<()> {
        if !(0.0..=1.0).contains(&self.survival) {
            return Err(MosquitoError::Config(format!("survival {} outside [0, 1]", self.survival)));
        }
        if !self.feeding_rate.is_finite() || self.feeding_rate < 0.0 {
            return Err(MosquitoError::Config(format!(
                "feeding rate {} must be finite and non-negative",
                self.feeding_rate
            )));
        }
        if self.lambda.is_empty() {
            return Err(MosquitoError::Config("emergence table is empty".into()));
        }
        if self.eip.is_empty() {
            return Err(MosquitoError::Config("EIP table is empty".into()));
        }
        for row in &self.lambda {
            check_counts("emergence row", row, n)?;
        }
        check_counts("initial M", &self.initial_m, n)?;
        check_counts("initial Y", &self.initial_y, n)?;
        check_counts("initial Z", &self.initial_z, n)?;
        Ok(())
    }
}
