//! Fit summary for a fitted ARIMA model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arima::Order;

const RULE_WIDTH: usize = 64;

/// One estimated parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    /// Asymptotic standard error, when one can be computed
    pub std_err: Option<f64>,
}

impl Coefficient {
    pub fn new(name: impl Into<String>, estimate: f64, std_err: Option<f64>) -> Self {
        Self {
            name: name.into(),
            estimate,
            std_err,
        }
    }

    /// Wald statistic `estimate / std_err`.
    pub fn z(&self) -> Option<f64> {
        self.std_err
            .filter(|se| *se > 0.0)
            .map(|se| self.estimate / se)
    }
}

/// Fit statistics of an ARIMA model.
///
/// `Display` renders a fixed-width text table suitable for a terminal pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub order: Order,
    /// Observations in the input series
    pub nobs: usize,
    /// Residuals the likelihood is conditioned on
    pub effective_nobs: usize,
    pub coefficients: Vec<Coefficient>,
    pub sigma2: f64,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
}

impl ModelSummary {
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{:.*}", precision, v))
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{:^width$}", format!("ARIMA{} Model Results", self.order), width = RULE_WIDTH)?;
        writeln!(f, "{heavy}")?;
        writeln!(
            f,
            "{:<18}{:>12}    {:<18}{:>12.3}",
            "No. Observations:", self.nobs, "Log Likelihood:", self.log_likelihood
        )?;
        writeln!(
            f,
            "{:<18}{:>12}    {:<18}{:>12.3}",
            "Effective Obs.:", self.effective_nobs, "AIC:", self.aic
        )?;
        writeln!(
            f,
            "{:<18}{:>12.4}    {:<18}{:>12.3}",
            "Sigma^2:", self.sigma2, "BIC:", self.bic
        )?;
        writeln!(f, "{:<34}{:<18}{:>12.3}", "", "HQIC:", self.hqic)?;
        writeln!(f, "{light}")?;
        writeln!(f, "{:<12}{:>14}{:>14}{:>12}", "", "coef", "std err", "z")?;
        writeln!(f, "{light}")?;
        for c in &self.coefficients {
            writeln!(
                f,
                "{:<12}{:>14.4}{:>14}{:>12}",
                c.name,
                c.estimate,
                optional(c.std_err, 4),
                optional(c.z(), 3)
            )?;
        }
        write!(f, "{heavy}")
    }
}
