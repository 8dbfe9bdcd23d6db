//! ARIMA (AutoRegressive Integrated Moving Average) implementation
//!
//! The model combines three components:
//!
//! - **AR (AutoRegressive)**: Uses past values to predict future values
//! - **I (Integrated)**: Differencing to achieve stationarity
//! - **MA (Moving Average)**: Uses past forecast errors
//!
//! AR coefficients are estimated by Yule-Walker through the Levinson-Durbin
//! recursion. MA coefficients come from the autocorrelation of the AR
//! residuals. A mean term is only estimated when the series is not
//! differenced (`d == 0`).
//!
//! ## Example
//!
//! ```rust
//! use algorithm::arima::{Arima, Order};
//! use algorithm::Predictor;
//!
//! let data: Vec<f64> = (1..=40).map(|x| x as f64 + (x as f64 * 0.3).sin()).collect();
//! let mut model = Arima::with_order(Order::new(1, 1, 0)).unwrap();
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::confidence::ForecastWithConfidence;
use crate::error::{Result, TsError};
use crate::linalg::{invert, toeplitz};
use crate::summary::{Coefficient, ModelSummary};
use crate::Predictor;

const MAX_AR_ORDER: usize = 10;
const MAX_DIFFERENCING: usize = 2;
const MAX_MA_ORDER: usize = 10;

/// Variances below this are treated as zero.
const VARIANCE_EPSILON: f64 = 1e-12;

/// The (p, d, q) order of an ARIMA model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// AR order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// MA order
    pub q: usize,
}

impl Order {
    /// The order the dashboard always fits.
    pub const DASHBOARD: Order = Order::new(5, 2, 0);

    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Fewest observations [`Arima::fit`] accepts for this order.
    pub const fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 10
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}

/// ARIMA model for time series forecasting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arima {
    order: Order,
    ar_coeffs: Vec<f64>,
    ma_coeffs: Vec<f64>,
    /// Mean of the differenced series, zero when `d > 0`
    mean: f64,
    /// Last value of each differencing level `0..d`, used to integrate forecasts
    level_tails: Vec<f64>,
    /// Series after `d` rounds of differencing
    differenced: Vec<f64>,
    /// Conditional residuals for every differenced point from index `p` on
    residuals: Vec<f64>,
    /// Sample autocovariances of the centered differenced series, lags `0..=p`
    autocov: Vec<f64>,
    /// Innovation variance
    sigma2: f64,
    nobs: usize,
    fitted: bool,
}

impl Arima {
    /// Create a new ARIMA model with specified orders
    ///
    /// # Arguments
    ///
    /// * `p` - Order of autoregressive component (0-10)
    /// * `d` - Degree of differencing (0-2)
    /// * `q` - Order of moving average component (0-10)
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        Self::with_order(Order::new(p, d, q))
    }

    /// Create an unfitted model for `order`.
    pub fn with_order(order: Order) -> Result<Self> {
        if order.p > MAX_AR_ORDER {
            return Err(TsError::InvalidParameter {
                name: "p".to_string(),
                reason: format!("AR order must be <= {}", MAX_AR_ORDER),
            });
        }
        if order.d > MAX_DIFFERENCING {
            return Err(TsError::InvalidParameter {
                name: "d".to_string(),
                reason: format!("Differencing order must be <= {}", MAX_DIFFERENCING),
            });
        }
        if order.q > MAX_MA_ORDER {
            return Err(TsError::InvalidParameter {
                name: "q".to_string(),
                reason: format!("MA order must be <= {}", MAX_MA_ORDER),
            });
        }

        Ok(Self {
            order,
            ar_coeffs: vec![0.0; order.p],
            ma_coeffs: vec![0.0; order.q],
            mean: 0.0,
            level_tails: Vec::new(),
            differenced: Vec::new(),
            residuals: Vec::new(),
            autocov: Vec::new(),
            sigma2: 0.0,
            nobs: 0,
            fitted: false,
        })
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    /// Estimated innovation variance.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Conditional residuals on the differenced scale.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn includes_mean(&self) -> bool {
        self.order.d == 0
    }

    /// One round of differencing.
    fn difference(data: &[f64]) -> Vec<f64> {
        data.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Solve the Yule-Walker equations for `order` AR coefficients.
    ///
    /// `autocov` must hold lags `0..=order`.
    fn levinson_durbin(autocov: &[f64], order: usize) -> Vec<f64> {
        let mut phi = vec![0.0; order];
        if order == 0 || autocov[0].abs() < VARIANCE_EPSILON {
            return phi;
        }

        let mut error = autocov[0];
        for k in 0..order {
            let mut acc = autocov[k + 1];
            for j in 0..k {
                acc -= phi[j] * autocov[k - j];
            }
            let reflection = acc / error;

            let previous = phi.clone();
            phi[k] = reflection;
            for j in 0..k {
                phi[j] = previous[j] - reflection * previous[k - 1 - j];
            }

            error *= 1.0 - reflection * reflection;
            if error.abs() < VARIANCE_EPSILON {
                break;
            }
        }

        phi
    }

    /// Sample autocovariances of `centered` for lags `0..=max_lag`.
    fn autocovariances(centered: &[f64], max_lag: usize) -> Vec<f64> {
        let n = centered.len();
        (0..=max_lag)
            .map(|k| {
                let sum: f64 = (k..n).map(|i| centered[i] * centered[i - k]).sum();
                sum / n as f64
            })
            .collect()
    }

    /// Estimate MA coefficients from residual autocorrelation
    fn estimate_ma_coefficients(&self, residuals: &[f64]) -> Vec<f64> {
        let q = self.order.q;
        if q == 0 || residuals.is_empty() {
            return vec![0.0; q];
        }

        let n = residuals.len();
        let mean: f64 = residuals.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
        let var: f64 = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

        if var < VARIANCE_EPSILON {
            return vec![0.0; q];
        }

        (0..q)
            .map(|k| {
                let sum: f64 = ((k + 1)..n).map(|i| centered[i] * centered[i - k - 1]).sum();
                // Bound coefficients for invertibility
                ((sum / n as f64) / var).clamp(-0.99, 0.99)
            })
            .collect()
    }

    /// One-step prediction on the differenced scale at position `t` of
    /// `series`, given the residual history aligned with it.
    fn one_step(&self, series: &[f64], errors: &[f64], t: usize) -> f64 {
        let mut prediction = self.mean;
        for (j, phi) in self.ar_coeffs.iter().enumerate() {
            prediction += phi * (series[t - j - 1] - self.mean);
        }
        for (j, theta) in self.ma_coeffs.iter().enumerate() {
            if t > j {
                prediction += theta * errors[t - j - 1];
            }
        }
        prediction
    }

    /// Residuals for every index of the differenced series, zero before `p`.
    fn conditional_residuals(&self) -> Vec<f64> {
        let n = self.differenced.len();
        let mut errors = vec![0.0; n];
        for t in self.order.p..n {
            errors[t] = self.differenced[t] - self.one_step(&self.differenced, &errors, t);
        }
        errors
    }

    /// Integrate forecasts made on the differenced scale back `d` times.
    fn undifference(&self, forecasts: &[f64]) -> Vec<f64> {
        let mut result = forecasts.to_vec();
        for &tail in self.level_tails.iter().rev() {
            let mut level = tail;
            for value in result.iter_mut() {
                level += *value;
                *value = level;
            }
        }
        result
    }

    /// Psi weights of the full integrated model, `psi_0 ..= psi_{steps-1}`.
    fn psi_weights(&self, steps: usize) -> Vec<f64> {
        // phi*(B) = phi(B) (1 - B)^d, stored as [1, -phi*_1, -phi*_2, ...]
        let mut poly: Vec<f64> = std::iter::once(1.0)
            .chain(self.ar_coeffs.iter().map(|phi| -phi))
            .collect();
        for _ in 0..self.order.d {
            let mut next = vec![0.0; poly.len() + 1];
            for (i, c) in poly.iter().enumerate() {
                next[i] += c;
                next[i + 1] -= c;
            }
            poly = next;
        }
        let ar_star: Vec<f64> = poly[1..].iter().map(|c| -c).collect();

        let mut psi = Vec::with_capacity(steps);
        for j in 0..steps {
            if j == 0 {
                psi.push(1.0);
                continue;
            }
            let mut value = self.ma_coeffs.get(j - 1).copied().unwrap_or(0.0);
            for (i, a) in ar_star.iter().enumerate().take(j) {
                value += a * psi[j - i - 1];
            }
            psi.push(value);
        }
        psi
    }

    /// Point forecasts with symmetric intervals at `confidence_level`.
    ///
    /// The standard error at horizon `h` is `sqrt(sigma2 * sum psi_j^2)` over
    /// the first `h` psi weights of `phi(B)(1 - B)^d`.
    pub fn predict_with_confidence(
        &self,
        steps: usize,
        confidence_level: f64,
    ) -> Result<ForecastWithConfidence> {
        if !(0.0..1.0).contains(&confidence_level) || confidence_level == 0.0 {
            return Err(TsError::InvalidParameter {
                name: "confidence_level".to_string(),
                reason: "must be in (0, 1)".to_string(),
            });
        }
        let forecast = self.predict(steps)?;

        let mut cumulative = 0.0;
        let std_errors: Vec<f64> = self
            .psi_weights(steps)
            .into_iter()
            .map(|psi| {
                cumulative += psi * psi;
                (self.sigma2 * cumulative).sqrt()
            })
            .collect();

        Ok(ForecastWithConfidence::from_standard_errors(
            forecast,
            &std_errors,
            confidence_level,
        ))
    }

    /// Fit statistics and the coefficient table.
    pub fn summary(&self) -> Result<ModelSummary> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        let effective = self.residuals.len();
        let m = effective as f64;
        let p = self.order.p;

        let ar_std_errors: Vec<Option<f64>> = if p > 0 && self.sigma2 > VARIANCE_EPSILON {
            match invert(&toeplitz(&self.autocov[..p])) {
                Some(inverse) => (0..p)
                    .map(|i| {
                        let var = self.sigma2 * inverse[i][i] / m;
                        (var > 0.0).then(|| var.sqrt())
                    })
                    .collect(),
                None => vec![None; p],
            }
        } else {
            vec![None; p]
        };

        let mut coefficients = Vec::with_capacity(p + self.order.q + 2);
        if self.includes_mean() {
            let persistence = 1.0 - self.ar_coeffs.iter().sum::<f64>();
            let std_err = (persistence.abs() > VARIANCE_EPSILON && self.sigma2 > 0.0)
                .then(|| (self.sigma2 / m).sqrt() / persistence.abs());
            coefficients.push(Coefficient::new("const", self.mean, std_err));
        }
        for (i, (phi, se)) in self.ar_coeffs.iter().zip(ar_std_errors).enumerate() {
            coefficients.push(Coefficient::new(format!("ar.L{}", i + 1), *phi, se));
        }
        for (i, theta) in self.ma_coeffs.iter().enumerate() {
            coefficients.push(Coefficient::new(format!("ma.L{}", i + 1), *theta, None));
        }
        coefficients.push(Coefficient::new("sigma2", self.sigma2, None));

        // Conditional Gaussian likelihood over the residuals.
        let sigma2 = self.sigma2.max(f64::MIN_POSITIVE);
        let log_likelihood = -0.5 * m * ((2.0 * std::f64::consts::PI * sigma2).ln() + 1.0);
        let k = (p + self.order.q + usize::from(self.includes_mean()) + 1) as f64;

        Ok(ModelSummary {
            order: self.order,
            nobs: self.nobs,
            effective_nobs: effective,
            coefficients,
            sigma2: self.sigma2,
            log_likelihood,
            aic: -2.0 * log_likelihood + 2.0 * k,
            bic: -2.0 * log_likelihood + k * m.ln(),
            hqic: -2.0 * log_likelihood + 2.0 * k * m.ln().ln(),
        })
    }
}

impl Predictor for Arima {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        let min_required = self.order.min_observations();
        if data.len() < min_required {
            return Err(TsError::InsufficientData {
                required: min_required,
                actual: data.len(),
            });
        }

        if data.iter().any(|x| !x.is_finite()) {
            return Err(TsError::InvalidData(
                "Data contains NaN or infinite values".to_string(),
            ));
        }

        let mut level = data.to_vec();
        let mut tails = Vec::with_capacity(self.order.d);
        for _ in 0..self.order.d {
            tails.push(level[level.len() - 1]);
            level = Self::difference(&level);
        }
        self.level_tails = tails;
        self.differenced = level;
        self.nobs = data.len();

        let n = self.differenced.len();
        self.mean = if self.includes_mean() {
            self.differenced.iter().sum::<f64>() / n as f64
        } else {
            0.0
        };

        let centered: Vec<f64> = self.differenced.iter().map(|x| x - self.mean).collect();
        self.autocov = Self::autocovariances(&centered, self.order.p);
        self.ar_coeffs = Self::levinson_durbin(&self.autocov, self.order.p);

        // AR-only residuals feed the MA estimate, then the full model's
        // residuals replace them.
        self.ma_coeffs = vec![0.0; self.order.q];
        let ar_residuals = self.conditional_residuals();
        self.ma_coeffs = self.estimate_ma_coefficients(&ar_residuals[self.order.p..]);
        let residuals = self.conditional_residuals();
        self.residuals = residuals[self.order.p..].to_vec();

        self.sigma2 =
            self.residuals.iter().map(|e| e * e).sum::<f64>() / self.residuals.len() as f64;

        if !self.sigma2.is_finite() || self.ar_coeffs.iter().any(|c| !c.is_finite()) {
            self.fitted = false;
            return Err(TsError::NumericalError(
                "coefficient estimation produced non-finite values".to_string(),
            ));
        }

        self.fitted = true;
        debug!(
            order = %self.order,
            nobs = self.nobs,
            sigma2 = self.sigma2,
            ar = ?self.ar_coeffs,
            "fitted ARIMA"
        );
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        if steps == 0 {
            return Ok(Vec::new());
        }

        let n = self.differenced.len();
        let mut extended = self.differenced.clone();
        let mut errors = vec![0.0; self.order.p];
        errors.extend_from_slice(&self.residuals);

        for t in n..n + steps {
            let forecast = self.one_step(&extended, &errors, t);
            extended.push(forecast);
            errors.push(0.0); // Future residuals are 0
        }

        let forecasts = self.undifference(&extended[n..]);
        if forecasts.iter().any(|x| !x.is_finite()) {
            return Err(TsError::NumericalError(
                "forecast diverged to non-finite values".to_string(),
            ));
        }
        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
