use std::fmt::{Debug, Display, LowerExp};

use num_traits::Float;
use rand::{distr::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};

use powiter_kernels::{
    ops::{dot_product_kernel, normalize_kernel, squared_norm_kernel},
    KernelError,
};
use powiter_operator::LinearOperator;

use crate::{
    error::EigenError,
    observer::{IterationEvent, IterationObserver, LogObserver, NoopObserver},
};

/// Structure to define the power iteration parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerIterationCriteria {
    /// Maximum number of iterations to perform.
    pub max_iterations: usize,
    /// Convergence tolerance on the relative change of the eigenvalue estimate between two
    /// consecutive iterations.
    pub tolerance: f64,
    /// Seed for the random start vector. `None` draws from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for PowerIterationCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
            seed: None,
        }
    }
}

impl PowerIterationCriteria {
    /// Create criteria with the given budget and tolerance and an unseeded start vector.
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
            seed: None,
        }
    }

    /// Use a deterministic start vector drawn from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of the power iteration.
#[derive(Debug, Clone)]
pub struct PowerIterationResult<T> {
    /// Rayleigh quotient of the last iteration, the dominant eigenvalue estimate.
    pub eigenvalue: T,
    /// Last normalized iterate, an approximation of the dominant eigenvector.
    ///
    /// NOTE: when no iteration ran this is the raw random start vector.
    pub eigenvector: Vec<T>,
    /// The total number of iterations performed.
    pub num_iterations: usize,
    /// Relative change of the estimate at the last iteration, infinite if none ran.
    pub rate: T,
    /// Whether the tolerance was met before the iteration budget ran out.
    pub converged: bool,
}

impl<T: Float> PowerIterationResult<T> {
    /// Turn a result that did not meet the tolerance into [`EigenError::NonConvergence`].
    pub fn ensure_converged(self) -> Result<Self, EigenError> {
        if self.converged {
            return Ok(self);
        }

        Err(EigenError::NonConvergence {
            iterations: self.num_iterations,
            rate: self.rate.to_f64().unwrap_or(f64::NAN),
        })
    }
}

/// Draw a start vector with entries uniform in `[-1, 1)`.
fn random_vector<T, R>(n: usize, rng: &mut R) -> Vec<T>
where
    T: Float + SampleUniform,
    R: Rng,
{
    (0..n).map(|_| rng.random_range(-T::one()..T::one())).collect()
}

/// Estimate the dominant eigenvalue of a square operator by power iteration.
///
/// Starting from a random vector `v`, the operator is applied repeatedly. At every step the
/// Rayleigh quotient `(v . Av) / (v . v)` of the pre-multiplication vector is taken as the
/// eigenvalue estimate and `Av` is normalized to become the next `v`. The loop stops as soon as
/// the relative change `|1 - estimate / previous_estimate|` drops below the tolerance, or when
/// the iteration budget is exhausted. In the latter case the last estimate is still returned,
/// with `converged` set to `false`.
///
/// The estimate approaches the eigenvalue of largest magnitude when that eigenvalue is strictly
/// dominant and the start vector has a component along its eigenvector. Two dominant
/// eigenvalues of equal magnitude and opposite sign make the estimate oscillate.
///
/// # Arguments
///
/// * `operator` - Square linear operator.
/// * `criteria` - Iteration budget, tolerance and optional seed.
/// * `observer` - Receives an [`IterationEvent`] after every iteration.
///
/// # Returns
///
/// * `result` - The eigenvalue estimate, the last iterate and the convergence state.
///
/// # Errors
///
/// * `InvalidOperator` if the operator is not square, before any multiplication.
/// * `EmptyOperator` if the operator has dimension zero.
/// * `InvalidTolerance` if the tolerance is not finite and positive.
/// * `DegenerateVector` if an iterate has zero norm.
/// * `OperatorError` if the operator fails to multiply.
///
/// # Example
///
/// ```
/// use powiter_eigen::{power_iteration, NoopObserver, PowerIterationCriteria};
/// use powiter_operator::DenseMatrix;
///
/// let a = DenseMatrix::from_shape_vec(2, 2, vec![2.0, 1.0, 1.0, 2.0]).unwrap();
/// let criteria = PowerIterationCriteria::new(500, 1e-10).with_seed(42);
/// let result = power_iteration(&a, &criteria, &mut NoopObserver).unwrap();
/// assert!(result.converged);
/// assert!((result.eigenvalue - 3.0_f64).abs() < 1e-6);
/// ```
pub fn power_iteration<T, O, B>(
    operator: &O,
    criteria: &PowerIterationCriteria,
    observer: &mut B,
) -> Result<PowerIterationResult<T>, EigenError>
where
    T: Float + SampleUniform + Debug,
    O: LinearOperator<T> + ?Sized,
    B: IterationObserver<T> + ?Sized,
{
    let (rows, cols) = (operator.rows(), operator.cols());
    if rows != cols {
        return Err(EigenError::InvalidOperator { rows, cols });
    }

    if rows == 0 {
        return Err(EigenError::EmptyOperator);
    }

    if !(criteria.tolerance.is_finite() && criteria.tolerance > 0.0) {
        return Err(EigenError::InvalidTolerance(criteria.tolerance));
    }
    // a tolerance below the scalar's range would round to zero and never be met
    let tolerance = T::from(criteria.tolerance)
        .filter(|t| *t > T::zero())
        .ok_or(EigenError::InvalidTolerance(criteria.tolerance))?;

    // the random start vector does not need to be normalized
    let mut current: Vec<T> = match criteria.seed {
        Some(seed) => random_vector(rows, &mut StdRng::seed_from_u64(seed)),
        None => random_vector(rows, &mut rand::rng()),
    };
    let mut next = vec![T::zero(); rows];

    let mut estimate = T::one();
    let mut previous_estimate = T::one();

    let mut result_rate = T::infinity();
    let mut num_iterations = 0;
    let mut converged = false;

    for iteration in 0..criteria.max_iterations {
        operator.multiply(&current, &mut next)?;

        // rayleigh quotient of the vector before multiplication
        let norm_sq = squared_norm_kernel(&current);
        if norm_sq == T::zero() {
            return Err(EigenError::DegenerateVector { iteration });
        }
        estimate = dot_product_kernel(&current, &next)? / norm_sq;

        normalize_kernel(&mut next).map_err(|e| match e {
            KernelError::ZeroNorm => EigenError::DegenerateVector { iteration },
            e => EigenError::KernelError(e),
        })?;

        // the normalized image becomes the next iterate
        std::mem::swap(&mut current, &mut next);

        let rate = (T::one() - estimate / previous_estimate).abs();

        num_iterations += 1;
        result_rate = rate;

        observer.on_iteration(&IterationEvent {
            iteration,
            estimate,
            rate,
        });

        if rate < tolerance {
            log::debug!(
                "Power iteration converged in {} iterations with estimate {:?}",
                num_iterations,
                estimate
            );
            converged = true;
            break;
        }

        previous_estimate = estimate;
    }

    if !converged && criteria.max_iterations > 0 {
        log::warn!(
            "Power iteration did not converge in {} iterations, last rate {:?}",
            num_iterations,
            result_rate
        );
    }

    Ok(PowerIterationResult {
        eigenvalue: estimate,
        eigenvector: current,
        num_iterations,
        rate: result_rate,
        converged,
    })
}

/// Estimate the dominant eigenvalue of a square operator.
///
/// Convenience wrapper over [`power_iteration`] returning only the estimate. A run that
/// exhausts `max_iterations` still returns its last estimate; use [`power_iteration`] to tell
/// the two outcomes apart. With `verbose` set, every iteration is reported through
/// [`LogObserver`].
///
/// # Arguments
///
/// * `operator` - Square linear operator.
/// * `max_iterations` - Maximum number of iterations to perform.
/// * `tolerance` - Convergence threshold on the relative change of the estimate.
/// * `verbose` - Log the index, estimate and rate of every iteration.
///
/// # Example
///
/// ```
/// use powiter_eigen::estimate_dominant_eigenvalue;
/// use powiter_operator::CooMatrix;
///
/// let mut coo = CooMatrix::new(3, 3);
/// coo.add(0, 0, 1.0).unwrap();
/// coo.add(1, 1, -7.0).unwrap();
/// coo.add(2, 2, 2.0).unwrap();
///
/// let eval: f64 = estimate_dominant_eigenvalue(&coo, 1000, 1e-10, false).unwrap();
/// assert!((eval + 7.0).abs() < 1e-4);
/// ```
pub fn estimate_dominant_eigenvalue<T, O>(
    operator: &O,
    max_iterations: usize,
    tolerance: f64,
    verbose: bool,
) -> Result<T, EigenError>
where
    T: Float + SampleUniform + Debug + Display + LowerExp,
    O: LinearOperator<T> + ?Sized,
{
    let criteria = PowerIterationCriteria::new(max_iterations, tolerance);

    let result = if verbose {
        power_iteration(operator, &criteria, &mut LogObserver)?
    } else {
        power_iteration(operator, &criteria, &mut NoopObserver)?
    };

    Ok(result.eigenvalue)
}
