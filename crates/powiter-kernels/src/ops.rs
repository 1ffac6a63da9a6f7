use crate::error::KernelError;
use num_traits::{Float, Zero};

/// Computes the dot product of two slices.
///
/// This function calculates the sum of element-wise products of two slices.
///
/// # Arguments
///
/// * `a` - First slice of values
/// * `b` - Second slice of values
///
/// # Returns
///
/// The dot product of the two slices or an error if the slices have different lengths.
///
/// # Errors
///
/// If the lengths of the slices don't match, a `LengthMismatch` error is returned.
///
/// Example:
/// ```
/// use powiter_kernels::ops::dot_product_kernel;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let result = dot_product_kernel(&a, &b).unwrap();
/// assert_eq!(result, 32.0); // (1*4) + (2*5) + (3*6) = 32
/// ```
pub fn dot_product_kernel<T>(a: &[T], b: &[T]) -> Result<T, KernelError>
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
{
    if a.len() != b.len() {
        return Err(KernelError::LengthMismatch(a.len(), b.len()));
    }

    let result = a
        .iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (a_val, b_val)| acc + *a_val * *b_val);

    Ok(result)
}

/// Computes the squared euclidean norm of a slice, i.e. its dot product with itself.
pub fn squared_norm_kernel<T>(a: &[T]) -> T
where
    T: Zero + Copy + std::ops::Add<Output = T> + std::ops::Mul<Output = T>,
{
    a.iter().fold(T::zero(), |acc, &v| acc + v * v)
}

/// Computes the euclidean norm of a slice.
///
/// Example:
/// ```
/// use powiter_kernels::ops::euclidean_norm_kernel;
///
/// let a = [3.0, 4.0];
/// assert_eq!(euclidean_norm_kernel(&a), 5.0);
/// ```
pub fn euclidean_norm_kernel<T: Float>(a: &[T]) -> T {
    squared_norm_kernel(a).sqrt()
}

/// Scales a slice in place to unit euclidean norm.
///
/// # Arguments
///
/// * `a` - The slice to normalize.
///
/// # Returns
///
/// The norm of the slice before normalization.
///
/// # Errors
///
/// If the slice has zero norm (including the empty slice), a `ZeroNorm` error is returned
/// and the slice is left untouched.
///
/// Example:
/// ```
/// use powiter_kernels::ops::normalize_kernel;
///
/// let mut a = [3.0, 0.0, 4.0];
/// let norm = normalize_kernel(&mut a).unwrap();
/// assert_eq!(norm, 5.0);
/// assert_eq!(a, [0.6, 0.0, 0.8]);
/// ```
pub fn normalize_kernel<T: Float>(a: &mut [T]) -> Result<T, KernelError> {
    let norm = euclidean_norm_kernel(a);

    if norm == T::zero() {
        return Err(KernelError::ZeroNorm);
    }

    a.iter_mut().for_each(|v| *v = *v / norm);

    Ok(norm)
}
