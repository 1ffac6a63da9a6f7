use approx::assert_relative_eq;

use powiter::eigen::{
    estimate_dominant_eigenvalue, power_iteration, EigenError, IterationEvent, NoopObserver,
    PowerIterationCriteria,
};
use powiter::operator::{CooMatrix, DenseMatrix, LinearOperator, OperatorError};

/// Two triangles sharing vertex 2: the graph laplacian has spectrum {0, 1, 3, 3, 5}.
fn bowtie_laplacian() -> Result<CooMatrix<f64>, OperatorError> {
    let mut coo = CooMatrix::new(5, 5);
    coo.add_sym(0, 0, 2.0)?;
    coo.add_sym(0, 1, -1.0)?;
    coo.add_sym(0, 2, -1.0)?;
    coo.add_sym(1, 1, 2.0)?;
    coo.add_sym(1, 2, -1.0)?;
    coo.add_sym(2, 2, 4.0)?;
    coo.add_sym(2, 3, -1.0)?;
    coo.add_sym(2, 4, -1.0)?;
    coo.add_sym(3, 3, 2.0)?;
    coo.add_sym(3, 4, -1.0)?;
    coo.add_sym(4, 4, 2.0)?;
    Ok(coo)
}

/// Largest magnitude eigenvalue of a symmetric matrix computed with faer.
fn reference_dominant_eigenvalue(dense: &DenseMatrix<f64>) -> f64 {
    let eigenvalues = dense.to_faer().selfadjoint_eigenvalues(faer::Side::Lower);
    eigenvalues
        .into_iter()
        .fold(0.0, |acc: f64, v| if v.abs() > acc.abs() { v } else { acc })
}

#[test]
fn test_reference_matrix_layout() -> Result<(), OperatorError> {
    let dense = bowtie_laplacian()?.to_dense();
    #[rustfmt::skip]
    let expected = [
         2.0, -1.0, -1.0,  0.0,  0.0,
        -1.0,  2.0, -1.0,  0.0,  0.0,
        -1.0, -1.0,  4.0, -1.0, -1.0,
         0.0,  0.0, -1.0,  2.0, -1.0,
         0.0,  0.0, -1.0, -1.0,  2.0,
    ];
    assert_eq!(dense.as_slice(), &expected);
    Ok(())
}

#[test]
fn test_faer_reference_eigenvalue() -> Result<(), OperatorError> {
    let dense = bowtie_laplacian()?.to_dense();
    assert_relative_eq!(reference_dominant_eigenvalue(&dense), 5.0, epsilon = 1e-10);
    Ok(())
}

#[test]
fn test_dense_sparse_coo_agree() -> Result<(), Box<dyn std::error::Error>> {
    let coo = bowtie_laplacian()?;
    let sparse = coo.to_sparse();
    let dense = coo.to_dense();
    let reference = reference_dominant_eigenvalue(&dense);

    let criteria = PowerIterationCriteria::new(1000, 1e-6).with_seed(2024);

    let eval_dense = power_iteration(&dense, &criteria, &mut NoopObserver)?;
    let eval_sparse = power_iteration(&sparse, &criteria, &mut NoopObserver)?;
    let eval_coo = power_iteration(&coo, &criteria, &mut NoopObserver)?;

    for result in [&eval_dense, &eval_sparse, &eval_coo] {
        assert!(result.converged);
        assert_relative_eq!(result.eigenvalue, reference, epsilon = 1e-4);
        assert_relative_eq!(result.eigenvalue, 5.0, epsilon = 1e-4);
    }

    assert_relative_eq!(eval_dense.eigenvalue, eval_sparse.eigenvalue, epsilon = 1e-4);
    assert_relative_eq!(eval_dense.eigenvalue, eval_coo.eigenvalue, epsilon = 1e-4);

    Ok(())
}

#[test]
fn test_unseeded_estimates_agree() -> Result<(), Box<dyn std::error::Error>> {
    let coo = bowtie_laplacian()?;
    let sparse = coo.to_sparse();
    let dense = coo.to_dense();

    let operators: [&dyn LinearOperator<f64>; 3] = [&dense, &sparse, &coo];
    for op in operators {
        let eval: f64 = estimate_dominant_eigenvalue(op, 1000, 1e-6, false)?;
        assert_relative_eq!(eval, 5.0, epsilon = 1e-4);
    }

    Ok(())
}

#[test]
fn test_dominant_eigenvector_direction() -> Result<(), Box<dyn std::error::Error>> {
    let sparse = bowtie_laplacian()?.to_sparse();
    let criteria = PowerIterationCriteria::new(1000, 1e-12).with_seed(8);
    let result = power_iteration(&sparse, &criteria, &mut NoopObserver)?;

    // eigenvector of 5 is (1, 1, -4, 1, 1) / sqrt(20)
    let expected = [1.0, 1.0, -4.0, 1.0, 1.0].map(|v: f64| v / 20.0f64.sqrt());
    let alignment: f64 = result
        .eigenvector
        .iter()
        .zip(expected.iter())
        .map(|(a, b)| a * b)
        .sum();
    assert_relative_eq!(alignment.abs(), 1.0, epsilon = 1e-4);

    Ok(())
}

#[test]
fn test_faer_mat_operator() -> Result<(), Box<dyn std::error::Error>> {
    let mat = bowtie_laplacian()?.to_dense().to_faer();
    let criteria = PowerIterationCriteria::new(1000, 1e-6).with_seed(17);
    let result = power_iteration(&mat, &criteria, &mut NoopObserver)?;
    assert_relative_eq!(result.eigenvalue, 5.0, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_estimate_converges_with_budget() -> Result<(), Box<dyn std::error::Error>> {
    let coo = bowtie_laplacian()?;
    let mut errors = Vec::new();
    for max_iterations in [2, 8, 32] {
        let criteria = PowerIterationCriteria::new(max_iterations, 1e-14).with_seed(99);
        let result = power_iteration(&coo, &criteria, &mut NoopObserver)?;
        errors.push((result.eigenvalue - 5.0).abs());
    }
    assert!(errors[2] <= errors[0]);
    assert!(errors[2] < 1e-4);
    Ok(())
}

#[test]
fn test_verbose_history() -> Result<(), Box<dyn std::error::Error>> {
    let dense = bowtie_laplacian()?.to_dense();
    let criteria = PowerIterationCriteria::new(100, 1e-6).with_seed(1);
    let mut history: Vec<IterationEvent<f64>> = Vec::new();
    let result = power_iteration(&dense, &criteria, &mut history)?;

    assert_eq!(history.len(), result.num_iterations);
    assert_eq!(history.last().map(|e| e.estimate), Some(result.eigenvalue));

    // the verbose path goes through the log observer and returns the same scalar
    let eval: f64 = estimate_dominant_eigenvalue(&dense, 100, 1e-6, true)?;
    assert_relative_eq!(eval, result.eigenvalue, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_non_square_operator() {
    let op = DenseMatrix::<f64>::zeros(3, 4);
    let result: Result<f64, EigenError> = estimate_dominant_eigenvalue(&op, 100, 1e-6, false);
    assert_eq!(result, Err(EigenError::InvalidOperator { rows: 3, cols: 4 }));
}

#[test]
fn test_zero_operator() {
    let op = CooMatrix::<f64>::new(3, 3).to_sparse();
    let result: Result<f64, EigenError> = estimate_dominant_eigenvalue(&op, 100, 1e-6, false);
    assert_eq!(result, Err(EigenError::DegenerateVector { iteration: 0 }));
}

#[test]
fn test_zero_iterations() -> Result<(), EigenError> {
    let op = DenseMatrix::<f64>::identity(3);
    let eval: f64 = estimate_dominant_eigenvalue(&op, 0, 1e-6, false)?;
    assert_eq!(eval, 1.0);
    Ok(())
}
