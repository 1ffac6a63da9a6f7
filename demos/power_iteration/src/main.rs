use argh::FromArgs;

use powiter::eigen::{power_iteration, LogObserver, NoopObserver, PowerIterationCriteria};
use powiter::operator::{CooMatrix, LinearOperator};

#[derive(FromArgs)]
/// Estimate the dominant eigenvalue of a small symmetric matrix stored as dense, sparse and
/// coordinate-list operators.
struct Args {
    /// maximum number of iterations
    #[argh(option, default = "1000")]
    max_iterations: usize,

    /// convergence tolerance on the relative change of the estimate
    #[argh(option, default = "1e-6")]
    tolerance: f64,

    /// seed for the random start vector
    #[argh(option)]
    seed: Option<u64>,

    /// do not log every iteration
    #[argh(switch, short = 'q')]
    quiet: bool,
}

fn run(
    name: &str,
    operator: &dyn LinearOperator<f64>,
    criteria: &PowerIterationCriteria,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Computing {} Eval:", name);

    let result = if quiet {
        power_iteration(operator, criteria, &mut NoopObserver)?
    } else {
        power_iteration(operator, criteria, &mut LogObserver)?
    };

    // non-converged runs are already warned about by the solver
    log::debug!(
        "{}: {} iterations, converged: {}",
        name,
        result.num_iterations,
        result.converged
    );

    println!("Max Eval {}: {:.2}", name, result.eigenvalue);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    let mut criteria = PowerIterationCriteria::new(args.max_iterations, args.tolerance);
    criteria.seed = args.seed;

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

    let sparse = coo.to_sparse();
    let dense = coo.to_dense();

    println!("Input:\n{}", dense);

    run("Dense", &dense, &criteria, args.quiet)?;
    println!();
    run("Sparse", &sparse, &criteria, args.quiet)?;
    println!();
    run("Coo", &coo, &criteria, args.quiet)?;

    Ok(())
}
