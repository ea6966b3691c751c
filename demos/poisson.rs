//! Fit a Poisson GLM to simulated counts and compare with the truth.
//!
//! Run with `cargo run --example poisson`.

use goalglm::data::{simulate_poisson_response, uniform_design};
use goalglm::diagnostics::{influential_cooks, qq_points};
use goalglm::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let mut rng = StdRng::seed_from_u64(2024);
    let x = uniform_design(1000, -2.0, 2.0, &mut rng)?;
    let y = simulate_poisson_response(&x, &[0.5, 0.3], true, &mut rng)?;

    let fitted = PoissonRegressor::builder()
        .feature_names(["x"])
        .build()
        .fit(&x, &y)?;
    let result = fitted.result();

    println!("{result}");
    println!();
    println!("true beta = (0.5, 0.3)");
    println!(
        "estimate   = ({:.4}, {:.4})",
        result.coefficients[0], result.coefficients[1]
    );
    println!("dispersion = {:.4}", fitted.dispersion());

    let qq = qq_points(&fitted.deviance_residuals());
    let worst = qq.sample.last().copied().unwrap_or(f64::NAN);
    println!("largest deviance residual = {worst:.4}");

    let influential = influential_cooks(&fitted.cooks_distance(), None);
    println!("observations with Cook's distance above 4/n: {}", influential.len());

    Ok(())
}
