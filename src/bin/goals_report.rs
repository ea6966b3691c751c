//! goals-report: Poisson regression of home goals on home shots for one team.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use goalglm::prelude::*;
use log::{info, warn};

#[derive(Parser)]
#[command(name = "goals-report")]
#[command(about = "Fit home goals against home shots with a Poisson GLM")]
#[command(version)]
struct Cli {
    /// Match results CSV (football-data layout)
    csv: PathBuf,

    /// Team whose home matches are modelled
    #[arg(short, long)]
    team: Option<String>,

    /// List the teams in the file and exit
    #[arg(long)]
    list_teams: bool,

    /// Maximum IRLS iterations
    #[arg(long, default_value_t = 25)]
    max_iterations: usize,

    /// Relative deviance change at which IRLS stops
    #[arg(long, default_value_t = 1e-8)]
    tolerance: f64,

    /// Confidence level for the rate-ratio interval
    #[arg(long, default_value_t = 0.95)]
    confidence_level: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let table = MatchTable::from_path(&cli.csv)
        .with_context(|| format!("reading {}", cli.csv.display()))?;

    if cli.list_teams {
        for team in table.teams() {
            println!("{team}");
        }
        return Ok(());
    }

    let Some(team) = cli.team.as_deref() else {
        bail!("--team is required unless --list-teams is given");
    };

    let home = table
        .home_matches(team)
        .with_context(|| format!("selecting home matches for {team}"))?;
    let (shots, goals) = home.goals_vs_shots()?;
    info!("fitting {} matches", shots.nrows());

    let fitted = PoissonRegressor::builder()
        .feature_names(["shots"])
        .max_iterations(cli.max_iterations)
        .tolerance(cli.tolerance)
        .confidence_level(cli.confidence_level)
        .build()
        .fit(&shots, &goals)
        .context("fitting Poisson model")?;

    let result = fitted.result();
    println!("{team}: {} home matches", result.n_observations);
    println!();
    println!("{result}");
    println!();

    let slope = result
        .coefficient("shots")
        .context("fitted model has no shots coefficient")?;
    let ratio = slope.estimate.exp();
    println!(
        "Each additional shot multiplies expected goals by {ratio:.4} ({:+.2}%), \
         {:.0}% CI [{:.4}, {:.4}]",
        (ratio - 1.0) * 100.0,
        result.confidence_level * 100.0,
        result.conf_interval_lower[1].exp(),
        result.conf_interval_upper[1].exp(),
    );

    let lrt = fitted.likelihood_ratio_test();
    println!(
        "Likelihood ratio test vs. null: chi2 = {:.4} on {} df, p = {:.4}",
        lrt.statistic, lrt.df, lrt.p_value
    );

    let dispersion = fitted.dispersion();
    if dispersion > 1.5 {
        warn!("Pearson dispersion {dispersion:.2} suggests overdispersion");
    }

    Ok(())
}
