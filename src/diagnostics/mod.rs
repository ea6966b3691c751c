//! Diagnostics for fitted Poisson models.
//!
//! These produce the numbers behind the usual diagnostic plots:
//!
//! - **Residuals**: response, Pearson, deviance and working residuals
//!   (residuals vs. fitted)
//! - **Q-Q**: sorted deviance residuals against normal quantiles
//! - **Leverage**: hat values of the weighted fit
//! - **Influence**: Cook's distance
//!
//! # Example
//!
//! ```rust,ignore
//! use goalglm::diagnostics::{influential_cooks, qq_points};
//!
//! let qq = qq_points(&fitted.deviance_residuals());
//! let influential = influential_cooks(&fitted.cooks_distance(), None);
//! ```

mod glm_residuals;
mod influence;
mod leverage;
mod qq;

pub use glm_residuals::{
    deviance_residuals, pearson_residuals, response_residuals, standardized_deviance_residuals,
    standardized_pearson_residuals, working_residuals,
};
pub use influence::{cooks_distance, influential_cooks};
pub use leverage::{hat_values, high_leverage_points};
pub use qq::{plotting_positions, qq_points, QqPoints};
