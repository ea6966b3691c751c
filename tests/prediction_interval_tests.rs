//! Tests for prediction intervals validated against R's predict() function.

mod common;

use common::{generate_poisson_data, generate_two_group_data};
use faer::Mat;
use goalglm::prelude::*;

/// Helper to assert approximate equality with a tolerance.
fn assert_approx(actual: f64, expected: f64, tol: f64, name: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{}: expected {}, got {}, diff = {}",
        name,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// R code:
/// ```r
/// x <- c(0, 0, 0, 0, 0, 1, 1, 1, 1, 1)
/// y <- c(1, 2, 3, 0, 4, 3, 5, 4, 6, 7)
/// fit <- glm(y ~ x, family = poisson)
/// p <- predict(fit, newdata = data.frame(x = c(0, 1, 2)), type = "link", se.fit = TRUE)
/// exp(p$fit + outer(p$se.fit, c(-1, 1) * qnorm(0.975)))
/// ```
/// Output:
///   x  fit   se.fit(link)  lwr        upr
///   0  2     0.3162278     1.076109   3.717094
///   1  5     0.2000000     3.378545   7.399635
///   2  12.5  0.5099020     4.601301   33.957784
#[test]
fn test_poisson_response_interval_vs_r() {
    let (x, y) = generate_two_group_data();
    let fitted = PoissonRegressor::builder().build().fit(&x, &y).unwrap();

    let x_new = Mat::from_fn(3, 1, |i, _| i as f64);
    let link = fitted.predict_with_interval(&x_new, PredictionType::Link, 0.95);
    let response = fitted.predict_with_interval(&x_new, PredictionType::Response, 0.95);

    let expected = [
        (2.0, 0.3162278, 1.076109, 3.717094),
        (5.0, 0.2000000, 3.378545, 7.399635),
        (12.5, 0.5099020, 4.601301, 33.957784),
    ];
    for (i, &(fit, se_link, lwr, upr)) in expected.iter().enumerate() {
        assert_approx(response.fit[i], fit, 1e-5, "fit");
        assert_approx(link.se[i], se_link, 1e-5, "se.fit");
        assert_approx(response.lower[i], lwr, 1e-4, "lwr");
        assert_approx(response.upper[i], upr, 1e-4, "upr");
        // Delta method: se(μ̂) = μ̂ · se(η̂)
        assert_approx(response.se[i], fit * se_link, 1e-4, "se.fit(response)");
    }
}

#[test]
fn test_interval_widens_with_level() {
    let (x, y) = generate_poisson_data(200, 0.5, 0.3, 9);
    let fitted = PoissonRegressor::builder().build().fit(&x, &y).unwrap();
    let x_new = Mat::from_fn(4, 1, |i, _| i as f64 - 1.5);

    let narrow = fitted.predict_with_interval(&x_new, PredictionType::Response, 0.80);
    let wide = fitted.predict_with_interval(&x_new, PredictionType::Response, 0.99);

    assert_eq!(narrow.len(), 4);
    for i in 0..4 {
        assert!(wide.lower[i] < narrow.lower[i]);
        assert!(wide.upper[i] > narrow.upper[i]);
        assert_approx(wide.fit[i], narrow.fit[i], 1e-12, "fit");
    }
}

#[test]
fn test_interval_is_narrowest_near_data_centre() {
    let (x, y) = generate_poisson_data(400, 0.5, 0.3, 10);
    let fitted = PoissonRegressor::builder().build().fit(&x, &y).unwrap();
    let x_new = Mat::from_fn(3, 1, |i, _| [0.0, 4.0, -4.0][i]);

    let link = fitted.predict_with_interval(&x_new, PredictionType::Link, 0.95);
    assert!(link.se[0] < link.se[1]);
    assert!(link.se[0] < link.se[2]);
}
