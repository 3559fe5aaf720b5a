// src/premium.rs
use crate::models::UsageType;

/// Civil liability cost every premium starts from.
pub const BASE_LIABILITY: f64 = 300.0;

/// Passengers assumed by the tariff, driver excluded.
const PASSENGERS: f64 = 3.0;

/// Inputs of one premium computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumInput {
    pub age: i64,
    pub license_years: i64,
    pub horsepower: i64,
    pub usage: UsageType,
}

fn age_factor(age: i64) -> f64 {
    let age = age as f64;
    if age < 25.0 {
        1.6 - 0.02 * (25.0 - age)
    } else if age <= 60.0 {
        1.0 + 0.01 * (30.0 - (age - 30.0).abs())
    } else {
        1.3 + 0.015 * (age - 60.0)
    }
}

fn license_factor(years: i64) -> f64 {
    (1.6 - 0.06 * years as f64).max(0.85)
}

fn vehicle_factor(years: i64) -> f64 {
    1.0 + 0.04 * years.min(15) as f64
}

fn power_factor(horsepower: i64) -> f64 {
    1.0 + 0.015 * horsepower as f64
}

fn usage_factor(usage: UsageType) -> f64 {
    match usage {
        UsageType::Personal => 1.0,
        UsageType::Professional => 1.4,
        UsageType::Other => 1.15,
    }
}

/// Computes the yearly premium for the given driver and vehicle.
pub fn compute(input: &PremiumInput) -> f64 {
    log::debug!(
        "Calcul de la prime avec les paramètres : âge={}, anciennete_permis={}, puissance={}, usage_type={}",
        input.age,
        input.license_years,
        input.horsepower,
        input.usage
    );

    let passenger_factor = 1.0 + 0.03 * PASSENGERS;
    let multiplier = age_factor(input.age)
        * license_factor(input.license_years)
        * vehicle_factor(input.license_years)
        * power_factor(input.horsepower)
        * passenger_factor
        * usage_factor(input.usage);
    log::debug!("Multiplicateur total : {}", multiplier);

    let total = BASE_LIABILITY * multiplier;
    log::debug!("Prime calculée : {}", total);
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_age_factor_brackets() {
        assert_close(age_factor(18), 1.46);
        assert_close(age_factor(24), 1.58);
        assert_close(age_factor(25), 1.25);
        assert_close(age_factor(30), 1.3);
        assert_close(age_factor(60), 1.0);
        assert_close(age_factor(70), 1.45);
    }

    #[test]
    fn test_license_factor_has_a_floor() {
        assert_close(license_factor(5), 1.3);
        assert_close(license_factor(20), 0.85);
    }

    #[test]
    fn test_vehicle_factor_caps_at_fifteen_years() {
        assert_close(vehicle_factor(10), 1.4);
        assert_close(vehicle_factor(20), 1.6);
    }

    #[test]
    fn test_compute_reference_profile() {
        let premium = compute(&PremiumInput {
            age: 30,
            license_years: 5,
            horsepower: 6,
            usage: UsageType::Personal,
        });
        // 300 * 1.3 * 1.3 * 1.2 * 1.09 * 1.09
        assert_close(premium, 722.84004);
        assert_eq!(format!("{:.2}", premium), "722.84");
    }

    #[test]
    fn test_professional_usage_costs_more() {
        let base = PremiumInput {
            age: 45,
            license_years: 10,
            horsepower: 8,
            usage: UsageType::Personal,
        };
        let personal = compute(&base);
        let other = compute(&PremiumInput { usage: UsageType::Other, ..base });
        let professional = compute(&PremiumInput { usage: UsageType::Professional, ..base });

        assert_close(other / personal, 1.15);
        assert_close(professional / personal, 1.4);
    }
}
