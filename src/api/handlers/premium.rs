// src/api/handlers/premium.rs
use actix_web::{web, HttpResponse, Result};
use regex::Regex;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::LazyLock;

use crate::api::AppState;
use crate::database::{self, NewSubscriber};
use crate::errors::SimulateurError;
use crate::models::{LicenseSeniority, PremiumRequest, UsageType};
use crate::premium::{self, PremiumInput};

/// Matched from the start of the address only; trailing text is tolerated.
static EMAIL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("email pattern is valid"));

pub async fn calcul_prime(
    state: web::Data<AppState>,
    payload: web::Either<web::Json<PremiumRequest>, web::Form<PremiumRequest>>,
) -> Result<HttpResponse> {
    let request = match payload {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };
    log::debug!("Données reçues du formulaire : {:?}", request);

    match quote(&state.db_pool, &request).await {
        Ok(prime) => Ok(HttpResponse::Ok().json(json!({ "prime": format!("{:.2}", prime) }))),
        Err(e) => {
            let (mut builder, message) = match &e {
                SimulateurError::InvalidData => (HttpResponse::BadRequest(), e.to_string()),
                SimulateurError::InvalidLicenseSeniority(raw) => {
                    log::error!("Ancienneté du permis invalide reçue : {}", raw);
                    (HttpResponse::BadRequest(), e.to_string())
                }
                _ => {
                    log::error!("Erreur lors du calcul de la prime: {:?}", e);
                    (
                        HttpResponse::InternalServerError(),
                        format!("Erreur dans le calcul de la prime: {}", e),
                    )
                }
            };
            Ok(builder.json(json!({ "error": message })))
        }
    }
}

/// Validates the request, prices it and records the subscriber.
pub async fn quote(pool: &SqlitePool, request: &PremiumRequest) -> crate::errors::Result<f64> {
    let email = request
        .email
        .as_deref()
        .filter(|email| EMAIL_PREFIX.is_match(email))
        .ok_or(SimulateurError::InvalidData)?;
    let age = request
        .age
        .as_deref()
        .and_then(|age| age.trim().parse::<i64>().ok())
        .filter(|age| (18..=100).contains(age))
        .ok_or(SimulateurError::InvalidData)?;

    let puissance_raw = request.puissance.as_deref().unwrap_or_default();
    let puissance = puissance_raw.trim().parse::<i64>().map_err(|e| {
        SimulateurError::Calculation(format!("puissance invalide '{}': {}", puissance_raw, e))
    })?;

    let license_raw = request.anciennete_permis.as_deref().unwrap_or_default();
    let license = LicenseSeniority::from_code(license_raw)
        .ok_or_else(|| SimulateurError::InvalidLicenseSeniority(license_raw.to_string()))?;

    let prime = premium::compute(&PremiumInput {
        age,
        license_years: license.years(),
        horsepower: puissance,
        usage: UsageType::from_code(request.usage_type.as_deref()),
    });

    let subscriber = NewSubscriber {
        nom: required(&request.nom, "nom")?,
        prenom: required(&request.prenom, "prenom")?,
        email: email.to_string(),
        age,
        anciennete_permis: license.years(),
        puissance,
        prime,
    };
    let id = database::save_subscriber(pool, &subscriber).await?;
    log::info!("Utilisateur {} enregistré avec une prime de {:.2}", id, prime);

    Ok(prime)
}

fn required(value: &Option<String>, field: &str) -> crate::errors::Result<String> {
    value
        .clone()
        .ok_or_else(|| SimulateurError::Calculation(format!("champ manquant: {}", field)))
}
