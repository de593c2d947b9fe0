use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::users::{UserRepository, UserStoreError};
use crate::middleware::auth::{issue_token, Claims};
use crate::models::user::{SigninRequest, SignupRequest, User, UserSession};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotRequest {
    pub email: String,
}

pub async fn signup(
    repo: web::Data<dyn UserRepository>,
    input: web::Json<SignupRequest>,
) -> impl Responder {
    let input = input.into_inner();

    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().body("Invalid email address");
    }

    let hashed = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST).unwrap_or_default();
    if hashed.is_empty() {
        return HttpResponse::InternalServerError().body("Failed to create account.");
    }

    let user = User {
        email: input.email.clone(),
        password: hashed,
        name: input.name,
        last_signin: None,
        failed_signins: 0,
        created_at: Utc::now(),
    };

    match repo.insert(user) {
        Ok(()) => match issue_token(&input.email) {
            Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
            Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
        },
        Err(UserStoreError::Duplicate) => HttpResponse::Conflict().body("User already exists"),
    }
}

pub async fn signin(
    repo: web::Data<dyn UserRepository>,
    input: web::Json<SigninRequest>,
) -> impl Responder {
    let input = input.into_inner();

    match repo.find_by_email(&input.email) {
        Some(user) => {
            if bcrypt::verify(&input.password, &user.password).unwrap_or(false) {
                repo.record_signin(&input.email, true);
                match issue_token(&input.email) {
                    Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
                    Err(_) => HttpResponse::InternalServerError().body("Token generation failed"),
                }
            } else {
                repo.record_signin(&input.email, false);
                HttpResponse::Unauthorized().body("Invalid credentials")
            }
        }
        None => HttpResponse::NotFound().body("User not found"),
    }
}

pub async fn user_session(
    claims: web::ReqData<Claims>,
    repo: web::Data<dyn UserRepository>,
) -> impl Responder {
    match repo.find_by_email(&claims.sub) {
        Some(user) => HttpResponse::Ok().json(UserSession {
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }),
        None => HttpResponse::NotFound().body("User not found"),
    }
}

// Mock-up only; no email is actually sent.
pub async fn forgot_password(
    repo: web::Data<dyn UserRepository>,
    input: web::Json<ForgotRequest>,
) -> impl Responder {
    if repo.find_by_email(&input.email).is_some() {
        HttpResponse::Ok().body("Password reset link sent to your email. (Mock-up only)")
    } else {
        HttpResponse::NotFound().body("Email not found.")
    }
}

fn is_valid_email(email: &str) -> bool {
    match regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$") {
        Ok(re) => re.is_match(email),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("traveler@example.com"));
        assert!(!is_valid_email("traveler"));
        assert!(!is_valid_email("traveler@"));
        assert!(!is_valid_email("traveler@nodot"));
        assert!(!is_valid_email("two words@example.com"));
    }
}
