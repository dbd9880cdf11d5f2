use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::config;

/// Claims carried by the session token issued at login. The tenant routes
/// authorize by verification code, so the token is presently informational
/// for the UI, but it is signed and validated like any session credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub nome: String,
    pub nome_banco: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String, nome: String, nome_banco: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            email,
            nome,
            nome_banco,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    TokenInvalid(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::TokenInvalid(msg) => write!(f, "JWT validation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn gerar_token(claims: &Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validar_token(token: &str) -> Result<Claims, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::TokenInvalid(e.to_string()))
}

/// Login request body. Every field is optional at the serde level so that
/// absent fields produce the contract's own 400 instead of a framework
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub senha: Option<String>,
    pub nome_banco: Option<String>,
    pub codigo_verificacao: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credenciais {
    pub email: String,
    pub senha: String,
    pub nome_banco: String,
    pub codigo_verificacao: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredencialError {
    #[error("Todos os campos são obrigatórios.")]
    CamposFaltando,
    #[error("Email inválido.")]
    EmailInvalido,
}

/// Presence and format checks that run before any database access.
pub fn validar_credenciais(payload: &LoginPayload) -> Result<Credenciais, CredencialError> {
    let obrigatorio = |campo: &Option<String>| -> Result<String, CredencialError> {
        match campo {
            Some(v) if !v.trim().is_empty() => Ok(v.clone()),
            _ => Err(CredencialError::CamposFaltando),
        }
    };

    let email = obrigatorio(&payload.email)?;
    let senha = obrigatorio(&payload.senha)?;
    let nome_banco = obrigatorio(&payload.nome_banco)?;
    let codigo_verificacao = obrigatorio(&payload.codigo_verificacao)?;

    if !email.validate_email() {
        return Err(CredencialError::EmailInvalido);
    }

    Ok(Credenciais {
        email,
        senha,
        nome_banco,
        codigo_verificacao,
    })
}
