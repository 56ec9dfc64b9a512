use anyhow::Context;
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::api::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::database::{self, users, DbPool, Session, User};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("El email ya está registrado")]
    EmailTaken,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Token no proporcionado")]
    MissingToken,

    #[error("Token inválido o expirado")]
    InvalidToken,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Registration, login and opaque session tokens.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(pool: DbPool, session_ttl_hours: i64) -> Self {
        Self {
            pool,
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    pub fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let nombre = request.nombre.trim();
        let email = request.email.trim();

        if nombre.is_empty() || email.is_empty() {
            return Err(AuthError::InvalidInput("Nombre y email son requeridos"));
        }
        if !email.contains('@') {
            return Err(AuthError::InvalidInput("El email no es válido"));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(
                "La contraseña debe tener al menos 6 caracteres",
            ));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let hash = hash_password(&salt, &request.password);

        let mut conn = database::get_connection(&self.pool).context("Error al registrar usuario")?;
        users::insert_user(&mut conn, nombre, email, &hash, &salt)
            .context("Error al registrar usuario")?
            .ok_or(AuthError::EmailTaken)
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let mut conn = database::get_connection(&self.pool).context("Error al iniciar sesión")?;

        let credentials = users::find_credentials_by_email(&mut conn, request.email.trim())
            .context("Error al iniciar sesión")?
            .ok_or(AuthError::InvalidCredentials)?;

        if hash_password(&credentials.salt, &request.password) != credentials.password_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: credentials.user.id,
            expires_at: Utc::now().naive_utc() + self.session_ttl,
        };
        users::insert_session(&mut conn, &session).context("Error al iniciar sesión")?;

        Ok(LoginResponse {
            token: session.token,
            user: credentials.user,
        })
    }

    pub fn verify(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;

        let mut conn = database::get_connection(&self.pool).context("Error al verificar token")?;
        users::find_user_by_token(&mut conn, token, Utc::now().naive_utc())
            .context("Error al verificar token")?
            .ok_or(AuthError::InvalidToken)
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
