//! Session tokens and the registry of live sessions.
//!
//! A login issues a signed JWT whose `jti` names a session in the registry.
//! Logout removes the session, so the token stops resolving even before it
//! expires.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{User, UserRole, TOKEN_TYPE_BEARER};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub role: UserRole,
    /// Session identifier
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned after a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

#[derive(Debug, Clone, Copy)]
struct SessionRecord {
    user_id: i32,
    expires_at: i64,
}

/// Issues, verifies and revokes session tokens.
pub struct SessionManager {
    config: JwtConfig,
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl SessionManager {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for the user and sign a token naming it.
    pub async fn issue(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let lifetime = Duration::try_hours(self.config.expiration_hours)
            .ok_or_else(|| AppError::internal("Session lifetime out of range"))?;
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Session lifetime out of range"))?;
        let session_id = Uuid::new_v4();

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            jti: session_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret_bytes()),
        )?;

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, record| record.expires_at > now.timestamp());
        sessions.insert(
            session_id,
            SessionRecord {
                user_id: user.id,
                expires_at: claims.exp,
            },
        );

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: lifetime.num_seconds(),
        })
    }

    /// Decode a token and confirm its session is still open.
    pub async fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &Validation::default(),
        )?;
        let claims = data.claims;

        let sessions = self.sessions.read().await;
        match sessions.get(&claims.jti) {
            Some(record) if record.user_id == claims.sub => Ok(claims),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// Close a session. Returns false if it was not open.
    pub async fn revoke(&self, session_id: Uuid) -> bool {
        self.sessions.write().await.remove(&session_id).is_some()
    }

    /// Number of open sessions
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
