use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{
    LoginRequest, RegisterRequest, UpdateProfileRequest, UpdateSettingsRequest, User, UserPatch,
    UserType,
};
use crate::infrastructure::notify::{BusinessNotifier, BusinessRegistration};
use crate::infrastructure::security::{
    generate_session_token, generate_wallet_address, hash_password, verify_password,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const MIN_PASSWORD_LEN: usize = 6;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    notifier: Arc<BusinessNotifier>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, notifier: Arc<BusinessNotifier>) -> Self {
        Self { users, notifier }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let user_type = req.user_type.unwrap_or_default();
        let missing_business_name = user_type == UserType::Business
            && req.business_name.as_deref().is_none_or(str::is_empty);
        if req.name.is_empty() || req.email.is_empty() || req.password.is_empty()
            || missing_business_name
        {
            return Err(DomainError::validation("Missing required fields").into());
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(
                DomainError::validation("Password must be at least 6 characters").into(),
            );
        }

        // Uniqueness is checked before anything is persisted
        if self.users.find_by_email(&req.email).await?.is_some() {
            warn!(email = %req.email, "Duplicate registration attempt");
            return Err(DomainError::Conflict("Email already registered".to_string()).into());
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {e}"))
        })?;

        let user = User {
            id: 0, // assigned by the store
            name: req.name,
            surname: req.surname,
            email: req.email,
            password_hash,
            country: req.country,
            user_type,
            business_name: match user_type {
                UserType::Business => req.business_name,
                UserType::Individual => None,
            },
            business_description: match user_type {
                UserType::Business => req.business_description,
                UserType::Individual => None,
            },
            address: generate_wallet_address(),
            token: generate_session_token(),
            receive_method: None,
            receive_details: None,
            send_method: None,
            role: req.role.unwrap_or_else(|| "user".to_string()),
            profile_pic: None,
        };

        let user = self.users.insert(user).await?;
        info!(user_id = user.id, email = %user.email, "User registered");

        if user.user_type == UserType::Business {
            // Best effort; the response never depends on this call
            self.notifier.notify_registration(BusinessRegistration {
                email: user.email.clone(),
                password: user.password_hash.clone(),
                country: user.country.clone(),
                business_name: user.business_name.clone(),
                business_description: user.business_description.clone(),
            });
        }

        Ok(user)
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<User> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(
                DomainError::validation("Please enter both email and password").into(),
            );
        }

        let user = self.users.find_by_email(&req.email).await?;
        let Some(user) = user else {
            warn!(email = %req.email, "Login for unknown email");
            return Err(DomainError::unauthorized("Invalid credentials").into());
        };

        let valid = verify_password(&req.password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(user_id = user.id, email = %user.email, "Invalid password during login");
            return Err(DomainError::unauthorized("Invalid credentials").into());
        }

        info!(user_id = user.id, email = %user.email, "Login successful");
        Ok(user)
    }

    pub async fn update_settings(&self, req: UpdateSettingsRequest) -> Result<User> {
        let patch = UserPatch {
            receive_method: req.receive_method,
            receive_details: req.receive_details,
            send_method: req.send_method,
            ..UserPatch::default()
        };
        self.apply_update(&req.email, patch).await
    }

    pub async fn update_profile(&self, req: UpdateProfileRequest) -> Result<User> {
        let patch = UserPatch {
            name: req.name,
            surname: req.surname,
            business_name: req.business_name,
            business_description: req.business_description,
            profile_pic: req.profile_pic,
            ..UserPatch::default()
        };
        self.apply_update(&req.email, patch).await
    }

    async fn apply_update(&self, email: &str, patch: UserPatch) -> Result<User> {
        self.users
            .update(email, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found").into())
    }
}
