//! Authentication endpoints

use super::{ApiClient, ApiMessage};
use crate::{
    error::AppResult,
    models::user::{LoginForm, SignUpForm, Token},
};

impl ApiClient {
    pub async fn register(&self, form: &SignUpForm) -> AppResult<ApiMessage> {
        self.post("/users/", form).await
    }

    /// Log in with a form-urlencoded body and keep the returned token
    pub async fn login(&self, form: &LoginForm) -> AppResult<Token> {
        let token: Token = self.post_credentials("/users/login", form).await?;
        self.session.store(&token.access_token)?;
        tracing::info!("Logged in as {}", form.username);
        Ok(token)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.session.clear()
    }
}
