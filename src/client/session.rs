/// Where the dashboard front end should go for a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_name: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Blank tokens count as no token.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            user_name: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn landing(&self) -> Route {
        if self.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        }
    }

    pub fn greeting_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Invitado")
    }
}
