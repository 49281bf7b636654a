use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie holding the last-seen access token.
pub const TOKEN_COOKIE: &str = "accessToken";

/// Google access tokens live for an hour; the cookie should not outlive them by much.
const TOKEN_COOKIE_MAX_AGE: Duration = Duration::hours(1);

/// Durable client-side slot for the access token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResolution {
    /// Taken from the `token` query parameter and persisted.
    FromUrl(String),
    /// Read back from the store.
    Stored(String),
    Unauthenticated,
}

impl TokenResolution {
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::FromUrl(t) | Self::Stored(t) => Some(t),
            Self::Unauthenticated => None,
        }
    }
}

/// URL parameter wins and is persisted; otherwise fall back to the store.
pub fn resolve_token(url_token: Option<&str>, store: &mut impl TokenStore) -> TokenResolution {
    if let Some(token) = url_token.map(str::trim).filter(|t| !t.is_empty()) {
        store.save(token);
        return TokenResolution::FromUrl(token.to_string());
    }
    match store.load() {
        Some(token) => TokenResolution::Stored(token),
        None => TokenResolution::Unauthenticated,
    }
}

/// [`TokenStore`] over the request's cookie jar; hand the jar back in the response.
pub struct CookieTokenStore {
    jar: CookieJar,
    secure: bool,
}

impl CookieTokenStore {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        token_from_jar(&self.jar)
    }

    fn save(&mut self, token: &str) {
        let cookie = Cookie::build((TOKEN_COOKIE, token.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(TOKEN_COOKIE_MAX_AGE);
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }
}

pub fn token_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn clear_token(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(TOKEN_COOKIE).path("/"))
}
