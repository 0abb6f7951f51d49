//! Session context and the login form.
//!
//! The session token lives in an explicit [`Session`] value owned by the
//! application: [`Session::login`] acquires it through an [`Authenticator`]
//! and [`Session::logout`] clears it. Nothing is kept in global state.
//!
//! The backend call sits behind the [`Authenticator`] trait. A login is a
//! single await with a single error path; there is no retry.
//!
//! ```rust
//! use tenderboard::session::{Credentials, Session, StaticAuthenticator};
//!
//! # tokio_test_block(async {
//! let auth = StaticAuthenticator::new().with_account("admin@example.com", "secret", "tok-1");
//! let mut session = Session::new();
//!
//! let credentials = Credentials::new("admin@example.com", "secret").unwrap();
//! session.login(&auth, &credentials).await.unwrap();
//! assert_eq!(session.token(), Some("tok-1"));
//!
//! session.logout();
//! assert!(!session.is_authenticated());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f);
//! # }
//! ```

use crate::error::{Error, Result};
use crate::key::{self, Binding, KeyMap};
use crate::textinput::{self, EchoMode};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Email and password sent to the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    /// Builds credentials, rejecting emails without an `@`.
    pub fn new(email: &str, password: &str) -> Result<Self> {
        validate_email(email)?;
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Checks that `email` contains an `@`.
pub fn validate_email(email: &str) -> Result<()> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(Error::InvalidEmail(email.to_string()))
    }
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for later requests.
    pub token: String,
    /// Optional greeting from the backend.
    #[serde(default)]
    pub message: Option<String>,
}

/// Exchanges credentials for a token.
pub trait Authenticator {
    /// Performs the login request. Rejected credentials are
    /// [`Error::InvalidCredentials`].
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<AuthResponse>> + Send;
}

/// Authenticator backed by a fixed list of accounts, for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    accounts: HashMap<String, (String, String)>,
}

impl StaticAuthenticator {
    /// An authenticator that knows no account.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account and the token it receives (builder pattern).
    pub fn with_account(mut self, email: &str, password: &str, token: &str) -> Self {
        self.accounts
            .insert(email.to_string(), (password.to_string(), token.to_string()));
        self
    }
}

impl Authenticator for StaticAuthenticator {
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<AuthResponse>> + Send {
        let result = match self.accounts.get(&credentials.email) {
            Some((password, token)) if *password == credentials.password => Ok(AuthResponse {
                token: token.clone(),
                message: None,
            }),
            _ => Err(Error::InvalidCredentials),
        };
        async move { result }
    }
}

/// The authenticated session, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    email: Option<String>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs in and stores the token. On failure the session is left
    /// anonymous and the error is returned.
    pub async fn login<A: Authenticator>(&mut self, auth: &A, credentials: &Credentials) -> Result<()> {
        validate_email(&credentials.email)?;
        let response = auth.login(credentials).await;
        self.complete_login(&credentials.email, response)
    }

    /// Stores the outcome of a login performed elsewhere, e.g. by [`login_cmd`].
    pub fn complete_login(&mut self, email: &str, response: Result<AuthResponse>) -> Result<()> {
        match response {
            Ok(response) => {
                info!(email = %email, "login accepted");
                self.token = Some(response.token);
                self.email = Some(email.to_string());
                Ok(())
            }
            Err(err) => {
                warn!(email = %email, %err, "login rejected");
                self.token = None;
                self.email = None;
                Err(err)
            }
        }
    }

    /// Clears the token.
    pub fn logout(&mut self) {
        if self.token.take().is_some() {
            info!("session cleared");
        }
        self.email = None;
    }

    /// The bearer token while logged in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The email used to log in.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Reports whether a token is held. Screens behind login check this and
    /// fall back to the login form otherwise.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Message carrying the result of [`login_cmd`].
#[derive(Debug)]
pub struct LoginResultMsg {
    /// Email the login was attempted with.
    pub email: String,
    /// Backend response.
    pub result: Result<AuthResponse>,
}

/// Runs the login in the background and delivers a [`LoginResultMsg`].
pub fn login_cmd<A>(auth: Arc<A>, credentials: Credentials) -> Cmd
where
    A: Authenticator + Send + Sync + 'static,
{
    Box::pin(async move {
        let result = auth.login(&credentials).await;
        Some(Box::new(LoginResultMsg {
            email: credentials.email,
            result,
        }) as Msg)
    })
}

/// Key bindings of the login form.
#[derive(Debug, Clone)]
pub struct LoginKeyMap {
    /// Next field.
    pub next_field: Binding,
    /// Previous field.
    pub prev_field: Binding,
    /// Submit the form.
    pub submit: Binding,
    /// Show or hide the password.
    pub toggle_password: Binding,
    /// Quit.
    pub quit: Binding,
}

impl Default for LoginKeyMap {
    fn default() -> Self {
        Self {
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Down]).with_help("tab", "next field"),
            prev_field: Binding::new(vec![(KeyCode::BackTab, KeyModifiers::SHIFT), (KeyCode::Up, KeyModifiers::NONE)])
                .with_help("shift+tab", "prev field"),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "sign in"),
            toggle_password: key::new_binding(vec![key::with_keys_str(&["ctrl+r"])])
                .with_help("ctrl+r", "show password"),
            quit: key::new_binding(vec![key::with_keys_str(&["ctrl+c", "esc"])]).with_help("esc", "quit"),
        }
    }
}

impl KeyMap for LoginKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next_field, &self.submit, &self.toggle_password, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.next_field, &self.prev_field],
            vec![&self.submit, &self.toggle_password, &self.quit],
        ]
    }
}

/// Styles of the login form.
#[derive(Debug, Clone)]
pub struct LoginStyles {
    /// Form title.
    pub title: Style,
    /// Field labels.
    pub label: Style,
    /// Validation and login errors.
    pub error: Style,
    /// Help line.
    pub help: Style,
}

impl Default for LoginStyles {
    fn default() -> Self {
        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            label: Style::new().bold(true),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#C0392B",
                Dark: "#FF5F5F",
            }),
            help: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
        }
    }
}

/// Which input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// The email input.
    Email,
    /// The password input.
    Password,
}

/// Email and password form.
///
/// Enter on a valid form stores the credentials; the owner takes them with
/// [`LoginForm::take_submission`] and runs the login, then feeds the
/// [`LoginResultMsg`] back so a rejection shows up under the form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    email: textinput::Model,
    password: textinput::Model,
    field: LoginField,
    error: Option<String>,
    submission: Option<Credentials>,
    /// Title above the form.
    pub title: String,
    /// Key bindings.
    pub keymap: LoginKeyMap,
    /// Styles.
    pub styles: LoginStyles,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    /// An empty form with the email field focused.
    pub fn new() -> Self {
        let mut email = textinput::new()
            .with_prompt("")
            .with_placeholder("name@example.com");
        email.focus();
        let password = textinput::new()
            .with_prompt("")
            .with_placeholder("Password")
            .with_echo_mode(EchoMode::Password);
        Self {
            email,
            password,
            field: LoginField::Email,
            error: None,
            submission: None,
            title: "Sign in".to_string(),
            keymap: LoginKeyMap::default(),
            styles: LoginStyles::default(),
        }
    }

    /// The focused field.
    pub fn field(&self) -> LoginField {
        self.field
    }

    /// The email typed so far.
    pub fn email(&self) -> String {
        self.email.value()
    }

    /// The error line, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the error line.
    pub fn set_error(&mut self, error: Option<&str>) {
        self.error = error.map(str::to_string);
    }

    /// Reports whether the password is shown in clear.
    pub fn password_visible(&self) -> bool {
        self.password.echo_mode == EchoMode::Normal
    }

    /// Takes the credentials of the last successful submit.
    pub fn take_submission(&mut self) -> Option<Credentials> {
        self.submission.take()
    }

    fn focus_field(&mut self, field: LoginField) {
        self.field = field;
        match field {
            LoginField::Email => {
                self.password.blur();
                self.email.focus();
            }
            LoginField::Password => {
                self.email.blur();
                self.password.focus();
            }
        }
    }

    fn cycle_field(&mut self) {
        let next = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.focus_field(next);
    }

    fn validate_live(&mut self) {
        let email = self.email.value();
        self.error = if !email.is_empty() && validate_email(&email).is_err() {
            Some("Invalid email address".to_string())
        } else {
            None
        };
    }

    /// Validates and stores the credentials. Returns whether they were accepted.
    pub fn submit(&mut self) -> bool {
        match Credentials::new(&self.email.value(), &self.password.value()) {
            Ok(credentials) => {
                self.error = None;
                self.submission = Some(credentials);
                true
            }
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Shows the outcome of a login attempt.
    pub fn handle_result(&mut self, result: &Result<AuthResponse>) {
        match result {
            Ok(_) => {
                self.error = None;
                self.password.reset();
            }
            Err(Error::InvalidCredentials) => self.error = Some("Invalid credentials".to_string()),
            Err(err) => self.error = Some(err.to_string()),
        }
    }
}

impl BubbleTeaModel for LoginForm {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(result) = msg.downcast_ref::<LoginResultMsg>() {
            self.handle_result(&result.result);
            return None;
        }

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        } else if self.keymap.submit.matches(key_msg) {
            if self.field == LoginField::Email {
                self.focus_field(LoginField::Password);
            } else {
                self.submit();
            }
        } else if self.keymap.next_field.matches(key_msg) || self.keymap.prev_field.matches(key_msg) {
            self.cycle_field();
        } else if self.keymap.toggle_password.matches(key_msg) {
            self.password.echo_mode = if self.password_visible() {
                EchoMode::Password
            } else {
                EchoMode::Normal
            };
        } else {
            match self.field {
                LoginField::Email => {
                    if self.email.handle_key(key_msg) {
                        self.validate_live();
                    }
                }
                LoginField::Password => {
                    self.password.handle_key(key_msg);
                }
            }
        }
        None
    }

    fn view(&self) -> String {
        let mut lines = vec![
            self.styles.title.clone().render(&self.title),
            String::new(),
            self.styles.label.clone().render("Email"),
            self.email.view(),
            self.styles.label.clone().render("Password"),
            self.password.view(),
        ];
        if let Some(error) = &self.error {
            lines.push(self.styles.error.clone().render(error));
        }
        lines.push(String::new());
        lines.push(
            self.styles
                .help
                .clone()
                .render(&key::help_line(&self.keymap.short_help(), " • ")),
        );
        lines.join("\n")
    }
}
