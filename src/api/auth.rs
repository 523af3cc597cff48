//! Account endpoints: registration, login, logout, and password management.

// crates.io
use http::Method;
use time::Date;
// self
use crate::{
	_prelude::*,
	api::decode_value,
	auth::TokenPair,
	client::{Client, decode_json},
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::HttpTransport,
};

/// Registration endpoint path.
pub const REGISTER_PATH: &str = "/user/api/register/";

/// Fields the registration endpoint reports errors for, in display priority.
const REGISTRATION_FIELDS: [&str; 3] = ["username", "email", "password"];

time::serde::format_description!(birthday_format, Date, "[year]-[month]-[day]");

/// New account submitted at sign-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
	/// Desired username.
	pub username: String,
	/// Contact e-mail address.
	pub email: String,
	/// Account password.
	pub password: String,
	/// Date of birth, used by the backend for parental-supervision rules.
	#[serde(with = "birthday_format")]
	pub birthday: Date,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
	username: &'a str,
	password: &'a str,
}

#[derive(Serialize)]
struct PasswordChange<'a> {
	old_password: &'a str,
	new_password: &'a str,
}

#[derive(Serialize)]
struct PasswordResetRequest<'a> {
	email: &'a str,
}

#[derive(Serialize)]
struct PasswordResetConfirm<'a> {
	email: &'a str,
	code: &'a str,
	new_password: &'a str,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates an account.
	///
	/// Field-level rejections (`username`, `email`, `password`) surface as
	/// [`Error::Validation`] carrying the first message for the first rejected field.
	pub async fn register(&self, form: &RegisterRequest) -> Result<Value> {
		let request = self.unauthenticated(Method::POST, REGISTER_PATH)?.with_json(form)?;

		match self.fetch(&request).await {
			Ok(response) => decode_value(&response),
			Err(err) => Err(registration_error(err)),
		}
	}

	/// Exchanges credentials for a token pair and stores both tokens in the session.
	pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = self
					.unauthenticated(Method::POST, &self.config.login_path)?
					.with_json(&LoginRequest { username, password })?;
				let pair: TokenPair = decode_json(&self.fetch(&request).await?)?;

				self.session.store_pair(&pair).await?;

				Ok(pair)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Ends the session by wiping all persisted session state. No network call is made.
	pub async fn logout(&self) -> Result<()> {
		self.session.clear().await
	}

	/// Changes the signed-in user's password.
	pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<Value> {
		let request = self
			.authorized(Method::PUT, "/user/change-password/")
			.await?
			.with_json(&PasswordChange { old_password, new_password })?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Asks the backend to e-mail a six-digit reset code to `email`.
	pub async fn request_password_reset(&self, email: &str) -> Result<Value> {
		let email = normalize_email(email);
		let request = self
			.unauthenticated(Method::POST, "/user/forgot-password/")?
			.with_json(&PasswordResetRequest { email: &email })?;

		decode_value(&self.fetch(&request).await?)
	}

	/// Sets a new password using the code sent by [`Client::request_password_reset`].
	pub async fn confirm_password_reset(
		&self,
		email: &str,
		code: &str,
		new_password: &str,
	) -> Result<Value> {
		let email = normalize_email(email);
		let request = self
			.unauthenticated(Method::POST, "/user/reset-password-confirm/")?
			.with_json(&PasswordResetConfirm { email: &email, code: code.trim(), new_password })?;

		decode_value(&self.fetch(&request).await?)
	}
}

fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

fn registration_error(err: Error) -> Error {
	let Error::RequestFailed { body, .. } = &err else {
		return err;
	};

	serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|payload| first_field_error(&payload))
		.map(|(field, message)| Error::Validation { field, message })
		.unwrap_or(err)
}

fn first_field_error(payload: &Value) -> Option<(String, String)> {
	REGISTRATION_FIELDS.iter().find_map(|field| {
		let message = match payload.get(field)? {
			Value::Array(messages) => messages.first()?.as_str()?.to_owned(),
			Value::String(message) => message.clone(),
			_ => return None,
		};

		Some(((*field).to_owned(), message))
	})
}
