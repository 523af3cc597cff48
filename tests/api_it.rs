#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::macros;
// self
use common::*;
use twimbol_client::{
	api::{PageQuery, RegisterRequest},
	error::Error,
	store::SessionStore,
};

#[tokio::test]
async fn login_persists_the_issued_token_pair() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);
	let login = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/user/login/")
				.header("content-type", "application/json")
				.json_body(json!({ "username": "ana", "password": "hunter2" }));
			then.status(200).json_body(json!({ "access": "access-1", "refresh": "refresh-1" }));
		})
		.await;
	let pair = client.login("ana", "hunter2").await.expect("Valid credentials should log in.");

	login.assert_calls_async(1).await;

	assert_eq!(pair.access.expose(), "access-1");
	assert_eq!(stored(&store, "access").await.as_deref(), Some("access-1"));
	assert_eq!(stored(&store, "refresh").await.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn bad_credentials_are_not_treated_as_expired_tokens() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/user/login/");
			then.status(401).json_body(json!({ "detail": "No active account found" }));
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(REFRESH_PATH);
			then.status(200).json_body(json!({ "access": "unused" }));
		})
		.await;
	let err = client.login("ana", "wrong").await.expect_err("Bad credentials should be rejected.");

	refresh.assert_calls_async(0).await;

	assert!(matches!(err, Error::RequestFailed { status: 401, .. }));
	assert!(store.is_empty());
}

#[tokio::test]
async fn registration_surfaces_the_first_field_error() {
	let server = MockServer::start_async().await;
	let (client, _) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/user/api/register/")
				.json_body(json!({
					"username": "kid",
					"email": "kid@example.com",
					"password": "password",
					"birthday": "2010-02-14"
				}));
			then.status(400).json_body(json!({
				"email": ["user with this email already exists."],
				"password": ["This password is too common."]
			}));
		})
		.await;

	let form = RegisterRequest {
		username: "kid".into(),
		email: "kid@example.com".into(),
		password: "password".into(),
		birthday: macros::date!(2010 - 02 - 14),
	};
	let err = client.register(&form).await.expect_err("Rejected fields should fail registration.");

	match err {
		Error::Validation { field, message } => {
			assert_eq!(field, "email");
			assert_eq!(message, "user with this email already exists.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn logout_wipes_tokens_and_cached_identity() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;
	store.set("username", "ana".into()).await.expect("Seeding cached identity should succeed.");
	client.logout().await.expect("Logout should succeed.");

	assert!(store.is_empty());
	assert!(client.session.token_pair().await.expect("Session read should succeed.").is_none());
}

#[tokio::test]
async fn reels_forward_pagination_and_decode_the_envelope() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;

	let reels = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/reels/")
				.query_param("page", "2")
				.query_param("page_size", "10")
				.header("authorization", "Bearer access-1");
			then.status(200).json_body(json!({
				"count": 11,
				"next": null,
				"previous": "https://backend.example/api/reels/?page=1&page_size=10",
				"results": [{ "id": 11, "title": "last" }]
			}));
		})
		.await;
	let page = client
		.reels(PageQuery::page(2).with_page_size(10))
		.await
		.expect("Paginated reels should load.");

	reels.assert_calls_async(1).await;

	assert_eq!(page.count, Some(11));
	assert!(!page.has_next());
	assert_eq!(page.results[0]["title"], "last");
}

#[tokio::test]
async fn search_returns_ranked_results() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/search").query_param("query", "rust lang");
			then.status(200).json_body(json!({ "results": [{ "id": 3 }, { "id": 1 }] }));
		})
		.await;

	let results = client.search("rust lang").await.expect("Search should succeed.");

	assert_eq!(results, vec![json!({ "id": 3 }), json!({ "id": 1 })]);
}

#[tokio::test]
async fn profile_and_creator_status_unwrap_list_payloads() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/user/api/profile/");
			then.status(200).json_body(json!([{ "user": { "id": 42 }, "bio": "hi" }]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/user/api/creator-application/by-user/42/");
			then.status(200).json_body(json!([]));
		})
		.await;

	let profile = client.profile().await.expect("Profile should load.");

	assert_eq!(profile["user"]["id"], 42);
	assert_eq!(
		client.creator_application_status(42).await.expect("Status lookup should succeed."),
		None
	);
}

#[tokio::test]
async fn comment_and_like_calls_send_expected_bodies() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;

	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/posts/5/comments/")
				.json_body(json!({ "post": 5, "comment": "nice" }));
			then.status(201).json_body(json!({ "id": 90, "comment": "nice" }));
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/api/posts/5/comments/")
				.json_body(json!({ "comment_id": 90 }));
			then.status(204);
		})
		.await;
	let like = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/post_likes/5/");
			then.status(201);
		})
		.await;
	let comment = client.post_comment(5, "nice").await.expect("Commenting should succeed.");

	client.delete_comment(5, 90).await.expect("Deleting a comment should succeed.");

	let liked = client.like_post(5).await.expect("Liking should succeed.");

	create.assert_calls_async(1).await;
	delete.assert_calls_async(1).await;
	like.assert_calls_async(1).await;

	assert_eq!(comment["id"], 90);
	assert_eq!(liked, serde_json::Value::Null);
}

#[tokio::test]
async fn follow_and_profile_update_use_their_verbs() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;

	let follow = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/profile/follow/").json_body(json!({ "user_id": 7 }));
			then.status(200).json_body(json!({ "following": true }));
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/user/api/update/42/").json_body(json!({ "bio": "new" }));
			then.status(200).json_body(json!({ "bio": "new" }));
		})
		.await;

	client.follow(7).await.expect("Following should succeed.");
	client.update_profile(42, &json!({ "bio": "new" })).await.expect("Update should succeed.");
	follow.assert_calls_async(1).await;
	update.assert_calls_async(1).await;
}

#[tokio::test]
async fn moderation_calls_hit_their_endpoints() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;

	let hide = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/post_hide/8/")
				.header("authorization", "Bearer access-1");
			then.status(201);
		})
		.await;
	let report = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/post_report/8/")
				.json_body(json!({ "reason": "spam", "description": "Repeated links." }));
			then.status(201).json_body(json!({ "id": 3 }));
		})
		.await;
	let block = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/profile/block/").json_body(json!({ "user_id": 12 }));
			then.status(200).json_body(json!({ "blocked": true }));
		})
		.await;

	let hidden = client.hide_post(8).await.expect("Hiding should succeed.");
	let reported =
		client.report_post(8, "spam", "Repeated links.").await.expect("Reporting should succeed.");
	let blocked = client.block_user(12).await.expect("Blocking should succeed.");

	hide.assert_calls_async(1).await;
	report.assert_calls_async(1).await;
	block.assert_calls_async(1).await;

	assert_eq!(hidden, serde_json::Value::Null);
	assert_eq!(reported["id"], 3);
	assert_eq!(blocked["blocked"], true);
}

#[tokio::test]
async fn notification_preferences_read_and_patch() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;

	let read = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/notifications/preferences/");
			then.status(200).json_body(json!({ "likes": true, "comments": true }));
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/api/notifications/preferences/")
				.json_body(json!({ "likes": false }));
			then.status(200).json_body(json!({ "likes": false, "comments": true }));
		})
		.await;
	let preferences =
		client.notification_preferences().await.expect("Preferences should load.");
	let updated = client
		.update_notification_preferences(&json!({ "likes": false }))
		.await
		.expect("Preferences should update.");

	read.assert_calls_async(1).await;
	patch.assert_calls_async(1).await;

	assert_eq!(preferences["likes"], true);
	assert_eq!(updated["likes"], false);
}

#[tokio::test]
async fn password_change_is_authorized_and_refreshes_on_401() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-stale"), Some("refresh-1")).await;

	let rejected = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/user/change-password/")
				.header("authorization", "Bearer access-stale");
			then.status(401);
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/user/change-password/")
				.header("authorization", "Bearer access-fresh")
				.json_body(json!({ "old_password": "old", "new_password": "new-secret" }));
			then.status(200).json_body(json!({ "detail": "Password updated." }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(REFRESH_PATH);
			then.status(200).json_body(json!({ "access": "access-fresh" }));
		})
		.await;

	client.change_password("old", "new-secret").await.expect("Password change should succeed.");
	rejected.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	accepted.assert_calls_async(1).await;
}

#[tokio::test]
async fn password_reset_is_unauthenticated_and_normalizes_email() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;

	let forgot = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/user/forgot-password/")
				.json_body(json!({ "email": "ana@example.com" }));
			then.status(200).json_body(json!({ "detail": "Code sent." }));
		})
		.await;
	let confirm = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/reset-password-confirm/").json_body(json!({
				"email": "ana@example.com",
				"code": "123456",
				"new_password": "fresh-pass"
			}));
			then.status(400).json_body(json!({ "error": "Invalid or expired code." }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(REFRESH_PATH);
			then.status(200).json_body(json!({ "access": "unused" }));
		})
		.await;

	client
		.request_password_reset("  Ana@Example.com ")
		.await
		.expect("Reset request should succeed.");

	let err = client
		.confirm_password_reset("Ana@Example.com", " 123456 ", "fresh-pass")
		.await
		.expect_err("An expired code should be rejected.");

	forgot.assert_calls_async(1).await;
	confirm.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert!(matches!(err, Error::RequestFailed { status: 400, .. }));
}

#[tokio::test]
async fn profile_user_extracts_the_account_record() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, Some("access-1"), Some("refresh-1")).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/user/api/profile/");
			then.status(200)
				.json_body(json!([{ "user": { "id": 42, "username": "ana" }, "bio": "hi" }]));
		})
		.await;

	let user = client.profile_user().await.expect("Account record should load.");

	assert_eq!(user, json!({ "id": 42, "username": "ana" }));
}
