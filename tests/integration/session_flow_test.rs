//! Session lifecycle integration tests
//!
//! Drives `AuthSession` end to end: resolution from a stored credential,
//! route guarding, login, expiry and logout.

#![allow(dead_code)]

mod common;

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use hrdesk_auth::{
    return_to_target, AuthError, AuthSession, Claims, CredentialStore, CredentialVerifier,
    GuardDecision, HeaderCredentialStore, RouteGuard, SessionPhase,
};

use crate::common::{mint, mint_token, session_with, TestConfig, NOW};

mod test_resolution {
    use super::*;

    #[test_log::test]
    fn test_valid_credential_allows_matching_route() {
        let token = mint_token("E100", &["EMPLOYEE"], 3600);
        let (mut session, _) = session_with(Some(token));

        assert_eq!(
            session.guard(&RouteGuard::any_of(&["EMPLOYEE", "ADMIN"]), "/attendance", NOW),
            GuardDecision::Loading
        );

        session.resolve(NOW);
        assert_eq!(session.state().phase(), SessionPhase::Authenticated);

        let claims = session.state().current_claims().unwrap();
        assert_eq!(claims.subject_id(), "E100");
        assert_eq!(claims.full_name(), "Test E100");

        assert_eq!(
            session.guard(&RouteGuard::any_of(&["EMPLOYEE", "ADMIN"]), "/attendance", NOW),
            GuardDecision::Allow
        );
    }

    #[test_log::test]
    fn test_empty_role_list_is_denied_not_redirected() {
        let token = mint_token("E100", &[], 3600);
        let (mut session, _) = session_with(Some(token));
        session.resolve(NOW);

        let decision =
            session.guard(&RouteGuard::any_of(&["EMPLOYEE", "ADMIN"]), "/attendance", NOW);
        assert_eq!(
            decision,
            GuardDecision::Denied {
                required_roles: vec!["EMPLOYEE".to_string(), "ADMIN".to_string()],
                actual_roles: vec![],
            }
        );
        assert_eq!(decision.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test_log::test]
    fn test_undecodable_credential_redirects_and_is_cleared() {
        let (mut session, store) = session_with(Some("not-a-jwt".to_string()));
        session.resolve(NOW);

        assert_eq!(session.state().phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.get_stored_credential(), None);

        let decision = session.guard(&RouteGuard::authenticated(), "/leave/requests", NOW);
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                login_path: TestConfig::from_env().login_path,
                return_to: "/leave/requests".to_string(),
            }
        );
    }

    #[test_log::test]
    fn test_expired_stored_credential_is_discarded() {
        let token = mint_token("E100", &["EMPLOYEE"], -1);
        let (mut session, store) = session_with(Some(token));
        session.resolve(NOW);

        assert_eq!(session.state().phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.get_stored_credential(), None);
    }

    #[test_log::test]
    fn test_identity_uri_claims_resolve() {
        let token = mint(&serde_json::json!({
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier": "E7",
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress": "e7@hrdesk.test",
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": ["Admin", "Employee"],
            "exp": NOW + 60,
        }));
        let (mut session, _) = session_with(Some(token));
        session.resolve(NOW);

        let claims = session.state().current_claims().unwrap();
        assert_eq!(claims.roles().to_vec(), vec!["ADMIN", "EMPLOYEE"]);
    }
}

mod test_verification {
    use super::*;

    struct RejectingVerifier;

    #[async_trait]
    impl CredentialVerifier for RejectingVerifier {
        async fn verify(&self, _credential: &str, _claims: &Claims) -> Result<(), AuthError> {
            Err(AuthError::VerificationFailed("revoked".to_string()))
        }
    }

    struct SlowVerifier;

    #[async_trait]
    impl CredentialVerifier for SlowVerifier {
        async fn verify(&self, _credential: &str, _claims: &Claims) -> Result<(), AuthError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_rejected_verification_is_unauthenticated() {
        let token = mint_token("E100", &["EMPLOYEE"], 3600);
        let (mut session, store) = session_with(Some(token.clone()));

        session.resolve_with(&RejectingVerifier, NOW).await;

        assert_eq!(session.state().phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.get_stored_credential(), Some(token));
    }

    #[test_log::test(tokio::test)]
    async fn test_abandoned_resolution_applies_nothing() {
        let token = mint_token("E100", &["EMPLOYEE"], 3600);
        let (mut session, _) = session_with(Some(token));

        let outcome = tokio::time::timeout(
            Duration::from_millis(10),
            session.resolve_with(&SlowVerifier, NOW),
        )
        .await;
        assert!(outcome.is_err());

        assert_eq!(session.state().phase(), SessionPhase::Unresolved);
        assert!(session.state().is_loading());
    }
}

mod test_login_lifecycle {
    use super::*;

    #[test_log::test]
    fn test_login_then_expiry_then_login_again() {
        let (mut session, store) = session_with(None);
        session.resolve(NOW);
        assert_eq!(session.state().phase(), SessionPhase::Unauthenticated);

        let token = mint_token("E200", &["ADMIN"], 60);
        session.login(&token, NOW).unwrap();
        assert_eq!(store.get_stored_credential().as_deref(), Some(token.as_str()));
        assert_eq!(
            session.guard(&RouteGuard::all_of(&["ADMIN"]), "/payroll", NOW + 59),
            GuardDecision::Allow
        );

        let decision = session.guard(&RouteGuard::all_of(&["ADMIN"]), "/payroll", NOW + 60);
        assert!(matches!(decision, GuardDecision::Redirect { .. }));
        assert_eq!(session.state().current_claims(), None);
        assert_eq!(store.get_stored_credential(), None);

        let token = mint_token("E200", &["ADMIN"], 3600);
        session.login(&token, NOW + 61).unwrap();
        assert!(session.state().is_authenticated());
    }

    #[test_log::test]
    fn test_rejected_login_keeps_previous_session() {
        let token = mint_token("E200", &["EMPLOYEE"], 3600);
        let (mut session, store) = session_with(Some(token.clone()));
        session.resolve(NOW);

        let result = session.login(&mint_token("E300", &["ADMIN"], -10), NOW);
        assert!(matches!(result, Err(AuthError::ExpiredCredential { .. })));

        let result = session.login("garbage", NOW);
        assert!(matches!(result, Err(AuthError::MalformedCredential(_))));

        assert_eq!(
            session.state().current_claims().map(|c| c.subject_id().to_string()),
            Some("E200".to_string())
        );
        assert_eq!(store.get_stored_credential(), Some(token));
    }

    #[test_log::test]
    fn test_logout_is_idempotent_and_redirects() {
        let (mut session, store) = session_with(Some(mint_token("E200", &["EMPLOYEE"], 3600)));
        session.resolve(NOW);

        session.on_logged_out();
        session.on_logged_out();

        assert_eq!(session.state().phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.get_stored_credential(), None);

        let decision = session.guard(&RouteGuard::authenticated(), "/profile?tab=bank", NOW);
        let location = decision.location().unwrap();
        assert_eq!(location, "/login?returnTo=%2Fprofile%3Ftab%3Dbank");

        let query = location.split_once('?').map(|(_, q)| q);
        assert_eq!(return_to_target(query), "/profile?tab=bank");
    }
}

mod test_server_rendered {
    use super::*;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test_log::test]
    fn test_bearer_header_resolves_session() {
        let token = mint_token("E100", &["EMPLOYEE"], 3600);
        let headers = headers(Some(&format!("Bearer {}", token)));
        let store = HeaderCredentialStore::from_header(headers.get(AUTHORIZATION)).unwrap();

        let mut session = AuthSession::new(store, TestConfig::from_env().auth_config());
        session.resolve(NOW);

        let response = session
            .guard(&RouteGuard::any_of(&["ADMIN"]), "/payroll", NOW)
            .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test_log::test]
    fn test_missing_header_redirects_to_login() {
        let store = HeaderCredentialStore::from_header(headers(None).get(AUTHORIZATION)).unwrap();

        let mut session = AuthSession::new(store, TestConfig::from_env().auth_config());
        session.resolve(NOW);

        let response = session
            .guard(&RouteGuard::authenticated(), "/employees", NOW)
            .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/login?returnTo=%2Femployees"
        );
    }
}
