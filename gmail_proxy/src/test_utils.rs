//! Shared test setup.

use std::sync::Once;

/// Point the config statics at fixed test values before anything dereferences
/// them. The revocation URL targets a closed local port so detached
/// revocation tasks fail fast instead of reaching out to the real provider.
pub(crate) fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| unsafe {
        std::env::set_var("GOOGLE_CLIENT_ID", "test-client-id");
        std::env::set_var("GOOGLE_CLIENT_SECRET", "test-client-secret");
        std::env::set_var("OAUTH2_REDIRECT_URI", "http://localhost:3001/auth/callback");
        std::env::set_var("OAUTH2_REVOKE_URL", "http://127.0.0.1:1/revoke");
        std::env::set_var("SESSION_SECRET", "unit-test-session-secret");
    });
}
