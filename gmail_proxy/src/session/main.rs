//! Signed session-id cookie handling.
//!
//! The session id is a random string carried in a cookie as `{id}.{sig}`,
//! where `sig` is a base64url HMAC-SHA256 over the id. The id itself keys the
//! pending-return entry in the cache store and, in session scope mode, the
//! stored credential. Nothing else is kept server-side per session, so there
//! is no session record to create or destroy beyond those entries.

use hmac::{Hmac, Mac};
use http::header::{COOKIE, HeaderMap};
use sha2::Sha256;

use crate::utils::{base64url_decode, base64url_encode, gen_random_string, header_set_cookie};

use super::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_SECRET};
use super::errors::SessionError;

type HmacSha256 = Hmac<Sha256>;

fn sign_session_id(session_id: &str) -> Result<String, SessionError> {
    let mut mac = HmacSha256::new_from_slice(&SESSION_SECRET)
        .map_err(|_| SessionError::Crypto("HMAC can take key of any size".to_string()))?;
    mac.update(session_id.as_bytes());
    Ok(base64url_encode(&mac.finalize().into_bytes()))
}

fn encode_session_cookie(session_id: &str) -> Result<String, SessionError> {
    Ok(format!("{session_id}.{}", sign_session_id(session_id)?))
}

/// Extract the session id from a cookie value, rejecting tampered signatures.
fn decode_session_cookie(value: &str) -> Option<String> {
    let (session_id, sig) = value.split_once('.')?;
    let sig = base64url_decode(sig).ok()?;

    let mut mac = HmacSha256::new_from_slice(&SESSION_SECRET).ok()?;
    mac.update(session_id.as_bytes());
    mac.verify_slice(&sig).ok()?;

    Some(session_id.to_string())
}

/// Read and verify the session id from request headers.
///
/// Returns `Ok(None)` when the cookie is absent or its signature does not
/// verify; a forged cookie is indistinguishable from no cookie.
pub fn get_session_id_from_headers(headers: &HeaderMap) -> Result<Option<String>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        return Ok(None);
    };
    let cookies = cookie_header
        .to_str()
        .map_err(|_| SessionError::Cookie("Invalid Cookie header".to_string()))?;

    for pair in cookies.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=')
            && name == SESSION_COOKIE_NAME.as_str()
        {
            match decode_session_cookie(value) {
                Some(session_id) => return Ok(Some(session_id)),
                None => {
                    tracing::debug!("Session cookie signature verification failed");
                    return Ok(None);
                }
            }
        }
    }
    Ok(None)
}

/// Return the request's session id, minting a new one when absent.
///
/// The second element carries the Set-Cookie header for a freshly minted
/// session and is empty when the request already had a valid one.
pub fn ensure_session(headers: &HeaderMap) -> Result<(String, HeaderMap), SessionError> {
    if let Some(session_id) = get_session_id_from_headers(headers)? {
        return Ok((session_id, HeaderMap::new()));
    }

    let session_id = gen_random_string(32)?;
    let mut set_cookie = HeaderMap::new();
    header_set_cookie(
        &mut set_cookie,
        &SESSION_COOKIE_NAME,
        &encode_session_cookie(&session_id)?,
        *SESSION_COOKIE_MAX_AGE,
    )?;
    tracing::debug!("Issued new session id");
    Ok((session_id, set_cookie))
}

/// Headers that expire the session cookie on the client.
pub fn clear_session_cookie_headers() -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, &SESSION_COOKIE_NAME, "", -86400)?;
    Ok(headers)
}
