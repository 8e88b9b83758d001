//! Content-Security-Policy header and per-request nonces.
//!
//! With `[views.csp] enabled = true`, every matching response gets a
//! `Content-Security-Policy` (or `-Report-Only`) header built from `policy_directives`.
//! If `generate_nonce` is on, each request gets a fresh nonce which replaces
//! `{#nonceValue}` in the directives and is available to templates as `cspNonce`.
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use rand::Rng;

use super::{Error, ModelAndView, ViewModelProcessor};
use crate::config::Csp;
use crate::http::{Request, Response};

pub const CSP_HEADER: &str = "Content-Security-Policy";
pub const CSP_REPORT_ONLY_HEADER: &str = "Content-Security-Policy-Report-Only";
/// Model key holding the nonce.
pub const NONCE_PROPERTY: &str = "cspNonce";
/// Placeholder in `policy_directives` replaced by the nonce.
pub const NONCE_TOKEN: &str = "{#nonceValue}";
/// Random bytes per nonce.
pub const NONCE_LENGTH: usize = 16;

/// Generate a nonce: 16 random bytes, base64 without padding.
pub fn generate_nonce() -> String {
    let bytes = rand::thread_rng().gen::<[u8; NONCE_LENGTH]>();
    STANDARD_NO_PAD.encode(bytes)
}

/// Adds the CSP header to responses.
#[derive(Debug, Clone, Default)]
pub struct CspFilter {
    config: Csp,
}

impl CspFilter {
    pub fn new(config: Csp) -> Self {
        Self { config }
    }

    fn applies_to(&self, request: &Request) -> bool {
        self.config.enabled && path_matches(&self.config.filter_path, request.path().base())
    }

    /// Attach a nonce to the request, if nonces are on.
    pub fn prepare(&self, request: Request) -> Request {
        if self.applies_to(&request) && self.config.generate_nonce {
            request.with_csp_nonce(generate_nonce())
        } else {
            request
        }
    }

    /// Add the policy header to the response.
    ///
    /// Fails if the directives use `{#nonceValue}` but the request has no nonce.
    pub fn apply(&self, request: &Request, response: Response) -> Result<Response, Error> {
        if !self.applies_to(request) {
            return Ok(response);
        }

        let directives = match self.config.policy_directives.as_deref().map(str::trim) {
            Some(directives) if !directives.is_empty() => directives,
            _ => return Ok(response),
        };

        let header = if self.config.report_only {
            CSP_REPORT_ONLY_HEADER
        } else {
            CSP_HEADER
        };

        let value = if directives.contains(NONCE_TOKEN) {
            let nonce = request.csp_nonce().ok_or(Error::CspNonceDisabled)?;
            directives.replace(NONCE_TOKEN, nonce)
        } else {
            directives.to_string()
        };

        Ok(response.header(header, value))
    }
}

/// Puts the request's CSP nonce into the model as `cspNonce`.
#[derive(Debug, Clone, Default)]
pub struct CspNonceViewModelProcessor;

impl ViewModelProcessor for CspNonceViewModelProcessor {
    fn process(&self, request: &Request, model_and_view: &mut ModelAndView) {
        if let Some(nonce) = request.csp_nonce() {
            if let Some(model) = model_and_view.model_mut().and_then(|m| m.as_object_mut()) {
                model
                    .entry(NONCE_PROPERTY)
                    .or_insert_with(|| nonce.into());
            }
        }
    }
}

/// `/**` matches everything, `/a/**` anything under `/a`, `/a/*` one segment under `/a`.
fn path_matches(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/**") {
        return prefix.is_empty()
            || path == prefix
            || path.strip_prefix(prefix).map(|rest| rest.starts_with('/')) == Some(true);
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return match path.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('/')) {
            Some(rest) => !rest.contains('/'),
            None => false,
        };
    }

    pattern == path
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn csp(directives: &str, generate_nonce: bool) -> CspFilter {
        CspFilter::new(Csp {
            enabled: true,
            policy_directives: Some(directives.into()),
            generate_nonce,
            ..Default::default()
        })
    }

    #[test]
    fn test_nonce() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), 22);
        assert!(!nonce.contains('='));
        assert_ne!(nonce, generate_nonce());
    }

    #[test]
    fn test_header_with_nonce() {
        let filter = csp("script-src 'nonce-{#nonceValue}'", true);
        let request = filter.prepare(Request::get("/"));
        let nonce = request.csp_nonce().expect("nonce").to_string();

        let response = filter.apply(&request, Response::new()).unwrap();
        assert_eq!(
            response.headers().get("content-security-policy"),
            Some(&format!("script-src 'nonce-{}'", nonce))
        );
    }

    #[test]
    fn test_placeholder_without_nonce() {
        let filter = csp("script-src 'nonce-{#nonceValue}'", false);
        let request = filter.prepare(Request::get("/"));
        assert!(request.csp_nonce().is_none());
        assert!(matches!(
            filter.apply(&request, Response::new()),
            Err(Error::CspNonceDisabled)
        ));
    }

    #[test]
    fn test_report_only_and_disabled() {
        let filter = CspFilter::new(Csp {
            enabled: true,
            report_only: true,
            policy_directives: Some("default-src 'self'".into()),
            ..Default::default()
        });
        let response = filter.apply(&Request::get("/"), Response::new()).unwrap();
        assert!(response
            .headers()
            .contains("content-security-policy-report-only"));

        let disabled = CspFilter::default();
        let response = disabled.apply(&Request::get("/"), Response::new()).unwrap();
        assert!(!response.headers().contains("content-security-policy"));
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/**", "/anything/at/all"));
        assert!(path_matches("/admin/**", "/admin"));
        assert!(path_matches("/admin/**", "/admin/users/1"));
        assert!(!path_matches("/admin/**", "/administrator"));
        assert!(path_matches("/admin/*", "/admin/users"));
        assert!(!path_matches("/admin/*", "/admin/users/1"));
        assert!(path_matches("/csp", "/csp"));
    }

    #[test]
    fn test_nonce_processor() {
        let request = Request::get("/").with_csp_nonce("abc");
        let mut mav = ModelAndView::new("csp", json!({})).unwrap();
        CspNonceViewModelProcessor.process(&request, &mut mav);
        assert_eq!(mav.model(), Some(&json!({"cspNonce": "abc"})));
    }
}
