//! [htmx](https://htmx.org) request headers and multi-fragment responses.
use super::ModelAndView;
use crate::http::Request;

/// Request header names sent by htmx.
pub mod request_headers {
    pub const HX_BOOSTED: &str = "HX-Boosted";
    pub const HX_CURRENT_URL: &str = "HX-Current-URL";
    pub const HX_HISTORY_RESTORE_REQUEST: &str = "HX-History-Restore-Request";
    pub const HX_PROMPT: &str = "HX-Prompt";
    pub const HX_REQUEST: &str = "HX-Request";
    pub const HX_TARGET: &str = "HX-Target";
    pub const HX_TRIGGER_NAME: &str = "HX-Trigger-Name";
    pub const HX_TRIGGER: &str = "HX-Trigger";
}

/// Response header names understood by htmx.
pub mod response_headers {
    pub const HX_LOCATION: &str = "HX-Location";
    pub const HX_REPLACE_URL: &str = "HX-Replace-Url";
    pub const HX_PUSH_URL: &str = "HX-Push-Url";
    pub const HX_REDIRECT: &str = "HX-Redirect";
    pub const HX_REFRESH: &str = "HX-Refresh";
    pub const HX_RETARGET: &str = "HX-Retarget";
    pub const HX_RESELECT: &str = "HX-Reselect";
    pub const HX_TRIGGER: &str = "HX-Trigger";
    pub const HX_TRIGGER_AFTER_SETTLE: &str = "HX-Trigger-After-Settle";
    pub const HX_TRIGGER_AFTER_SWAP: &str = "HX-Trigger-After-Swap";
    pub const HX_RESWAP: &str = "HX-Reswap";
}

/// Headers of a request made by htmx.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtmxRequestHeaders {
    pub boosted: bool,
    pub current_url: Option<String>,
    pub history_restore_request: bool,
    pub prompt: Option<String>,
    pub target: Option<String>,
    pub trigger_name: Option<String>,
    pub trigger: Option<String>,
}

impl HtmxRequestHeaders {
    /// `None` unless the request has `HX-Request: true`.
    pub fn from_request(request: &Request) -> Option<Self> {
        use request_headers::*;

        if !flag(request, HX_REQUEST) {
            return None;
        }

        let text = |name: &str| request.head().header(name).cloned();

        Some(Self {
            boosted: flag(request, HX_BOOSTED),
            current_url: text(HX_CURRENT_URL),
            history_restore_request: flag(request, HX_HISTORY_RESTORE_REQUEST),
            prompt: text(HX_PROMPT),
            target: text(HX_TARGET),
            trigger_name: text(HX_TRIGGER_NAME),
            trigger: text(HX_TRIGGER),
        })
    }
}

fn flag(request: &Request, name: &str) -> bool {
    request
        .head()
        .header(name)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        == Some(true)
}

/// Several views rendered back to back into one `text/html` body,
/// for htmx out-of-band swaps.
#[derive(Debug, Clone, Default)]
pub struct HtmxResponse {
    model_and_views: Vec<ModelAndView>,
}

impl HtmxResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_and_view(mut self, model_and_view: ModelAndView) -> Self {
        self.model_and_views.push(model_and_view);
        self
    }

    pub fn model_and_views(&self) -> &[ModelAndView] {
        &self.model_and_views
    }

    pub(crate) fn into_model_and_views(self) -> Vec<ModelAndView> {
        self.model_and_views
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_request_headers() {
        assert_eq!(HtmxRequestHeaders::from_request(&Request::get("/")), None);

        let request = Request::get("/")
            .header("HX-Request", "true")
            .header("HX-Boosted", "true")
            .header("HX-Current-URL", "http://localhost:8000/fruits")
            .header("HX-Trigger", "load");
        let headers = HtmxRequestHeaders::from_request(&request).expect("htmx");

        assert!(headers.boosted);
        assert!(!headers.history_restore_request);
        assert_eq!(
            headers.current_url.as_deref(),
            Some("http://localhost:8000/fruits")
        );
        assert_eq!(headers.trigger.as_deref(), Some("load"));
        assert_eq!(headers.prompt, None);
    }
}
