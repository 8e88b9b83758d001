//! Parse the `Authorization` header.
use base64::prelude::*;

#[derive(Debug, PartialEq, Clone)]
pub enum Authorization {
    /// HTTP Basic authentication.
    Basic { user: String, password: String },

    /// Bearer token. Validation is up to the caller.
    Bearer { token: String },
}

impl Authorization {
    pub fn parse(header: &str) -> Option<Authorization> {
        let (scheme, value) = header.trim().split_once(' ')?;
        let value = value.trim();

        match scheme {
            "Basic" => Self::basic(value),
            "Bearer" if !value.is_empty() => Some(Authorization::Bearer {
                token: value.to_owned(),
            }),
            _ => None,
        }
    }

    fn basic(value: &str) -> Option<Authorization> {
        let decoded = BASE64_STANDARD.decode(value.as_bytes()).ok()?;
        let decoded = String::from_utf8_lossy(&decoded);
        let (user, password) = decoded.split_once(':')?;

        Some(Authorization::Basic {
            user: user.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Build a `Basic` header value, e.g. for tests and clients.
    pub fn basic_header(user: &str, password: &str) -> String {
        format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{}:{}", user, password))
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(
            Authorization::parse("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="),
            Some(Authorization::Basic {
                user: "Aladdin".into(),
                password: "open sesame".into(),
            })
        );

        assert_eq!(
            Authorization::parse(&Authorization::basic_header("john", "pa:ss")),
            Some(Authorization::Basic {
                user: "john".into(),
                password: "pa:ss".into(),
            })
        );

        assert_eq!(Authorization::parse("Basic !!!"), None);
        assert_eq!(Authorization::parse("Digest abc"), None);
    }
}
