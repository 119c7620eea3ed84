use std::fmt::{Debug, Formatter};

/// Where a cookie was recovered from, in resolution priority order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    HttpHeaderDirective,
    UrlPipe,
    UrlCanonical,
}

/// Cookie and user agent of a channel block. Values never show up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
    pub source: Option<CredentialSource>,
}

impl Credential {
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none() && self.user_agent.is_none()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("cookie", &self.cookie.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent.as_ref().map(|_| "***"))
            .field("source", &self.source)
            .finish()
    }
}
