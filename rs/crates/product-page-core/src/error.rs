use product_dom::SelectorError;

#[derive(Debug)]
pub enum PageError {
    /// A required page element is absent; raised once, at bind time.
    MissingElement(String),
    /// The host drove the page before handing it over.
    NotInitialized,
    InvalidSelector(SelectorError),
    Parse(serde_json::Error),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingElement(sel) => write!(f, "missing element: {}", sel),
            Self::NotInitialized => write!(f, "page not initialized"),
            Self::InvalidSelector(e) => write!(f, "{}", e),
            Self::Parse(e) => write!(f, "parse: {}", e),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingElement(_) | Self::NotInitialized => None,
            Self::InvalidSelector(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<SelectorError> for PageError {
    fn from(e: SelectorError) -> Self {
        Self::InvalidSelector(e)
    }
}

impl From<serde_json::Error> for PageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
