use std::fmt;

/// The only correlation between the stock and price domains
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinKey {
    pub article: String,
    pub brand: String,
}

impl JoinKey {
    pub fn new(article: &str, brand: &str) -> Self {
        Self {
            article: article.to_string(),
            brand: brand.to_string(),
        }
    }

    /// Trimmed, upper-cased copy of the key
    pub fn normalized(&self) -> Self {
        Self {
            article: self.article.trim().to_uppercase(),
            brand: self.brand.trim().to_uppercase(),
        }
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.article, self.brand)
    }
}
