use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{EmbeddingError, Result};

/// Integration methods understood by the embedding script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmbeddingMethod {
    CcaIntegration,
    HarmonyIntegration,
    JointPcaIntegration,
    RpcaIntegration,
    #[default]
    FastMnnIntegration,
    /// PCA without any batch integration.
    NoIntegration,
}

impl EmbeddingMethod {
    pub const ALL: [EmbeddingMethod; 6] = [
        EmbeddingMethod::CcaIntegration,
        EmbeddingMethod::HarmonyIntegration,
        EmbeddingMethod::JointPcaIntegration,
        EmbeddingMethod::RpcaIntegration,
        EmbeddingMethod::FastMnnIntegration,
        EmbeddingMethod::NoIntegration,
    ];

    /// Name passed to the script and used for its output file.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingMethod::CcaIntegration => "CCAIntegration",
            EmbeddingMethod::HarmonyIntegration => "HarmonyIntegration",
            EmbeddingMethod::JointPcaIntegration => "JointPCAIntegration",
            EmbeddingMethod::RpcaIntegration => "RPCAIntegration",
            EmbeddingMethod::FastMnnIntegration => "FastMNNIntegration",
            EmbeddingMethod::NoIntegration => "none",
        }
    }
}

impl FromStr for EmbeddingMethod {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self> {
        EmbeddingMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| EmbeddingError::InvalidMethod(s.to_string()))
    }
}

impl Display for EmbeddingMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a comma-separated method list such as `CCAIntegration,none`.
pub fn parse_methods(s: &str) -> Result<Vec<EmbeddingMethod>> {
    let methods = s
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(EmbeddingMethod::from_str)
        .collect::<Result<Vec<_>>>()?;
    match methods.is_empty() {
        true => Err(EmbeddingError::NoMethods),
        false => Ok(methods),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_names_round_trip() {
        for method in EmbeddingMethod::ALL {
            assert_eq!(method.as_str().parse::<EmbeddingMethod>().unwrap(), method);
        }
    }

    #[rstest]
    #[case("fastmnnintegration")]
    #[case("UMAP")]
    #[case("")]
    fn test_invalid_method(#[case] name: &str) {
        assert!(matches!(
            name.parse::<EmbeddingMethod>(),
            Err(EmbeddingError::InvalidMethod(_))
        ));
    }

    #[rstest]
    fn test_parse_methods() {
        assert_eq!(
            parse_methods("CCAIntegration, none").unwrap(),
            vec![EmbeddingMethod::CcaIntegration, EmbeddingMethod::NoIntegration]
        );
        assert!(matches!(parse_methods(" , "), Err(EmbeddingError::NoMethods)));
        assert!(matches!(
            parse_methods("none,PCA"),
            Err(EmbeddingError::InvalidMethod(_))
        ));
    }

    #[rstest]
    fn test_default_method() {
        assert_eq!(EmbeddingMethod::default().as_str(), "FastMNNIntegration");
    }
}
