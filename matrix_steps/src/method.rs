use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    #[strum(to_string = "gaussian")]
    Gaussian,
    #[strum(to_string = "gauss-jordan", serialize = "ero")]
    GaussJordan,
    #[strum(to_string = "inverse")]
    Inverse,
}

impl Method {
    pub fn title(self) -> &'static str {
        match self {
            Self::Gaussian => "Gaussian elimination with back substitution",
            Self::GaussJordan => "Gauss-Jordan reduction",
            Self::Inverse => "Adjugate matrix inversion",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use itertools::Itertools;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!(Method::from_str("gaussian").unwrap(), Method::Gaussian);
        assert_eq!(Method::from_str("gauss-jordan").unwrap(), Method::GaussJordan);
        assert_eq!(Method::from_str("ero").unwrap(), Method::GaussJordan);
        assert_eq!(Method::from_str("inverse").unwrap(), Method::Inverse);
        assert!(Method::from_str("cramer").is_err());
        assert_eq!(
            Method::iter().map(|m| m.to_string()).collect_vec(),
            vec!["gaussian", "gauss-jordan", "inverse"]
        );
    }
}
