//! XACML authorization response as returned by the PDP.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-resource decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Permit,
    Deny,
    NotApplicable,
    Indeterminate,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Permit => "Permit",
            Self::Deny => "Deny",
            Self::NotApplicable => "NotApplicable",
            Self::Indeterminate => "Indeterminate",
        };
        f.write_str(s)
    }
}

/// Advice code attached to a response.
///
/// Codes the platform knows how to turn into a specific denial reason are
/// variants of their own; everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Advice {
    /// Subject has a strict confidentiality address ("kode 6").
    DenyKode6,
    /// Subject has a confidential address ("kode 7").
    DenyKode7,
    /// Subject is an employee of the agency.
    DenyEgenAnsatt,
    Unknown(String),
}

impl Advice {
    pub const DENY_KODE_6: &'static str = "deny_kode_6";
    pub const DENY_KODE_7: &'static str = "deny_kode_7";
    pub const DENY_EGEN_ANSATT: &'static str = "deny_egen_ansatt";

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DenyKode6 => Self::DENY_KODE_6,
            Self::DenyKode7 => Self::DENY_KODE_7,
            Self::DenyEgenAnsatt => Self::DENY_EGEN_ANSATT,
            Self::Unknown(code) => code,
        }
    }
}

impl From<String> for Advice {
    fn from(code: String) -> Self {
        match code.as_str() {
            Self::DENY_KODE_6 => Self::DenyKode6,
            Self::DENY_KODE_7 => Self::DenyKode7,
            Self::DENY_EGEN_ANSATT => Self::DenyEgenAnsatt,
            _ => Self::Unknown(code),
        }
    }
}

impl From<&str> for Advice {
    fn from(code: &str) -> Self {
        Self::from(code.to_owned())
    }
}

impl From<Advice> for String {
    fn from(advice: Advice) -> Self {
        match advice {
            Advice::Unknown(code) => code,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for one requested resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub result: Decision,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advice: Vec<Advice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obligations: Vec<String>,
}

impl DecisionResult {
    #[must_use]
    pub fn new(result: Decision) -> Self {
        Self {
            result,
            advice: Vec::new(),
            obligations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_advice(mut self, advice: impl Into<Advice>) -> Self {
        self.advice.push(advice.into());
        self
    }

    #[must_use]
    pub fn with_obligation(mut self, obligation: impl Into<String>) -> Self {
        self.obligations.push(obligation.into());
        self
    }
}

/// Full PDP response: one [`DecisionResult`] per requested resource, in
/// request order, plus optional response-level advice and obligations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XacmlResponse {
    #[serde(default)]
    pub decisions: Vec<DecisionResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advice: Vec<Advice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obligations: Vec<String>,
}

impl XacmlResponse {
    #[must_use]
    pub fn new(decisions: Vec<DecisionResult>) -> Self {
        Self {
            decisions,
            ..Self::default()
        }
    }

    /// Decisions in request order.
    pub fn decisions(&self) -> impl Iterator<Item = Decision> + '_ {
        self.decisions.iter().map(|d| d.result)
    }

    /// Response-level advice followed by every decision's advice.
    pub fn all_advice(&self) -> impl Iterator<Item = &Advice> + '_ {
        self.advice
            .iter()
            .chain(self.decisions.iter().flat_map(|d| d.advice.iter()))
    }

    /// Response-level obligations followed by every decision's obligations.
    pub fn all_obligations(&self) -> impl Iterator<Item = &str> + '_ {
        self.obligations
            .iter()
            .chain(self.decisions.iter().flat_map(|d| d.obligations.iter()))
            .map(String::as_str)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_permit() {
        let response: XacmlResponse =
            serde_json::from_str(r#"{"decisions":[{"result":"Permit"}]}"#).unwrap();

        assert_eq!(response.decisions().collect::<Vec<_>>(), [Decision::Permit]);
        assert_eq!(response.all_advice().count(), 0);
        assert_eq!(response.all_obligations().count(), 0);
    }

    #[test]
    fn known_and_unknown_advice_are_distinguished() {
        let response: XacmlResponse = serde_json::from_str(
            r#"{"decisions":[{"result":"Deny","advice":["deny_kode_6","deny_skjermet"]}]}"#,
        )
        .unwrap();

        let advice: Vec<&Advice> = response.all_advice().collect();
        assert_eq!(
            advice,
            [&Advice::DenyKode6, &Advice::Unknown("deny_skjermet".to_owned())]
        );
    }

    #[test]
    fn response_level_entries_come_before_per_decision_entries() {
        let response: XacmlResponse = serde_json::from_str(
            r#"{
                "decisions":[
                    {"result":"Deny","advice":["deny_kode_7"],"obligations":["log_access"]},
                    {"result":"Permit"}
                ],
                "advice":["deny_egen_ansatt"],
                "obligations":["notify"]
            }"#,
        )
        .unwrap();

        let advice: Vec<&Advice> = response.all_advice().collect();
        assert_eq!(advice, [&Advice::DenyEgenAnsatt, &Advice::DenyKode7]);
        let obligations: Vec<&str> = response.all_obligations().collect();
        assert_eq!(obligations, ["notify", "log_access"]);
    }

    #[test]
    fn unknown_decision_value_is_rejected() {
        let result = serde_json::from_str::<XacmlResponse>(r#"{"decisions":[{"result":"Maybe"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn advice_serializes_back_to_its_code() {
        let json = serde_json::to_string(&DecisionResult::new(Decision::Deny).with_advice("deny_kode_7"))
            .unwrap();
        assert_eq!(json, r#"{"result":"Deny","advice":["deny_kode_7"]}"#);
    }
}
