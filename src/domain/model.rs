use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Call,
    Sms,
    Link,
    Qr,
}

impl ScanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Call => "call",
            ScanKind::Sms => "sms",
            ScanKind::Link => "link",
            ScanKind::Qr => "qr",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern-to-verdict mapping. Rules are matched in declaration order; the
/// position of a rule in its set encodes its priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub patterns: Vec<String>,
    pub risk_level: RiskLevel,
    pub category: String,
    pub reason: String,
    pub recommendation: String,
}

/// Verdict text returned when nothing in a rule set matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeDefaults {
    pub category: String,
    pub reason: String,
    pub recommendation: String,
}

/// Ordered rules for one scan type plus the safe fallback for that type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub default: SafeDefaults,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// The full rule catalogue: one rule set per scan type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanCatalog {
    pub call: RuleSet,
    pub sms: RuleSet,
    pub link: RuleSet,
    pub qr: RuleSet,
}

impl ScanCatalog {
    pub fn rule_set(&self, kind: ScanKind) -> &RuleSet {
        match kind {
            ScanKind::Call => &self.call,
            ScanKind::Sms => &self.sms,
            ScanKind::Link => &self.link,
            ScanKind::Qr => &self.qr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub matched: bool,
    pub risk_level: RiskLevel,
    pub category: String,
    pub reason: String,
    pub recommendation: String,
}

impl Verdict {
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            matched: true,
            risk_level: rule.risk_level,
            category: rule.category.clone(),
            reason: rule.reason.clone(),
            recommendation: rule.recommendation.clone(),
        }
    }

    pub fn safe(defaults: &SafeDefaults) -> Self {
        Self {
            matched: false,
            risk_level: RiskLevel::Low,
            category: defaults.category.clone(),
            reason: defaults.reason.clone(),
            recommendation: defaults.recommendation.clone(),
        }
    }
}

/// One thing to classify: a call, a message, a link or a QR payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanRequest {
    Call {
        phone_number: String,
        caller_name: Option<String>,
    },
    Sms {
        message: String,
        sender: Option<String>,
    },
    Link {
        url: String,
    },
    Qr {
        content: String,
    },
}

impl ScanRequest {
    pub fn kind(&self) -> ScanKind {
        match self {
            ScanRequest::Call { .. } => ScanKind::Call,
            ScanRequest::Sms { .. } => ScanKind::Sms,
            ScanRequest::Link { .. } => ScanKind::Link,
            ScanRequest::Qr { .. } => ScanKind::Qr,
        }
    }

    /// The case-folded text the matcher scans. Calls match on both the number
    /// and the caller name; SMS matches on the body only, the sender is kept
    /// for the history record.
    pub fn haystack(&self) -> String {
        let text = match self {
            ScanRequest::Call {
                phone_number,
                caller_name,
            } => match caller_name {
                Some(name) if !name.trim().is_empty() => {
                    format!("{} {}", phone_number.trim(), name.trim())
                }
                _ => phone_number.trim().to_string(),
            },
            ScanRequest::Sms { message, .. } => message.trim().to_string(),
            ScanRequest::Link { url } => url.trim().to_string(),
            ScanRequest::Qr { content } => content.trim().to_string(),
        };
        text.trim().to_lowercase()
    }

    /// Short label for history and log lines.
    pub fn subject(&self) -> String {
        fn snippet(text: &str) -> String {
            let text = text.trim();
            if text.chars().count() > 60 {
                let cut: String = text.chars().take(57).collect();
                format!("{}...", cut)
            } else {
                text.to_string()
            }
        }

        match self {
            ScanRequest::Call {
                phone_number,
                caller_name,
            } => match caller_name {
                Some(name) if !name.trim().is_empty() => {
                    format!("{} ({})", phone_number.trim(), name.trim())
                }
                _ => phone_number.trim().to_string(),
            },
            ScanRequest::Sms { message, sender } => match sender {
                Some(sender) if !sender.trim().is_empty() => {
                    format!("{}: {}", sender.trim(), snippet(message))
                }
                _ => snippet(message),
            },
            ScanRequest::Link { url } => snippet(url),
            ScanRequest::Qr { content } => snippet(content),
        }
    }
}

/// A completed scan as kept by the history store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: u64,
    pub kind: ScanKind,
    pub subject: String,
    pub verdict: Verdict,
    pub scanned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_scans: usize,
    pub threats_detected: usize,
    pub safe_count: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ScanStats {
    pub fn from_records(records: &[ScanRecord]) -> Self {
        let mut stats = ScanStats {
            total_scans: records.len(),
            ..ScanStats::default()
        };

        for record in records {
            if record.verdict.matched {
                stats.threats_detected += 1;
                match record.verdict.risk_level {
                    RiskLevel::Critical => stats.critical += 1,
                    RiskLevel::High => stats.high += 1,
                    RiskLevel::Medium => stats.medium += 1,
                    RiskLevel::Low => stats.low += 1,
                }
            } else {
                stats.safe_count += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haystack_is_case_folded_and_joins_call_fields() {
        let request = ScanRequest::Call {
            phone_number: "+91-140-9988776".to_string(),
            caller_name: Some("Bank KYC Department".to_string()),
        };
        assert_eq!(request.haystack(), "+91-140-9988776 bank kyc department");
    }

    #[test]
    fn sms_haystack_ignores_sender() {
        let request = ScanRequest::Sms {
            message: "Your OTP is 4512".to_string(),
            sender: Some("VK-BANKIN".to_string()),
        };
        assert_eq!(request.haystack(), "your otp is 4512");
    }

    #[test]
    fn blank_call_input_yields_empty_haystack() {
        let request = ScanRequest::Call {
            phone_number: "   ".to_string(),
            caller_name: None,
        };
        assert!(request.haystack().is_empty());
    }

    #[test]
    fn subject_truncates_long_messages() {
        let request = ScanRequest::Sms {
            message: "x".repeat(200),
            sender: None,
        };
        let subject = request.subject();
        assert!(subject.ends_with("..."));
        assert!(subject.chars().count() <= 60);
    }

    #[test]
    fn stats_count_by_risk_level() {
        let defaults = SafeDefaults {
            category: "legitimate".to_string(),
            reason: "No suspicious patterns detected".to_string(),
            recommendation: "Stay vigilant".to_string(),
        };
        let rule = Rule {
            patterns: vec!["kyc".to_string()],
            risk_level: RiskLevel::High,
            category: "kyc_fraud".to_string(),
            reason: "KYC expiry bait".to_string(),
            recommendation: "Do not click the link".to_string(),
        };

        let records = vec![
            ScanRecord {
                id: 1,
                kind: ScanKind::Sms,
                subject: "a".to_string(),
                verdict: Verdict::from_rule(&rule),
                scanned_at: Utc::now(),
            },
            ScanRecord {
                id: 2,
                kind: ScanKind::Link,
                subject: "b".to_string(),
                verdict: Verdict::safe(&defaults),
                scanned_at: Utc::now(),
            },
        ];

        let stats = ScanStats::from_records(&records);
        assert_eq!(stats.total_scans, 2);
        assert_eq!(stats.threats_detected, 1);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.safe_count, 1);
    }
}
