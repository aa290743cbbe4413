use crate::domain::model::RiskLevel;
use crate::utils::error::{Result, ShieldError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub relation: String,
    pub phone: String,
    pub protection_enabled: bool,
    pub added_at: DateTime<Utc>,
    pub alerts: u32,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub relation: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyAlert {
    pub id: String,
    pub member_id: String,
    pub kind: String,
    pub message: String,
    pub risk_level: RiskLevel,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SosReceipt {
    pub alert_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct RosterFixture {
    #[serde(default)]
    members: Vec<FamilyMember>,
    #[serde(default)]
    alerts: Vec<FamilyAlert>,
}

/// In-memory family roster seeded from bundled fixtures. Members added at
/// runtime live only as long as the process.
#[derive(Debug)]
pub struct FamilyRoster {
    members: Mutex<Vec<FamilyMember>>,
    alerts: Mutex<Vec<FamilyAlert>>,
}

const BUNDLED_FAMILY: &str = include_str!("../../data/family.toml");

impl FamilyRoster {
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_FAMILY)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let fixture: RosterFixture =
            toml::from_str(content).map_err(|e| ShieldError::CatalogParseError {
                message: format!("family fixtures: {}", e),
            })?;
        Ok(Self {
            members: Mutex::new(fixture.members),
            alerts: Mutex::new(fixture.alerts),
        })
    }

    pub fn members(&self) -> Vec<FamilyMember> {
        self.members.lock().unwrap().clone()
    }

    pub fn add_member(&self, new: NewMember) -> FamilyMember {
        let member = FamilyMember {
            id: Utc::now().timestamp_millis().to_string(),
            name: new.name,
            relation: new.relation,
            phone: new.phone,
            protection_enabled: true,
            added_at: Utc::now(),
            alerts: 0,
        };
        self.members.lock().unwrap().push(member.clone());
        tracing::info!("👪 Added family member: {} ({})", member.name, member.id);
        member
    }

    pub fn alerts_for(&self, member_id: &str) -> Result<Vec<FamilyAlert>> {
        self.require_member(member_id)?;
        let alerts = self.alerts.lock().unwrap();
        Ok(alerts
            .iter()
            .filter(|a| a.member_id == member_id)
            .cloned()
            .collect())
    }

    /// Raises an SOS alert on behalf of a member and notifies the roster.
    pub fn send_sos(&self, member_id: &str, kind: &str, details: &str) -> Result<SosReceipt> {
        self.require_member(member_id)?;

        let alert = FamilyAlert {
            id: Utc::now().timestamp_millis().to_string(),
            member_id: member_id.to_string(),
            kind: kind.to_string(),
            message: details.to_string(),
            risk_level: RiskLevel::Critical,
            occurred_at: Utc::now(),
        };
        let alert_id = alert.id.clone();
        self.alerts.lock().unwrap().push(alert);

        let mut members = self.members.lock().unwrap();
        if let Some(member) = members.iter_mut().find(|m| m.id == member_id) {
            member.alerts += 1;
        }

        tracing::warn!("🚨 SOS from member {}: {}", member_id, kind);
        Ok(SosReceipt {
            alert_id,
            message: "SOS alert sent to family members".to_string(),
        })
    }

    fn require_member(&self, member_id: &str) -> Result<()> {
        let members = self.members.lock().unwrap();
        if members.iter().any(|m| m.id == member_id) {
            Ok(())
        } else {
            Err(ShieldError::MemberNotFound {
                id: member_id.to_string(),
            })
        }
    }
}
