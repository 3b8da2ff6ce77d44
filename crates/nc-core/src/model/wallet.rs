//! Per-campaign experience wallets.

use serde::{Deserialize, Serialize};

use crate::id::{CampaignId, UserId};

/// A user's experience in one campaign.
///
/// `xp_current` is what can still be spent; `xp_total` is lifetime earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignExperience {
    /// Wallet owner.
    pub user_id: UserId,
    /// Campaign the experience was earned in.
    pub campaign_id: CampaignId,
    /// Spendable experience.
    pub xp_current: u32,
    /// Lifetime experience.
    pub xp_total: u32,
    /// Cool points awarded.
    pub cool_points: u32,
    /// Write version, bumped by the store on every save. 0 = never saved.
    #[serde(default)]
    pub version: u64,
}

impl CampaignExperience {
    /// An empty, unsaved wallet.
    pub fn new(user_id: UserId, campaign_id: CampaignId) -> Self {
        Self {
            user_id,
            campaign_id,
            xp_current: 0,
            xp_total: 0,
            cool_points: 0,
            version: 0,
        }
    }

    /// Set current and total experience.
    pub fn with_xp(mut self, current: u32, total: u32) -> Self {
        self.xp_current = current;
        self.xp_total = total;
        self
    }
}
