//! Campaign experience ledger.
//!
//! Every mutation reads the wallet, applies the change, and saves it with a
//! compare-and-swap on the wallet's version.

use nc_core::{CampaignExperience, CampaignId, UserId, WalletStore};
use tracing::debug;

use crate::error::{EconomyError, EconomyResult};

/// XP granted per cool point.
pub const COOL_POINT_VALUE: u32 = 10;

/// Reads and writes experience wallets through a [`WalletStore`].
pub struct ExperienceLedger<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: WalletStore + ?Sized> ExperienceLedger<'a, S> {
    /// Wrap a wallet store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The wallet for (user, campaign); an empty one if none was saved yet.
    pub async fn wallet(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> EconomyResult<CampaignExperience> {
        Ok(self
            .store
            .wallet(user_id, campaign_id)
            .await?
            .unwrap_or_else(|| CampaignExperience::new(user_id, campaign_id)))
    }

    /// Spend `amount` XP. Fails without writing if the wallet cannot cover it.
    pub async fn spend_xp(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
        amount: u32,
    ) -> EconomyResult<CampaignExperience> {
        let mut wallet = self.wallet(user_id, campaign_id).await?;
        if amount > wallet.xp_current {
            return Err(EconomyError::NotEnoughXp {
                current: wallet.xp_current,
                required: amount,
            });
        }
        wallet.xp_current -= amount;
        debug!(%user_id, %campaign_id, amount, remaining = wallet.xp_current, "spent xp");
        Ok(self.store.save_wallet(&wallet).await?)
    }

    /// Credit `amount` XP. `update_total` also raises lifetime experience.
    pub async fn add_xp(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
        amount: u32,
        update_total: bool,
    ) -> EconomyResult<CampaignExperience> {
        let mut wallet = self.wallet(user_id, campaign_id).await?;
        wallet.xp_current = wallet.xp_current.saturating_add(amount);
        if update_total {
            wallet.xp_total = wallet.xp_total.saturating_add(amount);
        }
        debug!(%user_id, %campaign_id, amount, update_total, "added xp");
        Ok(self.store.save_wallet(&wallet).await?)
    }

    /// Award cool points; each one is also worth [`COOL_POINT_VALUE`] XP.
    pub async fn add_cool_points(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
        amount: u32,
    ) -> EconomyResult<CampaignExperience> {
        let mut wallet = self.wallet(user_id, campaign_id).await?;
        let xp = amount.saturating_mul(COOL_POINT_VALUE);
        wallet.cool_points = wallet.cool_points.saturating_add(amount);
        wallet.xp_current = wallet.xp_current.saturating_add(xp);
        wallet.xp_total = wallet.xp_total.saturating_add(xp);
        debug!(%user_id, %campaign_id, amount, xp, "added cool points");
        Ok(self.store.save_wallet(&wallet).await?)
    }
}
