use anchor_lang::prelude::*;

use crate::constants::MAX_BENEFICIARIES;
use crate::error::VestingError;
use crate::state::{AllocationRule, BeneficiaryEntry, Category, Registry, ScheduleStatus};
use crate::utils::digest;

/// Single engine state PDA: manager, category rules, schedule and pool bookkeeping.
#[account]
pub struct EngineState {
    /// Token mint being vested.
    pub mint: Pubkey,
    /// Manager authority (registers beneficiaries, activates the schedule).
    pub manager: Pubkey,
    /// Allocation rule per category, indexed by `Category::index`.
    pub category_rules: [AllocationRule; 3],
    /// Mint supply captured at init; basis-point rules resolve against it.
    pub supply_snapshot: u64,
    pub schedule: ScheduleStatus,
    /// Sum of every registered `total_allocation`.
    pub allocated_total: u64,
    /// Sum of every beneficiary's `claimed_amount`.
    pub claimed_total: u64,
    pub beneficiary_count: u16,
    /// blake3 digest of the registry frozen at activation (zero before).
    pub registry_digest: [u8; 32],
    pub bump: u8,
    pub vault_bump: u8,
}

impl EngineState {
    pub const SIZE: usize =
        32 +                            // mint
        32 +                            // manager
        3 * AllocationRule::SIZE +      // category_rules
        8 +                             // supply_snapshot
        ScheduleStatus::SIZE +          // schedule
        8 +                             // allocated_total
        8 +                             // claimed_total
        2 +                             // beneficiary_count
        32 +                            // registry_digest
        1 +                             // bump
        1;                              // vault_bump

    pub fn ensure_manager(&self, caller: &Pubkey) -> core::result::Result<(), VestingError> {
        if *caller != self.manager {
            return Err(VestingError::Unauthorized);
        }
        Ok(())
    }

    pub fn allocation_for(&self, category: Category) -> core::result::Result<u64, VestingError> {
        self.category_rules[category.index()].resolve(self.supply_snapshot)
    }

    /// Tokens still owed to beneficiaries (allocated but not yet claimed).
    pub fn outstanding(&self) -> core::result::Result<u64, VestingError> {
        self.allocated_total
            .checked_sub(self.claimed_total)
            .ok_or(VestingError::MathOverflow)
    }

    /// Vault tokens not backing any outstanding entitlement.
    pub fn surplus(&self, vault_balance: u64) -> core::result::Result<u64, VestingError> {
        Ok(vault_balance.saturating_sub(self.outstanding()?))
    }

    /// Adds `wallet` to the registry with the allocation of `category_tag`.
    /// No tokens move; the allocation is a reservation against the vault.
    pub fn register_beneficiary(
        &mut self,
        registry: &mut Registry,
        caller: &Pubkey,
        wallet: Pubkey,
        category_tag: u8,
    ) -> core::result::Result<BeneficiaryEntry, VestingError> {
        self.ensure_manager(caller)?;
        if self.schedule.is_started() {
            return Err(VestingError::AlreadyActivated);
        }
        if wallet == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        let category = Category::try_from(category_tag)?;
        if registry.contains(&wallet) {
            return Err(VestingError::AlreadyRegistered);
        }
        if registry.entries.len() >= MAX_BENEFICIARIES {
            return Err(VestingError::RegistryFull);
        }

        let total_allocation = self.allocation_for(category)?;
        if total_allocation == 0 {
            return Err(VestingError::InvalidAllocation);
        }
        let allocated_total = self
            .allocated_total
            .checked_add(total_allocation)
            .ok_or(VestingError::MathOverflow)?;
        let beneficiary_count = self
            .beneficiary_count
            .checked_add(1)
            .ok_or(VestingError::MathOverflow)?;

        let entry = BeneficiaryEntry {
            wallet,
            category,
            total_allocation,
            claimed_amount: 0,
        };
        registry.entries.push(entry);
        self.allocated_total = allocated_total;
        self.beneficiary_count = beneficiary_count;
        Ok(entry)
    }

    /// One-shot `Unstarted -> Active` transition starting the clock at `now_ts`.
    /// The vault must already cover every registered allocation.
    pub fn activate_schedule(
        &mut self,
        registry: &Registry,
        caller: &Pubkey,
        now_ts: i64,
        cliff_duration: i64,
        total_duration: i64,
        vault_balance: u64,
    ) -> core::result::Result<(), VestingError> {
        self.ensure_manager(caller)?;
        let next = self.schedule.activated(now_ts, cliff_duration, total_duration)?;
        if vault_balance < self.allocated_total {
            return Err(VestingError::VaultUnderfunded);
        }

        self.schedule = next;
        self.registry_digest = digest::registry_digest(&registry.entries);
        Ok(())
    }

    /// Settles `vested(now) - claimed` for `wallet` and returns the amount owed.
    ///
    /// Bookkeeping is updated here, before the caller performs the token
    /// transfer; on any error nothing is mutated.
    pub fn settle_claim(
        &mut self,
        registry: &mut Registry,
        wallet: &Pubkey,
        now_ts: i64,
        vault_balance: u64,
    ) -> core::result::Result<u64, VestingError> {
        if !self.schedule.is_started() {
            return Err(VestingError::NotStarted);
        }
        let schedule = self.schedule;
        let entry = registry
            .find_mut(wallet)
            .ok_or(VestingError::UnknownBeneficiary)?;

        let payable = entry.claimable(&schedule, now_ts)?;
        if payable == 0 {
            return Err(VestingError::NothingToClaim);
        }
        if payable > vault_balance {
            return Err(VestingError::InsufficientVaultBalance);
        }

        let claimed_amount = entry
            .claimed_amount
            .checked_add(payable)
            .ok_or(VestingError::MathOverflow)?;
        let claimed_total = self
            .claimed_total
            .checked_add(payable)
            .ok_or(VestingError::MathOverflow)?;

        entry.claimed_amount = claimed_amount;
        self.claimed_total = claimed_total;
        Ok(payable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;

    fn engine(manager: Pubkey) -> EngineState {
        EngineState {
            mint: Pubkey::new_unique(),
            manager,
            category_rules: [
                AllocationRule::Fixed { amount: 1_000 },
                AllocationRule::BasisPoints { bps: 250 },
                AllocationRule::Fixed { amount: 77 },
            ],
            supply_snapshot: 1_000_000,
            schedule: ScheduleStatus::Unstarted,
            allocated_total: 0,
            claimed_total: 0,
            beneficiary_count: 0,
            registry_digest: [0u8; 32],
            bump: 255,
            vault_bump: 254,
        }
    }

    fn empty_registry() -> Registry {
        Registry { entries: Vec::new() }
    }

    fn snapshot<T: AnchorSerialize>(v: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        v.serialize(&mut buf).unwrap();
        buf
    }

    #[test]
    fn registration_resolves_category_rules() {
        let manager = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();

        let seed = st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 0).unwrap();
        let team = st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 1).unwrap();
        let advisor = st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 2).unwrap();

        assert_eq!(seed.category, Category::Seed);
        assert_eq!(seed.total_allocation, 1_000);
        assert_eq!(team.total_allocation, 25_000);
        assert_eq!(advisor.total_allocation, 77);
        assert_eq!(seed.claimed_amount, 0);

        assert_eq!(reg.entries.len(), 3);
        assert_eq!(st.beneficiary_count, 3);
        assert_eq!(st.allocated_total, 1_000 + 25_000 + 77);
    }

    #[test]
    fn registration_rejections_leave_state_unchanged() {
        let manager = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, wallet, 0).unwrap();

        let before = (snapshot(&st), snapshot(&reg));

        let stranger = Pubkey::new_unique();
        assert!(matches!(
            st.register_beneficiary(&mut reg, &stranger, Pubkey::new_unique(), 0),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            st.register_beneficiary(&mut reg, &manager, wallet, 1),
            Err(VestingError::AlreadyRegistered)
        ));
        assert!(matches!(
            st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 3),
            Err(VestingError::InvalidCategory)
        ));
        assert!(matches!(
            st.register_beneficiary(&mut reg, &manager, Pubkey::default(), 0),
            Err(VestingError::InvalidPubkey)
        ));

        assert_eq!((snapshot(&st), snapshot(&reg)), before);
    }

    #[test]
    fn registry_capacity_is_enforced() {
        let manager = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        for _ in 0..MAX_BENEFICIARIES {
            st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 2).unwrap();
        }
        assert!(matches!(
            st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 2),
            Err(VestingError::RegistryFull)
        ));
        assert_eq!(reg.entries.len(), MAX_BENEFICIARIES);
    }

    #[test]
    fn registration_closes_at_activation() {
        let manager = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 0).unwrap();
        st.activate_schedule(&reg, &manager, T0, 5, 15, 1_000).unwrap();

        assert!(matches!(
            st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 0),
            Err(VestingError::AlreadyActivated)
        ));
        assert_eq!(reg.entries.len(), 1);
    }

    #[test]
    fn only_manager_activates_and_only_once() {
        let manager = Pubkey::new_unique();
        let mut st = engine(manager);
        let reg = empty_registry();

        let before = snapshot(&st);
        assert!(matches!(
            st.activate_schedule(&reg, &Pubkey::new_unique(), T0, 5, 15, 0),
            Err(VestingError::Unauthorized)
        ));
        assert!(matches!(
            st.activate_schedule(&reg, &manager, T0, 16, 15, 0),
            Err(VestingError::InvalidSchedule)
        ));
        assert_eq!(snapshot(&st), before);

        st.activate_schedule(&reg, &manager, T0, 5, 15, 0).unwrap();
        assert!(st.schedule.is_started());

        let after = snapshot(&st);
        assert!(matches!(
            st.activate_schedule(&reg, &manager, T0 + 100, 0, 1, 0),
            Err(VestingError::AlreadyActivated)
        ));
        assert_eq!(snapshot(&st), after);
    }

    #[test]
    fn activation_requires_funded_vault_and_freezes_digest() {
        let manager = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 0).unwrap();
        st.register_beneficiary(&mut reg, &manager, Pubkey::new_unique(), 2).unwrap();

        assert!(matches!(
            st.activate_schedule(&reg, &manager, T0, 5, 15, 1_076),
            Err(VestingError::VaultUnderfunded)
        ));
        assert!(!st.schedule.is_started());
        assert_eq!(st.registry_digest, [0u8; 32]);

        st.activate_schedule(&reg, &manager, T0, 5, 15, 1_077).unwrap();
        assert_eq!(st.registry_digest, digest::registry_digest(&reg.entries));
        assert_ne!(st.registry_digest, [0u8; 32]);
    }

    #[test]
    fn claim_before_activation_or_unknown_fails() {
        let manager = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, wallet, 0).unwrap();

        assert!(matches!(
            st.settle_claim(&mut reg, &wallet, T0, u64::MAX),
            Err(VestingError::NotStarted)
        ));

        st.activate_schedule(&reg, &manager, T0, 0, 10, 1_000).unwrap();
        assert!(matches!(
            st.settle_claim(&mut reg, &Pubkey::new_unique(), T0 + 5, u64::MAX),
            Err(VestingError::UnknownBeneficiary)
        ));
    }

    #[test]
    fn cliff_scenario_matches_schedule() {
        let manager = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, wallet, 0).unwrap();
        st.activate_schedule(&reg, &manager, T0, 5, 15, 1_000).unwrap();

        let mut vault = 1_000u64;

        // Inside the cliff.
        assert!(matches!(
            st.settle_claim(&mut reg, &wallet, T0 + 3, vault),
            Err(VestingError::NothingToClaim)
        ));
        assert_eq!(reg.find(&wallet).unwrap().claimed_amount, 0);

        let paid = st.settle_claim(&mut reg, &wallet, T0 + 10, vault).unwrap();
        assert_eq!(paid, 666);
        vault -= paid;
        assert_eq!(reg.find(&wallet).unwrap().claimed_amount, 666);

        // Immediate second claim at the same instant pays nothing.
        assert!(matches!(
            st.settle_claim(&mut reg, &wallet, T0 + 10, vault),
            Err(VestingError::NothingToClaim)
        ));

        let paid = st.settle_claim(&mut reg, &wallet, T0 + 20, vault).unwrap();
        assert_eq!(paid, 334);
        vault -= paid;
        assert_eq!(reg.find(&wallet).unwrap().claimed_amount, 1_000);
        assert_eq!(st.claimed_total, 1_000);
        assert_eq!(vault, 0);

        assert!(matches!(
            st.settle_claim(&mut reg, &wallet, T0 + 10_000, vault),
            Err(VestingError::NothingToClaim)
        ));
    }

    #[test]
    fn claim_only_touches_its_own_entry() {
        let manager = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, alice, 0).unwrap();
        st.register_beneficiary(&mut reg, &manager, bob, 0).unwrap();
        st.activate_schedule(&reg, &manager, T0, 0, 100, 2_000).unwrap();

        let bob_before = *reg.find(&bob).unwrap();
        st.settle_claim(&mut reg, &alice, T0 + 50, 2_000).unwrap();
        assert_eq!(*reg.find(&bob).unwrap(), bob_before);
        assert_eq!(reg.find(&alice).unwrap().claimed_amount, 500);
    }

    #[test]
    fn underfunded_vault_rejects_without_mutation() {
        let manager = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, wallet, 0).unwrap();
        st.activate_schedule(&reg, &manager, T0, 0, 10, 1_000).unwrap();

        let before = (snapshot(&st), snapshot(&reg));
        assert!(matches!(
            st.settle_claim(&mut reg, &wallet, T0 + 10, 999),
            Err(VestingError::InsufficientVaultBalance)
        ));
        assert_eq!((snapshot(&st), snapshot(&reg)), before);
    }

    #[test]
    fn partial_claims_converge_to_full_allocation() {
        let manager = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mut st = engine(manager);
        st.category_rules[2] = AllocationRule::Fixed { amount: 1_001 };
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, wallet, 2).unwrap();
        st.activate_schedule(&reg, &manager, T0, 3, 37, 1_001).unwrap();

        let mut total_paid = 0u64;
        for t in (0..37).step_by(2) {
            if let Ok(paid) = st.settle_claim(&mut reg, &wallet, T0 + t, u64::MAX) {
                total_paid += paid;
            }
            assert!(reg.find(&wallet).unwrap().claimed_amount <= 1_001);
        }
        total_paid += st.settle_claim(&mut reg, &wallet, T0 + 37, u64::MAX).unwrap();
        assert_eq!(total_paid, 1_001);
        assert_eq!(reg.find(&wallet).unwrap().claimed_amount, 1_001);
    }

    #[test]
    fn claims_never_exceed_allocations() {
        let manager = Pubkey::new_unique();
        let mut st = engine(manager);
        st.category_rules = [
            AllocationRule::Fixed { amount: 997 },
            AllocationRule::BasisPoints { bps: 13 },
            AllocationRule::Fixed { amount: 3 },
        ];
        let mut reg = empty_registry();
        let wallets: Vec<Pubkey> = (0..9).map(|_| Pubkey::new_unique()).collect();
        for (i, w) in wallets.iter().enumerate() {
            st.register_beneficiary(&mut reg, &manager, *w, (i % 3) as u8).unwrap();
        }
        let mut vault = st.allocated_total;
        st.activate_schedule(&reg, &manager, T0, 11, 101, vault).unwrap();

        for t in 0..=110 {
            for (i, w) in wallets.iter().enumerate() {
                // Stagger claim cadence per beneficiary.
                if t % (i as i64 + 1) != 0 {
                    continue;
                }
                if let Ok(paid) = st.settle_claim(&mut reg, w, T0 + t, vault) {
                    vault -= paid;
                }
            }
            let claimed: u64 = reg.entries.iter().map(|e| e.claimed_amount).sum();
            assert_eq!(claimed, st.claimed_total);
            assert!(st.claimed_total <= st.allocated_total);
        }

        assert_eq!(st.claimed_total, st.allocated_total);
        assert_eq!(vault, 0);
        assert_eq!(st.outstanding().unwrap(), 0);
    }

    #[test]
    fn surplus_excludes_outstanding_entitlements() {
        let manager = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mut st = engine(manager);
        let mut reg = empty_registry();
        st.register_beneficiary(&mut reg, &manager, wallet, 0).unwrap();

        assert_eq!(st.surplus(1_500).unwrap(), 500);
        assert_eq!(st.surplus(900).unwrap(), 0);

        st.activate_schedule(&reg, &manager, T0, 0, 10, 1_500).unwrap();
        let paid = st.settle_claim(&mut reg, &wallet, T0 + 4, 1_500).unwrap();
        assert_eq!(paid, 400);
        assert_eq!(st.outstanding().unwrap(), 600);
        assert_eq!(st.surplus(1_500 - paid).unwrap(), 500);
    }
}
